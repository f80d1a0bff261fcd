//! Errors produced by the math core.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// Determinant is exactly zero; the matrix has no inverse.
    #[error("matrix is singular and cannot be inverted")]
    SingularMatrix,

    /// A slice handed to a `TryFrom` conversion had the wrong element count.
    #[error("expected {expected} elements, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_readable() {
        assert_eq!(
            CoreError::SingularMatrix.to_string(),
            "matrix is singular and cannot be inverted"
        );
        let e = CoreError::InvalidLength {
            expected: 16,
            actual: 3,
        };
        assert_eq!(e.to_string(), "expected 16 elements, got 3");
    }
}
