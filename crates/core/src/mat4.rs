//! 4x4 `f64` matrix with transform factories.
//!
//! Storage is column-major: flat index `col * 4 + row` holds entry
//! `(row, col)`, i.e. `[col0, col1, col2, col3]`. This is the layout GPU
//! uniform buffers expect and it is what every factory below writes.
//!
//! Conventions: right-handed, column vectors (`M * v`), OpenGL clip space
//! (z in `[-1, 1]`). Angles are radians.
//!
//! Like [`Vec3`], every operation is pure and returns a new matrix.

use std::ops::Mul;

use bytemuck::{Pod, Zeroable};

use crate::error::{CoreError, CoreResult};
use crate::vec3::Vec3;

#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    m: [f64; 16],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self::from_cols_array([
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);

    pub const ZERO: Self = Self::from_cols_array([0.0; 16]);

    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Build from 16 numbers in column-major order.
    #[inline]
    pub const fn from_cols_array(m: [f64; 16]) -> Self {
        Self { m }
    }

    /// The 16 numbers in column-major order.
    #[inline]
    pub const fn to_cols_array(&self) -> [f64; 16] {
        self.m
    }

    /// Build from rows as they would be written on paper.
    pub fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        let mut m = [0.0; 16];
        for (r, row) in rows.iter().enumerate() {
            for (c, v) in row.iter().enumerate() {
                m[c * 4 + r] = *v;
            }
        }
        Self { m }
    }

    pub fn to_rows(&self) -> [[f64; 4]; 4] {
        [self.row(0), self.row(1), self.row(2), self.row(3)]
    }

    /// Entry at `(row, col)`. Panics if either index is out of `0..4`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < 4 && col < 4, "Mat4 index ({row}, {col}) out of range");
        self.m[col * 4 + row]
    }

    /// Row `r` as written on paper. Panics if `r >= 4`.
    #[inline]
    pub fn row(&self, r: usize) -> [f64; 4] {
        [self.get(r, 0), self.get(r, 1), self.get(r, 2), self.get(r, 3)]
    }

    /// Column `c`, i.e. flat elements `c * 4..c * 4 + 4`. Panics if `c >= 4`.
    #[inline]
    pub fn col(&self, c: usize) -> [f64; 4] {
        [self.get(0, c), self.get(1, c), self.get(2, c), self.get(3, c)]
    }

    /// Matrix product `a * b`. Applying the result to a point applies `b`
    /// first, then `a`.
    pub fn multiply(a: &Mat4, b: &Mat4) -> Mat4 {
        let mut out = [0.0; 16];
        for c in 0..4 {
            for r in 0..4 {
                out[c * 4 + r] = a.m[r] * b.m[c * 4]
                    + a.m[4 + r] * b.m[c * 4 + 1]
                    + a.m[8 + r] * b.m[c * 4 + 2]
                    + a.m[12 + r] * b.m[c * 4 + 3];
            }
        }
        Mat4 { m: out }
    }

    pub fn transpose(&self) -> Mat4 {
        let m = &self.m;
        #[rustfmt::skip]
        let t = [
            m[0], m[4], m[8],  m[12],
            m[1], m[5], m[9],  m[13],
            m[2], m[6], m[10], m[14],
            m[3], m[7], m[11], m[15],
        ];
        Mat4 { m: t }
    }

    /// Adjugate (transposed cofactor matrix), in the same flat layout.
    ///
    /// The closed form is symmetric under transposition, so it holds for
    /// column-major storage as written.
    fn adjugate(&self) -> [f64; 16] {
        let m = &self.m;
        let mut inv = [0.0; 16];

        inv[0] = m[5] * m[10] * m[15] - m[5] * m[11] * m[14] - m[9] * m[6] * m[15]
            + m[9] * m[7] * m[14]
            + m[13] * m[6] * m[11]
            - m[13] * m[7] * m[10];

        inv[4] = -m[4] * m[10] * m[15] + m[4] * m[11] * m[14] + m[8] * m[6] * m[15]
            - m[8] * m[7] * m[14]
            - m[12] * m[6] * m[11]
            + m[12] * m[7] * m[10];

        inv[8] = m[4] * m[9] * m[15] - m[4] * m[11] * m[13] - m[8] * m[5] * m[15]
            + m[8] * m[7] * m[13]
            + m[12] * m[5] * m[11]
            - m[12] * m[7] * m[9];

        inv[12] = -m[4] * m[9] * m[14] + m[4] * m[10] * m[13] + m[8] * m[5] * m[14]
            - m[8] * m[6] * m[13]
            - m[12] * m[5] * m[10]
            + m[12] * m[6] * m[9];

        inv[1] = -m[1] * m[10] * m[15] + m[1] * m[11] * m[14] + m[9] * m[2] * m[15]
            - m[9] * m[3] * m[14]
            - m[13] * m[2] * m[11]
            + m[13] * m[3] * m[10];

        inv[5] = m[0] * m[10] * m[15] - m[0] * m[11] * m[14] - m[8] * m[2] * m[15]
            + m[8] * m[3] * m[14]
            + m[12] * m[2] * m[11]
            - m[12] * m[3] * m[10];

        inv[9] = -m[0] * m[9] * m[15] + m[0] * m[11] * m[13] + m[8] * m[1] * m[15]
            - m[8] * m[3] * m[13]
            - m[12] * m[1] * m[11]
            + m[12] * m[3] * m[9];

        inv[13] = m[0] * m[9] * m[14] - m[0] * m[10] * m[13] - m[8] * m[1] * m[14]
            + m[8] * m[2] * m[13]
            + m[12] * m[1] * m[10]
            - m[12] * m[2] * m[9];

        inv[2] = m[1] * m[6] * m[15] - m[1] * m[7] * m[14] - m[5] * m[2] * m[15]
            + m[5] * m[3] * m[14]
            + m[13] * m[2] * m[7]
            - m[13] * m[3] * m[6];

        inv[6] = -m[0] * m[6] * m[15] + m[0] * m[7] * m[14] + m[4] * m[2] * m[15]
            - m[4] * m[3] * m[14]
            - m[12] * m[2] * m[7]
            + m[12] * m[3] * m[6];

        inv[10] = m[0] * m[5] * m[15] - m[0] * m[7] * m[13] - m[4] * m[1] * m[15]
            + m[4] * m[3] * m[13]
            + m[12] * m[1] * m[7]
            - m[12] * m[3] * m[5];

        inv[14] = -m[0] * m[5] * m[14] + m[0] * m[6] * m[13] + m[4] * m[1] * m[14]
            - m[4] * m[2] * m[13]
            - m[12] * m[1] * m[6]
            + m[12] * m[2] * m[5];

        inv[3] = -m[1] * m[6] * m[11] + m[1] * m[7] * m[10] + m[5] * m[2] * m[11]
            - m[5] * m[3] * m[10]
            - m[9] * m[2] * m[7]
            + m[9] * m[3] * m[6];

        inv[7] = m[0] * m[6] * m[11] - m[0] * m[7] * m[10] - m[4] * m[2] * m[11]
            + m[4] * m[3] * m[10]
            + m[8] * m[2] * m[7]
            - m[8] * m[3] * m[6];

        inv[11] = -m[0] * m[5] * m[11] + m[0] * m[7] * m[9] + m[4] * m[1] * m[11]
            - m[4] * m[3] * m[9]
            - m[8] * m[1] * m[7]
            + m[8] * m[3] * m[5];

        inv[15] = m[0] * m[5] * m[10] - m[0] * m[6] * m[9] - m[4] * m[1] * m[10]
            + m[4] * m[2] * m[9]
            + m[8] * m[1] * m[6]
            - m[8] * m[2] * m[5];

        inv
    }

    /// Expansion along column 0 of `self` against row 0 of the adjugate.
    #[inline]
    fn det_from_adjugate(&self, adj: &[f64; 16]) -> f64 {
        self.m[0] * adj[0] + self.m[1] * adj[4] + self.m[2] * adj[8] + self.m[3] * adj[12]
    }

    pub fn determinant(&self) -> f64 {
        self.det_from_adjugate(&self.adjugate())
    }

    /// Inverse via the adjugate method.
    ///
    /// Fails with [`CoreError::SingularMatrix`] when the determinant is
    /// exactly zero. Nearly singular matrices are inverted as-is.
    pub fn inverse(&self) -> CoreResult<Mat4> {
        let adj = self.adjugate();
        let det = self.det_from_adjugate(&adj);
        if det == 0.0 {
            log::debug!("Refusing to invert singular matrix {:?}", self.m);
            return Err(CoreError::SingularMatrix);
        }
        log::trace!("Inverting matrix, det={det}");

        let inv_det = 1.0 / det;
        Ok(Mat4 {
            m: adj.map(|v| v * inv_det),
        })
    }

    #[inline]
    pub fn translation(v: Vec3) -> Mat4 {
        let mut m = Self::IDENTITY.m;
        m[12] = v.x;
        m[13] = v.y;
        m[14] = v.z;
        Mat4 { m }
    }

    #[inline]
    pub fn scaling(v: Vec3) -> Mat4 {
        let mut m = Self::IDENTITY.m;
        m[0] = v.x;
        m[5] = v.y;
        m[10] = v.z;
        Mat4 { m }
    }

    /// Counter-clockwise rotation about +X (looking down the axis).
    pub fn rotation_x(angle: f64) -> Mat4 {
        let (s, c) = angle.sin_cos();
        Self::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_y(angle: f64) -> Mat4 {
        let (s, c) = angle.sin_cos();
        Self::from_rows([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_z(angle: f64) -> Mat4 {
        let (s, c) = angle.sin_cos();
        Self::from_rows([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// OpenGL-style perspective projection, `fov_y` is the vertical field of
    /// view.
    ///
    /// Inputs are not validated: `near == far`, `aspect == 0` or
    /// `tan(fov_y / 2) == 0` yield infinities/NaN in the result.
    pub fn perspective(fov_y: f64, aspect: f64, near: f64, far: f64) -> Mat4 {
        let tan_half = (fov_y / 2.0).tan();
        let range_inv = 1.0 / (near - far);
        Self::from_rows([
            [1.0 / (aspect * tan_half), 0.0, 0.0, 0.0],
            [0.0, 1.0 / tan_half, 0.0, 0.0],
            [0.0, 0.0, (near + far) * range_inv, 2.0 * near * far * range_inv],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// OpenGL-style orthographic projection. Degenerate planes are not
    /// validated, same as [`Mat4::perspective`].
    pub fn orthographic(
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    ) -> Mat4 {
        let lr = 1.0 / (left - right);
        let bt = 1.0 / (bottom - top);
        let nf = 1.0 / (near - far);
        Self::from_rows([
            [-2.0 * lr, 0.0, 0.0, (left + right) * lr],
            [0.0, -2.0 * bt, 0.0, (top + bottom) * bt],
            [0.0, 0.0, 2.0 * nf, (far + near) * nf],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed view matrix looking from `eye` towards `center`.
    ///
    /// If `up` is parallel to the view direction the side axis collapses to
    /// zero and the resulting matrix is singular. That is not reported here.
    pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
        let f = (center - eye).normalize();
        let s = f.cross(up.normalize()).normalize();
        let u = s.cross(f);
        Self::from_rows([
            [s.x, s.y, s.z, -s.dot(eye)],
            [u.x, u.y, u.z, -u.dot(eye)],
            [-f.x, -f.y, -f.z, f.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Apply to a point (w = 1). The projective row is ignored.
    #[inline]
    pub fn transform_point(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0] * v.x + m[4] * v.y + m[8] * v.z + m[12],
            m[1] * v.x + m[5] * v.y + m[9] * v.z + m[13],
            m[2] * v.x + m[6] * v.y + m[10] * v.z + m[14],
        )
    }

    /// Apply to a direction (w = 0), ignoring translation.
    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0] * v.x + m[4] * v.y + m[8] * v.z,
            m[1] * v.x + m[5] * v.y + m[9] * v.z,
            m[2] * v.x + m[6] * v.y + m[10] * v.z,
        )
    }

    /// Apply to a point and perform the perspective divide.
    ///
    /// `w == 0` (a point on the eye plane) is not guarded.
    pub fn project_point(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        let w = m[3] * v.x + m[7] * v.y + m[11] * v.z + m[15];
        self.transform_point(v) / w
    }

    /// Component-wise comparison with an absolute tolerance.
    pub fn abs_diff_eq(&self, rhs: &Mat4, eps: f64) -> bool {
        self.m
            .iter()
            .zip(rhs.m.iter())
            .all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    #[inline]
    fn mul(self, rhs: Mat4) -> Mat4 {
        Mat4::multiply(&self, &rhs)
    }
}

impl Mul<Vec3> for Mat4 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.transform_point(rhs)
    }
}

impl From<[f64; 16]> for Mat4 {
    fn from(m: [f64; 16]) -> Self {
        Self::from_cols_array(m)
    }
}

impl From<Mat4> for [f64; 16] {
    fn from(m: Mat4) -> Self {
        m.to_cols_array()
    }
}

impl TryFrom<&[f64]> for Mat4 {
    type Error = CoreError;

    fn try_from(s: &[f64]) -> CoreResult<Self> {
        let m: [f64; 16] = s.try_into().map_err(|_| CoreError::InvalidLength {
            expected: 16,
            actual: s.len(),
        })?;
        Ok(Self { m })
    }
}
