//! Core math types: `Vec3`, `Mat4`, plus a TRS `Transform` helper.
//!
//! Scalars are `f64`. Every operation is pure; the types are `Copy` and
//! nothing mutates its receiver.

pub mod error;
pub mod mat4;
pub mod transform;
pub mod vec3;

pub use error::{CoreError, CoreResult};
pub use mat4::Mat4;
pub use vec3::{Vec3, vec3};

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn model_view_projection_round_trips_through_inverse() {
        let model = transform::Transform::from_trs(
            vec3(0.5, 0.0, -1.0),
            vec3(0.0, FRAC_PI_2, 0.0),
            vec3(1.0, 2.0, 1.0),
        );
        let view = Mat4::look_at(vec3(0.0, 1.0, 4.0), Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective(60f64.to_radians(), 16.0 / 9.0, 0.1, 100.0);
        let mvp = proj * view * model.matrix();

        let local = vec3(0.25, -0.5, 0.1);
        let ndc = mvp.project_point(local);
        assert!([ndc.x, ndc.y, ndc.z].iter().all(|c| c.abs() < 1.0));

        let back = mvp.inverse().expect("mvp is invertible").project_point(ndc);
        assert!(back.abs_diff_eq(local, 1e-7));
    }

    #[test]
    fn degenerate_view_poisons_the_whole_chain() {
        // Looking straight up with Y as up: the view has no side axis.
        let view = Mat4::look_at(Vec3::ZERO, vec3(0.0, 3.0, 0.0), Vec3::Y);
        let proj = Mat4::perspective(1.0, 1.0, 0.1, 10.0);
        assert_eq!((proj * view).inverse(), Err(CoreError::SingularMatrix));
    }

    #[test]
    fn degenerate_projection_is_not_guarded() {
        let proj = Mat4::perspective(1.0, 0.0, 0.1, 10.0);
        let view = Mat4::look_at(vec3(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let p = (proj * view).project_point(vec3(0.1, 0.0, 0.0));
        assert!(!p.x.is_finite());
    }
}
