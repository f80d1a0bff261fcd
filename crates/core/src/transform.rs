use crate::{Mat4, Vec3};

/// Translation, Euler rotation (radians, XYZ order) and non-uniform scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    /// Euler angles in radians (XYZ order).
    pub rotation_euler: Vec3,
    pub scale: Vec3,
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_euler: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    #[inline]
    pub fn from_trs(translation: Vec3, rotation_euler: Vec3, scale: Vec3) -> Self {
        Self {
            translation,
            rotation_euler,
            scale,
        }
    }

    /// Rotation part only: `Rx * Ry * Rz`.
    #[inline]
    pub fn rotation(&self) -> Mat4 {
        let r = self.rotation_euler;
        Mat4::rotation_x(r.x) * Mat4::rotation_y(r.y) * Mat4::rotation_z(r.z)
    }

    /// Build matrix = T * R * S (column-major).
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::translation(self.translation) * self.rotation() * Mat4::scaling(self.scale)
    }

    /// Object-space point to world space.
    #[inline]
    pub fn apply(&self, p: Vec3) -> Vec3 {
        self.matrix().transform_point(p)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
