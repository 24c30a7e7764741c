// extensions/transform.rs
//
// Explicit hierarchical transform composition.
// A parent transform is a plain value passed down the call tree; children
// derive new values from it. There is no shared stack to push or pop.
//
// Usage:
//   let view = Transform::from(view_matrix);
//   let planet = view.translated(pos);
//   renderer.set_transform(planet.rotated_y(spin).scaled(size).matrix(), proj);
//   let moon = planet.translated(moon_offset);   // `planet` is untouched

use glam::{Mat4, Vec3};

/// An immutable model-view transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform(Mat4);

impl Default for Transform {
    fn default() -> Self {
        Self(Mat4::IDENTITY)
    }
}

impl From<Mat4> for Transform {
    fn from(m: Mat4) -> Self {
        Self(m)
    }
}

impl Transform {
    pub const IDENTITY: Self = Self(Mat4::IDENTITY);

    #[inline]
    pub fn translated(self, offset: Vec3) -> Self {
        Self(self.0 * Mat4::from_translation(offset))
    }

    /// Rotate about the local Y axis (radians).
    #[inline]
    pub fn rotated_y(self, angle: f32) -> Self {
        Self(self.0 * Mat4::from_rotation_y(angle))
    }

    /// Rotate about the local X axis (radians).
    #[inline]
    pub fn rotated_x(self, angle: f32) -> Self {
        Self(self.0 * Mat4::from_rotation_x(angle))
    }

    #[inline]
    pub fn scaled(self, s: f32) -> Self {
        Self(self.0 * Mat4::from_scale(Vec3::splat(s)))
    }

    #[inline]
    pub fn matrix(self) -> Mat4 {
        self.0
    }

    /// Where the local origin lands after the transform.
    #[inline]
    pub fn origin(self) -> Vec3 {
        self.0.transform_point3(Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn children_do_not_disturb_parent() {
        let parent = Transform::IDENTITY.translated(Vec3::new(10.0, 0.0, 0.0));
        let _child = parent.translated(Vec3::new(0.0, 0.0, 5.0)).scaled(3.0);
        assert!(approx(parent.origin(), Vec3::new(10.0, 0.0, 0.0)));
    }

    #[test]
    fn composition_applies_parent_first() {
        let parent = Transform::IDENTITY.scaled(0.1);
        let placed = parent.translated(Vec3::new(40.0, 0.0, 0.0));
        assert!(approx(placed.origin(), Vec3::new(4.0, 0.0, 0.0)));
    }

    #[test]
    fn rotation_then_translation_moves_in_rotated_frame() {
        let t = Transform::IDENTITY
            .rotated_y(std::f32::consts::FRAC_PI_2)
            .translated(Vec3::new(0.0, 0.0, 1.0));
        assert!(approx(t.origin(), Vec3::new(1.0, 0.0, 0.0)));
    }
}
