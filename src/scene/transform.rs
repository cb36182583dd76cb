//! Transform component

use bevy_ecs::prelude::*;
use glam::{Mat4, Quat, Vec3};

/// Transform component for positioning entities in 3D space
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Set rotation from an axis and an angle in degrees.
    ///
    /// A zero or non-finite axis falls back to +Y.
    pub fn with_axis_angle_degrees(mut self, axis: Vec3, degrees: f32) -> Self {
        let axis = axis.try_normalize().unwrap_or(Vec3::Y);
        self.rotation = Quat::from_axis_angle(axis, degrees.to_radians());
        self
    }

    /// Get the model matrix for this transform
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_identity() {
        assert_eq!(Transform::default().matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_scale_then_rotate_then_translate() {
        let t = Transform::from_position(Vec3::new(5.0, 4.0, 0.0))
            .with_uniform_scale(2.0)
            .with_axis_angle_degrees(Vec3::Y, 90.0);

        // +X scaled to 2, rotated 90 degrees about +Y to -Z, then translated
        let p = t.matrix().transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(5.0, 4.0, -2.0), 1e-5));
    }

    #[test]
    fn test_zero_axis_falls_back_to_y() {
        let t = Transform::default().with_axis_angle_degrees(Vec3::ZERO, 25.0);
        assert!(t.rotation.is_finite());
        let expected = Transform::default().with_axis_angle_degrees(Vec3::Y, 25.0);
        assert!(t.rotation.abs_diff_eq(expected.rotation, 1e-6));
    }
}
