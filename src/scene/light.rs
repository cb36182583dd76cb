//! Light data for the scene

use bevy_ecs::prelude::*;
use glam::Vec3;

/// Point light component
/// Position comes from the Transform component on the same entity
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PointLight {
    pub color: Vec3,
    pub intensity: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}
