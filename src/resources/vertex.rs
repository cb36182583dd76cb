//! Interleaved vertex record

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3, Vec4};
use static_assertions::const_assert_eq;

/// One vertex of an interleaved mesh: position, normal, tangent, uv.
///
/// Fields are plain float arrays rather than glam vectors so the record has
/// no SIMD alignment padding. The field order is the serialized order.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    /// xyz = tangent direction, w = bitangent sign (handedness)
    pub tangent: [f32; 4],
    pub uv: [f32; 2],
}

/// Size in bytes of one serialized [`Vertex`].
pub const VERTEX_STRIDE: usize = (3 + 3 + 4 + 2) * std::mem::size_of::<f32>();

const_assert_eq!(std::mem::size_of::<Vertex>(), VERTEX_STRIDE);

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, tangent: Vec4, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            tangent: tangent.to_array(),
            uv: uv.to_array(),
        }
    }

    /// Flatten into the 12 components in serialized order
    pub fn components(&self) -> [f32; 12] {
        bytemuck::cast(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::offset_of;

    #[test]
    fn test_vertex_size_and_offsets() {
        assert_eq!(std::mem::size_of::<Vertex>(), 48);
        assert_eq!(offset_of!(Vertex, position), 0);
        assert_eq!(offset_of!(Vertex, normal), 12);
        assert_eq!(offset_of!(Vertex, tangent), 24);
        assert_eq!(offset_of!(Vertex, uv), 40);
    }

    #[test]
    fn test_vertex_components_order() {
        let v = Vertex::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec4::new(7.0, 8.0, 9.0, 10.0),
            Vec2::new(11.0, 12.0),
        );
        let expected: Vec<f32> = (1..=12).map(|i| i as f32).collect();
        assert_eq!(v.components().to_vec(), expected);
    }
}
