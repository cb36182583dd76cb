//! The "Part": a single hand-built triangle in the XY plane facing +Z.

use glam::{Vec2, Vec3, Vec4};

use super::error::MeshResult;
use super::mesh::{InterleavedMesh, InterleavedMeshBuilder, Triangle};
use super::vertex::Vertex;

pub const PART_LABEL: &str = "part";

/// The three Part vertices: origin, +Y and +X corners.
pub fn part_vertices() -> [Vertex; 3] {
    let normal = Vec3::Z;
    let tangent = Vec4::new(0.0, 0.0, -1.0, 1.0);
    let uv = Vec2::new(1.0, 0.0);
    [
        Vertex::new(Vec3::ZERO, normal, tangent, uv),
        Vertex::new(Vec3::Y, normal, tangent, uv),
        Vertex::new(Vec3::X, normal, tangent, uv),
    ]
}

pub fn part_triangles() -> [Triangle; 1] {
    [[0, 2, 1]]
}

impl InterleavedMesh {
    /// Build the Part mesh.
    pub fn part() -> MeshResult<Self> {
        InterleavedMeshBuilder::new()
            .with_label(PART_LABEL)
            .build(&part_vertices(), &part_triangles())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::VertexAttributeSemantic;

    #[test]
    fn test_part_mesh() {
        let mesh = InterleavedMesh::part().unwrap();

        assert_eq!(mesh.label(), Some(PART_LABEL));
        assert_eq!(mesh.vertex_buffer().len(), 144);
        assert_eq!(mesh.index_buffer().as_bytes(), &[0, 0, 2, 0, 1, 0]);

        let position = mesh.attribute(VertexAttributeSemantic::Position).unwrap();
        assert_eq!(position.byte_offset(), Some(0));
        assert_eq!(position.byte_stride(), Some(48));
        assert_eq!(position.count, 3);
        assert_eq!(mesh.index_attribute().count, 3);
    }

    #[test]
    fn test_part_vertices_share_frame() {
        for v in part_vertices() {
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
            assert_eq!(v.tangent, [0.0, 0.0, -1.0, 1.0]);
            assert_eq!(v.uv, [1.0, 0.0]);
        }
    }
}
