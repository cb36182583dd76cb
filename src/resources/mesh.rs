//! Interleaved mesh buffers and the builder that produces them.
//!
//! [`InterleavedMeshBuilder::build`] serializes a list of [`Vertex`] records
//! and a triangle list into two little-endian byte buffers:
//!
//! - vertex buffer: `vertex_count * 48` bytes, one record per vertex with
//!   position, normal, tangent and uv in that order
//! - index buffer: `triangle_count * 6` bytes of u16 indices
//!
//! together with the five [`AttributeDescriptor`]s derived from
//! [`VertexLayout::interleaved`].

use std::sync::Arc;

use super::error::{MeshError, MeshResult};
use super::layout::{AttributeDescriptor, AttributeKind, VertexAttributeSemantic, VertexLayout};
use super::vertex::Vertex;

/// Three indices into the vertex buffer forming one triangle.
pub type Triangle = [u16; 3];

/// Largest vertex count a u16 index buffer can address.
pub const MAX_VERTICES: usize = u16::MAX as usize + 1;

/// Raw interleaved vertex bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexBuffer {
    data: Vec<u8>,
    count: u32,
}

impl VertexBuffer {
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Byte length
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of vertex records
    pub fn count(&self) -> u32 {
        self.count
    }
}

/// Raw u16 index bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexBuffer {
    data: Vec<u8>,
    count: u32,
}

impl IndexBuffer {
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Byte length
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of indices
    pub fn count(&self) -> u32 {
        self.count
    }
}

/// A static triangle mesh with interleaved vertex data and u16 indices.
///
/// Immutable once built. Descriptors reference the buffers by role and can be
/// regenerated from the layout with [`VertexLayout::descriptors`].
#[derive(Debug, Clone, PartialEq)]
pub struct InterleavedMesh {
    layout: Arc<VertexLayout>,
    vertex_buffer: VertexBuffer,
    index_buffer: IndexBuffer,
    attributes: [AttributeDescriptor; 5],
    label: Option<String>,
}

impl InterleavedMesh {
    pub fn layout(&self) -> &Arc<VertexLayout> {
        &self.layout
    }

    pub fn vertex_buffer(&self) -> &VertexBuffer {
        &self.vertex_buffer
    }

    pub fn index_buffer(&self) -> &IndexBuffer {
        &self.index_buffer
    }

    /// Position, normal, tangent, texcoord and index descriptors, in that order.
    pub fn attributes(&self) -> &[AttributeDescriptor; 5] {
        &self.attributes
    }

    pub fn attribute(&self, semantic: VertexAttributeSemantic) -> Option<&AttributeDescriptor> {
        self.attributes
            .iter()
            .find(|desc| desc.semantic() == Some(semantic))
    }

    pub fn index_attribute(&self) -> &AttributeDescriptor {
        &self.attributes[4]
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_buffer.count
    }

    pub fn index_count(&self) -> u32 {
        self.index_buffer.count
    }

    pub fn triangle_count(&self) -> u32 {
        self.index_buffer.count / 3
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Decode the vertex buffer through this mesh's descriptors.
    pub fn read_vertices(&self) -> MeshResult<Vec<Vertex>> {
        decode_vertices(self.vertex_buffer.as_bytes(), &self.attributes)
    }

    /// Decode the index buffer through this mesh's index descriptor.
    pub fn read_indices(&self) -> MeshResult<Vec<u16>> {
        decode_indices(self.index_buffer.as_bytes(), self.index_attribute())
    }

    /// Split into the vertex buffer, index buffer and descriptors.
    pub fn into_parts(self) -> (VertexBuffer, IndexBuffer, [AttributeDescriptor; 5]) {
        (self.vertex_buffer, self.index_buffer, self.attributes)
    }
}

/// Builds [`InterleavedMesh`] values from vertex records and triangles.
///
/// # Example
///
/// ```ignore
/// let mesh = InterleavedMeshBuilder::new()
///     .with_label("part")
///     .build(&vertices, &[[0, 2, 1]])?;
/// assert_eq!(mesh.vertex_buffer().len(), vertices.len() * 48);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InterleavedMeshBuilder {
    label: Option<String>,
}

impl InterleavedMeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a debug label carried into the built mesh.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Serialize `vertices` and `triangles` into interleaved buffers.
    ///
    /// Fails with [`MeshError::InvalidInput`] when `vertices` is empty, has
    /// more entries than u16 indices can address, or when a triangle
    /// references a vertex that does not exist.
    pub fn build(&self, vertices: &[Vertex], triangles: &[Triangle]) -> MeshResult<InterleavedMesh> {
        if let Err(err) = validate(vertices, triangles) {
            log::warn!(
                "rejected mesh {}: {}",
                self.label.as_deref().unwrap_or("<unlabeled>"),
                err
            );
            return Err(err);
        }

        let layout = VertexLayout::interleaved();
        let vertex_count = vertices.len() as u32;
        let index_count = u32::try_from(triangles.len() * 3).map_err(|_| {
            MeshError::InvalidInput(format!("{} triangles overflow the index count", triangles.len()))
        })?;
        let attributes = layout.descriptors(vertex_count, index_count)?;

        let vertex_buffer = VertexBuffer {
            data: f32_le_bytes(bytemuck::cast_slice(vertices)),
            count: vertex_count,
        };
        let index_buffer = IndexBuffer {
            data: u16_le_bytes(bytemuck::cast_slice(triangles)),
            count: index_count,
        };

        log::debug!(
            "built mesh {}: {} vertices ({} bytes), {} triangles ({} bytes)",
            self.label.as_deref().unwrap_or("<unlabeled>"),
            vertex_count,
            vertex_buffer.len(),
            triangles.len(),
            index_buffer.len()
        );

        Ok(InterleavedMesh {
            layout,
            vertex_buffer,
            index_buffer,
            attributes,
            label: self.label.clone(),
        })
    }
}

fn validate(vertices: &[Vertex], triangles: &[Triangle]) -> MeshResult<()> {
    if vertices.is_empty() {
        return Err(MeshError::InvalidInput("vertex list is empty".to_string()));
    }
    if vertices.len() > MAX_VERTICES {
        return Err(MeshError::InvalidInput(format!(
            "{} vertices exceed the u16 index range ({} max)",
            vertices.len(),
            MAX_VERTICES
        )));
    }
    for (i, triangle) in triangles.iter().enumerate() {
        if let Some(&index) = triangle.iter().find(|&&idx| idx as usize >= vertices.len()) {
            return Err(MeshError::InvalidInput(format!(
                "triangle {} references vertex {} but only {} vertices exist",
                i,
                index,
                vertices.len()
            )));
        }
    }
    Ok(())
}

fn f32_le_bytes(values: &[f32]) -> Vec<u8> {
    if cfg!(target_endian = "little") {
        bytemuck::cast_slice(values).to_vec()
    } else {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }
}

fn u16_le_bytes(values: &[u16]) -> Vec<u8> {
    if cfg!(target_endian = "little") {
        bytemuck::cast_slice(values).to_vec()
    } else {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }
}

/// Decode interleaved vertex bytes using the descriptors' offsets and strides.
///
/// The vertex count is taken from the position descriptor.
pub fn decode_vertices(bytes: &[u8], descriptors: &[AttributeDescriptor]) -> MeshResult<Vec<Vertex>> {
    let find = |semantic: VertexAttributeSemantic| {
        descriptors
            .iter()
            .find(|desc| desc.semantic() == Some(semantic))
            .ok_or_else(|| MeshError::InvalidInput(format!("no {:?} descriptor", semantic)))
    };
    let position = find(VertexAttributeSemantic::Position)?;
    let normal = find(VertexAttributeSemantic::Normal)?;
    let tangent = find(VertexAttributeSemantic::Tangent)?;
    let texcoord = find(VertexAttributeSemantic::TexCoord)?;

    (0..position.count as usize)
        .map(|i| {
            let mut vertex = Vertex::default();
            read_floats(bytes, position, i, &mut vertex.position)?;
            read_floats(bytes, normal, i, &mut vertex.normal)?;
            read_floats(bytes, tangent, i, &mut vertex.tangent)?;
            read_floats(bytes, texcoord, i, &mut vertex.uv)?;
            Ok(vertex)
        })
        .collect()
}

/// Decode a u16 index buffer described by `descriptor`.
pub fn decode_indices(bytes: &[u8], descriptor: &AttributeDescriptor) -> MeshResult<Vec<u16>> {
    if descriptor.kind != AttributeKind::Index {
        return Err(MeshError::InvalidInput(
            "descriptor does not describe an index buffer".to_string(),
        ));
    }
    let len = descriptor.count as usize * 2;
    let data = bytes.get(..len).ok_or_else(|| {
        MeshError::InvalidInput(format!(
            "index buffer holds {} bytes, descriptor needs {}",
            bytes.len(),
            len
        ))
    })?;
    Ok(data
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect())
}

fn read_floats(
    bytes: &[u8],
    desc: &AttributeDescriptor,
    index: usize,
    out: &mut [f32],
) -> MeshResult<()> {
    let AttributeKind::Vertex {
        semantic,
        byte_offset,
        byte_stride,
    } = desc.kind
    else {
        return Err(MeshError::InvalidInput(
            "index descriptor used for vertex data".to_string(),
        ));
    };
    if desc.vertex_size as usize != out.len() {
        return Err(MeshError::InvalidInput(format!(
            "{:?} descriptor has {} components, expected {}",
            semantic,
            desc.vertex_size,
            out.len()
        )));
    }

    let start = index * byte_stride as usize + byte_offset as usize;
    let end = start + out.len() * 4;
    let chunk = bytes.get(start..end).ok_or_else(|| {
        MeshError::InvalidInput(format!(
            "vertex {} {:?} lies past the end of a {}-byte buffer",
            index,
            semantic,
            bytes.len()
        ))
    })?;
    for (dst, src) in out.iter_mut().zip(chunk.chunks_exact(4)) {
        *dst = f32::from_le_bytes([src[0], src[1], src[2], src[3]]);
    }
    Ok(())
}
