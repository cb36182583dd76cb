//! Interleaved vertex layout and the attribute descriptors derived from it.
//!
//! A [`VertexLayout`] describes where each field of a vertex record lives
//! inside one interleaved buffer. From a layout and the element counts of a
//! mesh, [`VertexLayout::descriptors`] produces the [`AttributeDescriptor`]s a
//! renderer needs to bind the vertex and index buffers:
//!
//! ```ignore
//! let layout = VertexLayout::interleaved();
//! let [position, normal, tangent, texcoord, index] = layout.descriptors(3, 3)?;
//! assert_eq!(tangent.byte_offset(), Some(24));
//! assert_eq!(index.byte_stride(), None);
//! ```
//!
//! Descriptors refer to their buffer by [`BufferRole`] only; they never own
//! the bytes and can be regenerated at any time.

use std::sync::{Arc, OnceLock};

use super::error::{MeshError, MeshResult};
use super::vertex::VERTEX_STRIDE;

/// Semantic meaning of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttributeSemantic {
    /// Vertex position (float3).
    Position,
    /// Vertex normal (float3).
    Normal,
    /// Vertex tangent (float4, w = handedness).
    Tangent,
    /// Texture coordinates (float2).
    TexCoord,
}

impl VertexAttributeSemantic {
    /// Conventional shader input name for this semantic.
    pub fn default_name(&self) -> &'static str {
        match self {
            Self::Position => "vertexPosition",
            Self::Normal => "vertexNormal",
            Self::Tangent => "vertexTangent",
            Self::TexCoord => "vertexTexCoord",
        }
    }
}

/// Format of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttributeFormat {
    /// Two 32-bit floats.
    Float2,
    /// Three 32-bit floats.
    Float3,
    /// Four 32-bit floats.
    Float4,
}

impl VertexAttributeFormat {
    /// Number of components.
    pub fn components(&self) -> u32 {
        match self {
            Self::Float2 => 2,
            Self::Float3 => 3,
            Self::Float4 => 4,
        }
    }

    /// Size in bytes of this format.
    pub fn size(&self) -> u32 {
        self.components() * BaseType::Float.size()
    }
}

/// Scalar type of each component in a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    /// 32-bit float.
    Float,
    /// 16-bit unsigned integer.
    UnsignedShort,
}

impl BaseType {
    pub fn size(&self) -> u32 {
        match self {
            Self::Float => 4,
            Self::UnsignedShort => 2,
        }
    }
}

/// Which of the mesh's buffers a descriptor reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferRole {
    Vertex,
    Index,
}

/// A single attribute inside the interleaved vertex record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexAttribute {
    pub semantic: VertexAttributeSemantic,
    pub format: VertexAttributeFormat,
    /// Byte offset within one vertex record.
    pub offset: u32,
}

impl VertexAttribute {
    pub fn new(semantic: VertexAttributeSemantic, format: VertexAttributeFormat, offset: u32) -> Self {
        Self {
            semantic,
            format,
            offset,
        }
    }

    pub fn position(offset: u32) -> Self {
        Self::new(VertexAttributeSemantic::Position, VertexAttributeFormat::Float3, offset)
    }

    pub fn normal(offset: u32) -> Self {
        Self::new(VertexAttributeSemantic::Normal, VertexAttributeFormat::Float3, offset)
    }

    pub fn tangent(offset: u32) -> Self {
        Self::new(VertexAttributeSemantic::Tangent, VertexAttributeFormat::Float4, offset)
    }

    pub fn texcoord(offset: u32) -> Self {
        Self::new(VertexAttributeSemantic::TexCoord, VertexAttributeFormat::Float2, offset)
    }

    /// First byte past this attribute within the record, `None` on overflow.
    pub fn end(&self) -> Option<u32> {
        self.offset.checked_add(self.format.size())
    }
}

/// How a descriptor addresses its buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// Per-vertex field inside the interleaved vertex buffer.
    Vertex {
        semantic: VertexAttributeSemantic,
        byte_offset: u32,
        byte_stride: u32,
    },
    /// Tightly packed index buffer.
    Index,
}

/// Binding metadata for one logical field of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributeDescriptor {
    /// Shader input name, `None` for the index attribute.
    pub name: Option<&'static str>,
    pub kind: AttributeKind,
    pub base_type: BaseType,
    /// Components per element.
    pub vertex_size: u32,
    /// Number of elements (vertices or indices).
    pub count: u32,
}

impl AttributeDescriptor {
    pub fn vertex(attribute: &VertexAttribute, stride: u32, count: u32) -> Self {
        Self {
            name: Some(attribute.semantic.default_name()),
            kind: AttributeKind::Vertex {
                semantic: attribute.semantic,
                byte_offset: attribute.offset,
                byte_stride: stride,
            },
            base_type: BaseType::Float,
            vertex_size: attribute.format.components(),
            count,
        }
    }

    pub fn index(count: u32) -> Self {
        Self {
            name: None,
            kind: AttributeKind::Index,
            base_type: BaseType::UnsignedShort,
            vertex_size: 1,
            count,
        }
    }

    pub fn buffer(&self) -> BufferRole {
        match self.kind {
            AttributeKind::Vertex { .. } => BufferRole::Vertex,
            AttributeKind::Index => BufferRole::Index,
        }
    }

    pub fn semantic(&self) -> Option<VertexAttributeSemantic> {
        match self.kind {
            AttributeKind::Vertex { semantic, .. } => Some(semantic),
            AttributeKind::Index => None,
        }
    }

    pub fn byte_offset(&self) -> Option<u32> {
        match self.kind {
            AttributeKind::Vertex { byte_offset, .. } => Some(byte_offset),
            AttributeKind::Index => None,
        }
    }

    pub fn byte_stride(&self) -> Option<u32> {
        match self.kind {
            AttributeKind::Vertex { byte_stride, .. } => Some(byte_stride),
            AttributeKind::Index => None,
        }
    }
}

/// Layout of one interleaved vertex record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexLayout {
    /// Stride in bytes between consecutive records.
    pub stride: u32,
    /// Attributes in record order.
    pub attributes: Vec<VertexAttribute>,
    /// Optional label for debugging.
    pub label: Option<String>,
}

impl VertexLayout {
    pub fn new(stride: u32) -> Self {
        Self {
            stride,
            attributes: Vec::new(),
            label: None,
        }
    }

    pub fn with_attribute(mut self, attribute: VertexAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Position + normal + tangent + texcoord, 48 bytes per vertex.
    ///
    /// Matches the field order of [`Vertex`](super::Vertex). The layout is
    /// built once and shared.
    pub fn interleaved() -> Arc<Self> {
        static LAYOUT: OnceLock<Arc<VertexLayout>> = OnceLock::new();
        LAYOUT
            .get_or_init(|| {
                Arc::new(
                    Self::new(VERTEX_STRIDE as u32)
                        .with_attribute(VertexAttribute::position(0))
                        .with_attribute(VertexAttribute::normal(12))
                        .with_attribute(VertexAttribute::tangent(24))
                        .with_attribute(VertexAttribute::texcoord(40))
                        .with_label("position_normal_tangent_uv"),
                )
            })
            .clone()
    }

    pub fn get_attribute(&self, semantic: VertexAttributeSemantic) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|attr| attr.semantic == semantic)
    }

    /// Check that every attribute fits inside the stride and no two overlap.
    pub fn validate(&self) -> MeshResult<()> {
        let mut spans = Vec::with_capacity(self.attributes.len());
        for attr in &self.attributes {
            let end = attr.end().ok_or_else(|| {
                MeshError::InvalidInput(format!(
                    "attribute {:?} at offset {} overflows the record",
                    attr.semantic, attr.offset
                ))
            })?;
            if end > self.stride {
                return Err(MeshError::InvalidInput(format!(
                    "attribute {:?} ends at byte {} but stride is {}",
                    attr.semantic, end, self.stride
                )));
            }
            spans.push((attr, end));
        }

        for (i, &(attr, end)) in spans.iter().enumerate() {
            for &(other, other_end) in &spans[i + 1..] {
                if attr.offset < other_end && other.offset < end {
                    return Err(MeshError::InvalidInput(format!(
                        "attributes {:?} and {:?} overlap",
                        attr.semantic, other.semantic
                    )));
                }
            }
        }
        Ok(())
    }

    /// Derive the position, normal, tangent, texcoord and index descriptors.
    ///
    /// Fails if the layout lacks one of the four vertex semantics.
    pub fn descriptors(
        &self,
        vertex_count: u32,
        index_count: u32,
    ) -> MeshResult<[AttributeDescriptor; 5]> {
        let vertex = |semantic: VertexAttributeSemantic| {
            self.get_attribute(semantic)
                .map(|attr| AttributeDescriptor::vertex(attr, self.stride, vertex_count))
                .ok_or_else(|| {
                    MeshError::InvalidInput(format!("layout has no {:?} attribute", semantic))
                })
        };

        Ok([
            vertex(VertexAttributeSemantic::Position)?,
            vertex(VertexAttributeSemantic::Normal)?,
            vertex(VertexAttributeSemantic::Tangent)?,
            vertex(VertexAttributeSemantic::TexCoord)?,
            AttributeDescriptor::index(index_count),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Vertex;
    use std::mem::{offset_of, size_of};

    #[test]
    fn test_format_sizes() {
        assert_eq!(VertexAttributeFormat::Float2.size(), 8);
        assert_eq!(VertexAttributeFormat::Float3.size(), 12);
        assert_eq!(VertexAttributeFormat::Float4.size(), 16);
        assert_eq!(BaseType::UnsignedShort.size(), 2);
    }

    #[test]
    fn test_interleaved_layout_matches_vertex() {
        let layout = VertexLayout::interleaved();
        assert_eq!(layout.stride as usize, size_of::<Vertex>());
        assert!(layout.validate().is_ok());

        let offset = |s| layout.get_attribute(s).map(|a| a.offset as usize);
        assert_eq!(offset(VertexAttributeSemantic::Position), Some(offset_of!(Vertex, position)));
        assert_eq!(offset(VertexAttributeSemantic::Normal), Some(offset_of!(Vertex, normal)));
        assert_eq!(offset(VertexAttributeSemantic::Tangent), Some(offset_of!(Vertex, tangent)));
        assert_eq!(offset(VertexAttributeSemantic::TexCoord), Some(offset_of!(Vertex, uv)));
    }

    #[test]
    fn test_interleaved_layout_is_shared() {
        assert!(Arc::ptr_eq(&VertexLayout::interleaved(), &VertexLayout::interleaved()));
    }

    #[test]
    fn test_descriptors() {
        let [position, normal, tangent, texcoord, index] =
            VertexLayout::interleaved().descriptors(3, 6).unwrap();

        assert_eq!(position.name, Some("vertexPosition"));
        assert_eq!(position.byte_offset(), Some(0));
        assert_eq!(normal.byte_offset(), Some(12));
        assert_eq!(tangent.byte_offset(), Some(24));
        assert_eq!(tangent.vertex_size, 4);
        assert_eq!(texcoord.byte_offset(), Some(40));
        assert_eq!(texcoord.vertex_size, 2);

        for desc in [position, normal, tangent, texcoord] {
            assert_eq!(desc.byte_stride(), Some(48));
            assert_eq!(desc.count, 3);
            assert_eq!(desc.base_type, BaseType::Float);
            assert_eq!(desc.buffer(), BufferRole::Vertex);
        }

        assert_eq!(index.buffer(), BufferRole::Index);
        assert_eq!(index.base_type, BaseType::UnsignedShort);
        assert_eq!(index.count, 6);
        assert_eq!(index.byte_offset(), None);
        assert_eq!(index.byte_stride(), None);
        assert_eq!(index.name, None);
    }

    #[test]
    fn test_validate_rejects_overflow_and_overlap() {
        let too_long = VertexLayout::new(20)
            .with_attribute(VertexAttribute::position(0))
            .with_attribute(VertexAttribute::normal(12));
        assert!(too_long.validate().is_err());

        let overlapping = VertexLayout::new(48)
            .with_attribute(VertexAttribute::position(0))
            .with_attribute(VertexAttribute::normal(8));
        assert!(overlapping.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_offset_overflow() {
        let layout = VertexLayout::new(48).with_attribute(VertexAttribute::position(u32::MAX - 4));
        assert_eq!(layout.attributes[0].end(), None);
        assert!(matches!(layout.validate(), Err(MeshError::InvalidInput(_))));
    }

    #[test]
    fn test_descriptors_missing_semantic() {
        let layout = VertexLayout::new(12).with_attribute(VertexAttribute::position(0));
        assert!(matches!(
            layout.descriptors(1, 0),
            Err(MeshError::InvalidInput(_))
        ));
    }
}
