//! Part Mesh - interleaved triangle-mesh buffers for a single custom part
//!
//! # Features
//! - [`InterleavedMeshBuilder`] turning vertex records and triangles into a
//!   48-byte-stride vertex buffer, a u16 index buffer and the attribute
//!   descriptors a renderer binds them with
//! - Decoding of those buffers back into vertex records through the descriptors
//! - The hand-built "Part" triangle as a ready-made mesh
//! - A small `bevy_ecs` scene holding the Part, a camera and a point light
//!
//! The library does not initialize logging; binaries decide their own setup.

pub mod resources;
pub mod scene;

pub use resources::{
    AttributeDescriptor, IndexBuffer, InterleavedMesh, InterleavedMeshBuilder, MeshError,
    MeshResult, Triangle, Vertex, VertexBuffer, VertexLayout,
};
pub use scene::{PartScene, SceneConfig};
