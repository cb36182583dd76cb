//! Mesh resources
//!
//! Vertex records, the interleaved layout, and the builder that turns them
//! into renderer-ready byte buffers.

mod error;
mod layout;
mod mesh;
mod part;
mod vertex;

pub use error::*;
pub use layout::*;
pub use mesh::*;
pub use part::*;
pub use vertex::*;
