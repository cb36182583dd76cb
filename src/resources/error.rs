//! Mesh error type

use thiserror::Error;

/// Error returned when mesh construction or decoding rejects its input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type MeshResult<T> = Result<T, MeshError>;
