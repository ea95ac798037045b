//! Error types for mesh snapshot validation.

use thiserror::Error;

/// Result type for mesh validation.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors found while validating a [`TriangleMesh`](crate::TriangleMesh).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// Index buffer length is not a multiple of three.
    #[error("index buffer length {len} is not a multiple of 3")]
    IndexBufferLength {
        /// Length of the offending buffer.
        len: usize,
    },

    /// A triangle references a vertex past the end of the position buffer.
    #[error("triangle {triangle} references vertex {index} (mesh has {vertex_count} vertices)")]
    VertexOutOfRange {
        /// Triangle holding the bad index.
        triangle: usize,
        /// The invalid vertex index.
        index: u32,
        /// Number of vertex positions.
        vertex_count: usize,
    },

    /// A vertex position has a NaN or infinite coordinate.
    #[error("vertex {index} has a non-finite position")]
    NonFinitePosition {
        /// The offending vertex.
        index: usize,
    },
}
