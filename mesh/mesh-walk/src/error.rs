//! Error types for mesh walking.

use mesh_types::MeshError;
use thiserror::Error;

/// Result type for walking operations.
pub type WalkResult<T> = Result<T, WalkError>;

/// Errors that can occur while building or querying a [`MeshWalker`](crate::MeshWalker).
///
/// A missing neighbor is not an error: lookups return `Ok(None)` for
/// boundary or unknown edges so traversal code can branch on it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WalkError {
    /// Triangle index past the end of the index buffer.
    #[error("invalid triangle index {index} (mesh has {triangle_count} triangles)")]
    TriangleOutOfRange {
        /// The invalid index.
        index: usize,
        /// Number of triangles in the mesh.
        triangle_count: usize,
    },

    /// Vertex index past the end of the position buffer.
    #[error("invalid vertex index {index} (mesh has {vertex_count} vertices)")]
    VertexOutOfRange {
        /// The invalid index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// The mesh snapshot failed validation.
    #[error("invalid mesh: {0}")]
    InvalidMesh(#[from] MeshError),

    /// Zero-area triangle has no defined normal.
    #[error("triangle {triangle} is degenerate (zero area)")]
    DegenerateTriangle {
        /// The degenerate triangle.
        triangle: usize,
    },

    /// A third triangle tried to register against an edge that already has two.
    #[error(
        "non-manifold edge: triangle {triangle} shares an edge already used by triangles {first} and {second}"
    )]
    NonManifoldEdge {
        /// The triangle that was rejected.
        triangle: usize,
        /// First triangle already on the edge.
        first: usize,
        /// Second triangle already on the edge.
        second: usize,
    },

    /// A parameter is out of its valid range.
    #[error("invalid parameter: {reason}")]
    InvalidParams {
        /// What was wrong.
        reason: String,
    },
}
