//! Core mesh types for surface traversal.
//!
//! This crate provides the foundational types shared by the walking crates:
//!
//! - [`TriangleMesh`] - An immutable-by-convention snapshot of vertex positions
//!   and a flat triangle index buffer
//! - [`Triangle`] - A concrete triangle with resolved (usually world-space) positions
//! - [`Plane`] - A plane given by a unit normal and a point on it
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Other game engines
//!
//! # Index Buffer Layout
//!
//! Triangles are stored the way GPU-facing engines hand them out: one flat
//! `Vec<u32>` grouped in runs of three. Triangle `t` is
//! `indices[3 * t..3 * t + 3]`, so triangle identity is `buffer_offset / 3`.
//!
//! # Example
//!
//! ```
//! use mesh_types::{TriangleMesh, Point3};
//!
//! let mesh = TriangleMesh::from_parts(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!     ],
//!     vec![0, 1, 2],
//! );
//!
//! assert!(mesh.validate().is_ok());
//! assert_eq!(mesh.triangle_count(), 1);
//! assert_eq!(mesh.triangle_indices(0), Some([0, 1, 2]));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod mesh;
mod plane;
mod triangle;

pub use error::{MeshError, MeshResult};
pub use mesh::{TriangleMesh, unit_cube, unit_quad};
pub use plane::Plane;
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
