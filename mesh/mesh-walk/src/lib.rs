//! Edge adjacency and plane intersection queries for walking across a mesh
//! surface face by face.
//!
//! This crate provides:
//! - An edge-to-triangle adjacency index keyed by vertex *position*, so meshes
//!   with duplicated seam vertices still connect
//! - Neighbor lookup across a triangle edge
//! - Plane/edge intersections for a triangle, in world space
//! - World-space face normals
//! - Plane walking: following a cut line from triangle to triangle
//!
//! World transforms are supplied per query through
//! [`WorldTransform`](mesh_transform::WorldTransform); the walker only ever
//! holds the mesh-local snapshot.
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with zero Bevy dependencies.
//!
//! # Example
//!
//! ```
//! use mesh_transform::Transform3D;
//! use mesh_types::{Plane, Point3, Vector3, unit_quad};
//! use mesh_walk::MeshWalker;
//!
//! let walker = MeshWalker::new(unit_quad()).unwrap();
//! let placed = Transform3D::translation(0.0, 0.0, 3.0);
//!
//! let cut = Plane::new(Point3::new(0.0, 0.5, 0.0), Vector3::y()).unwrap();
//! for hit in walker.intersections(&cut, 0, &placed).unwrap() {
//!     let across = walker.edge_neighbor(hit.edge, 0).unwrap();
//!     println!("crossing at {:?}, next triangle {:?}", hit.point, across);
//! }
//!
//! let normal = walker.face_normal(0, &placed).unwrap();
//! assert!((normal.z - 1.0).abs() < 1e-12);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod adjacency;
mod error;
mod intersect;
mod params;
mod path;
mod walker;
mod weld;

pub use adjacency::{AdjacencyEntry, EdgeIndexPair, EdgeKey, EdgeSide};
pub use error::{WalkError, WalkResult};
pub use intersect::{EdgeIntersection, distinct_points, segment_plane_intersection};
pub use params::{NonManifoldPolicy, WalkParams};
pub use path::{PlanePath, WalkEnd};
pub use walker::MeshWalker;
