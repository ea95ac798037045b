//! Local-to-world transforms for mesh queries.
//!
//! This crate provides:
//! - [`Transform3D`] - An affine 4x4 transform (translate, rotate, scale, compose)
//! - [`WorldTransform`] - The per-query point mapping the walking engine
//!   consumes, implemented for [`Transform3D`], nalgebra isometries and
//!   plain closures
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with zero Bevy dependencies.
//!
//! # Example
//!
//! ```
//! use mesh_transform::{Transform3D, WorldTransform};
//! use nalgebra::Point3;
//!
//! let node = Transform3D::translation(1.0, 2.0, 3.0);
//! let world = node.to_world(Point3::origin());
//! assert_eq!(world, Point3::new(1.0, 2.0, 3.0));
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod transform;
mod world;

pub use transform::Transform3D;
pub use world::{LocalSpace, WorldTransform};
