//! Local-to-world point mapping supplied per query.

use nalgebra::{Isometry3, Point3};

use crate::Transform3D;

/// Maps mesh-local points into world space.
///
/// Walking queries take one of these on every call instead of storing it, so
/// a mesh whose node moves (or is re-posed every frame) can keep a single
/// adjacency index. Any `Fn(Point3<f64>) -> Point3<f64>` closure qualifies.
///
/// # Example
///
/// ```
/// use mesh_transform::{Transform3D, WorldTransform};
/// use nalgebra::{Point3, Vector3};
///
/// fn lift<T: WorldTransform>(t: &T) -> f64 {
///     t.to_world(Point3::origin()).z
/// }
///
/// assert_eq!(lift(&Transform3D::translation(0.0, 0.0, 2.0)), 2.0);
/// assert_eq!(lift(&|p: Point3<f64>| p + Vector3::z()), 1.0);
/// ```
pub trait WorldTransform {
    /// Map one mesh-local point into world space.
    fn to_world(&self, local: Point3<f64>) -> Point3<f64>;
}

/// The identity mapping, for meshes already in world space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalSpace;

impl WorldTransform for LocalSpace {
    #[inline]
    fn to_world(&self, local: Point3<f64>) -> Point3<f64> {
        local
    }
}

impl WorldTransform for Transform3D {
    #[inline]
    fn to_world(&self, local: Point3<f64>) -> Point3<f64> {
        self.transform_point(&local)
    }
}

impl WorldTransform for Isometry3<f64> {
    #[inline]
    fn to_world(&self, local: Point3<f64>) -> Point3<f64> {
        self.transform_point(&local)
    }
}

impl<F> WorldTransform for F
where
    F: Fn(Point3<f64>) -> Point3<f64>,
{
    #[inline]
    fn to_world(&self, local: Point3<f64>) -> Point3<f64> {
        self(local)
    }
}
