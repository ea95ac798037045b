//! Cutting plane for intersection queries.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A plane in 3D space defined by a point on it and a unit normal.
///
/// The plane equation is `normal · (p - point) = 0`, or equivalently
/// `normal · p = d` where `d = normal · point`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Plane {
    point: Point3<f64>,
    normal: Vector3<f64>,
}

impl Plane {
    /// Create a plane from a point and a normal.
    ///
    /// The normal is normalized. Returns `None` if it is zero or not finite.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Plane, Point3, Vector3};
    ///
    /// let plane = Plane::new(Point3::origin(), Vector3::new(0.0, 2.0, 0.0)).unwrap();
    /// assert!((plane.normal().y - 1.0).abs() < 1e-12);
    ///
    /// assert!(Plane::new(Point3::origin(), Vector3::zeros()).is_none());
    /// ```
    #[must_use]
    pub fn new(point: Point3<f64>, normal: Vector3<f64>) -> Option<Self> {
        if !point.coords.iter().chain(normal.iter()).all(|c| c.is_finite()) {
            return None;
        }
        let norm = normal.norm();
        if norm < f64::EPSILON {
            return None;
        }
        Some(Self {
            point,
            normal: normal / norm,
        })
    }

    /// Create a plane through three non-collinear points.
    ///
    /// The normal is `(p1 - p0) × (p2 - p0)`, normalized. Returns `None` for
    /// collinear points.
    #[must_use]
    pub fn from_points(p0: Point3<f64>, p1: Point3<f64>, p2: Point3<f64>) -> Option<Self> {
        Self::new(p0, (p1 - p0).cross(&(p2 - p0)))
    }

    /// The point the plane was built from.
    #[inline]
    #[must_use]
    pub const fn point(&self) -> Point3<f64> {
        self.point
    }

    /// The unit normal.
    #[inline]
    #[must_use]
    pub const fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Plane constant `d` where the plane equation is `n · p = d`.
    #[inline]
    #[must_use]
    pub fn d(&self) -> f64 {
        self.normal.dot(&self.point.coords)
    }

    /// Signed distance from a point to the plane.
    ///
    /// Positive on the side the normal points to.
    #[inline]
    #[must_use]
    pub fn signed_distance(&self, p: &Point3<f64>) -> f64 {
        self.normal.dot(&(*p - self.point))
    }

    /// Project a point onto the plane.
    #[must_use]
    pub fn project(&self, p: &Point3<f64>) -> Point3<f64> {
        *p - self.normal * self.signed_distance(p)
    }
}
