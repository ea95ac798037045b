//! Triangle with resolved vertex positions.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle with concrete vertex positions.
///
/// Corners keep the winding order of the index buffer they were resolved
/// from, so [`normal`](Self::normal) faces the same way the mesh does.
///
/// # Example
///
/// ```
/// use mesh_types::{Triangle, Point3};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// assert!((tri.area() - 0.5).abs() < 1e-10);
/// let normal = tri.normal().unwrap();
/// assert!((normal.z - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First corner.
    pub v0: Point3<f64>,
    /// Second corner.
    pub v1: Point3<f64>,
    /// Third corner.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a new triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Create a triangle from coordinate arrays.
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn from_arrays(v0: [f64; 3], v1: [f64; 3], v2: [f64; 3]) -> Self {
        Self {
            v0: Point3::from(v0),
            v1: Point3::from(v1),
            v2: Point3::from(v2),
        }
    }

    /// Apply a point mapping to every corner, keeping winding order.
    #[must_use]
    pub fn map(&self, mut f: impl FnMut(Point3<f64>) -> Point3<f64>) -> Self {
        Self {
            v0: f(self.v0),
            v1: f(self.v1),
            v2: f(self.v2),
        }
    }

    /// Corners as an array in winding order.
    #[inline]
    #[must_use]
    pub const fn corners(&self) -> [Point3<f64>; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Compute `(v1 - v0) × (v2 - v0)`.
    ///
    /// The magnitude equals twice the triangle's area.
    #[inline]
    #[must_use]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        e1.cross(&e2)
    }

    /// Compute the unit face normal.
    ///
    /// Returns `None` for degenerate triangles: the cross product vanishes
    /// relative to the edge lengths, so the test does not depend on scale.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Triangle, Point3};
    ///
    /// let degen = Triangle::new(
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(2.0, 0.0, 0.0),
    /// );
    /// assert!(degen.normal().is_none());
    /// ```
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        let n = e1.cross(&e2);
        let len_sq = n.norm_squared();
        let floor = f64::EPSILON * f64::EPSILON * e1.norm_squared() * e2.norm_squared();
        if len_sq > floor {
            Some(n / len_sq.sqrt())
        } else {
            None
        }
    }

    /// Compute the area of the triangle.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.normal_unnormalized().norm() * 0.5
    }

    /// Check whether the triangle has (numerically) zero area.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.normal().is_none()
    }

    /// Compute the centroid.
    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        Point3::from((self.v0.coords + self.v1.coords + self.v2.coords) / 3.0)
    }

    /// Get the three edges as (start, end) pairs.
    ///
    /// Returns edges in order: v0→v1, v1→v2, v2→v0.
    #[must_use]
    pub const fn edges(&self) -> [(Point3<f64>, Point3<f64>); 3] {
        [(self.v0, self.v1), (self.v1, self.v2), (self.v2, self.v0)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn right_triangle() -> Triangle {
        Triangle::from_arrays([0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [0.0, 4.0, 0.0])
    }

    #[test]
    fn area_and_normal() {
        let tri = right_triangle();
        assert_relative_eq!(tri.area(), 6.0, epsilon = 1e-10);

        let n = tri.normal().unwrap_or_else(Vector3::zeros);
        assert_relative_eq!(n.z, 1.0, epsilon = 1e-10);
        assert_relative_eq!(tri.normal_unnormalized().norm(), 12.0, epsilon = 1e-10);
    }

    #[test]
    fn reversed_winding_flips_normal() {
        let tri = right_triangle();
        let flipped = Triangle::new(tri.v0, tri.v2, tri.v1);
        let n = flipped.normal().unwrap_or_else(Vector3::zeros);
        assert_relative_eq!(n.z, -1.0, epsilon = 1e-10);
    }

    #[test]
    fn coincident_corners_are_degenerate() {
        let tri = Triangle::from_arrays([1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [2.0, 0.0, 0.0]);
        assert!(tri.is_degenerate());
        assert!(tri.normal().is_none());
        assert_relative_eq!(tri.area(), 0.0);
    }

    #[test]
    fn tiny_triangle_has_normal() {
        let tri = Triangle::from_arrays([0.0, 0.0, 0.0], [1e-9, 0.0, 0.0], [0.0, 1e-9, 0.0]);
        assert!(!tri.is_degenerate());
        let n = tri.normal().unwrap_or_else(Vector3::zeros);
        assert_relative_eq!(n.z, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn nearly_collinear_large_triangle_is_degenerate() {
        // The apex is off the line by far less than one ulp of the edge length.
        let tri = Triangle::from_arrays([0.0, 0.0, 0.0], [1e6, 0.0, 0.0], [2e6, 1e-15, 0.0]);
        assert!(tri.is_degenerate());
    }

    #[test]
    fn centroid() {
        let tri = Triangle::from_arrays([0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [0.0, 3.0, 3.0]);
        let c = tri.centroid();
        assert_relative_eq!(c.x, 1.0, epsilon = 1e-10);
        assert_relative_eq!(c.y, 1.0, epsilon = 1e-10);
        assert_relative_eq!(c.z, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn map_keeps_winding() {
        let tri = right_triangle();
        let moved = tri.map(|p| p + Vector3::new(0.0, 0.0, 5.0));
        assert_relative_eq!(moved.v1.x, 3.0);
        assert_relative_eq!(moved.v2.y, 4.0);
        assert_relative_eq!(moved.v0.z, 5.0);
        assert_eq!(moved.normal(), tri.normal());
    }

    #[test]
    fn edges_follow_winding() {
        let tri = right_triangle();
        let [e0, e1, e2] = tri.edges();
        assert_eq!(e0, (tri.v0, tri.v1));
        assert_eq!(e1, (tri.v1, tri.v2));
        assert_eq!(e2, (tri.v2, tri.v0));
        assert_eq!(tri.corners(), [tri.v0, tri.v1, tri.v2]);
    }
}
