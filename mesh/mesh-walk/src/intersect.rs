//! Plane/edge intersection.

use mesh_types::Plane;
use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::adjacency::EdgeIndexPair;
use crate::params::WalkParams;

/// Where a cutting plane crosses one triangle edge.
///
/// All positions are in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeIntersection {
    /// The crossing point, `start + alpha * (end - start)`.
    pub point: Point3<f64>,
    /// Edge parameter of the crossing. Within `[-tol, 1 + tol]` for the
    /// segment tolerance the query ran with.
    pub alpha: f64,
    /// Vertex indices of the edge, in the triangle's winding order.
    pub edge: EdgeIndexPair,
    /// World position of `edge.start`.
    pub start: Point3<f64>,
    /// World position of `edge.end`.
    pub end: Point3<f64>,
}

/// Intersect the segment `start..end` with a plane.
///
/// Returns the edge parameter and the crossing point, or `None` if the
/// segment is parallel to the plane (including zero-length segments) or the
/// crossing falls outside the segment by more than
/// [`segment_tolerance`](WalkParams::segment_tolerance).
///
/// # Example
///
/// ```
/// use mesh_types::{Plane, Point3, Vector3};
/// use mesh_walk::{WalkParams, segment_plane_intersection};
///
/// let plane = Plane::new(Point3::origin(), Vector3::x()).unwrap();
/// let hit = segment_plane_intersection(
///     &plane,
///     Point3::new(-1.0, 0.0, 0.0),
///     Point3::new(3.0, 0.0, 0.0),
///     &WalkParams::default(),
/// );
///
/// let (alpha, point) = hit.unwrap();
/// assert!((alpha - 0.25).abs() < 1e-12);
/// assert!(point.x.abs() < 1e-12);
/// ```
#[must_use]
pub fn segment_plane_intersection(
    plane: &Plane,
    start: Point3<f64>,
    end: Point3<f64>,
    params: &WalkParams,
) -> Option<(f64, Point3<f64>)> {
    let normal = plane.normal();
    let direction = end - start;

    let denominator = normal.dot(&direction);
    if denominator.abs() <= params.parallel_epsilon {
        return None;
    }

    let alpha = normal.dot(&(plane.point() - start)) / denominator;
    let tol = params.segment_tolerance;
    if !(-tol..=1.0 + tol).contains(&alpha) {
        return None;
    }

    Some((alpha, start + direction * alpha))
}

/// Crossing points with vertex-grazing duplicates removed.
///
/// A plane through a triangle corner reports that corner once for each of
/// the two edges meeting there. Points closer than `tolerance` to an earlier
/// kept point are dropped; order is otherwise preserved.
///
/// # Example
///
/// ```
/// use mesh_types::{Plane, Point3, TriangleMesh, Vector3};
/// use mesh_transform::LocalSpace;
/// use mesh_walk::{MeshWalker, distinct_points};
///
/// let mesh = TriangleMesh::from_faces(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(2.0, 0.0, 0.0),
///         Point3::new(1.0, 2.0, 0.0),
///     ],
///     &[[0, 1, 2]],
/// );
/// let walker = MeshWalker::new(mesh).unwrap();
///
/// // Through the apex and the midpoint of the base.
/// let plane = Plane::new(Point3::new(1.0, 0.0, 0.0), Vector3::x()).unwrap();
/// let hits = walker.intersections(&plane, 0, &LocalSpace).unwrap();
///
/// assert_eq!(hits.len(), 3);
/// assert_eq!(distinct_points(&hits, 1e-9).len(), 2);
/// ```
#[must_use]
pub fn distinct_points(hits: &[EdgeIntersection], tolerance: f64) -> Vec<Point3<f64>> {
    let mut points: Vec<Point3<f64>> = Vec::with_capacity(hits.len());
    for hit in hits {
        if points
            .iter()
            .all(|kept| (hit.point - *kept).norm() > tolerance)
        {
            points.push(hit.point);
        }
    }
    points
}
