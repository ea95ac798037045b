//! Tracing a plane across the mesh surface, one triangle at a time.

use hashbrown::HashSet;
use mesh_transform::WorldTransform;
use mesh_types::Plane;
use nalgebra::{Point3, Vector3};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::intersect::EdgeIntersection;
use crate::walker::MeshWalker;
use crate::WalkResult;

/// Why a plane walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WalkEnd {
    /// Crossed an edge with no triangle on the other side, or reached a
    /// boundary vertex with nowhere further to go.
    Boundary,
    /// Came back into the start triangle.
    ClosedLoop,
    /// Visited [`max_walk_steps`](crate::WalkParams::max_walk_steps) triangles.
    StepLimit,
    /// The plane does not cross the start triangle.
    NoCrossing,
    /// Entered a triangle the plane only touches, or one already visited, or
    /// reached an interior vertex whose fan does not continue the cut.
    Stalled,
}

/// The polyline traced by [`MeshWalker::walk_plane`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanePath {
    /// Edge crossings in walk order, in world space. `points[i]` is where the
    /// walk left `triangles[i]`.
    pub points: Vec<Point3<f64>>,
    /// Triangles visited, starting with the start triangle.
    pub triangles: Vec<usize>,
    /// Why the walk stopped.
    pub end: WalkEnd,
}

impl PlanePath {
    /// True if the walk returned to where it started.
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.end == WalkEnd::ClosedLoop
    }

    /// Length of the polyline, including the closing segment for loops.
    #[must_use]
    pub fn length(&self) -> f64 {
        let open: f64 = self
            .points
            .windows(2)
            .map(|w| (w[1] - w[0]).norm())
            .sum();

        match (self.is_closed(), self.points.first(), self.points.last()) {
            (true, Some(first), Some(last)) => open + (*first - *last).norm(),
            _ => open,
        }
    }
}

impl MeshWalker {
    /// Follow the intersection of `plane` with the surface, starting in
    /// `start_triangle` and leaving it through the crossing that lies
    /// furthest along `heading`.
    ///
    /// Each step crosses the exit edge with
    /// [`edge_neighbor`](Self::edge_neighbor) and picks the neighbor's other
    /// crossing as the next exit. This is how a character climbing a mesh
    /// follows a cut line without any spatial search.
    ///
    /// When the exit lies on a mesh vertex, the walk moves on through the
    /// vertex's [fan](Self::vertex_triangles) instead, into the unvisited
    /// triangle whose crossing best continues the direction of travel.
    ///
    /// # Errors
    ///
    /// [`WalkError::TriangleOutOfRange`](crate::WalkError::TriangleOutOfRange)
    /// if `start_triangle` is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_transform::LocalSpace;
    /// use mesh_types::{Plane, Point3, Vector3, unit_cube};
    /// use mesh_walk::{MeshWalker, WalkEnd};
    ///
    /// let walker = MeshWalker::new(unit_cube()).unwrap();
    /// let belt = Plane::new(Point3::new(0.0, 0.0, 0.5), Vector3::z()).unwrap();
    ///
    /// // Triangle 4 is on the front face.
    /// let path = walker.walk_plane(&belt, 4, Vector3::x(), &LocalSpace).unwrap();
    ///
    /// assert_eq!(path.end, WalkEnd::ClosedLoop);
    /// assert_eq!(path.triangles.len(), 8);
    /// ```
    pub fn walk_plane<T>(
        &self,
        plane: &Plane,
        start_triangle: usize,
        heading: Vector3<f64>,
        transform: &T,
    ) -> WalkResult<PlanePath>
    where
        T: WorldTransform + ?Sized,
    {
        let hits = self.intersections(plane, start_triangle, transform)?;

        let mut path = PlanePath {
            points: Vec::new(),
            triangles: vec![start_triangle],
            end: WalkEnd::NoCrossing,
        };

        let Some(mut exit) = hits
            .iter()
            .copied()
            .max_by(|a, b| a.point.coords.dot(&heading).total_cmp(&b.point.coords.dot(&heading)))
        else {
            debug!(start_triangle, "Plane misses start triangle");
            return Ok(path);
        };
        path.points.push(exit.point);

        let mut visited = HashSet::new();
        visited.insert(start_triangle);
        let mut current = start_triangle;
        let mut direction = hits
            .iter()
            .map(|hit| exit.point - hit.point)
            .max_by(|a, b| a.norm_squared().total_cmp(&b.norm_squared()))
            .filter(|d| d.norm_squared() > 0.0)
            .unwrap_or(heading);

        path.end = loop {
            if path.triangles.len() >= self.params().max_walk_steps {
                break WalkEnd::StepLimit;
            }

            let (next, next_exit) = if let Some(vertex) = self.exit_corner(&exit) {
                let exits = self.fan_exits(plane, vertex, &exit, current, direction, transform)?;
                if exits.iter().any(|(t, _)| *t == start_triangle) {
                    break WalkEnd::ClosedLoop;
                }
                let Some(&(next, next_exit)) = exits.iter().find(|(t, _)| !visited.contains(t))
                else {
                    break if self.is_boundary_vertex(vertex)? {
                        WalkEnd::Boundary
                    } else {
                        WalkEnd::Stalled
                    };
                };
                (next, next_exit)
            } else {
                let Some(next) = self.edge_neighbor(exit.edge, current)? else {
                    break WalkEnd::Boundary;
                };
                if next == start_triangle {
                    break WalkEnd::ClosedLoop;
                }
                if visited.contains(&next) {
                    break WalkEnd::Stalled;
                }
                let Some(next_exit) = self.next_exit(plane, next, &exit, transform)? else {
                    path.triangles.push(next);
                    break WalkEnd::Stalled;
                };
                (next, next_exit)
            };

            visited.insert(next);
            path.triangles.push(next);
            path.points.push(next_exit.point);

            let step = next_exit.point - exit.point;
            if step.norm_squared() > 0.0 {
                direction = step;
            }
            exit = next_exit;
            current = next;
        };

        debug!(
            start_triangle,
            steps = path.triangles.len(),
            end = ?path.end,
            "Plane walk finished"
        );

        Ok(path)
    }

    /// The crossing of `triangle` that is not the one the walk came in by.
    fn next_exit<T>(
        &self,
        plane: &Plane,
        triangle: usize,
        entry: &EdgeIntersection,
        transform: &T,
    ) -> WalkResult<Option<EdgeIntersection>>
    where
        T: WorldTransform + ?Sized,
    {
        let entry_key = self.edge_key(entry.edge)?;
        let mut best: Option<(f64, EdgeIntersection)> = None;

        for hit in self.intersections(plane, triangle, transform)? {
            if self.edge_key(hit.edge)? == entry_key {
                continue;
            }

            let distance = (hit.point - entry.point).norm();
            let min_distance = self.params().segment_tolerance * (hit.end - hit.start).norm();
            if distance <= min_distance {
                continue;
            }

            if best.is_none_or(|(d, _)| distance > d) {
                best = Some((distance, hit));
            }
        }

        Ok(best.map(|(_, hit)| hit))
    }

    /// The vertex an exit crossing sits on, if it is at an end of its edge.
    fn exit_corner(&self, exit: &EdgeIntersection) -> Option<u32> {
        let tol = self.params().segment_tolerance;
        if exit.alpha <= tol {
            Some(exit.edge.start)
        } else if exit.alpha >= 1.0 - tol {
            Some(exit.edge.end)
        } else {
            None
        }
    }

    /// Ways out of `vertex` through its fan, straightest first.
    ///
    /// Each fan triangle other than `current` contributes its crossing that
    /// leaves the vertex most nearly along `direction`. Crossings at the
    /// vertex itself, and crossings straight back along `direction`, are
    /// ignored. With a zero `direction` the farthest crossing counts as
    /// straightest. Ties keep fan order.
    fn fan_exits<T>(
        &self,
        plane: &Plane,
        vertex: u32,
        entry: &EdgeIntersection,
        current: usize,
        direction: Vector3<f64>,
        transform: &T,
    ) -> WalkResult<Vec<(usize, EdgeIntersection)>>
    where
        T: WorldTransform + ?Sized,
    {
        let tol = self.params().segment_tolerance;
        let forward = direction.try_normalize(0.0);
        let mut exits: Vec<(f64, usize, EdgeIntersection)> = Vec::new();

        for &triangle in self.vertex_triangles(vertex)? {
            if triangle == current {
                continue;
            }

            let mut best: Option<(f64, EdgeIntersection)> = None;
            for hit in self.intersections(plane, triangle, transform)? {
                let offset = hit.point - entry.point;
                let distance = offset.norm();
                if distance <= tol * (hit.end - hit.start).norm() {
                    continue;
                }

                let score = match forward {
                    Some(forward) => offset.dot(&forward) / distance,
                    None => distance,
                };
                if forward.is_some() && score <= tol - 1.0 {
                    continue;
                }

                if best.is_none_or(|(s, _)| score > s) {
                    best = Some((score, hit));
                }
            }

            if let Some((score, hit)) = best {
                exits.push((score, triangle, hit));
            }
        }

        exits.sort_by(|a, b| b.0.total_cmp(&a.0));
        Ok(exits.into_iter().map(|(_, t, hit)| (t, hit)).collect())
    }
}
