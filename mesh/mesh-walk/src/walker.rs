//! The mesh walker: adjacency index plus per-triangle queries.

use mesh_transform::WorldTransform;
use mesh_types::{Plane, Triangle, TriangleMesh};
use nalgebra::{Point3, Vector3};
use tracing::info;

use crate::adjacency::{
    AdjacencyEntry, EdgeAdjacency, EdgeIndexPair, EdgeKey, EdgeSide, canonical_or_err, key_for,
};
use crate::intersect::{EdgeIntersection, segment_plane_intersection};
use crate::params::WalkParams;
use crate::weld::WeldMap;
use crate::{WalkError, WalkResult};

/// Edge adjacency and intersection queries over one immutable mesh snapshot.
///
/// Built once from a [`TriangleMesh`]; every query takes `&self`, so a
/// walker can be shared between threads without locking. World transforms
/// are passed in per query and never stored.
///
/// For deforming meshes, [`with_positions`](Self::with_positions) builds a
/// fresh walker (a new [`generation`](Self::generation)) rather than
/// mutating this one.
///
/// # Example
///
/// ```
/// use mesh_types::unit_quad;
/// use mesh_walk::{EdgeIndexPair, MeshWalker};
///
/// let walker = MeshWalker::new(unit_quad()).unwrap();
///
/// // The diagonal is shared.
/// let diagonal = EdgeIndexPair::new(0, 2);
/// assert_eq!(walker.edge_neighbor(diagonal, 0).unwrap(), Some(1));
/// assert_eq!(walker.edge_neighbor(diagonal, 1).unwrap(), Some(0));
///
/// // The outline is not.
/// assert_eq!(walker.edge_neighbor(EdgeIndexPair::new(0, 1), 0).unwrap(), None);
/// ```
#[derive(Debug, Clone)]
pub struct MeshWalker {
    mesh: TriangleMesh,
    params: WalkParams,
    weld: WeldMap,
    adjacency: EdgeAdjacency,
    generation: u64,
}

impl MeshWalker {
    /// Build a walker with default parameters.
    ///
    /// # Errors
    ///
    /// See [`with_params`](Self::with_params).
    pub fn new(mesh: TriangleMesh) -> WalkResult<Self> {
        Self::with_params(mesh, WalkParams::default())
    }

    /// Build a walker, registering every triangle edge in one pass.
    ///
    /// # Errors
    ///
    /// - [`WalkError::InvalidParams`] if `params` fails validation
    /// - [`WalkError::InvalidMesh`] if the index buffer is ragged, references
    ///   a missing vertex, or a position is not finite
    /// - [`WalkError::NonManifoldEdge`] if an edge has more than two
    ///   triangles and the policy is [`Reject`](crate::NonManifoldPolicy::Reject)
    pub fn with_params(mesh: TriangleMesh, params: WalkParams) -> WalkResult<Self> {
        params.validate()?;
        mesh.validate()?;

        let weld = WeldMap::build(&mesh.positions, params.weld_tolerance);
        let adjacency = EdgeAdjacency::build(&mesh, &weld, params.non_manifold)?;

        let walker = Self {
            mesh,
            params,
            weld,
            adjacency,
            generation: 0,
        };

        info!(
            triangles = walker.triangle_count(),
            vertices = walker.vertex_count(),
            edges = walker.edge_count(),
            boundary_edges = walker.boundary_edge_count(),
            merged_vertices = walker.weld.merged(),
            "Built mesh adjacency"
        );

        Ok(walker)
    }

    /// Build the next generation of this walker from moved vertex positions.
    ///
    /// The index buffer and parameters are kept. Adjacency is rebuilt from
    /// scratch because welding depends on positions; `self` is untouched.
    ///
    /// # Errors
    ///
    /// Same as [`with_params`](Self::with_params). A position buffer shorter
    /// than the indices need fails with [`WalkError::InvalidMesh`].
    pub fn with_positions(&self, positions: Vec<Point3<f64>>) -> WalkResult<Self> {
        let mesh = TriangleMesh::from_parts(positions, self.mesh.indices.clone());
        let mut next = Self::with_params(mesh, self.params.clone())?;
        next.generation = self.generation + 1;
        Ok(next)
    }

    /// The mesh snapshot this walker was built from.
    #[inline]
    #[must_use]
    pub const fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    /// Parameters the walker was built with.
    #[inline]
    #[must_use]
    pub const fn params(&self) -> &WalkParams {
        &self.params
    }

    /// Snapshot generation: `0` for a freshly built walker, incremented by
    /// each [`with_positions`](Self::with_positions).
    #[inline]
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// Number of vertices in the position buffer.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    /// Number of vertices welded onto an earlier vertex at the same position.
    #[inline]
    #[must_use]
    pub const fn merged_vertex_count(&self) -> usize {
        self.weld.merged()
    }

    /// Number of distinct geometric edges.
    ///
    /// Edges whose endpoints weld together are not counted.
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.edge_count()
    }

    /// Number of edges with a single incident triangle.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.adjacency.boundary_edge_count()
    }

    /// Number of edges shared by two triangles.
    #[must_use]
    pub fn interior_edge_count(&self) -> usize {
        self.edge_count() - self.boundary_edge_count()
    }

    /// Number of zero-length edges skipped while indexing.
    #[inline]
    #[must_use]
    pub const fn collapsed_edge_count(&self) -> usize {
        self.adjacency.collapsed_edge_count()
    }

    /// True if the mesh has edges and none of them is a boundary.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.edge_count() > 0 && self.boundary_edge_count() == 0
    }

    /// Boundary edges, as the single triangle that owns each one.
    ///
    /// Order is unspecified.
    pub fn boundary_edges(&self) -> impl Iterator<Item = EdgeSide> + '_ {
        self.adjacency.iter().filter_map(|(_, entry)| match *entry {
            AdjacencyEntry::Boundary(side) => Some(side),
            AdjacencyEntry::Interior(..) => None,
        })
    }

    /// Vertex indices of a triangle, in winding order.
    ///
    /// # Errors
    ///
    /// [`WalkError::TriangleOutOfRange`] if `triangle >= triangle_count()`.
    pub fn triangle_indices(&self, triangle: usize) -> WalkResult<[u32; 3]> {
        self.mesh
            .triangle_indices(triangle)
            .ok_or(WalkError::TriangleOutOfRange {
                index: triangle,
                triangle_count: self.triangle_count(),
            })
    }

    /// The triangle's three edges: `v0 -> v1`, `v1 -> v2`, `v2 -> v0`.
    ///
    /// # Errors
    ///
    /// [`WalkError::TriangleOutOfRange`] if `triangle >= triangle_count()`.
    pub fn triangle_edges(&self, triangle: usize) -> WalkResult<[EdgeIndexPair; 3]> {
        let [a, b, c] = self.triangle_indices(triangle)?;
        Ok([
            EdgeIndexPair::new(a, b),
            EdgeIndexPair::new(b, c),
            EdgeIndexPair::new(c, a),
        ])
    }

    /// The triangle's vertices mapped to world space, in winding order.
    ///
    /// # Errors
    ///
    /// [`WalkError::TriangleOutOfRange`] if `triangle >= triangle_count()`.
    pub fn triangle_world_positions<T>(&self, triangle: usize, transform: &T) -> WalkResult<Triangle>
    where
        T: WorldTransform + ?Sized,
    {
        let local = self
            .mesh
            .triangle(triangle)
            .ok_or(WalkError::TriangleOutOfRange {
                index: triangle,
                triangle_count: self.triangle_count(),
            })?;
        Ok(local.map(|p| transform.to_world(p)))
    }

    /// Test each of a triangle's edges against a plane, in world space.
    ///
    /// Edges are tested in the order of [`triangle_edges`](Self::triangle_edges).
    /// Edges parallel to the plane are skipped. Generic crossings give two
    /// records; a plane through a corner gives that corner once per edge
    /// meeting there, so one or three records are possible and are returned
    /// as computed. Use [`distinct_points`](crate::distinct_points) to fold
    /// them.
    ///
    /// # Errors
    ///
    /// [`WalkError::TriangleOutOfRange`] if `triangle >= triangle_count()`.
    pub fn intersections<T>(
        &self,
        plane: &Plane,
        triangle: usize,
        transform: &T,
    ) -> WalkResult<Vec<EdgeIntersection>>
    where
        T: WorldTransform + ?Sized,
    {
        let edges = self.triangle_edges(triangle)?;
        let world = self.triangle_world_positions(triangle, transform)?;

        let hits = edges
            .into_iter()
            .zip(world.edges())
            .filter_map(|(edge, (start, end))| {
                segment_plane_intersection(plane, start, end, &self.params).map(
                    |(alpha, point)| EdgeIntersection {
                        point,
                        alpha,
                        edge,
                        start,
                        end,
                    },
                )
            })
            .collect();

        Ok(hits)
    }

    /// The triangle across `edge` from `current`.
    ///
    /// The edge is matched by the positions of its vertices, so a neighbor
    /// that uses different (duplicated) vertex indices for the same edge is
    /// still found. Direction does not matter.
    ///
    /// Returns `Ok(None)` if the edge is a boundary, is not an edge of the
    /// mesh, or `current` is not one of its triangles.
    ///
    /// # Errors
    ///
    /// - [`WalkError::VertexOutOfRange`] if either vertex index is invalid
    /// - [`WalkError::TriangleOutOfRange`] if `current` is invalid
    pub fn edge_neighbor(&self, edge: EdgeIndexPair, current: usize) -> WalkResult<Option<usize>> {
        if current >= self.triangle_count() {
            return Err(WalkError::TriangleOutOfRange {
                index: current,
                triangle_count: self.triangle_count(),
            });
        }
        Ok(self.adjacency(edge)?.and_then(|entry| entry.other(current)))
    }

    /// The raw adjacency record for an edge, or `Ok(None)` if it has none.
    ///
    /// # Errors
    ///
    /// [`WalkError::VertexOutOfRange`] if either vertex index is invalid.
    pub fn adjacency(&self, edge: EdgeIndexPair) -> WalkResult<Option<&AdjacencyEntry>> {
        let key = self.edge_key(edge)?;
        Ok(self.adjacency.get(&key))
    }

    /// Position-based identity of an edge.
    ///
    /// Two index pairs get the same key when their endpoints weld together,
    /// in either order.
    ///
    /// # Errors
    ///
    /// [`WalkError::VertexOutOfRange`] if either vertex index is invalid.
    pub fn edge_key(&self, edge: EdgeIndexPair) -> WalkResult<EdgeKey> {
        key_for(&self.weld, edge)
    }

    /// Neighbors across each edge of a triangle, in
    /// [`triangle_edges`](Self::triangle_edges) order.
    ///
    /// # Errors
    ///
    /// [`WalkError::TriangleOutOfRange`] if `triangle >= triangle_count()`.
    pub fn triangle_neighbors(&self, triangle: usize) -> WalkResult<[Option<usize>; 3]> {
        let [e0, e1, e2] = self.triangle_edges(triangle)?;
        Ok([
            self.edge_neighbor(e0, triangle)?,
            self.edge_neighbor(e1, triangle)?,
            self.edge_neighbor(e2, triangle)?,
        ])
    }

    /// Triangles that have `vertex` as a corner, in mesh order.
    ///
    /// Corners are matched by position like edges are, so the fan includes
    /// triangles that use a duplicated copy of the vertex.
    ///
    /// # Errors
    ///
    /// [`WalkError::VertexOutOfRange`] if `vertex` is invalid.
    pub fn vertex_triangles(&self, vertex: u32) -> WalkResult<&[usize]> {
        let id = canonical_or_err(&self.weld, vertex)?;
        Ok(self.adjacency.faces_for_vertex(id))
    }

    /// True if `vertex` is an endpoint of a boundary edge.
    ///
    /// # Errors
    ///
    /// [`WalkError::VertexOutOfRange`] if `vertex` is invalid.
    pub fn is_boundary_vertex(&self, vertex: u32) -> WalkResult<bool> {
        let id = canonical_or_err(&self.weld, vertex)?;
        for &triangle in self.adjacency.faces_for_vertex(id) {
            for edge in self.triangle_edges(triangle)? {
                let key = self.edge_key(edge)?;
                let (a, b) = key.vertices();
                if (a == id || b == id)
                    && self.adjacency.get(&key).is_some_and(AdjacencyEntry::is_boundary)
                {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Unit face normal in world space, `(v1 - v0) × (v2 - v0)` normalized.
    ///
    /// Computed after the transform, so it stays correct under non-uniform
    /// scale and mirroring (a mirrored transform flips it).
    ///
    /// # Errors
    ///
    /// - [`WalkError::TriangleOutOfRange`] if `triangle >= triangle_count()`
    /// - [`WalkError::DegenerateTriangle`] if the world-space triangle has
    ///   zero area
    pub fn face_normal<T>(&self, triangle: usize, transform: &T) -> WalkResult<Vector3<f64>>
    where
        T: WorldTransform + ?Sized,
    {
        self.triangle_world_positions(triangle, transform)?
            .normal()
            .ok_or(WalkError::DegenerateTriangle { triangle })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NonManifoldPolicy;
    use approx::assert_relative_eq;
    use mesh_transform::{LocalSpace, Transform3D};
    use mesh_types::{MeshError, unit_cube, unit_quad};

    fn walker(mesh: TriangleMesh) -> MeshWalker {
        MeshWalker::new(mesh).unwrap_or_else(|e| panic!("walker construction failed: {e}"))
    }

    fn plane(point: [f64; 3], normal: [f64; 3]) -> Plane {
        let Some(plane) = Plane::new(Point3::from(point), Vector3::from(normal)) else {
            panic!("test plane has a zero normal");
        };
        plane
    }

    #[test]
    fn walker_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<MeshWalker>();
    }

    #[test]
    fn construction_rejects_bad_input() {
        let mut ragged = unit_quad();
        ragged.indices.pop();
        assert_eq!(
            MeshWalker::new(ragged).err(),
            Some(WalkError::InvalidMesh(MeshError::IndexBufferLength { len: 5 }))
        );

        let mut dangling = unit_quad();
        dangling.indices[2] = 9;
        assert!(matches!(
            MeshWalker::new(dangling),
            Err(WalkError::InvalidMesh(MeshError::VertexOutOfRange { index: 9, .. }))
        ));

        let bad_params = WalkParams::default().with_segment_tolerance(-1.0);
        assert!(matches!(
            MeshWalker::with_params(unit_quad(), bad_params),
            Err(WalkError::InvalidParams { .. })
        ));
    }

    #[test]
    fn empty_mesh_has_no_edges() {
        let walker = walker(TriangleMesh::new());
        assert_eq!(walker.triangle_count(), 0);
        assert_eq!(walker.edge_count(), 0);
        assert!(!walker.is_closed());
    }

    #[test]
    fn quad_counts() {
        let walker = walker(unit_quad());
        assert_eq!(walker.edge_count(), 5);
        assert_eq!(walker.boundary_edge_count(), 4);
        assert_eq!(walker.interior_edge_count(), 1);
        assert_eq!(walker.boundary_edges().count(), 4);
        assert!(!walker.is_closed());
    }

    #[test]
    fn cube_is_closed() {
        let walker = walker(unit_cube());
        assert_eq!(walker.edge_count(), 18);
        assert!(walker.is_closed());
        for t in 0..walker.triangle_count() {
            let neighbors = walker
                .triangle_neighbors(t)
                .unwrap_or_else(|e| panic!("{e}"));
            assert!(neighbors.iter().all(Option::is_some), "triangle {t}");
        }
    }

    #[test]
    fn world_positions_follow_transform() {
        let walker = walker(unit_quad());
        let shift = Transform3D::translation(10.0, 0.0, 0.0);

        let tri = walker
            .triangle_world_positions(1, &shift)
            .unwrap_or_else(|e| panic!("{e}"));
        assert_relative_eq!(tri.v0, Point3::new(10.0, 0.0, 0.0));
        assert_relative_eq!(tri.v1, Point3::new(11.0, 1.0, 0.0));
        assert_relative_eq!(tri.v2, Point3::new(10.0, 1.0, 0.0));

        assert_eq!(
            walker.triangle_world_positions(2, &LocalSpace).err(),
            Some(WalkError::TriangleOutOfRange {
                index: 2,
                triangle_count: 2,
            })
        );
    }

    #[test]
    fn intersections_report_edge_and_endpoints() {
        let mesh = TriangleMesh::from_faces(
            vec![
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(1.0, -1.0, 0.0),
                Point3::new(-1.0, -1.0, 0.0),
            ],
            &[[0, 1, 2]],
        );
        let walker = walker(mesh);
        let hits = walker
            .intersections(&plane([0.0; 3], [0.0, 1.0, 0.0]), 0, &LocalSpace)
            .unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].edge, EdgeIndexPair::new(0, 1));
        assert_relative_eq!(hits[0].point, Point3::new(0.5, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(hits[0].start, Point3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(hits[0].end, Point3::new(1.0, -1.0, 0.0));

        assert_eq!(hits[1].edge, EdgeIndexPair::new(2, 0));
        assert_relative_eq!(hits[1].point, Point3::new(-0.5, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(hits[1].alpha, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn intersections_use_world_space() {
        let walker = walker(unit_quad());
        // The quad sits in z = 0 locally; lift it through z = 0.5.
        let tilt = |p: Point3<f64>| Point3::new(p.x, p.y, p.x);
        let hits = walker
            .intersections(&plane([0.0, 0.0, 0.5], [0.0, 0.0, 1.0]), 0, &tilt)
            .unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(hits.len(), 2);
        for hit in &hits {
            assert_relative_eq!(hit.point.z, 0.5, epsilon = 1e-12);
        }

        let flat = walker
            .intersections(&plane([0.0, 0.0, 0.5], [0.0, 0.0, 1.0]), 0, &LocalSpace)
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(flat.is_empty());
    }

    #[test]
    fn neighbor_lookup_is_position_based() {
        let split = unit_quad().split_vertices();
        let walker = walker(split);
        assert_eq!(walker.merged_vertex_count(), 2);

        // Triangle 0 walks the diagonal as 2 -> 0, triangle 1 as 3 -> 4.
        let from_first = walker.edge_neighbor(EdgeIndexPair::new(2, 0), 0);
        let from_second = walker.edge_neighbor(EdgeIndexPair::new(3, 4), 1);
        assert_eq!(from_first, Ok(Some(1)));
        assert_eq!(from_second, Ok(Some(0)));
        assert_eq!(
            walker.edge_key(EdgeIndexPair::new(2, 0)),
            walker.edge_key(EdgeIndexPair::new(3, 4))
        );
    }

    #[test]
    fn neighbor_lookup_misses() {
        let walker = walker(unit_quad());

        // Boundary
        assert_eq!(walker.edge_neighbor(EdgeIndexPair::new(1, 2), 0), Ok(None));
        // Not an edge
        assert_eq!(walker.edge_neighbor(EdgeIndexPair::new(1, 3), 0), Ok(None));
        // Current triangle is not on the edge
        let cube = self::walker(unit_cube());
        assert_eq!(cube.edge_neighbor(EdgeIndexPair::new(0, 2), 5), Ok(None));

        assert_eq!(
            walker.edge_neighbor(EdgeIndexPair::new(0, 40), 0),
            Err(WalkError::VertexOutOfRange {
                index: 40,
                vertex_count: 4,
            })
        );
        assert!(matches!(
            walker.edge_neighbor(EdgeIndexPair::new(0, 2), 7),
            Err(WalkError::TriangleOutOfRange { index: 7, .. })
        ));
    }

    #[test]
    fn adjacency_exposes_both_sides() {
        let walker = walker(unit_quad());
        let entry = walker
            .adjacency(EdgeIndexPair::new(2, 0))
            .unwrap_or_else(|e| panic!("{e}"));
        let Some(AdjacencyEntry::Interior(first, second)) = entry.copied() else {
            panic!("diagonal should be interior");
        };
        assert_eq!((first.triangle, second.triangle), (0, 1));

        let outline = walker.adjacency(EdgeIndexPair::new(0, 1));
        assert!(matches!(outline, Ok(Some(AdjacencyEntry::Boundary(_)))));
    }

    #[test]
    fn face_normal_in_world_space() {
        let walker = walker(unit_quad());
        let normal = walker
            .face_normal(0, &LocalSpace)
            .unwrap_or_else(|e| panic!("{e}"));
        assert_relative_eq!(normal, Vector3::z(), epsilon = 1e-12);

        let flip = Transform3D::rotation_axis(Vector3::x(), std::f64::consts::PI);
        let flipped = walker.face_normal(0, &flip).unwrap_or_else(|e| panic!("{e}"));
        assert_relative_eq!(flipped, -Vector3::z(), epsilon = 1e-12);

        let squash = Transform3D::scale(1.0, 0.0, 1.0);
        assert_eq!(
            walker.face_normal(0, &squash),
            Err(WalkError::DegenerateTriangle { triangle: 0 })
        );
    }

    #[test]
    fn face_normal_of_tiny_triangle() {
        let tiny = TriangleMesh::from_faces(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1e-9, 0.0, 0.0),
                Point3::new(0.0, 1e-9, 0.0),
            ],
            &[[0, 1, 2]],
        );
        let walker = walker(tiny);
        let normal = walker
            .face_normal(0, &LocalSpace)
            .unwrap_or_else(|e| panic!("{e}"));
        assert_relative_eq!(normal, Vector3::z(), epsilon = 1e-12);

        let cut = plane([0.5e-9, 0.0, 0.0], [1.0, 0.0, 0.0]);
        let hits = walker
            .intersections(&cut, 0, &LocalSpace)
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn welded_construction_with_far_vertices() {
        let far = TriangleMesh::from_faces(
            vec![
                Point3::new(1e14, 0.0, 0.0),
                Point3::new(1e14 + 1.0, 0.0, 0.0),
                Point3::new(1e14, 1.0, 0.0),
                Point3::new(1e14 + 1.0, 1.0, 0.0),
                Point3::new(1e14 + 1.0, 0.0, 0.0),
            ],
            &[[0, 1, 2], [4, 3, 2]],
        );
        let walker = MeshWalker::with_params(far, WalkParams::welded(1e-6))
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(walker.merged_vertex_count(), 1);
        assert_eq!(walker.interior_edge_count(), 1);
    }

    #[test]
    fn vertex_fans_match_by_position() {
        let walker = walker(unit_quad().split_vertices());
        // Vertex 3 is triangle 1's copy of corner (0, 0).
        assert_eq!(walker.vertex_triangles(3), Ok(&[0usize, 1][..]));
        assert_eq!(walker.vertex_triangles(1), Ok(&[0usize][..]));
        assert_eq!(
            walker.vertex_triangles(6),
            Err(WalkError::VertexOutOfRange {
                index: 6,
                vertex_count: 6,
            })
        );
    }

    #[test]
    fn boundary_vertices() {
        let quad = walker(unit_quad());
        assert_eq!(quad.is_boundary_vertex(0), Ok(true));

        let cube = walker(unit_cube());
        assert!((0..8).all(|v| cube.is_boundary_vertex(v) == Ok(false)));

        // Centre of a 2x2 grid.
        let grid = TriangleMesh::from_faces(
            (0..9)
                .map(|i| Point3::new(f64::from(i % 3), f64::from(i / 3), 0.0))
                .collect(),
            &[
                [0, 1, 4],
                [0, 4, 3],
                [1, 2, 5],
                [1, 5, 4],
                [3, 4, 7],
                [3, 7, 6],
                [4, 5, 8],
                [4, 8, 7],
            ],
        );
        let grid = walker(grid);
        assert_eq!(grid.is_boundary_vertex(4), Ok(false));
        assert_eq!(grid.is_boundary_vertex(1), Ok(true));
        assert_eq!(grid.vertex_triangles(4).map(<[usize]>::len), Ok(6));
    }

    #[test]
    fn with_positions_builds_next_generation() {
        let first = walker(unit_quad());
        let moved: Vec<_> = first
            .mesh()
            .positions
            .iter()
            .map(|p| Point3::from(p.coords * 2.0))
            .collect();

        let second = first
            .with_positions(moved)
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(first.generation(), 0);
        assert_eq!(second.generation(), 1);
        assert_eq!(second.edge_count(), first.edge_count());
        assert_relative_eq!(second.mesh().positions[2], Point3::new(2.0, 2.0, 0.0));
        assert_relative_eq!(first.mesh().positions[2], Point3::new(1.0, 1.0, 0.0));

        let short = first.with_positions(vec![Point3::origin()]);
        assert!(matches!(short, Err(WalkError::InvalidMesh(_))));
    }

    #[test]
    fn non_manifold_policy_is_honored() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, -1.0, 0.0),
            Point3::new(0.5, 0.0, 1.0),
        ];
        let mesh = TriangleMesh::from_faces(positions, &[[0, 1, 2], [1, 0, 3], [0, 1, 4]]);

        assert!(matches!(
            MeshWalker::new(mesh.clone()),
            Err(WalkError::NonManifoldEdge { triangle: 2, .. })
        ));

        let params = WalkParams::default().with_non_manifold(NonManifoldPolicy::LastWriterWins);
        let walker = MeshWalker::with_params(mesh, params).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(walker.edge_neighbor(EdgeIndexPair::new(0, 1), 0), Ok(Some(2)));
    }
}
