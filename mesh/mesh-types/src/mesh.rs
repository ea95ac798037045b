//! Flat-buffer triangle mesh snapshot.

use crate::{MeshError, MeshResult, Triangle};
use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle mesh as handed out by a renderer: vertex positions plus a flat
/// index buffer.
///
/// # Memory Layout
///
/// - `positions`: `Vec<Point3<f64>>` - Vertex positions in mesh-local space
/// - `indices`: `Vec<u32>` - Triangle corners, three per triangle
///
/// The type does not enforce consistency on its own; call
/// [`validate`](Self::validate) (the walker does this at construction) before
/// trusting [`triangle_indices`](Self::triangle_indices) on arbitrary input.
///
/// # Example
///
/// ```
/// use mesh_types::TriangleMesh;
///
/// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
/// let mesh = TriangleMesh::from_raw(&positions, &[0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriangleMesh {
    /// Vertex positions in mesh-local space.
    pub positions: Vec<Point3<f64>>,

    /// Flat triangle index buffer, grouped in runs of three.
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Create a mesh from a position buffer and a flat index buffer.
    #[inline]
    #[must_use]
    pub const fn from_parts(positions: Vec<Point3<f64>>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    /// Create a mesh from per-triangle index triplets.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{TriangleMesh, Point3};
    ///
    /// let mesh = TriangleMesh::from_faces(
    ///     vec![
    ///         Point3::new(0.0, 0.0, 0.0),
    ///         Point3::new(1.0, 0.0, 0.0),
    ///         Point3::new(1.0, 1.0, 0.0),
    ///         Point3::new(0.0, 1.0, 0.0),
    ///     ],
    ///     &[[0, 1, 2], [0, 2, 3]],
    /// );
    /// assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
    /// ```
    #[must_use]
    pub fn from_faces(positions: Vec<Point3<f64>>, faces: &[[u32; 3]]) -> Self {
        let indices = faces.iter().flatten().copied().collect();
        Self { positions, indices }
    }

    /// Create a mesh from raw coordinate and index data.
    ///
    /// `positions` is `[x0, y0, z0, x1, y1, z1, ...]`. A trailing partial
    /// coordinate triple is dropped; the index buffer is kept verbatim so
    /// that [`validate`](Self::validate) can report a bad length.
    #[must_use]
    pub fn from_raw(positions: &[f64], indices: &[u32]) -> Self {
        let positions = positions
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();

        Self {
            positions,
            indices: indices.to_vec(),
        }
    }

    /// Number of vertex positions.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of complete triangles in the index buffer.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if the mesh has no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }

    /// Check that the snapshot is internally consistent.
    ///
    /// # Errors
    ///
    /// - [`MeshError::IndexBufferLength`] if the index buffer is not a
    ///   multiple of three
    /// - [`MeshError::VertexOutOfRange`] if any index exceeds the position buffer
    /// - [`MeshError::NonFinitePosition`] if a position contains NaN or infinity
    pub fn validate(&self) -> MeshResult<()> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IndexBufferLength {
                len: self.indices.len(),
            });
        }

        let vertex_count = self.positions.len();
        for (offset, &index) in self.indices.iter().enumerate() {
            if index as usize >= vertex_count {
                return Err(MeshError::VertexOutOfRange {
                    triangle: offset / 3,
                    index,
                    vertex_count,
                });
            }
        }

        if let Some(index) = self
            .positions
            .iter()
            .position(|p| !p.coords.iter().all(|c| c.is_finite()))
        {
            return Err(MeshError::NonFinitePosition { index });
        }

        Ok(())
    }

    /// Get the three vertex indices of a triangle, in stored winding order.
    ///
    /// Returns `None` if the triangle index is out of bounds.
    #[must_use]
    pub fn triangle_indices(&self, triangle: usize) -> Option<[u32; 3]> {
        let start = triangle.checked_mul(3)?;
        let end = start.checked_add(3)?;
        match self.indices.get(start..end)? {
            &[a, b, c] => Some([a, b, c]),
            _ => None,
        }
    }

    /// Get a triangle with resolved mesh-local positions.
    ///
    /// Returns `None` if the triangle or any of its vertex indices is out of bounds.
    #[must_use]
    pub fn triangle(&self, triangle: usize) -> Option<Triangle> {
        let [a, b, c] = self.triangle_indices(triangle)?;
        Some(Triangle::new(
            *self.positions.get(a as usize)?,
            *self.positions.get(b as usize)?,
            *self.positions.get(c as usize)?,
        ))
    }

    /// Iterate over triangles as index triplets.
    pub fn faces(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }

    /// Duplicate vertices so that no two triangles share an index.
    ///
    /// This is the layout flat-shaded meshes usually arrive in: every
    /// triangle owns its own three vertices, and shared edges can only be
    /// recovered by comparing positions.
    #[must_use]
    pub fn split_vertices(&self) -> Self {
        let mut positions = Vec::with_capacity(self.indices.len());
        let mut indices = Vec::with_capacity(self.indices.len());

        for &index in &self.indices {
            if let Some(&p) = self.positions.get(index as usize) {
                #[allow(clippy::cast_possible_truncation)]
                indices.push(positions.len() as u32);
                positions.push(p);
            }
        }

        Self { positions, indices }
    }
}

/// Create a unit quad in the XY plane split along its diagonal (0, 2).
///
/// Four boundary edges, one shared interior edge.
///
/// # Example
///
/// ```
/// use mesh_types::unit_quad;
///
/// let quad = unit_quad();
/// assert_eq!(quad.vertex_count(), 4);
/// assert_eq!(quad.triangle_count(), 2);
/// ```
#[must_use]
pub fn unit_quad() -> TriangleMesh {
    TriangleMesh::from_faces(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ],
        &[[0, 1, 2], [0, 2, 3]],
    )
}

/// Create a closed unit cube spanning `[0, 1]` on every axis.
///
/// 8 vertices, 12 triangles, CCW winding when viewed from outside.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
///
/// let cube = unit_cube();
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.triangle_count(), 12);
/// ```
#[must_use]
pub fn unit_cube() -> TriangleMesh {
    let positions = vec![
        Point3::new(0.0, 0.0, 0.0), // 0
        Point3::new(1.0, 0.0, 0.0), // 1
        Point3::new(1.0, 1.0, 0.0), // 2
        Point3::new(0.0, 1.0, 0.0), // 3
        Point3::new(0.0, 0.0, 1.0), // 4
        Point3::new(1.0, 0.0, 1.0), // 5
        Point3::new(1.0, 1.0, 1.0), // 6
        Point3::new(0.0, 1.0, 1.0), // 7
    ];

    TriangleMesh::from_faces(
        positions,
        &[
            // Bottom (z=0)
            [0, 2, 1],
            [0, 3, 2],
            // Top (z=1)
            [4, 5, 6],
            [4, 6, 7],
            // Front (y=0)
            [0, 1, 5],
            [0, 5, 4],
            // Back (y=1)
            [3, 7, 6],
            [3, 6, 2],
            // Left (x=0)
            [0, 4, 7],
            [0, 7, 3],
            // Right (x=1)
            [1, 2, 6],
            [1, 6, 5],
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mesh_is_valid() {
        let mesh = TriangleMesh::new();
        assert!(mesh.is_empty());
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn from_raw_builds_positions() {
        let mesh = TriangleMesh::from_raw(&[0.0, 0.0, 0.0, 1.0, 2.0, 3.0], &[0, 1, 1]);
        assert_eq!(mesh.vertex_count(), 2);
        assert_eq!(mesh.positions[1], Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn validate_rejects_ragged_index_buffer() {
        let mut mesh = unit_quad();
        mesh.indices.push(0);
        assert_eq!(
            mesh.validate(),
            Err(MeshError::IndexBufferLength { len: 7 })
        );
    }

    #[test]
    fn validate_rejects_out_of_range_index() {
        let mut mesh = unit_quad();
        mesh.indices[4] = 17;
        assert_eq!(
            mesh.validate(),
            Err(MeshError::VertexOutOfRange {
                triangle: 1,
                index: 17,
                vertex_count: 4,
            })
        );
    }

    #[test]
    fn validate_rejects_nan_position() {
        let mut mesh = unit_quad();
        mesh.positions[3].y = f64::NAN;
        assert_eq!(
            mesh.validate(),
            Err(MeshError::NonFinitePosition { index: 3 })
        );
    }

    #[test]
    fn triangle_indices_bounds() {
        let quad = unit_quad();
        assert_eq!(quad.triangle_indices(0), Some([0, 1, 2]));
        assert_eq!(quad.triangle_indices(1), Some([0, 2, 3]));
        assert_eq!(quad.triangle_indices(2), None);
        assert_eq!(quad.triangle_indices(usize::MAX), None);
    }

    #[test]
    fn triangle_resolves_positions() {
        let quad = unit_quad();
        let tri = quad.triangle(1);
        assert!(tri.is_some());
        let tri = tri.unwrap_or_else(|| Triangle::from_arrays([0.0; 3], [0.0; 3], [0.0; 3]));
        assert_eq!(tri.v1, Point3::new(1.0, 1.0, 0.0));
        assert_eq!(tri.v2, Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn faces_iterate_in_order() {
        let faces: Vec<_> = unit_quad().faces().collect();
        assert_eq!(faces, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn split_vertices_duplicates_every_corner() {
        let cube = unit_cube();
        let split = cube.split_vertices();

        assert_eq!(split.vertex_count(), 36);
        assert_eq!(split.triangle_count(), 12);
        assert!(split.validate().is_ok());

        // Same geometry, different indices
        for t in 0..cube.triangle_count() {
            assert_eq!(cube.triangle(t), split.triangle(t));
        }
    }

    #[test]
    fn unit_cube_is_valid() {
        assert!(unit_cube().validate().is_ok());
    }
}
