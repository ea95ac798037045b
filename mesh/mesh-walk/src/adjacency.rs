//! Edge-to-triangle adjacency index.
//!
//! Each undirected edge maps to the one or two triangles that contain it,
//! together with the vertex-index pair each triangle used for it. With
//! duplicated seam vertices those pairs differ even though the edge is the
//! same, which is why the key is position-based (see [`crate::weld`]).

use hashbrown::HashMap;
use mesh_types::TriangleMesh;
use tracing::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::params::NonManifoldPolicy;
use crate::weld::WeldMap;
use crate::{WalkError, WalkResult};

/// Two vertex indices bounding an edge, in the order a triangle lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeIndexPair {
    /// Vertex the edge starts at.
    pub start: u32,
    /// Vertex the edge ends at.
    pub end: u32,
}

impl EdgeIndexPair {
    /// Create a pair.
    #[inline]
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// The same edge walked the other way.
    #[inline]
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }
}

/// Undirected edge identity built from welded vertex representatives.
///
/// `EdgeKey::new(a, b) == EdgeKey::new(b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    lo: u32,
    hi: u32,
}

impl EdgeKey {
    /// Build a key from two representative vertex ids, in either order.
    #[inline]
    #[must_use]
    pub const fn new(a: u32, b: u32) -> Self {
        if a < b { Self { lo: a, hi: b } } else { Self { lo: b, hi: a } }
    }

    /// The two representative ids, smaller first.
    #[inline]
    #[must_use]
    pub const fn vertices(self) -> (u32, u32) {
        (self.lo, self.hi)
    }

    /// True if both ends weld to the same point.
    #[inline]
    #[must_use]
    pub const fn is_collapsed(self) -> bool {
        self.lo == self.hi
    }
}

/// One triangle's view of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeSide {
    /// Triangle index.
    pub triangle: usize,
    /// Vertex indices the triangle used for this edge, in its winding order.
    pub edge: EdgeIndexPair,
}

/// Triangles registered against one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AdjacencyEntry {
    /// Only one triangle has this edge.
    Boundary(EdgeSide),
    /// Two triangles share this edge, in registration order.
    Interior(EdgeSide, EdgeSide),
}

impl AdjacencyEntry {
    /// The triangle on the other side of the edge from `current`.
    ///
    /// `None` for boundary edges, or if `current` is not on this edge.
    #[must_use]
    pub const fn other(&self, current: usize) -> Option<usize> {
        match *self {
            Self::Boundary(_) => None,
            Self::Interior(a, b) => {
                if a.triangle == current {
                    Some(b.triangle)
                } else if b.triangle == current {
                    Some(a.triangle)
                } else {
                    None
                }
            }
        }
    }

    /// The side registered by `triangle`, if any.
    #[must_use]
    pub fn side(&self, triangle: usize) -> Option<EdgeSide> {
        self.sides().find(|s| s.triangle == triangle)
    }

    /// Sides in registration order.
    pub fn sides(&self) -> impl Iterator<Item = EdgeSide> {
        let (first, second) = match *self {
            Self::Boundary(a) => (a, None),
            Self::Interior(a, b) => (a, Some(b)),
        };
        std::iter::once(first).chain(second)
    }

    /// True for edges with a single incident triangle.
    #[inline]
    #[must_use]
    pub const fn is_boundary(&self) -> bool {
        matches!(self, Self::Boundary(_))
    }
}

/// Edge-to-triangle index over a whole mesh, plus the triangle fan of each
/// welded vertex.
#[derive(Debug, Clone)]
pub(crate) struct EdgeAdjacency {
    entries: HashMap<EdgeKey, AdjacencyEntry>,
    vertex_faces: HashMap<u32, Vec<usize>>,
    collapsed_edges: usize,
}

impl EdgeAdjacency {
    /// Register every edge of every triangle, in one pass.
    ///
    /// The mesh must already be validated against the weld map's buffer.
    pub(crate) fn build(
        mesh: &TriangleMesh,
        weld: &WeldMap,
        policy: NonManifoldPolicy,
    ) -> WalkResult<Self> {
        let mut adjacency = Self {
            entries: HashMap::with_capacity(mesh.indices.len() / 2),
            vertex_faces: HashMap::with_capacity(mesh.vertex_count()),
            collapsed_edges: 0,
        };

        for (triangle, [a, b, c]) in mesh.faces().enumerate() {
            let ids = [
                canonical_or_err(weld, a)?,
                canonical_or_err(weld, b)?,
                canonical_or_err(weld, c)?,
            ];
            for (i, id) in ids.iter().enumerate() {
                if !ids[..i].contains(id) {
                    adjacency.vertex_faces.entry(*id).or_default().push(triangle);
                }
            }

            for edge in [
                EdgeIndexPair::new(a, b),
                EdgeIndexPair::new(b, c),
                EdgeIndexPair::new(c, a),
            ] {
                let key = key_for(weld, edge)?;
                adjacency.register(key, EdgeSide { triangle, edge }, policy)?;
            }
        }

        Ok(adjacency)
    }

    fn register(
        &mut self,
        key: EdgeKey,
        side: EdgeSide,
        policy: NonManifoldPolicy,
    ) -> WalkResult<()> {
        if key.is_collapsed() {
            self.collapsed_edges += 1;
            return Ok(());
        }

        let Some(entry) = self.entries.get_mut(&key) else {
            self.entries.insert(key, AdjacencyEntry::Boundary(side));
            return Ok(());
        };

        // A degenerate triangle can list the same edge twice.
        if entry.side(side.triangle).is_some() {
            return Ok(());
        }

        match *entry {
            AdjacencyEntry::Boundary(first) => {
                *entry = AdjacencyEntry::Interior(first, side);
            }
            AdjacencyEntry::Interior(first, second) => match policy {
                NonManifoldPolicy::Reject => {
                    return Err(WalkError::NonManifoldEdge {
                        triangle: side.triangle,
                        first: first.triangle,
                        second: second.triangle,
                    });
                }
                NonManifoldPolicy::LastWriterWins => {
                    warn!(
                        triangle = side.triangle,
                        replaced = second.triangle,
                        kept = first.triangle,
                        "Non-manifold edge, replacing second triangle"
                    );
                    *entry = AdjacencyEntry::Interior(first, side);
                }
            },
        }

        Ok(())
    }

    #[inline]
    pub(crate) fn get(&self, key: &EdgeKey) -> Option<&AdjacencyEntry> {
        self.entries.get(key)
    }

    /// Triangles with the welded vertex `id` as a corner, in mesh order.
    pub(crate) fn faces_for_vertex(&self, id: u32) -> &[usize] {
        self.vertex_faces.get(&id).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&EdgeKey, &AdjacencyEntry)> {
        self.entries.iter()
    }

    #[inline]
    pub(crate) fn edge_count(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn boundary_edge_count(&self) -> usize {
        self.entries.values().filter(|e| e.is_boundary()).count()
    }

    /// Edges whose endpoints weld together; they are never indexed.
    #[inline]
    pub(crate) const fn collapsed_edge_count(&self) -> usize {
        self.collapsed_edges
    }
}

/// Position-based key for an edge given by vertex indices.
pub(crate) fn key_for(weld: &WeldMap, edge: EdgeIndexPair) -> WalkResult<EdgeKey> {
    let a = canonical_or_err(weld, edge.start)?;
    let b = canonical_or_err(weld, edge.end)?;
    Ok(EdgeKey::new(a, b))
}

/// Welded id of a vertex index.
pub(crate) fn canonical_or_err(weld: &WeldMap, vertex: u32) -> WalkResult<u32> {
    weld.canonical(vertex).ok_or(WalkError::VertexOutOfRange {
        index: vertex,
        vertex_count: weld.len(),
    })
}
