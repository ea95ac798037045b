//! Position-based vertex identity.
//!
//! Edges are paired up by where their endpoints are, not by which index they
//! use, so seams with duplicated vertices still connect. Every vertex is
//! mapped to the lowest-indexed vertex at the same position, or, with a weld
//! tolerance, to the lowest index of its cluster. Clusters are the connected
//! groups of vertices linked by pairs within the tolerance. Edge keys are then
//! built from those representatives.

// Vertex buffers are addressed by u32 indices.
#![allow(clippy::cast_possible_truncation)]

use hashbrown::HashMap;
use nalgebra::Point3;
use tracing::debug;

/// Representative vertex for every vertex in a position buffer.
#[derive(Debug, Clone)]
pub(crate) struct WeldMap {
    canonical: Vec<u32>,
    merged: usize,
}

impl WeldMap {
    /// Build the map. `tolerance == 0.0` means exact position equality.
    pub(crate) fn build(positions: &[Point3<f64>], tolerance: f64) -> Self {
        let map = if tolerance > 0.0 {
            Self::build_tolerant(positions, tolerance)
        } else {
            Self::build_exact(positions)
        };

        debug!(
            vertices = positions.len(),
            merged = map.merged,
            tolerance,
            "Built vertex weld map"
        );

        map
    }

    fn build_exact(positions: &[Point3<f64>]) -> Self {
        let mut first_at: HashMap<[u64; 3], u32> = HashMap::with_capacity(positions.len());
        let mut canonical = Vec::with_capacity(positions.len());
        let mut merged = 0;

        for (idx, p) in positions.iter().enumerate() {
            let rep = *first_at.entry(exact_key(p)).or_insert(idx as u32);
            if rep != idx as u32 {
                merged += 1;
            }
            canonical.push(rep);
        }

        Self { canonical, merged }
    }

    /// Spatial-hash clustering. Vertices within `tolerance` of each other are
    /// joined, and the joins chain, so each cluster maps to its lowest index
    /// regardless of buffer order.
    fn build_tolerant(positions: &[Point3<f64>], tolerance: f64) -> Self {
        let cell_size = tolerance * 2.0;

        let mut spatial_hash: HashMap<(i64, i64, i64), Vec<u32>> = HashMap::new();
        for (idx, p) in positions.iter().enumerate() {
            spatial_hash
                .entry(pos_to_cell(p, cell_size))
                .or_default()
                .push(idx as u32);
        }

        let mut parent: Vec<u32> = (0..positions.len() as u32).collect();

        for (idx, p) in positions.iter().enumerate() {
            let idx = idx as u32;
            for cell in neighbor_cells(pos_to_cell(p, cell_size)) {
                let Some(candidates) = spatial_hash.get(&cell) else {
                    continue;
                };
                for &other in candidates {
                    if other <= idx {
                        continue;
                    }
                    if (*p - positions[other as usize]).norm() <= tolerance {
                        union(&mut parent, idx, other);
                    }
                }
            }
        }

        let canonical: Vec<u32> = (0..parent.len() as u32)
            .map(|v| find(&mut parent, v))
            .collect();
        let merged = canonical
            .iter()
            .enumerate()
            .filter(|&(idx, &rep)| rep != idx as u32)
            .count();

        Self { canonical, merged }
    }

    /// Representative of `vertex`, or `None` if it is out of range.
    #[inline]
    pub(crate) fn canonical(&self, vertex: u32) -> Option<u32> {
        self.canonical.get(vertex as usize).copied()
    }

    /// Number of vertices covered.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.canonical.len()
    }

    /// Number of vertices folded into an earlier one.
    #[inline]
    pub(crate) const fn merged(&self) -> usize {
        self.merged
    }
}

/// Bit pattern of a position with `-0.0` folded into `0.0`.
fn exact_key(p: &Point3<f64>) -> [u64; 3] {
    [
        (p.x + 0.0).to_bits(),
        (p.y + 0.0).to_bits(),
        (p.z + 0.0).to_bits(),
    ]
}

/// Root of `v`, halving the path on the way up.
fn find(parent: &mut [u32], mut v: u32) -> u32 {
    while parent[v as usize] != v {
        let grandparent = parent[parent[v as usize] as usize];
        parent[v as usize] = grandparent;
        v = grandparent;
    }
    v
}

/// Join the sets of `a` and `b`; the lower root wins.
fn union(parent: &mut [u32], a: u32, b: u32) {
    let (ra, rb) = (find(parent, a), find(parent, b));
    if ra < rb {
        parent[rb as usize] = ra;
    } else if rb < ra {
        parent[ra as usize] = rb;
    }
}

/// The 3x3x3 block of cells around `cell`. Offsets that would leave the
/// `i64` range are skipped; far coordinates saturate into the edge cells.
fn neighbor_cells(cell: (i64, i64, i64)) -> impl Iterator<Item = (i64, i64, i64)> {
    (-1..=1i64).flat_map(move |dx| {
        (-1..=1i64).flat_map(move |dy| {
            (-1..=1i64).filter_map(move |dz| {
                Some((
                    cell.0.checked_add(dx)?,
                    cell.1.checked_add(dy)?,
                    cell.2.checked_add(dz)?,
                ))
            })
        })
    })
}

#[allow(clippy::cast_possible_truncation)]
fn pos_to_cell(pos: &Point3<f64>, cell_size: f64) -> (i64, i64, i64) {
    (
        (pos.x / cell_size).floor() as i64,
        (pos.y / cell_size).floor() as i64,
        (pos.z / cell_size).floor() as i64,
    )
}
