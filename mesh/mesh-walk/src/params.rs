//! Walker parameters and presets.

use crate::{WalkError, WalkResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What to do when a third triangle registers against an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NonManifoldPolicy {
    /// Fail construction with [`WalkError::NonManifoldEdge`].
    #[default]
    Reject,
    /// The newest triangle replaces the second slot; a warning is logged.
    LastWriterWins,
}

/// Parameters for building and querying a [`MeshWalker`](crate::MeshWalker).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WalkParams {
    /// Distance below which two vertex positions count as the same point
    /// when pairing up edges.
    ///
    /// `0.0` requires exact equality (with `-0.0 == 0.0`). A positive
    /// tolerance welds transitively: a chain of vertices, each within the
    /// tolerance of the next, becomes one vertex even if its ends are
    /// further apart.
    pub weld_tolerance: f64,

    /// `|n · (p2 - p1)|` at or below this treats an edge as parallel to the
    /// cutting plane. The plane normal is unit length, so this is a length
    /// in world units.
    pub parallel_epsilon: f64,

    /// Slack on the edge parameter: hits with `alpha` in
    /// `[-tolerance, 1 + tolerance]` are kept.
    pub segment_tolerance: f64,

    /// Handling of edges shared by more than two triangles.
    pub non_manifold: NonManifoldPolicy,

    /// Upper bound on triangles visited by a single plane walk.
    pub max_walk_steps: usize,
}

impl Default for WalkParams {
    fn default() -> Self {
        Self {
            weld_tolerance: 0.0,
            parallel_epsilon: 1e-10,
            segment_tolerance: 1e-5,
            non_manifold: NonManifoldPolicy::Reject,
            max_walk_steps: 10_000,
        }
    }
}

impl WalkParams {
    /// Parameters for meshes with unwelded seams: positions within
    /// `tolerance` are treated as one vertex.
    #[must_use]
    pub fn welded(tolerance: f64) -> Self {
        Self {
            weld_tolerance: tolerance,
            ..Default::default()
        }
    }

    /// Parameters for arbitrary imported art: small weld tolerance and
    /// last-writer-wins on non-manifold edges.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            weld_tolerance: 1e-6,
            non_manifold: NonManifoldPolicy::LastWriterWins,
            ..Default::default()
        }
    }

    /// Set the weld tolerance.
    #[must_use]
    pub const fn with_weld_tolerance(mut self, tolerance: f64) -> Self {
        self.weld_tolerance = tolerance;
        self
    }

    /// Set the parallel-edge epsilon.
    #[must_use]
    pub const fn with_parallel_epsilon(mut self, epsilon: f64) -> Self {
        self.parallel_epsilon = epsilon;
        self
    }

    /// Set the segment parameter tolerance.
    #[must_use]
    pub const fn with_segment_tolerance(mut self, tolerance: f64) -> Self {
        self.segment_tolerance = tolerance;
        self
    }

    /// Set the non-manifold policy.
    #[must_use]
    pub const fn with_non_manifold(mut self, policy: NonManifoldPolicy) -> Self {
        self.non_manifold = policy;
        self
    }

    /// Set the plane walk step limit.
    #[must_use]
    pub const fn with_max_walk_steps(mut self, steps: usize) -> Self {
        self.max_walk_steps = steps;
        self
    }

    /// Check that every tolerance is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::InvalidParams`] naming the first bad field.
    pub fn validate(&self) -> WalkResult<()> {
        for (name, value) in [
            ("weld_tolerance", self.weld_tolerance),
            ("parallel_epsilon", self.parallel_epsilon),
            ("segment_tolerance", self.segment_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(WalkError::InvalidParams {
                    reason: format!("{name} must be finite and >= 0, got {value}"),
                });
            }
        }
        if self.max_walk_steps == 0 {
            return Err(WalkError::InvalidParams {
                reason: "max_walk_steps must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
