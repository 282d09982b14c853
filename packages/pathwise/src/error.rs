//! Error types shared by every algorithm in the crate.

use thiserror::Error;

/// Result type for algorithm operations.
pub type Result<T> = std::result::Result<T, AlgorithmError>;

/// Errors reported by path algorithms and their query operations.
///
/// Cancellation is deliberately absent: an aborted run leaves the instance in
/// [`ComputationState::Aborted`](crate::core::ComputationState) and `compute`
/// returns `Ok(())`, so abort and normal completion share one return path.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum AlgorithmError {
    /// An argument was rejected before any computation started.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// A root, target, or queried vertex is not known to this run.
    #[error("vertex not found: {vertex}")]
    VertexNotFound { vertex: String },

    /// A negative-weight edge was examined by an algorithm that requires
    /// non-negative weights. Distances computed so far are partial.
    #[error("negative-weight edge {edge} (weight {weight}) examined")]
    NegativeWeight { edge: String, weight: f64 },

    /// A negative cycle was detected after the all-pairs pass; distances for
    /// affected pairs are meaningless.
    #[error("negative cycle through vertex {vertex}")]
    NegativeCycle { vertex: String },

    /// The graph has a cycle, so no topological order exists.
    #[error("graph is not acyclic")]
    NotAcyclic,

    /// `compute` was called while a run was already in progress.
    #[error("computation is already running")]
    AlreadyRunning,
}

impl AlgorithmError {
    pub(crate) fn vertex_not_found(vertex: &impl std::fmt::Debug) -> Self {
        AlgorithmError::VertexNotFound {
            vertex: format!("{vertex:?}"),
        }
    }

    pub(crate) fn negative_weight(edge: &impl std::fmt::Debug, weight: f64) -> Self {
        AlgorithmError::NegativeWeight {
            edge: format!("{edge:?}"),
            weight,
        }
    }
}
