//! core small types

/// Per-vertex traversal color. Monotonic within one run: White -> Gray -> Black.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VertexColor {
    /// Undiscovered.
    White,
    /// On the frontier: discovered, distance still tentative.
    Gray,
    /// Settled: out-edges processed, distance final for non-negative algorithms.
    Black,
}

/// Lifecycle state of one algorithm instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ComputationState {
    NotRunning,
    Running,
    /// `abort` was requested while running; the body has not observed it yet.
    PendingAbortion,
    Finished,
    Aborted,
}
