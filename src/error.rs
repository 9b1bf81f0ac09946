//! Error taxonomy for graph construction, configuration, and solver runs.
//!
//! Non-convergence is deliberately absent: exhausting the iteration cap is a
//! best-effort outcome reported through `converged=false` on the result, not
//! an error.

use thiserror::Error;

/// Errors produced by the ranking engine.
#[derive(Debug, Clone, Error)]
pub enum RankError {
    /// The graph is unusable: zero nodes, a negative edge weight, or an
    /// empty/mismatched score vector handed to evaluation.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// A parameter is out of range (e.g. `alpha` outside (0,1), `k_sub`
    /// larger than the node count, non-positive `tol`).
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// An iterate contained NaN/Inf, or the eigen-decomposition failed to
    /// converge. Aborts only the offending solver run.
    #[error("numerical failure: {0}")]
    Numerical(String),
}
