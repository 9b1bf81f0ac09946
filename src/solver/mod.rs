//! Link-analysis solvers
//!
//! Four solvers built on one shared power-iteration primitive: PageRank,
//! HITS, Randomized-HITS, and Subspace-HITS. Each run is independent and
//! read-only on the graph, so solvers may execute concurrently over the
//! same [`VisitGraph`](crate::graph::csr::VisitGraph).

pub mod hits;
pub mod pagerank;
pub mod power;
pub mod randomized;
pub mod subspace;

use std::time::Duration;

use crate::error::RankError;
use crate::graph::csr::VisitGraph;
use crate::types::ScoreVector;

use self::power::PowerRun;

/// Result of a single solver invocation
#[derive(Debug, Clone)]
pub struct IterationResult {
    /// Scores for each node (indexed by node id)
    pub scores: ScoreVector,
    /// Number of update steps performed
    pub iterations: usize,
    /// Whether the L1 convergence test was satisfied before the cap
    pub converged: bool,
    /// Whether a zero-vector iterate forced the uniform fallback
    pub degenerate: bool,
    /// Wall-clock time of the run
    pub runtime: Duration,
}

impl IterationResult {
    pub(crate) fn from_run(run: PowerRun, runtime: Duration) -> Self {
        Self {
            scores: ScoreVector::from_values(run.vector),
            iterations: run.iterations,
            converged: run.converged,
            degenerate: run.degenerate,
            runtime,
        }
    }
}

/// Shared fail-fast guard: every solver rejects a zero-node graph before
/// iterating.
pub(crate) fn ensure_non_empty(graph: &VisitGraph) -> Result<(), RankError> {
    if graph.is_empty() {
        return Err(RankError::InvalidGraph(
            "graph has no nodes; add edges before solving".into(),
        ));
    }
    Ok(())
}
