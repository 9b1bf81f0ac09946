//! Core types shared across the crate: solver configuration and score
//! vectors.

use serde::{Deserialize, Serialize};

use crate::error::RankError;

/// Configuration shared by all solvers.
///
/// Unspecified fields fall back to their defaults when deserializing, so a
/// partial JSON document like `{"alpha": 0.9}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// PageRank link-following probability; `1 - alpha` is the
    /// teleportation probability.
    pub alpha: f64,
    /// Randomized-HITS teleport probability mixed into the authority
    /// matrix.
    pub eps: f64,
    /// L1 convergence threshold between consecutive iterates.
    pub tol: f64,
    /// Iteration cap; reaching it yields `converged=false`, not an error.
    pub max_iter: usize,
    /// Subspace-HITS eigensubspace dimension.
    pub k_sub: usize,
    /// Use accumulated edge weights (`true`) or 0/1 adjacency (`false`).
    pub weighted: bool,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            alpha: 0.85,
            eps: 0.15,
            tol: 1e-8,
            max_iter: 200,
            k_sub: 1,
            weighted: true,
        }
    }
}

impl RankConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the PageRank link-following probability.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the Randomized-HITS teleport probability.
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Set the L1 convergence threshold.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the Subspace-HITS eigensubspace dimension.
    pub fn with_k_sub(mut self, k_sub: usize) -> Self {
        self.k_sub = k_sub;
        self
    }

    /// Select weighted or unweighted adjacency.
    pub fn with_weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    /// Fail-fast range checks, run before any iteration begins.
    ///
    /// `k_sub`'s upper bound depends on the graph and is checked by the
    /// Subspace-HITS solver at run time.
    pub fn validate(&self) -> Result<(), RankError> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(RankError::Configuration(format!(
                "alpha must lie in (0, 1), got {}",
                self.alpha
            )));
        }
        if !(self.eps >= 0.0 && self.eps <= 1.0) {
            return Err(RankError::Configuration(format!(
                "eps must lie in [0, 1], got {}",
                self.eps
            )));
        }
        if !(self.tol > 0.0) {
            return Err(RankError::Configuration(format!(
                "tol must be positive, got {}",
                self.tol
            )));
        }
        if self.max_iter == 0 {
            return Err(RankError::Configuration(
                "max_iter must be at least 1".into(),
            ));
        }
        if self.k_sub == 0 {
            return Err(RankError::Configuration(
                "k_sub must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Non-negative per-node scores, indexed by graph node id.
///
/// Which normalization the values carry depends on the producing solver:
/// PageRank scores sum to 1, HITS-family scores have unit L2 norm. Use
/// [`ScoreVector::to_distribution`] to rescale any vector to sum 1 for
/// reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreVector {
    values: Vec<f64>,
}

impl ScoreVector {
    /// Wrap raw per-node values.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Borrow the underlying values, indexed by node id.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Score for one node; 0.0 if the id is out of range.
    pub fn score(&self, node: u32) -> f64 {
        self.values.get(node as usize).copied().unwrap_or(0.0)
    }

    /// Number of scored nodes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` when no nodes are scored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of all scores.
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Top `n` nodes by score, descending; ties broken by node insertion
    /// order (lower id first).
    pub fn top_n(&self, n: usize) -> Vec<(u32, f64)> {
        let mut indexed: Vec<_> = self
            .values
            .iter()
            .enumerate()
            .map(|(i, &s)| (i as u32, s))
            .collect();
        indexed.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        indexed.truncate(n);
        indexed
    }

    /// Rescale so the scores sum to 1 (reporting convention for the HITS
    /// family). A zero-sum vector is returned unchanged.
    pub fn to_distribution(&self) -> ScoreVector {
        let sum = self.sum();
        if sum > 0.0 {
            Self {
                values: self.values.iter().map(|v| v / sum).collect(),
            }
        } else {
            self.clone()
        }
    }
}
