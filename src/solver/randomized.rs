//! Randomized-HITS: authority iteration with teleportation mixing
//!
//! Plain HITS iterates on `M = AᵗA`, which can be reducible or periodic
//! and then fails to converge (or converges non-uniquely). Mixing in a
//! teleport term fixes that: `M' = (1−ε)·M + (ε/n)·J` has strictly
//! positive entries whenever `ε > 0`, so its dominant eigenvector is
//! unique and power iteration always converges, whatever the graph's
//! connectivity.
//!
//! `M'` is applied matrix-free: `M'x = (1−ε)·Aᵗ(Ax) + (ε/n)·Σx·𝟙`.
//! The output authority vector has unit L2 norm.

use std::time::Instant;

use crate::error::RankError;
use crate::graph::csr::VisitGraph;
use crate::types::RankConfig;

use super::power::{Norm, PowerIteration};
use super::{ensure_non_empty, IterationResult};

/// Randomized-HITS solver
#[derive(Debug, Clone)]
pub struct RandomizedHits {
    /// Teleport probability mixed into the authority matrix
    pub eps: f64,
    /// L1 convergence threshold
    pub tol: f64,
    /// Iteration cap
    pub max_iter: usize,
    /// Use accumulated edge weights or 0/1 adjacency
    pub weighted: bool,
}

impl Default for RandomizedHits {
    fn default() -> Self {
        let cfg = RankConfig::default();
        Self {
            eps: cfg.eps,
            tol: cfg.tol,
            max_iter: cfg.max_iter,
            weighted: cfg.weighted,
        }
    }
}

impl RandomizedHits {
    /// Create a new Randomized-HITS solver with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a shared configuration
    pub fn from_config(cfg: &RankConfig) -> Self {
        Self {
            eps: cfg.eps,
            tol: cfg.tol,
            max_iter: cfg.max_iter,
            weighted: cfg.weighted,
        }
    }

    /// Set the teleport probability
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Set the convergence threshold
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the iteration cap
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Select weighted or unweighted adjacency
    pub fn with_weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    /// Run the teleport-mixed authority iteration
    pub fn run(&self, graph: &VisitGraph) -> Result<IterationResult, RankError> {
        self.validate()?;
        ensure_non_empty(graph)?;
        let clock = Instant::now();

        let n = graph.num_nodes;
        let eps = self.eps;
        let weighted = self.weighted;
        let jump = eps / n as f64;

        let engine = PowerIteration::new(self.tol, self.max_iter, Norm::L2);
        let run = engine.run(PowerIteration::uniform(n), |x| {
            let hubs = graph.forward_product(x, weighted);
            let mut next = graph.transpose_product(&hubs, weighted);

            // J·x = Σx · 𝟙
            let mass: f64 = x.iter().sum();
            for v in &mut next {
                *v = (1.0 - eps) * *v + jump * mass;
            }
            next
        })?;

        Ok(IterationResult::from_run(run, clock.elapsed()))
    }

    fn validate(&self) -> Result<(), RankError> {
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
        Ok(())
    }
}
