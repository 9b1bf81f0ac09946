//! PageRank: random-surfer stationary distribution with teleportation
//!
//! Builds a row-stochastic view of the adjacency matrix (each node's
//! outgoing weights normalized to sum to 1) and iterates
//! `x' = α·Pᵗx + (1−α)·p`, where `p` is the teleport target: uniform by
//! default, or a caller-supplied personalization vector. Dangling nodes
//! redistribute their mass to `p` as well.
//!
//! The update is L1-normalizing by construction, so the engine runs with
//! no extra renormalization; the teleport term makes the chain irreducible
//! and aperiodic, so the stationary distribution is unique and independent
//! of the initial vector.

use std::time::Instant;

use crate::error::RankError;
use crate::graph::csr::VisitGraph;
use crate::types::RankConfig;

use super::power::{Norm, PowerIteration};
use super::{ensure_non_empty, IterationResult};

/// PageRank solver
///
/// Output scores sum to 1.
#[derive(Debug, Clone)]
pub struct PageRank {
    /// Link-following probability (typically 0.85)
    pub alpha: f64,
    /// L1 convergence threshold
    pub tol: f64,
    /// Iteration cap
    pub max_iter: usize,
    /// Use accumulated edge weights or 0/1 adjacency
    pub weighted: bool,
    /// Teleport bias distribution; `None` means uniform
    personalization: Option<Vec<f64>>,
}

impl Default for PageRank {
    fn default() -> Self {
        let cfg = RankConfig::default();
        Self {
            alpha: cfg.alpha,
            tol: cfg.tol,
            max_iter: cfg.max_iter,
            weighted: cfg.weighted,
            personalization: None,
        }
    }
}

impl PageRank {
    /// Create a new PageRank solver with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a shared configuration
    pub fn from_config(cfg: &RankConfig) -> Self {
        Self {
            alpha: cfg.alpha,
            tol: cfg.tol,
            max_iter: cfg.max_iter,
            weighted: cfg.weighted,
            personalization: None,
        }
    }

    /// Set the link-following probability
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
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

    /// Select weighted or unweighted propagation
    pub fn with_weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    /// Set the personalization vector (teleport bias distribution)
    ///
    /// One entry per node; normalized internally. Nodes with higher values
    /// receive more teleport mass.
    pub fn with_personalization(mut self, personalization: Vec<f64>) -> Self {
        self.personalization = Some(personalization);
        self
    }

    /// Set personalization from a sparse representation
    ///
    /// Takes `(node_id, weight)` pairs and the total number of nodes;
    /// nodes not listed get weight 0.
    pub fn with_sparse_personalization(mut self, biases: &[(u32, f64)], num_nodes: usize) -> Self {
        let mut personalization = vec![0.0; num_nodes];
        for &(node, weight) in biases {
            if (node as usize) < num_nodes {
                personalization[node as usize] = weight;
            }
        }
        self.personalization = Some(personalization);
        self
    }

    /// Run PageRank from the uniform initial vector
    pub fn run(&self, graph: &VisitGraph) -> Result<IterationResult, RankError> {
        self.run_from(graph, PowerIteration::uniform(graph.num_nodes.max(1)))
    }

    /// Run PageRank from a caller-supplied initial vector
    ///
    /// The fixed point is unique, so any non-degenerate starting point
    /// converges to the same scores.
    pub fn run_from(
        &self,
        graph: &VisitGraph,
        initial: Vec<f64>,
    ) -> Result<IterationResult, RankError> {
        self.validate()?;
        ensure_non_empty(graph)?;
        if initial.len() != graph.num_nodes {
            return Err(RankError::InvalidGraph(format!(
                "initial vector has {} entries, graph has {} nodes",
                initial.len(),
                graph.num_nodes
            )));
        }
        let clock = Instant::now();

        let n = graph.num_nodes;
        let alpha = self.alpha;
        let teleport = self.prepare_personalization(n);
        let dangling = graph.dangling_nodes();
        let weighted = self.weighted;

        let engine = PowerIteration::new(self.tol, self.max_iter, Norm::None);
        let mut run = engine.run(initial, |x| {
            // Mass sitting on dangling nodes is redistributed along the
            // teleport distribution.
            let dangling_mass: f64 = dangling.iter().map(|&d| x[d as usize]).sum();

            let mut next: Vec<f64> = teleport
                .iter()
                .map(|&p| (1.0 - alpha) * p + alpha * dangling_mass * p)
                .collect();

            for u in 0..n {
                let out = if weighted {
                    graph.node_total_weight(u as u32)
                } else {
                    graph.degree(u as u32) as f64
                };
                if out > 0.0 {
                    let share = alpha * x[u] / out;
                    for (v, w) in graph.neighbors(u as u32) {
                        let w = if weighted { w } else { 1.0 };
                        next[v as usize] += share * w;
                    }
                }
            }

            next
        })?;

        // The update preserves total mass up to rounding; pin the sum to 1
        // for the output invariant.
        let sum: f64 = run.vector.iter().sum();
        if sum > 0.0 {
            for score in &mut run.vector {
                *score /= sum;
            }
        }

        Ok(IterationResult::from_run(run, clock.elapsed()))
    }

    fn validate(&self) -> Result<(), RankError> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(RankError::Configuration(format!(
                "alpha must lie in (0, 1), got {}",
                self.alpha
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

    /// Prepare and normalize the teleport distribution
    fn prepare_personalization(&self, n: usize) -> Vec<f64> {
        match &self.personalization {
            Some(p) => {
                // Pad or truncate to the node count, then normalize
                let mut result = vec![0.0; n];
                for (i, &v) in p.iter().enumerate().take(n) {
                    result[i] = v;
                }
                let sum: f64 = result.iter().sum();
                if sum > 0.0 {
                    for v in &mut result {
                        *v /= sum;
                    }
                    result
                } else {
                    // All-zero bias falls back to uniform
                    vec![1.0 / n as f64; n]
                }
            }
            None => vec![1.0 / n as f64; n],
        }
    }
}
