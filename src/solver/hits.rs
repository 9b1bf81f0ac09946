//! HITS: alternating hub/authority scores
//!
//! The authority vector is the dominant eigenvector of `M = AᵗA`, obtained
//! by running the shared engine on `f(a) = Aᵗ(A a)` with L2
//! renormalization; the hub vector follows from one extra product,
//! `h = normalize₂(A a)`. At the fixed point this is equivalent to the
//! classic alternating iteration `a ← Aᵗh`, `h ← A a`.
//!
//! Both output vectors carry unit L2 norm; use
//! [`ScoreVector::to_distribution`](crate::types::ScoreVector::to_distribution)
//! to rescale to sum 1 for reporting.

use std::time::Instant;

use crate::error::RankError;
use crate::graph::csr::VisitGraph;
use crate::types::{RankConfig, ScoreVector};

use super::power::{Norm, PowerIteration};
use super::ensure_non_empty;

/// Result of a HITS run: paired hub and authority vectors.
#[derive(Debug, Clone)]
pub struct HitsResult {
    /// Authority scores (unit L2 norm)
    pub authorities: ScoreVector,
    /// Hub scores (unit L2 norm)
    pub hubs: ScoreVector,
    /// Number of authority update steps performed
    pub iterations: usize,
    /// Whether the L1 convergence test was satisfied before the cap
    pub converged: bool,
    /// Whether a zero-vector iterate forced the uniform fallback
    pub degenerate: bool,
    /// Wall-clock time of the run
    pub runtime: std::time::Duration,
}

/// HITS solver
#[derive(Debug, Clone)]
pub struct Hits {
    /// L1 convergence threshold
    pub tol: f64,
    /// Iteration cap
    pub max_iter: usize,
    /// Use accumulated edge weights or 0/1 adjacency
    pub weighted: bool,
}

impl Default for Hits {
    fn default() -> Self {
        let cfg = RankConfig::default();
        Self {
            tol: cfg.tol,
            max_iter: cfg.max_iter,
            weighted: cfg.weighted,
        }
    }
}

impl Hits {
    /// Create a new HITS solver with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a shared configuration
    pub fn from_config(cfg: &RankConfig) -> Self {
        Self {
            tol: cfg.tol,
            max_iter: cfg.max_iter,
            weighted: cfg.weighted,
        }
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

    /// Run HITS, producing paired hub and authority vectors
    pub fn run(&self, graph: &VisitGraph) -> Result<HitsResult, RankError> {
        self.validate()?;
        ensure_non_empty(graph)?;
        let clock = Instant::now();

        let n = graph.num_nodes;
        let weighted = self.weighted;

        let engine = PowerIteration::new(self.tol, self.max_iter, Norm::L2);
        let run = engine.run(PowerIteration::uniform(n), |a| {
            let hubs = graph.forward_product(a, weighted);
            graph.transpose_product(&hubs, weighted)
        })?;

        // One extra product derives hubs from the converged authorities
        let mut hubs = graph.forward_product(&run.vector, weighted);
        let mut degenerate = run.degenerate;
        let norm: f64 = hubs.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for h in &mut hubs {
                *h /= norm;
            }
        } else {
            hubs = PowerIteration::uniform(n);
            degenerate = true;
        }

        Ok(HitsResult {
            authorities: ScoreVector::from_values(run.vector),
            hubs: ScoreVector::from_values(hubs),
            iterations: run.iterations,
            converged: run.converged,
            degenerate,
            runtime: clock.elapsed(),
        })
    }

    fn validate(&self) -> Result<(), RankError> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;

    fn build_cycle_graph() -> VisitGraph {
        let builder =
            GraphBuilder::from_edges(vec![("a", "b", 1.0), ("b", "c", 1.0), ("c", "a", 1.0)])
                .unwrap();
        VisitGraph::from_builder(&builder)
    }

    fn build_hub_authority_graph() -> VisitGraph {
        // h1, h2 point at a1, a2
        let builder = GraphBuilder::from_edges(vec![
            ("h1", "a1", 1.0),
            ("h1", "a2", 1.0),
            ("h2", "a1", 1.0),
            ("h2", "a2", 1.0),
        ])
        .unwrap();
        VisitGraph::from_builder(&builder)
    }

    fn l2_norm(v: &[f64]) -> f64 {
        v.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    #[test]
    fn test_hub_authority_pattern() {
        let graph = build_hub_authority_graph();
        let result = Hits::new().run(&graph).unwrap();

        assert!(result.converged);

        let h1 = graph.get_node_by_label("h1").unwrap();
        let a1 = graph.get_node_by_label("a1").unwrap();

        assert!(result.hubs.score(h1) > result.hubs.score(a1));
        assert!(result.authorities.score(a1) > result.authorities.score(h1));
    }

    #[test]
    fn test_cycle_scores_equal() {
        let graph = build_cycle_graph();
        let result = Hits::new().run(&graph).unwrap();

        assert!(result.converged);
        let a0 = result.authorities.score(0);
        let h0 = result.hubs.score(0);
        for node in 0..3 {
            assert!((result.authorities.score(node) - a0).abs() < 1e-9);
            assert!((result.hubs.score(node) - h0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_vectors_are_unit_l2() {
        let graph = build_hub_authority_graph();
        let result = Hits::new().run(&graph).unwrap();

        assert!((l2_norm(result.authorities.values()) - 1.0).abs() < 1e-9);
        assert!((l2_norm(result.hubs.values()) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fixed_point_residuals() {
        // At the fixed point, a = normalize(Aᵗh) and h = normalize(Aa)
        let graph = build_hub_authority_graph();
        let tol = 1e-8;
        let result = Hits::new().with_tol(tol).run(&graph).unwrap();

        let a = result.authorities.values();
        let h = result.hubs.values();

        let mut a_from_h = graph.transpose_product(h, true);
        let norm = l2_norm(&a_from_h);
        for v in &mut a_from_h {
            *v /= norm;
        }
        let residual: f64 = a.iter().zip(&a_from_h).map(|(x, y)| (x - y).abs()).sum();
        assert!(residual < 1e-6, "authority residual {residual}");

        let mut h_from_a = graph.forward_product(a, true);
        let norm = l2_norm(&h_from_a);
        for v in &mut h_from_a {
            *v /= norm;
        }
        let residual: f64 = h.iter().zip(&h_from_a).map(|(x, y)| (x - y).abs()).sum();
        assert!(residual < 1e-6, "hub residual {residual}");
    }

    #[test]
    fn test_edgeless_graph_is_degenerate_uniform() {
        let mut builder = GraphBuilder::new();
        builder.add_node("a");
        builder.add_node("b");
        let graph = VisitGraph::from_builder(&builder);

        let result = Hits::new().run(&graph).unwrap();

        assert!(result.degenerate);
        assert!(result.converged);
        assert_eq!(result.authorities.values(), &[0.5, 0.5]);
        assert_eq!(result.hubs.values(), &[0.5, 0.5]);
    }

    #[test]
    fn test_distribution_rescaling_for_reporting() {
        let graph = build_hub_authority_graph();
        let result = Hits::new().run(&graph).unwrap();

        let dist = result.authorities.to_distribution();
        assert!((dist.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_graph_rejected() {
        let graph = VisitGraph::default();
        assert!(matches!(
            Hits::new().run(&graph),
            Err(RankError::InvalidGraph(_))
        ));
    }

    #[test]
    fn test_deterministic_reruns() {
        let graph = build_hub_authority_graph();
        let a = Hits::new().run(&graph).unwrap();
        let b = Hits::new().run(&graph).unwrap();

        assert_eq!(a.authorities, b.authorities);
        assert_eq!(a.hubs, b.hubs);
        assert_eq!(a.iterations, b.iterations);
    }
}
