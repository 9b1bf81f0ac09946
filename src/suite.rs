//! Run every solver over one shared graph
//!
//! The graph is immutable once built, so the four solvers run in parallel
//! without locking; each owns its working vectors for the duration of its
//! run. A solver that fails (numerically or otherwise) aborts only its own
//! slot; the others still report.

use tracing::debug;

use crate::error::RankError;
use crate::evaluate::{EvaluationReport, ScoreEvaluator};
use crate::graph::csr::VisitGraph;
use crate::solver::hits::{Hits, HitsResult};
use crate::solver::pagerank::PageRank;
use crate::solver::randomized::RandomizedHits;
use crate::solver::subspace::SubspaceHits;
use crate::solver::IterationResult;
use crate::types::{RankConfig, ScoreVector};

/// Algorithm names used for evaluation and reporting
pub const PAGERANK: &str = "pagerank";
pub const HITS_AUTHORITY: &str = "hits_authority";
pub const HITS_HUB: &str = "hits_hub";
pub const RANDOMIZED_HITS: &str = "randomized_hits";
pub const SUBSPACE_HITS: &str = "subspace_hits";

/// Runs all four solvers with one shared configuration
#[derive(Debug, Clone, Default)]
pub struct RankSuite {
    config: RankConfig,
}

/// Per-solver outcomes of a suite run
///
/// Each slot carries its own `Result`: one solver failing does not
/// invalidate the others.
#[derive(Debug)]
pub struct SuiteResult {
    pub pagerank: Result<IterationResult, RankError>,
    pub hits: Result<HitsResult, RankError>,
    pub randomized: Result<IterationResult, RankError>,
    pub subspace: Result<IterationResult, RankError>,
}

impl RankSuite {
    /// Create a suite with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a suite from a validated configuration
    pub fn with_config(config: RankConfig) -> Result<Self, RankError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration the suite runs with
    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Run all four solvers concurrently over the shared graph
    pub fn run(&self, graph: &VisitGraph) -> SuiteResult {
        let cfg = &self.config;

        let ((pagerank, hits), (randomized, subspace)) = rayon::join(
            || {
                rayon::join(
                    || PageRank::from_config(cfg).run(graph),
                    || Hits::from_config(cfg).run(graph),
                )
            },
            || {
                rayon::join(
                    || RandomizedHits::from_config(cfg).run(graph),
                    || SubspaceHits::from_config(cfg).run(graph),
                )
            },
        );

        debug!(
            pagerank_ok = pagerank.is_ok(),
            hits_ok = hits.is_ok(),
            randomized_ok = randomized.is_ok(),
            subspace_ok = subspace.is_ok(),
            "suite run finished"
        );

        SuiteResult {
            pagerank,
            hits,
            randomized,
            subspace,
        }
    }
}

impl SuiteResult {
    /// Named score vectors from the successful runs, rescaled to sum 1 so
    /// the algorithms are directly comparable (PageRank already is; the
    /// HITS family is rescaled from unit L2).
    pub fn score_set(&self) -> Vec<(String, ScoreVector)> {
        let mut set = Vec::new();
        if let Ok(r) = &self.pagerank {
            set.push((PAGERANK.to_string(), r.scores.clone()));
        }
        if let Ok(r) = &self.hits {
            set.push((HITS_AUTHORITY.to_string(), r.authorities.to_distribution()));
            set.push((HITS_HUB.to_string(), r.hubs.to_distribution()));
        }
        if let Ok(r) = &self.randomized {
            set.push((RANDOMIZED_HITS.to_string(), r.scores.to_distribution()));
        }
        if let Ok(r) = &self.subspace {
            set.push((SUBSPACE_HITS.to_string(), r.scores.to_distribution()));
        }
        set
    }

    /// Compare the successful runs with [`ScoreEvaluator`]
    pub fn evaluate(
        &self,
        graph: &VisitGraph,
        top_k: usize,
    ) -> Result<EvaluationReport, RankError> {
        ScoreEvaluator::new()
            .with_top_k(top_k)
            .evaluate(graph, &self.score_set())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;

    fn build_attraction_graph() -> VisitGraph {
        let builder = GraphBuilder::from_edges(vec![
            ("marina bay sands", "gardens by the bay", 1.0),
            ("gardens by the bay", "singapore zoo", 1.0),
            ("singapore zoo", "marina bay sands", 1.0),
            ("chinatown", "gardens by the bay", 1.0),
            ("sentosa", "singapore zoo", 1.0),
            ("marina bay sands", "sentosa", 1.0),
        ])
        .unwrap();
        VisitGraph::from_builder(&builder)
    }

    #[test]
    fn test_all_solvers_succeed() {
        let graph = build_attraction_graph();
        let result = RankSuite::new().run(&graph);

        assert!(result.pagerank.is_ok());
        assert!(result.hits.is_ok());
        assert!(result.randomized.is_ok());
        assert!(result.subspace.is_ok());
        assert_eq!(result.score_set().len(), 5);
    }

    #[test]
    fn test_score_set_is_comparable() {
        let graph = build_attraction_graph();
        let result = RankSuite::new().run(&graph);

        for (name, scores) in result.score_set() {
            assert_eq!(scores.len(), graph.num_nodes, "{name}");
            assert!((scores.sum() - 1.0).abs() < 1e-6, "{name}");
        }
    }

    #[test]
    fn test_invalid_config_rejected_up_front() {
        let cfg = RankConfig::new().with_alpha(2.0);
        assert!(matches!(
            RankSuite::with_config(cfg),
            Err(RankError::Configuration(_))
        ));
    }

    #[test]
    fn test_bad_k_sub_fails_only_its_slot() {
        let graph = build_attraction_graph();
        // Passes static validation; the n-dependent bound trips at run time
        let suite = RankSuite::with_config(RankConfig::new().with_k_sub(100)).unwrap();
        let result = suite.run(&graph);

        assert!(result.pagerank.is_ok());
        assert!(result.hits.is_ok());
        assert!(result.randomized.is_ok());
        assert!(matches!(
            result.subspace,
            Err(RankError::Configuration(_))
        ));
        // Evaluation proceeds over the surviving four score vectors
        assert_eq!(result.score_set().len(), 4);
    }

    #[test]
    fn test_evaluation_of_suite() {
        let graph = build_attraction_graph();
        let result = RankSuite::new().run(&graph);
        let report = result.evaluate(&graph, 3).unwrap();

        assert_eq!(report.algorithms.len(), 5);
        assert_eq!(report.top[0].len(), 3);
        // Self-correlation is exactly 1 on the diagonal
        for i in 0..5 {
            assert_eq!(report.correlations[i][i], 1.0);
        }
        // All pairwise correlations stay within [-1, 1]
        for row in &report.correlations {
            for &rho in row {
                assert!((-1.0..=1.0).contains(&rho));
            }
        }
    }
}
