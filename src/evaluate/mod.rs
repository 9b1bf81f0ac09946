//! Cross-algorithm score comparison
//!
//! Given several named score vectors computed over the same graph, the
//! evaluator produces a serializable report: pairwise Spearman rank
//! correlations, top-K nodes per algorithm, and per-distribution summary
//! statistics. No iteration happens here.

pub mod spearman;

use serde::Serialize;

use crate::error::RankError;
use crate::graph::csr::VisitGraph;
use crate::types::ScoreVector;

use self::spearman::spearman;

/// One top-ranked node in a report
#[derive(Debug, Clone, Serialize)]
pub struct RankedNode {
    /// Node id
    pub node: u32,
    /// Node label
    pub label: String,
    /// Score under the algorithm being reported
    pub score: f64,
}

/// Summary statistics of one score distribution
#[derive(Debug, Clone, Serialize)]
pub struct ScoreStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation
    pub std: f64,
}

impl ScoreStats {
    fn from_values(values: &[f64]) -> Self {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Self {
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean,
            std: variance.sqrt(),
        }
    }
}

/// Comparison report across algorithms
///
/// `correlations`, `top`, and `stats` are all indexed parallel to
/// `algorithms`.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    /// Algorithm names, in input order
    pub algorithms: Vec<String>,
    /// Symmetric matrix of Spearman rank correlations
    pub correlations: Vec<Vec<f64>>,
    /// Top-K nodes per algorithm, descending score, ties broken by node
    /// insertion order
    pub top: Vec<Vec<RankedNode>>,
    /// Summary statistics per algorithm
    pub stats: Vec<ScoreStats>,
}

/// Cross-algorithm score evaluator
#[derive(Debug, Clone)]
pub struct ScoreEvaluator {
    /// How many top nodes to report per algorithm
    pub top_k: usize,
}

impl Default for ScoreEvaluator {
    fn default() -> Self {
        Self { top_k: 10 }
    }
}

impl ScoreEvaluator {
    /// Create an evaluator with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many top nodes to report per algorithm
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Compare the given named score vectors, all computed over `graph`.
    ///
    /// Fails with [`RankError::InvalidGraph`] when a vector is empty or
    /// its length does not match the graph's node count.
    pub fn evaluate(
        &self,
        graph: &VisitGraph,
        scores: &[(String, ScoreVector)],
    ) -> Result<EvaluationReport, RankError> {
        for (name, vector) in scores {
            if vector.is_empty() {
                return Err(RankError::InvalidGraph(format!(
                    "score vector for '{name}' is empty"
                )));
            }
            if vector.len() != graph.num_nodes {
                return Err(RankError::InvalidGraph(format!(
                    "score vector for '{name}' has {} entries, graph has {} nodes",
                    vector.len(),
                    graph.num_nodes
                )));
            }
        }

        let algorithms: Vec<String> = scores.iter().map(|(name, _)| name.clone()).collect();

        let k = scores.len();
        let mut correlations = vec![vec![0.0; k]; k];
        for i in 0..k {
            correlations[i][i] = 1.0;
            for j in (i + 1)..k {
                let rho = spearman(scores[i].1.values(), scores[j].1.values());
                correlations[i][j] = rho;
                correlations[j][i] = rho;
            }
        }

        let top = scores
            .iter()
            .map(|(_, vector)| {
                vector
                    .top_n(self.top_k)
                    .into_iter()
                    .map(|(node, score)| RankedNode {
                        node,
                        label: graph.label(node).to_string(),
                        score,
                    })
                    .collect()
            })
            .collect();

        let stats = scores
            .iter()
            .map(|(_, vector)| ScoreStats::from_values(vector.values()))
            .collect();

        Ok(EvaluationReport {
            algorithms,
            correlations,
            top,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;

    fn build_graph(n: usize) -> VisitGraph {
        let mut builder = GraphBuilder::new();
        for i in 0..n {
            builder.add_node(&format!("node-{i}"));
        }
        VisitGraph::from_builder(&builder)
    }

    fn named(name: &str, values: Vec<f64>) -> (String, ScoreVector) {
        (name.to_string(), ScoreVector::from_values(values))
    }

    #[test]
    fn test_correlation_matrix_symmetry() {
        let graph = build_graph(4);
        let scores = vec![
            named("forward", vec![0.1, 0.2, 0.3, 0.4]),
            named("reversed", vec![0.4, 0.3, 0.2, 0.1]),
            named("agreeing", vec![0.05, 0.15, 0.35, 0.45]),
        ];

        let report = ScoreEvaluator::new().evaluate(&graph, &scores).unwrap();

        assert_eq!(report.correlations[0][0], 1.0);
        assert_eq!(report.correlations[0][1], report.correlations[1][0]);
        // Monotonically reversed ranking: perfect negative correlation
        assert!((report.correlations[0][1] + 1.0).abs() < 1e-9);
        // Identical ranking under different values: perfect positive
        assert!((report.correlations[0][2] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_k_with_labels_and_tiebreak() {
        let graph = build_graph(4);
        let scores = vec![named("scores", vec![0.3, 0.5, 0.3, 0.1])];

        let report = ScoreEvaluator::new()
            .with_top_k(3)
            .evaluate(&graph, &scores)
            .unwrap();

        let top = &report.top[0];
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].label, "node-1");
        // Nodes 0 and 2 tie at 0.3; insertion order breaks the tie
        assert_eq!(top[1].node, 0);
        assert_eq!(top[2].node, 2);
    }

    #[test]
    fn test_stats() {
        let graph = build_graph(4);
        let scores = vec![named("scores", vec![0.1, 0.2, 0.3, 0.4])];

        let report = ScoreEvaluator::new().evaluate(&graph, &scores).unwrap();
        let stats = &report.stats[0];

        assert!((stats.min - 0.1).abs() < 1e-12);
        assert!((stats.max - 0.4).abs() < 1e-12);
        assert!((stats.mean - 0.25).abs() < 1e-12);
        // Population std of {0.1, 0.2, 0.3, 0.4}
        assert!((stats.std - 0.1118033988749895).abs() < 1e-12);
    }

    #[test]
    fn test_empty_score_vector_rejected() {
        let graph = build_graph(2);
        let scores = vec![named("empty", vec![])];

        assert!(matches!(
            ScoreEvaluator::new().evaluate(&graph, &scores),
            Err(RankError::InvalidGraph(_))
        ));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let graph = build_graph(3);
        let scores = vec![named("short", vec![0.5, 0.5])];

        assert!(matches!(
            ScoreEvaluator::new().evaluate(&graph, &scores),
            Err(RankError::InvalidGraph(_))
        ));
    }

    #[test]
    fn test_report_serializes() {
        let graph = build_graph(2);
        let scores = vec![
            named("a", vec![0.6, 0.4]),
            named("b", vec![0.3, 0.7]),
        ];

        let report = ScoreEvaluator::new().evaluate(&graph, &scores).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["algorithms"][0], "a");
        assert_eq!(json["top"][0][0]["label"], "node-0");
        assert!(json["correlations"][0][1].is_number());
    }
}
