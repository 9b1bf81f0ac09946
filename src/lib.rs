//! # visit-rank
//!
//! Link-analysis ranking for directed, weighted visit-transition graphs.
//!
//! Four related importance measures share one power-iteration engine:
//!
//! - **PageRank**: random-surfer stationary distribution with
//!   teleportation and optional personalization
//! - **HITS**: alternating hub/authority scores
//! - **Randomized-HITS**: authority iteration with teleportation mixing,
//!   guaranteed to converge on any graph
//! - **Subspace-HITS**: authority iteration restricted to a dominant
//!   eigensubspace
//!
//! A [`ScoreEvaluator`] compares the resulting score vectors across
//! algorithms (Spearman rank correlation, top-K extraction, distribution
//! statistics), and [`RankSuite`] runs everything in parallel over one
//! shared graph.
//!
//! # Example
//!
//! ```
//! use visit_rank::{GraphBuilder, PageRank, VisitGraph};
//!
//! let builder = GraphBuilder::from_edges(vec![
//!     ("museum", "park", 2.0),
//!     ("park", "harbor", 1.0),
//!     ("harbor", "museum", 1.0),
//! ])?;
//! let graph = VisitGraph::from_builder(&builder);
//!
//! let result = PageRank::new().run(&graph)?;
//! assert!((result.scores.sum() - 1.0).abs() < 1e-6);
//! # Ok::<(), visit_rank::RankError>(())
//! ```

pub mod error;
pub mod evaluate;
pub mod graph;
pub mod solver;
pub mod suite;
pub mod types;

pub use error::RankError;
pub use evaluate::{EvaluationReport, RankedNode, ScoreEvaluator, ScoreStats};
pub use graph::builder::GraphBuilder;
pub use graph::csr::VisitGraph;
pub use solver::hits::{Hits, HitsResult};
pub use solver::pagerank::PageRank;
pub use solver::power::{Norm, PowerIteration};
pub use solver::randomized::RandomizedHits;
pub use solver::subspace::SubspaceHits;
pub use solver::IterationResult;
pub use suite::{RankSuite, SuiteResult};
pub use types::{RankConfig, ScoreVector};
