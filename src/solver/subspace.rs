//! Subspace-HITS: authority iteration restricted to a dominant
//! eigensubspace
//!
//! An exact symmetric eigen-decomposition of `M = AᵗA` yields the `k_sub`
//! eigenvectors with the largest eigenvalues; their span is the dominant
//! subspace. Every iterate is re-projected onto that span after applying
//! `M`, so drift outside the subspace is bounded by numerical error:
//!
//! ```text
//! x₀ = normalize(QQᵗ · uniform)
//! x' = normalize(QQᵗ · M x)
//! ```
//!
//! With `k_sub = n` the projector is the identity and this degenerates to
//! unrestricted power iteration on `M`. The output vector has unit L2
//! norm, sign-flipped so its entry sum is non-negative.

use std::time::Instant;

use nalgebra::{DMatrix, DVector, SymmetricEigen};

use crate::error::RankError;
use crate::graph::csr::VisitGraph;
use crate::types::RankConfig;

use super::power::{Norm, PowerIteration};
use super::{ensure_non_empty, IterationResult};

/// Jacobi sweep cap for the eigen-decomposition; symmetric problems of the
/// sizes this crate targets settle far below this.
const EIGEN_MAX_SWEEPS: usize = 10_000;

/// Subspace-HITS solver
#[derive(Debug, Clone)]
pub struct SubspaceHits {
    /// Dimension of the dominant eigensubspace
    pub k_sub: usize,
    /// L1 convergence threshold
    pub tol: f64,
    /// Iteration cap
    pub max_iter: usize,
    /// Use accumulated edge weights or 0/1 adjacency
    pub weighted: bool,
}

impl Default for SubspaceHits {
    fn default() -> Self {
        let cfg = RankConfig::default();
        Self {
            k_sub: cfg.k_sub,
            tol: cfg.tol,
            max_iter: cfg.max_iter,
            weighted: cfg.weighted,
        }
    }
}

impl SubspaceHits {
    /// Create a new Subspace-HITS solver with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a shared configuration
    pub fn from_config(cfg: &RankConfig) -> Self {
        Self {
            k_sub: cfg.k_sub,
            tol: cfg.tol,
            max_iter: cfg.max_iter,
            weighted: cfg.weighted,
        }
    }

    /// Set the eigensubspace dimension
    pub fn with_k_sub(mut self, k_sub: usize) -> Self {
        self.k_sub = k_sub;
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

    /// Run the subspace-restricted authority iteration
    pub fn run(&self, graph: &VisitGraph) -> Result<IterationResult, RankError> {
        self.validate()?;
        ensure_non_empty(graph)?;
        let n = graph.num_nodes;
        if self.k_sub > n {
            return Err(RankError::Configuration(format!(
                "k_sub = {} exceeds the node count {n}",
                self.k_sub
            )));
        }
        let clock = Instant::now();

        let a = graph.adjacency_matrix(self.weighted);
        let m = a.transpose() * &a;
        if m.iter().any(|v| !v.is_finite()) {
            return Err(RankError::Numerical(
                "authority matrix contains a non-finite entry".into(),
            ));
        }

        let q = Self::dominant_eigenbasis(m.clone(), self.k_sub)?;
        let qt = q.transpose();

        // Project the uniform start into the subspace
        let uniform = DVector::from_element(n, 1.0 / n as f64);
        let mut start = &q * (&qt * &uniform);
        let norm = start.norm();
        if norm > 0.0 {
            start /= norm;
        } else {
            // Uniform is orthogonal to the subspace; let the engine's own
            // projection take over from the raw uniform vector.
            start = uniform;
        }

        let engine = PowerIteration::new(self.tol, self.max_iter, Norm::L2);
        let mut run = engine.run(start.as_slice().to_vec(), |x| {
            let z = &m * DVector::from_column_slice(x);
            let projected = &q * (&qt * &z);
            projected.as_slice().to_vec()
        })?;

        // Eigenvectors carry an arbitrary global sign; canonicalize so the
        // reported scores have a non-negative sum.
        if run.vector.iter().sum::<f64>() < 0.0 {
            for v in &mut run.vector {
                *v = -*v;
            }
        }

        Ok(IterationResult::from_run(run, clock.elapsed()))
    }

    /// Top `k` orthonormal eigenvectors of the symmetric matrix `m`,
    /// columns ordered by descending eigenvalue (ties broken by the
    /// eigen-solver's output order, which is deterministic for a fixed
    /// matrix).
    fn dominant_eigenbasis(m: DMatrix<f64>, k: usize) -> Result<DMatrix<f64>, RankError> {
        let n = m.nrows();
        let eigen = SymmetricEigen::try_new(m, f64::EPSILON, EIGEN_MAX_SWEEPS).ok_or_else(|| {
            RankError::Numerical("symmetric eigen-decomposition did not converge".into())
        })?;

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&i, &j| {
            eigen.eigenvalues[j]
                .total_cmp(&eigen.eigenvalues[i])
                .then(i.cmp(&j))
        });

        let columns: Vec<DVector<f64>> = order
            .iter()
            .take(k)
            .map(|&i| eigen.eigenvectors.column(i).clone_owned())
            .collect();
        Ok(DMatrix::from_columns(&columns))
    }

    fn validate(&self) -> Result<(), RankError> {
        if self.k_sub == 0 {
            return Err(RankError::Configuration(
                "k_sub must be at least 1".into(),
            ));
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
