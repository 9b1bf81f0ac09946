//! Shared power-iteration engine
//!
//! All four solvers are fixed-point iterations of the form
//! `x ← normalize(f(x))` with an L1 convergence test between consecutive
//! iterates. This module owns that loop; solvers supply the update
//! function, the renormalization rule, and (optionally) the initial
//! vector.
//!
//! The loop itself contains no randomness: identical graph, configuration,
//! and initial vector produce bit-identical iterate sequences.

use tracing::debug;

use crate::error::RankError;

/// Renormalization applied after each update step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Norm {
    /// No rescaling, for updates that are normalizing by construction
    /// (PageRank's stochastic-plus-teleport step).
    None,
    /// Rescale to unit L1 norm.
    L1,
    /// Rescale to unit L2 norm (HITS family).
    L2,
}

/// Raw engine output, before solvers attach labels and timing.
#[derive(Debug, Clone)]
pub struct PowerRun {
    /// Final iterate
    pub vector: Vec<f64>,
    /// Number of update steps performed
    pub iterations: usize,
    /// Whether the L1 delta dropped below `tol`
    pub converged: bool,
    /// Whether a zero-vector update forced the uniform fallback
    pub degenerate: bool,
}

/// The shared fixed-point iteration primitive.
#[derive(Debug, Clone, Copy)]
pub struct PowerIteration {
    /// L1 convergence threshold
    pub tol: f64,
    /// Iteration cap
    pub max_iter: usize,
    /// Renormalization rule applied after each update
    pub norm: Norm,
}

impl PowerIteration {
    pub fn new(tol: f64, max_iter: usize, norm: Norm) -> Self {
        Self {
            tol,
            max_iter,
            norm,
        }
    }

    /// The default initial vector: uniform `1/n`.
    pub fn uniform(n: usize) -> Vec<f64> {
        vec![1.0 / n as f64; n]
    }

    /// Iterate `x ← normalize(f(x))` from `initial` until the L1 distance
    /// between consecutive iterates drops below `tol`, or `max_iter` steps
    /// have run (the last iterate is still returned, `converged=false`).
    ///
    /// A zero-vector update falls back to the uniform vector instead of
    /// dividing by zero and marks the run degenerate. An iterate containing
    /// NaN or Inf aborts with [`RankError::Numerical`].
    pub fn run<F>(&self, initial: Vec<f64>, mut f: F) -> Result<PowerRun, RankError>
    where
        F: FnMut(&[f64]) -> Vec<f64>,
    {
        let n = initial.len();
        let mut x = initial;
        let mut iterations = 0;
        let mut converged = false;
        let mut degenerate = false;

        while iterations < self.max_iter {
            iterations += 1;

            let mut next = f(&x);
            if next.iter().any(|v| !v.is_finite()) {
                return Err(RankError::Numerical(format!(
                    "iterate {iterations} contains a non-finite value"
                )));
            }

            let magnitude = match self.norm {
                Norm::None | Norm::L1 => next.iter().map(|v| v.abs()).sum::<f64>(),
                Norm::L2 => next.iter().map(|v| v * v).sum::<f64>().sqrt(),
            };

            if magnitude == 0.0 {
                next = Self::uniform(n);
                degenerate = true;
            } else if self.norm != Norm::None {
                for v in &mut next {
                    *v /= magnitude;
                }
            }

            // L1 distance between consecutive iterates
            let delta: f64 = x
                .iter()
                .zip(next.iter())
                .map(|(old, new)| (old - new).abs())
                .sum();

            x = next;

            if delta < self.tol {
                converged = true;
                break;
            }
        }

        debug!(iterations, converged, degenerate, "power iteration finished");

        Ok(PowerRun {
            vector: x,
            iterations,
            converged,
            degenerate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(norm: Norm) -> PowerIteration {
        PowerIteration::new(1e-10, 200, norm)
    }

    #[test]
    fn test_fixed_point_converges_in_one_step() {
        let run = engine(Norm::None)
            .run(vec![0.5, 0.5], |x| x.to_vec())
            .unwrap();

        assert!(run.converged);
        assert_eq!(run.iterations, 1);
        assert_eq!(run.vector, vec![0.5, 0.5]);
    }

    #[test]
    fn test_l2_renormalization() {
        // f doubles the vector; renormalization keeps it on the unit sphere
        let run = engine(Norm::L2)
            .run(vec![1.0, 0.0], |x| x.iter().map(|v| v * 2.0).collect())
            .unwrap();

        assert!(run.converged);
        let norm: f64 = run.vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_dominant_eigenvector_of_2x2() {
        // M = [[2, 0], [0, 1]]: dominant eigenvector is e1
        let run = engine(Norm::L2)
            .run(PowerIteration::uniform(2), |x| vec![2.0 * x[0], x[1]])
            .unwrap();

        assert!(run.converged);
        assert!((run.vector[0] - 1.0).abs() < 1e-4);
        assert!(run.vector[1].abs() < 1e-4);
    }

    #[test]
    fn test_max_iter_returns_last_iterate() {
        let eng = PowerIteration::new(1e-12, 3, Norm::L1);
        // Alternating update never settles
        let mut flip = false;
        let run = eng
            .run(vec![1.0, 0.0], move |_| {
                flip = !flip;
                if flip {
                    vec![0.0, 1.0]
                } else {
                    vec![1.0, 0.0]
                }
            })
            .unwrap();

        assert!(!run.converged);
        assert_eq!(run.iterations, 3);
        assert_eq!(run.vector.len(), 2);
    }

    #[test]
    fn test_zero_vector_falls_back_to_uniform() {
        let run = engine(Norm::L2).run(vec![1.0, 0.0], |_| vec![0.0, 0.0]).unwrap();

        assert!(run.degenerate);
        assert_eq!(run.vector, vec![0.5, 0.5]);
        // Uniform is a fixed point of the zero update's fallback
        assert!(run.converged);
    }

    #[test]
    fn test_nan_aborts_with_numerical_error() {
        let err = engine(Norm::L1)
            .run(vec![1.0], |_| vec![f64::NAN])
            .unwrap_err();

        assert!(matches!(err, RankError::Numerical(_)));
    }

    #[test]
    fn test_deterministic_iterate_sequence() {
        let update = |x: &[f64]| vec![0.3 * x[0] + 0.7 * x[1], 0.6 * x[0] + 0.4 * x[1]];

        let a = engine(Norm::L1).run(vec![0.9, 0.1], update).unwrap();
        let b = engine(Norm::L1).run(vec![0.9, 0.1], update).unwrap();

        assert_eq!(a.vector, b.vector);
        assert_eq!(a.iterations, b.iterations);
    }
}
