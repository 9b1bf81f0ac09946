//! Spearman rank correlation
//!
//! Rank agreement between two score vectors: +1 for identical orderings,
//! −1 for exactly reversed orderings. Ties receive the average of the
//! ranks they span, the standard treatment that keeps the coefficient in
//! [−1, 1] in the presence of equal scores.

/// Spearman rank correlation between two equal-length score slices.
///
/// A constant input has no defined ranking; by convention this returns
/// 1.0 when both inputs are constant and 0.0 when exactly one is.
pub fn spearman(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let ra = average_ranks(a);
    let rb = average_ranks(b);
    pearson(&ra, &rb)
}

/// 1-based ranks with ties averaged.
fn average_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| values[i].total_cmp(&values[j]).then(i.cmp(&j)));

    let mut ranks = vec![0.0; n];
    let mut pos = 0;
    while pos < n {
        // Find the run of equal values starting at `pos`
        let mut end = pos + 1;
        while end < n && values[order[end]] == values[order[pos]] {
            end += 1;
        }
        // Average of 1-based ranks pos+1 ..= end
        let rank = (pos + 1 + end) as f64 / 2.0;
        for &idx in &order[pos..end] {
            ranks[idx] = rank;
        }
        pos = end;
    }
    ranks
}

/// Pearson correlation of two equal-length slices.
fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a == 0.0 && var_b == 0.0 {
        return 1.0;
    }
    if var_a == 0.0 || var_b == 0.0 {
        return 0.0;
    }
    // Rounding can push the ratio a ulp past ±1; the contract is [-1, 1]
    (cov / (var_a.sqrt() * var_b.sqrt())).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_positive_correlation() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [10.0, 20.0, 30.0, 40.0];
        assert!((spearman(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_negative_correlation() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [4.0, 3.0, 2.0, 1.0];
        assert!((spearman(&a, &b) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rank_based_not_value_based() {
        // Nonlinear but monotone transformation preserves ranks exactly
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [1.0, 8.0, 27.0, 64.0];
        assert!((spearman(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tied_values_average_ranks() {
        let ranks = average_ranks(&[0.5, 0.2, 0.5, 0.1]);
        // Sorted: 0.1 (rank 1), 0.2 (rank 2), 0.5, 0.5 (ranks 3,4 -> 3.5)
        assert_eq!(ranks, vec![3.5, 2.0, 3.5, 1.0]);
    }

    #[test]
    fn test_constant_inputs() {
        let constant = [0.25, 0.25, 0.25, 0.25];
        let varying = [0.1, 0.2, 0.3, 0.4];
        assert_eq!(spearman(&constant, &constant), 1.0);
        assert_eq!(spearman(&constant, &varying), 0.0);
    }

    #[test]
    fn test_partial_disagreement_in_open_interval() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [2.0, 1.0, 3.0, 4.0];
        let rho = spearman(&a, &b);
        assert!(rho > 0.0 && rho < 1.0);
    }
}
