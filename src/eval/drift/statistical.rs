//! Statistical helper functions for drift detection.

use std::cmp::Ordering;

/// Two-sample Kolmogorov-Smirnov statistic: the largest gap between the
/// empirical CDFs of `a` and `b`.
///
/// Tied values are consumed together on both sides before the gap is
/// measured, so identical samples always give 0. Returns 0 when either
/// sample is empty.
pub fn ks_statistic(a: &[f64], b: &[f64]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_by(|x, y| x.partial_cmp(y).unwrap_or(Ordering::Equal));
    b.sort_by(|x, y| x.partial_cmp(y).unwrap_or(Ordering::Equal));

    let n1 = a.len() as f64;
    let n2 = b.len() as f64;
    let (mut i, mut j) = (0usize, 0usize);
    let mut d_max = 0.0f64;

    while i < a.len() && j < b.len() {
        let x = a[i].min(b[j]);
        while i < a.len() && a[i] <= x {
            i += 1;
        }
        while j < b.len() && b[j] <= x {
            j += 1;
        }
        let gap = (i as f64 / n1 - j as f64 / n2).abs();
        d_max = d_max.max(gap);
    }

    d_max
}

/// Survival function of the Kolmogorov distribution, `P(K > lambda)`.
///
/// Uses the theta-function form for small `lambda` where the alternating
/// series converges too slowly.
pub fn ks_p_value(lambda: f64) -> f64 {
    if !lambda.is_finite() {
        return if lambda > 0.0 { 0.0 } else { 1.0 };
    }
    if lambda <= 0.0 {
        return 1.0;
    }

    if lambda < 1.18 {
        // 1 - sqrt(2*pi)/lambda * sum_{k=1}^∞ exp(-(2k-1)^2 * pi^2 / (8 * lambda^2))
        let y = (-std::f64::consts::PI.powi(2) / (8.0 * lambda * lambda)).exp();
        let cdf = (2.0 * std::f64::consts::PI).sqrt() / lambda
            * (y + y.powi(9) + y.powi(25) + y.powi(49));
        return (1.0 - cdf).clamp(0.0, 1.0);
    }

    // P(K > λ) = 2 * sum_{k=1}^∞ (-1)^{k+1} * exp(-2 * k^2 * λ^2)
    let mut p = 0.0;
    for k in 1..=100 {
        let sign = if k % 2 == 1 { 1.0 } else { -1.0 };
        let term = sign * (-2.0 * f64::from(k).powi(2) * lambda.powi(2)).exp();
        p += term;
        if term.abs() < 1e-16 {
            break;
        }
    }
    (2.0 * p).clamp(0.0, 1.0)
}

/// Largest sample size for which [`ks_two_sample_p_value`] uses the exact
/// null distribution.
pub const EXACT_MAX_N: usize = 10_000;

/// Two-sided p-value for a KS statistic `d` between samples of size `n1`
/// and `n2`.
///
/// Exact when both samples have at most [`EXACT_MAX_N`] values, asymptotic
/// otherwise.
pub fn ks_two_sample_p_value(d: f64, n1: usize, n2: usize) -> f64 {
    if n1 == 0 || n2 == 0 {
        return 1.0;
    }
    if n1.max(n2) <= EXACT_MAX_N {
        ks_exact_p_value(d, n1, n2)
    } else {
        ks_asymptotic_p_value(d, n1, n2)
    }
}

/// Asymptotic two-sided p-value at the effective size `n1*n2/(n1+n2)`, with
/// Stephens' small-sample correction.
pub fn ks_asymptotic_p_value(d: f64, n1: usize, n2: usize) -> f64 {
    if n1 == 0 || n2 == 0 {
        return 1.0;
    }
    let n_eff = (n1 as f64 * n2 as f64) / (n1 as f64 + n2 as f64);
    let sqrt_n = n_eff.sqrt();
    let lambda = (sqrt_n + 0.12 + 0.11 / sqrt_n) * d;
    ks_p_value(lambda)
}

/// Exact two-sided p-value `P(D >= d)` when both samples come from the same
/// continuous distribution.
///
/// Every interleaving of the pooled sample is a monotone lattice path from
/// `(0, 0)` to `(n1, n2)`, all equally likely. The walk keeps the probability
/// of having stayed strictly inside the band `|i/n1 - j/n2| < d`; the
/// p-value is the remainder.
pub fn ks_exact_p_value(d: f64, n1: usize, n2: usize) -> f64 {
    if n1 == 0 || n2 == 0 {
        return 1.0;
    }

    // gaps are integer multiples of 1 / (n1 * n2)
    let (m, n) = (n1 as i64, n2 as i64);
    let band = (d * (m * n) as f64).round() as i64;
    let total = n1 + n2;

    let mut row = vec![0.0f64; n2 + 1];
    for i in 0..=n1 {
        for j in 0..=n2 {
            let mut p = if i == 0 && j == 0 { 1.0 } else { 0.0 };
            if i > 0 {
                p += row[j] * (n1 - i + 1) as f64 / (total - i + 1 - j) as f64;
            }
            if j > 0 {
                p += row[j - 1] * (n2 - j + 1) as f64 / (total - i - j + 1) as f64;
            }
            let gap = (i as i64 * n - j as i64 * m).abs();
            row[j] = if gap < band { p } else { 0.0 };
        }
    }

    (1.0 - row[n2]).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ks_statistic_identical_samples() {
        let a = [1.0, 2.0, 2.0, 3.0, 5.0];
        assert_eq!(ks_statistic(&a, &a), 0.0);
    }

    #[test]
    fn test_ks_statistic_disjoint_samples() {
        let a = [1.0, 2.0, 3.0];
        let b = [10.0, 11.0];
        assert_eq!(ks_statistic(&a, &b), 1.0);
        assert_eq!(ks_statistic(&b, &a), 1.0);
    }

    #[test]
    fn test_ks_statistic_partial_overlap() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [3.0, 4.0, 5.0, 6.0];
        assert!((ks_statistic(&a, &b) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_ks_statistic_constant_columns() {
        assert_eq!(ks_statistic(&[7.0; 10], &[7.0; 4]), 0.0);
        assert_eq!(ks_statistic(&[7.0; 10], &[8.0; 4]), 1.0);
    }

    #[test]
    fn test_ks_statistic_empty() {
        assert_eq!(ks_statistic(&[], &[1.0]), 0.0);
        assert_eq!(ks_statistic(&[1.0], &[]), 0.0);
    }

    #[test]
    fn test_ks_p_value_bounds() {
        assert_eq!(ks_p_value(0.0), 1.0);
        assert_eq!(ks_p_value(f64::INFINITY), 0.0);
        for i in 1..400 {
            let p = ks_p_value(f64::from(i) * 0.01);
            assert!((0.0..=1.0).contains(&p), "p={p} at lambda={}", f64::from(i) * 0.01);
        }
    }

    #[test]
    fn test_ks_p_value_monotone_decreasing() {
        let mut prev = 1.0;
        for i in 1..300 {
            let p = ks_p_value(f64::from(i) * 0.01);
            assert!(p <= prev + 1e-9, "not monotone at {i}: {p} > {prev}");
            prev = p;
        }
    }

    #[test]
    fn test_ks_p_value_known_values() {
        // Kolmogorov distribution critical values
        assert!((ks_p_value(1.358) - 0.05).abs() < 1e-3);
        assert!((ks_p_value(1.628) - 0.01).abs() < 1e-3);
        assert!((ks_p_value(0.5) - 0.964).abs() < 1e-3);
    }

    #[test]
    fn test_ks_p_value_branches_agree_at_switch() {
        let below = ks_p_value(1.18 - 1e-9);
        let above = ks_p_value(1.18);
        assert!((below - above).abs() < 1e-6);
    }

    #[test]
    fn test_two_sample_p_value_degenerate_sizes() {
        assert_eq!(ks_two_sample_p_value(1.0, 0, 10), 1.0);
        assert_eq!(ks_two_sample_p_value(1.0, 10, 0), 1.0);
    }

    #[test]
    fn test_exact_p_value_equal_sizes() {
        // 2 * C(20, 4) / C(20, 10)
        let p = ks_exact_p_value(0.6, 10, 10);
        assert!((p - 2.0 * 4845.0 / 184_756.0).abs() < 1e-12, "p={p}");
        assert!(p > 0.05);
    }

    #[test]
    fn test_exact_p_value_unequal_sizes() {
        // only the two fully separated interleavings reach D = 1
        let p = ks_exact_p_value(1.0, 3, 2);
        assert!((p - 0.2).abs() < 1e-12, "p={p}");
        assert!((ks_exact_p_value(1.0, 2, 3) - p).abs() < 1e-12);
    }

    #[test]
    fn test_exact_p_value_edges() {
        assert_eq!(ks_exact_p_value(0.0, 7, 4), 1.0);
        // one value per side can never be significant
        assert_eq!(ks_exact_p_value(1.0, 1, 1), 1.0);
        let p = ks_exact_p_value(1.0, 100, 100);
        assert!((0.0..1e-12).contains(&p));
    }

    #[test]
    fn test_exact_p_value_non_increasing_in_d() {
        let mut prev = 1.0;
        for k in 0..=12 {
            let p = ks_exact_p_value(f64::from(k) / 12.0, 12, 8);
            assert!(p <= prev + 1e-12, "not monotone at {k}: {p} > {prev}");
            prev = p;
        }
    }

    #[test]
    fn test_exact_p_value_close_to_asymptotic_for_large_samples() {
        let d = 0.086;
        let exact = ks_exact_p_value(d, 500, 500);
        let asymptotic = ks_asymptotic_p_value(d, 500, 500);
        assert!((exact - asymptotic).abs() < 0.02, "{exact} vs {asymptotic}");
    }

    #[test]
    fn test_large_samples_use_asymptotic_distribution() {
        let n = EXACT_MAX_N + 1;
        assert_eq!(
            ks_two_sample_p_value(0.02, n, n),
            ks_asymptotic_p_value(0.02, n, n)
        );
        assert_eq!(
            ks_two_sample_p_value(0.6, 10, 10),
            ks_exact_p_value(0.6, 10, 10)
        );
    }
}
