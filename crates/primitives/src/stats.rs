//! Small descriptive statistics used by the derived tables.
//!
//! All functions return `None` instead of panicking or producing `NaN` when
//! the statistic is undefined for the given input.

/// Arithmetic mean of `values`. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Quantile `q` (in `[0, 1]`) of an ascending-sorted slice.
///
/// Uses linear interpolation between the two closest ranks, with the rank
/// position at `q * (n - 1)`.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    if frac == 0.0 {
        // exact rank: inf - inf would be NaN
        return Some(sorted[lo]);
    }
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Quantile `q` of unsorted `values`. See [`quantile_sorted`].
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    quantile_sorted(&sorted, q)
}

/// Median of `values`, i.e. the 0.5 quantile.
pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// Gini coefficient of a vector of non-negative counts.
///
/// Computed as half the relative mean absolute difference:
/// `0.5 * mean(|x_i - x_j| for all i, j) / mean(x)`. Ranges from `0` (all
/// counts equal) to `(n - 1) / n` (everything in one bucket).
///
/// Returns `None` when the mean is zero (empty input or all-zero counts),
/// where the coefficient is undefined.
pub fn gini(counts: &[u64]) -> Option<f64> {
    let n = counts.len();
    let total: u64 = counts.iter().sum();
    if n == 0 || total == 0 {
        return None;
    }

    let abs_diff_sum: f64 = counts
        .iter()
        .flat_map(|&a| counts.iter().map(move |&b| a.abs_diff(b) as f64))
        .sum();
    let pairs = (n * n) as f64;
    let mean_abs_diff = abs_diff_sum / pairs;
    let mean = total as f64 / n as f64;

    Some(0.5 * mean_abs_diff / mean)
}
