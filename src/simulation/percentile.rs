//! Nearest-rank percentile extraction

/// Nearest-rank percentile of an ascending-sorted slice.
///
/// `q` is a fraction in `[0, 1]`; the index is `floor(q * (n - 1))` clamped to
/// the slice. Returns 0.0 for an empty slice.
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let last = sorted.len() - 1;
    let rank = (q * last as f64).floor();
    let idx = if rank.is_nan() || rank <= 0.0 {
        0
    } else {
        (rank as usize).min(last)
    };

    sorted[idx]
}

/// Sort values ascending in place and return the requested percentiles
pub fn percentiles(values: &mut [f64], qs: &[f64]) -> Vec<f64> {
    values.sort_by(|a, b| a.total_cmp(b));
    qs.iter().map(|&q| percentile(values, q)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_rank() {
        let sorted: Vec<f64> = (0..=10).map(|i| i as f64).collect();
        assert_eq!(percentile(&sorted, 0.0), 0.0);
        assert_eq!(percentile(&sorted, 0.1), 1.0);
        assert_eq!(percentile(&sorted, 0.5), 5.0);
        assert_eq!(percentile(&sorted, 0.9), 9.0);
        assert_eq!(percentile(&sorted, 1.0), 10.0);
    }

    #[test]
    fn test_rank_floors_between_points() {
        let sorted = [10.0, 20.0, 30.0, 40.0];
        // 0.5 * 3 = 1.5 -> index 1, no interpolation
        assert_eq!(percentile(&sorted, 0.5), 20.0);
        assert_eq!(percentile(&sorted, 0.9), 30.0);
    }

    #[test]
    fn test_out_of_range_q_is_clamped() {
        let sorted = [1.0, 2.0, 3.0];
        assert_eq!(percentile(&sorted, -0.5), 1.0);
        assert_eq!(percentile(&sorted, 2.0), 3.0);
        assert_eq!(percentile(&[], 0.5), 0.0);
    }

    #[test]
    fn test_percentiles_sorts_first() {
        let mut values = vec![5.0, 1.0, 4.0, 2.0, 3.0];
        let ps = percentiles(&mut values, &[0.1, 0.5, 0.9]);
        assert_eq!(ps, vec![1.0, 3.0, 4.0]);
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }
}
