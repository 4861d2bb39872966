use super::valid_values;

/// Bin count used by the dashboard charts.
pub const DEFAULT_BINS: usize = 20;

/// One equal-width bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lower_bound: f64,
    pub midpoint: f64,
    pub count: usize,
}

/// Bin a column into `bins` equal-width buckets spanning `[min, max]`.
///
/// The last bucket is closed on both ends, so `max` lands in it. A column
/// whose values are all equal gets a bin width of 1 and everything falls
/// into the first bucket. An empty column, or `bins == 0`, yields no bins.
pub fn histogram(values: &[Option<f64>], bins: usize) -> Vec<HistogramBin> {
    let valid = valid_values(values);
    if valid.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = valid.iter().copied().fold(f64::INFINITY, f64::min);
    let max = valid.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut width = (max - min) / bins as f64;
    if width == 0.0 {
        width = 1.0;
    }

    let mut counts = vec![0usize; bins];
    for v in valid {
        let idx = (((v - min) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower_bound: min + i as f64 * width,
            midpoint: min + (i as f64 + 0.5) * width,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn max_lands_in_last_bin() {
        let bins = histogram(&some(&[1.0, 2.0, 3.0, 4.0, 5.0]), 2);
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].count, 2);
        assert_eq!(bins[1].count, 3);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 5);
        assert_eq!(bins[0].lower_bound, 1.0);
        assert_eq!(bins[0].midpoint, 2.0);
        assert_eq!(bins[1].lower_bound, 3.0);
        assert_eq!(bins[1].midpoint, 4.0);
    }

    #[test]
    fn constant_column_uses_unit_width() {
        let bins = histogram(&some(&[7.0, 7.0, 7.0]), 4);
        assert_eq!(bins.len(), 4);
        assert_eq!(bins[0].count, 3);
        assert_eq!(bins[0].lower_bound, 7.0);
        assert_eq!(bins[0].midpoint, 7.5);
        assert_eq!(bins[3].lower_bound, 10.0);
        assert!(bins[1..].iter().all(|b| b.count == 0));
    }

    #[rstest]
    #[case(vec![], DEFAULT_BINS)]
    #[case(vec![None, Some(f64::NAN)], DEFAULT_BINS)]
    #[case(vec![Some(1.0), Some(2.0)], 0)]
    fn degenerate_inputs_yield_no_bins(#[case] values: Vec<Option<f64>>, #[case] bins: usize) {
        assert!(histogram(&values, bins).is_empty());
    }

    #[test]
    fn default_bin_count_keeps_every_value() {
        let values: Vec<Option<f64>> = (0..=100).map(|i| Some(i as f64 * 1.37)).collect();
        let bins = histogram(&values, DEFAULT_BINS);
        assert_eq!(bins.len(), DEFAULT_BINS);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 101);
        assert!(bins.windows(2).all(|w| w[0].lower_bound < w[1].lower_bound));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let values = vec![Some(3.5), None, Some(1.25), Some(8.0), Some(2.0), Some(f64::NAN)];
        let a = histogram(&values, 7);
        let b = histogram(&values, 7);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.lower_bound.to_bits(), y.lower_bound.to_bits());
            assert_eq!(x.midpoint.to_bits(), y.midpoint.to_bits());
            assert_eq!(x.count, y.count);
        }
    }
}
