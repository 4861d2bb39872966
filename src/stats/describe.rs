use super::sorted_valid_values;

/// Summary of one numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStatistics {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation (divides by `n`).
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Describe a column.
///
/// Returns `None` when the column has no finite values; callers should treat
/// that as "nothing to show" rather than as a row of zeros.
///
/// Quartiles interpolate linearly between neighbouring order statistics at
/// rank `p * (n - 1)`, so `[1, 2, 3, 4]` has `q25 = 1.75`, `median = 2.5`
/// and `q75 = 3.25`.
///
/// Mean and deviation are accumulated on values scaled by the largest
/// magnitude, so any column of finite values yields finite results, even
/// one whose plain sum would overflow.
pub fn describe(values: &[Option<f64>]) -> Option<SummaryStatistics> {
    let sorted = sorted_valid_values(values);
    let min = *sorted.first()?;
    let max = *sorted.last()?;

    let count = sorted.len();
    let n = count as f64;
    let magnitude = min.abs().max(max.abs());
    let scale = if magnitude > 0.0 { magnitude } else { 1.0 };
    let mean = sorted.iter().map(|v| v / n).sum::<f64>();
    let scaled_mean = mean / scale;
    let scaled_variance = sorted
        .iter()
        .map(|v| (v / scale - scaled_mean).powi(2))
        .sum::<f64>()
        / n;

    Some(SummaryStatistics {
        count,
        mean,
        std: scaled_variance.sqrt() * scale,
        min,
        q25: interpolated_quantile(&sorted, 0.25),
        median: interpolated_quantile(&sorted, 0.50),
        q75: interpolated_quantile(&sorted, 0.75),
        max,
    })
}

/// `sorted` must be non-empty and ascending.
fn interpolated_quantile(sorted: &[f64], p: f64) -> f64 {
    let idx = p * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (idx - lo as f64)
}
