use super::{StatsError, sorted_valid_values};

/// Inclusive inclusion range from Tukey's 1.5 × IQR fences.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierBounds {
    pub lower: f64,
    pub upper: f64,
}

/// Tukey fences for a column.
///
/// Quartiles here are nearest-rank (`sorted[floor(p * n)]`), not the
/// interpolated quartiles of [`describe`](super::describe). The two rules
/// feed different parts of the dashboard and are kept apart on purpose.
///
/// An empty column has no fences and returns [`StatsError::EmptyInput`].
pub fn outlier_bounds(values: &[Option<f64>]) -> Result<OutlierBounds, StatsError> {
    let sorted = sorted_valid_values(values);
    if sorted.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    let n = sorted.len() as f64;
    let q1 = sorted[(n * 0.25).floor() as usize];
    let q3 = sorted[(n * 0.75).floor() as usize];
    let iqr = q3 - q1;

    Ok(OutlierBounds {
        lower: q1 - 1.5 * iqr,
        upper: q3 + 1.5 * iqr,
    })
}

/// Whether `value` lies inside `[lower, upper]`, bounds included.
pub fn is_within(bounds: &OutlierBounds, value: f64) -> bool {
    (bounds.lower..=bounds.upper).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn flags_large_outlier() {
        let bounds = outlier_bounds(&some(&[1.0, 2.0, 3.0, 4.0, 100.0])).unwrap();
        // nearest rank: q1 = sorted[1] = 2, q3 = sorted[3] = 4
        assert_eq!(bounds, OutlierBounds { lower: -1.0, upper: 7.0 });
        assert!(bounds.upper < 100.0);
    }

    #[test]
    fn uses_nearest_rank_not_interpolation() {
        // interpolated quartiles would be 1.75 / 3.25
        let bounds = outlier_bounds(&some(&[4.0, 3.0, 2.0, 1.0])).unwrap();
        // nearest rank: q1 = sorted[1] = 2, q3 = sorted[3] = 4
        assert_eq!(bounds, OutlierBounds { lower: -1.0, upper: 7.0 });
    }

    #[test]
    fn single_value_collapses_to_point() {
        let bounds = outlier_bounds(&[Some(5.0), None]).unwrap();
        assert_eq!(bounds, OutlierBounds { lower: 5.0, upper: 5.0 });
    }

    #[test]
    fn empty_column_is_an_error() {
        assert_eq!(outlier_bounds(&[]), Err(StatsError::EmptyInput));
        assert_eq!(outlier_bounds(&[None, Some(f64::NAN)]), Err(StatsError::EmptyInput));
    }

    #[test]
    fn fences_are_inclusive() {
        let bounds = OutlierBounds { lower: -1.0, upper: 7.0 };
        let kept: Vec<f64> = [-1.0, 1.0, 7.0, 7.5, 100.0]
            .into_iter()
            .filter(|&v| is_within(&bounds, v))
            .collect();
        assert_eq!(kept, vec![-1.0, 1.0, 7.0]);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let column = vec![Some(0.1), Some(7.3), None, Some(2.2), Some(95.0), Some(3.3)];
        let a = outlier_bounds(&column).unwrap();
        let b = outlier_bounds(&column).unwrap();
        assert_eq!(a.lower.to_bits(), b.lower.to_bits());
        assert_eq!(a.upper.to_bits(), b.upper.to_bits());
    }
}
