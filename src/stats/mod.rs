//! Column statistics: summaries, histogram bins and outlier bounds.
//!
//! Every function takes a column as `&[Option<f64>]` (gaps included) and
//! only looks at finite values; `None`, NaN and infinities are skipped
//! before anything is counted.
//!
//! ```text
//!   Column::values(records)
//!        │
//!        ├──► describe        → Option<SummaryStatistics>
//!        ├──► histogram       → Vec<HistogramBin>
//!        └──► outlier_bounds  → Result<OutlierBounds, StatsError>
//! ```

pub mod describe;
pub mod histogram;
pub mod outliers;

pub use describe::{SummaryStatistics, describe};
pub use histogram::{DEFAULT_BINS, HistogramBin, histogram};
pub use outliers::{OutlierBounds, is_within, outlier_bounds};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("column has no valid numeric values")]
    EmptyInput,
}

/// Finite values of a column, in input order.
pub(crate) fn valid_values(values: &[Option<f64>]) -> Vec<f64> {
    values
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .collect()
}

/// Finite values of a column, sorted ascending.
pub(crate) fn sorted_valid_values(values: &[Option<f64>]) -> Vec<f64> {
    let mut valid = valid_values(values);
    valid.sort_by(f64::total_cmp);
    valid
}
