//! Everything the dashboard shows, recomputed from scratch whenever a
//! selection or an input changes. No state is carried between calls.

use serde::Deserialize;

use crate::data::filter::{RoomFilter, ScatterPoint, filtered_indices, scatter_points, visible_column};
use crate::data::model::{Column, ListingTable};
use crate::finance::{self, AnnuitySummary, RentRequirement};
use crate::stats::{self, DEFAULT_BINS, HistogramBin, SummaryStatistics};

/// Largest bin count the charts accept.
pub const MAX_BINS: usize = 200;
/// Longest rent schedule the discounting calculator accepts.
pub const MAX_YEARS: i32 = 100;

// ---------------------------------------------------------------------------
// Calculator inputs
// ---------------------------------------------------------------------------

/// Inputs of the rent discounting calculator.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnnuityInputs {
    pub annual_rent: f64,
    pub years: i32,
    /// Percent, `10.0` for 10 %.
    pub discount_rate_pct: f64,
}

impl Default for AnnuityInputs {
    fn default() -> Self {
        Self {
            annual_rent: 0.0,
            years: 10,
            discount_rate_pct: 10.0,
        }
    }
}

/// Inputs of the required-rent calculator.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RentInputs {
    pub price: f64,
    pub target_yield_pct: f64,
}

impl Default for RentInputs {
    fn default() -> Self {
        Self {
            price: 0.0,
            target_yield_pct: 5.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard inputs
// ---------------------------------------------------------------------------

/// Every user-controlled value the views are computed from.
///
/// Deserializes from the flat config keys `remove_outliers`,
/// `histogram_bins`, `annuity` and `rent`. The room selection always starts
/// at "All".
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardInputs {
    #[serde(skip)]
    pub room_filter: RoomFilter,
    /// Trim area outliers from the scatter.
    pub remove_outliers: bool,
    pub histogram_bins: usize,
    pub annuity: AnnuityInputs,
    pub rent: RentInputs,
}

impl Default for DashboardInputs {
    fn default() -> Self {
        Self {
            room_filter: RoomFilter::All,
            remove_outliers: true,
            histogram_bins: DEFAULT_BINS,
            annuity: AnnuityInputs::default(),
            rent: RentInputs::default(),
        }
    }
}

impl DashboardInputs {
    /// Bring values that did not come through the UI widgets into the
    /// ranges those widgets allow: bins in `1..=MAX_BINS` (0 means the
    /// default), years in `0..=MAX_YEARS`.
    pub fn clamp_to_ranges(&mut self) {
        let bins = match self.histogram_bins {
            0 => DEFAULT_BINS,
            n => n.min(MAX_BINS),
        };
        if bins != self.histogram_bins {
            log::warn!(
                "histogram_bins {} outside 1..={MAX_BINS}, using {bins}",
                self.histogram_bins
            );
            self.histogram_bins = bins;
        }

        let years = self.annuity.years.clamp(0, MAX_YEARS);
        if years != self.annuity.years {
            log::warn!(
                "annuity years {} outside 0..={MAX_YEARS}, using {years}",
                self.annuity.years
            );
            self.annuity.years = years;
        }
    }

    pub fn market(&self, table: &ListingTable) -> MarketView {
        MarketView::compute(
            table,
            &self.room_filter,
            self.remove_outliers,
            self.histogram_bins,
        )
    }

    pub fn finance(&self) -> FinanceView {
        FinanceView::compute(&self.annuity, &self.rent)
    }
}

// ---------------------------------------------------------------------------
// Market view
// ---------------------------------------------------------------------------

/// Statistics and histogram of one column over the visible listings.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnView {
    pub column: Column,
    /// `None` when the column has no values for this selection.
    pub summary: Option<SummaryStatistics>,
    pub bins: Vec<HistogramBin>,
}

/// Derived market data for one room selection.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketView {
    pub visible_indices: Vec<usize>,
    /// One entry per [`Column::ALL`], same order.
    pub columns: Vec<ColumnView>,
    pub scatter: Vec<ScatterPoint>,
}

impl MarketView {
    pub fn compute(
        table: &ListingTable,
        filter: &RoomFilter,
        remove_outliers: bool,
        bins: usize,
    ) -> Self {
        let visible_indices = filtered_indices(table, filter);

        let columns = Column::ALL
            .iter()
            .map(|&column| {
                let values = visible_column(table, &visible_indices, column);
                ColumnView {
                    column,
                    summary: stats::describe(&values),
                    bins: stats::histogram(&values, bins),
                }
            })
            .collect();

        let scatter = scatter_points(
            visible_indices.iter().map(|&i| &table.records[i]),
            remove_outliers,
        );

        MarketView {
            visible_indices,
            columns,
            scatter,
        }
    }

    pub fn column(&self, column: Column) -> Option<&ColumnView> {
        self.columns.iter().find(|c| c.column == column)
    }

    pub fn is_empty(&self) -> bool {
        self.visible_indices.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Finance view
// ---------------------------------------------------------------------------

/// Results of both calculators.
#[derive(Debug, Clone, PartialEq)]
pub struct FinanceView {
    pub annuity: AnnuitySummary,
    pub rent: RentRequirement,
}

impl FinanceView {
    pub fn compute(annuity: &AnnuityInputs, rent: &RentInputs) -> Self {
        FinanceView {
            annuity: finance::annuity(
                annuity.annual_rent,
                annuity.years,
                finance::percent_to_rate(annuity.discount_rate_pct),
            ),
            rent: finance::rent_requirement(rent.price, rent.target_yield_pct),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{RawRow, RawValue};

    fn sheet() -> ListingTable {
        let rows: Vec<RawRow> = [
            (100_000, 50, 1),
            (150_000, 75, 2),
            (180_000, 90, 2),
            (210_000, 100, 2),
            (900_000, 1000, 2),
        ]
        .iter()
        .map(|&(price, area, rooms)| {
            RawRow::from([
                ("Precio_USD".to_string(), RawValue::Integer(price)),
                ("Superficie_m2".to_string(), RawValue::Integer(area)),
                ("habitaciones".to_string(), RawValue::Integer(rooms)),
            ])
        })
        .collect();
        ListingTable::from_rows(&rows)
    }

    #[test]
    fn room_selection_drives_every_column() {
        let view = MarketView::compute(&sheet(), &RoomFilter::Only(RawValue::Integer(2)), false, 4);
        assert_eq!(view.visible_indices, vec![1, 2, 3, 4]);
        assert_eq!(view.columns.len(), 3);

        let price = view.column(Column::PriceUsd).unwrap();
        assert_eq!(price.summary.unwrap().count, 4);
        assert_eq!(price.bins.len(), 4);
        assert_eq!(price.bins.iter().map(|b| b.count).sum::<usize>(), 4);

        let per_m2 = view.column(Column::PricePerM2).unwrap();
        assert_eq!(per_m2.summary.unwrap().min, 900.0);
        assert_eq!(view.scatter.len(), 4);
    }

    #[test]
    fn outlier_toggle_only_affects_scatter() {
        let table = sheet();
        let kept = MarketView::compute(&table, &RoomFilter::All, false, 20);
        let trimmed = MarketView::compute(&table, &RoomFilter::All, true, 20);
        assert_eq!(kept.scatter.len(), 5);
        assert_eq!(trimmed.scatter.len(), 4);
        assert_eq!(kept.columns, trimmed.columns);
    }

    #[test]
    fn unmatched_selection_is_empty() {
        let view = MarketView::compute(&sheet(), &RoomFilter::Only(RawValue::Integer(7)), true, 20);
        assert!(view.is_empty());
        assert!(view.columns.iter().all(|c| c.summary.is_none() && c.bins.is_empty()));
        assert!(view.scatter.is_empty());
    }

    #[test]
    fn finance_view_uses_percent_inputs() {
        let view = FinanceView::compute(
            &AnnuityInputs {
                annual_rent: 1000.0,
                years: 5,
                discount_rate_pct: 0.0,
            },
            &RentInputs {
                price: 100_000_000.0,
                target_yield_pct: 5.0,
            },
        );
        assert_eq!(view.annuity.present_value, 5000.0);
        assert_eq!(view.rent.annual, 5_000_000.0);
    }

    #[test]
    fn inputs_drive_both_views() {
        let table = sheet();
        let inputs = DashboardInputs {
            room_filter: RoomFilter::Only(RawValue::Integer(2)),
            histogram_bins: 4,
            ..DashboardInputs::default()
        };
        assert_eq!(
            inputs.market(&table),
            MarketView::compute(&table, &RoomFilter::Only(RawValue::Integer(2)), true, 4)
        );
        assert_eq!(
            inputs.finance(),
            FinanceView::compute(&AnnuityInputs::default(), &RentInputs::default())
        );
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        let mut inputs = DashboardInputs {
            histogram_bins: usize::MAX,
            annuity: AnnuityInputs {
                annual_rent: 1000.0,
                years: i32::MAX,
                discount_rate_pct: 10.0,
            },
            ..DashboardInputs::default()
        };
        inputs.clamp_to_ranges();
        assert_eq!(inputs.histogram_bins, MAX_BINS);
        assert_eq!(inputs.annuity.years, MAX_YEARS);
        assert_eq!(inputs.finance().annuity.flows.len(), MAX_YEARS as usize);

        inputs.histogram_bins = 0;
        inputs.annuity.years = -5;
        inputs.clamp_to_ranges();
        assert_eq!(inputs.histogram_bins, DEFAULT_BINS);
        assert_eq!(inputs.annuity.years, 0);

        let mut in_range = DashboardInputs::default();
        in_range.clamp_to_ranges();
        assert_eq!(in_range, DashboardInputs::default());
    }
}
