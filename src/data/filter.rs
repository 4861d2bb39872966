use std::fmt;

use super::model::{Column, ListingRecord, ListingTable, RawValue};
use crate::stats::{self, StatsError};

// ---------------------------------------------------------------------------
// Room filter
// ---------------------------------------------------------------------------

/// Which room label is selected in the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RoomFilter {
    /// No constraint.
    #[default]
    All,
    Only(RawValue),
}

impl fmt::Display for RoomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomFilter::All => f.write_str("All"),
            RoomFilter::Only(v) => write!(f, "{v}"),
        }
    }
}

/// Return indices of listings that pass the room filter.
///
/// `Only(v)` keeps a listing when its room label equals `v` exactly; a
/// listing without a label never matches.
pub fn filtered_indices(table: &ListingTable, filter: &RoomFilter) -> Vec<usize> {
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| match filter {
            RoomFilter::All => true,
            RoomFilter::Only(wanted) => rec.rooms.as_ref() == Some(wanted),
        })
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Price vs. area scatter
// ---------------------------------------------------------------------------

/// One point of the price-vs-area scatter.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub area_m2: f64,
    pub price_usd: f64,
    pub rooms: Option<RawValue>,
}

/// Listings with both price and area, optionally trimmed to the Tukey
/// fences of their area column.
pub fn scatter_points<'a, I>(records: I, remove_outliers: bool) -> Vec<ScatterPoint>
where
    I: IntoIterator<Item = &'a ListingRecord>,
{
    let points: Vec<ScatterPoint> = records
        .into_iter()
        .filter_map(|rec| {
            Some(ScatterPoint {
                area_m2: rec.area_m2?,
                price_usd: rec.price_usd?,
                rooms: rec.rooms.clone(),
            })
        })
        .collect();

    if !remove_outliers {
        return points;
    }

    let areas: Vec<Option<f64>> = points.iter().map(|p| Some(p.area_m2)).collect();
    match stats::outlier_bounds(&areas) {
        Ok(bounds) => points
            .into_iter()
            .filter(|p| stats::is_within(&bounds, p.area_m2))
            .collect(),
        Err(StatsError::EmptyInput) => points,
    }
}

/// Project one numeric column out of the visible listings.
pub fn visible_column(table: &ListingTable, indices: &[usize], column: Column) -> Vec<Option<f64>> {
    column.values(indices.iter().map(|&i| &table.records[i]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(price: Option<f64>, area: Option<f64>, rooms: Option<i64>) -> ListingRecord {
        ListingRecord {
            price_usd: price,
            area_m2: area,
            rooms: rooms.map(RawValue::Integer),
            price_per_m2: match (price, area) {
                (Some(p), Some(a)) if a > 0.0 => Some(p / a),
                _ => None,
            },
        }
    }

    fn table() -> ListingTable {
        ListingTable::from_records(vec![
            listing(Some(100_000.0), Some(50.0), Some(1)),
            listing(Some(150_000.0), Some(70.0), Some(2)),
            listing(None, Some(80.0), Some(2)),
            listing(Some(90_000.0), None, None),
        ])
    }

    #[test]
    fn all_keeps_everything() {
        assert_eq!(filtered_indices(&table(), &RoomFilter::All), vec![0, 1, 2, 3]);
    }

    #[test]
    fn only_matches_exact_label() {
        let t = table();
        assert_eq!(
            filtered_indices(&t, &RoomFilter::Only(RawValue::Integer(2))),
            vec![1, 2]
        );
        // "2" as text is a different label than 2 as a number
        assert!(filtered_indices(&t, &RoomFilter::Only(RawValue::String("2".into()))).is_empty());
    }

    #[test]
    fn visible_column_follows_indices() {
        let t = table();
        assert_eq!(
            visible_column(&t, &[1, 3], Column::PriceUsd),
            vec![Some(150_000.0), Some(90_000.0)]
        );
    }

    #[test]
    fn scatter_requires_price_and_area() {
        let t = table();
        let points = scatter_points(&t.records, false);
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].area_m2, 70.0);
        assert_eq!(points[1].price_usd, 150_000.0);
    }

    #[test]
    fn scatter_trims_area_outliers() {
        let records: Vec<ListingRecord> = [40.0, 50.0, 60.0, 70.0, 900.0]
            .iter()
            .map(|&a| listing(Some(100_000.0), Some(a), Some(2)))
            .collect();

        let trimmed = scatter_points(&records, true);
        assert_eq!(trimmed.len(), 4);
        assert!(trimmed.iter().all(|p| p.area_m2 < 900.0));

        assert_eq!(scatter_points(&records, false).len(), 5);
    }

    #[test]
    fn scatter_of_nothing_is_empty() {
        let records = vec![listing(None, Some(10.0), None)];
        assert!(scatter_points(&records, true).is_empty());
    }
}
