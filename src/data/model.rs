use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// RawValue – a single cell as delivered by the loader
// ---------------------------------------------------------------------------

/// A dynamically-typed spreadsheet cell.
/// Room labels end up in a `BTreeSet`, so `RawValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put RawValue in BTreeSet --

impl Eq for RawValue {}

impl PartialOrd for RawValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RawValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use RawValue::*;
        fn discriminant(v: &RawValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for RawValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            RawValue::String(s) => s.hash(state),
            RawValue::Integer(i) => i.hash(state),
            RawValue::Float(f) => f.to_bits().hash(state),
            RawValue::Bool(b) => b.hash(state),
            RawValue::Null => {}
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::String(s) => write!(f, "{s}"),
            RawValue::Integer(i) => write!(f, "{i}"),
            RawValue::Float(v) => write!(f, "{v}"),
            RawValue::Bool(b) => write!(f, "{b}"),
            RawValue::Null => write!(f, "<null>"),
        }
    }
}

impl RawValue {
    /// Whether the cell counts as "set" for grouping purposes: null, empty
    /// text, zero and `false` do not.
    pub fn is_truthy(&self) -> bool {
        match self {
            RawValue::String(s) => !s.is_empty(),
            RawValue::Integer(i) => *i != 0,
            RawValue::Float(v) => *v != 0.0 && !v.is_nan(),
            RawValue::Bool(b) => *b,
            RawValue::Null => false,
        }
    }
}

/// One loader row: column name → cell.
pub type RawRow = BTreeMap<String, RawValue>;

// ---------------------------------------------------------------------------
// ListingRecord – one normalized row
// ---------------------------------------------------------------------------

/// A single property listing after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRecord {
    /// Asking price in USD.
    pub price_usd: Option<f64>,
    /// Floor area in square meters.
    pub area_m2: Option<f64>,
    /// Raw room-count label. Only ever compared, never parsed.
    pub rooms: Option<RawValue>,
    /// Always derived from `price_usd` and `area_m2`.
    pub price_per_m2: Option<f64>,
}

// ---------------------------------------------------------------------------
// PropertyType / Column
// ---------------------------------------------------------------------------

/// Which listing sheet is being analysed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Apartment,
    House,
}

impl PropertyType {
    pub const ALL: [PropertyType; 2] = [PropertyType::Apartment, PropertyType::House];

    pub fn label(self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartment",
            PropertyType::House => "House",
        }
    }

    /// File stem used by the sample generator and default config.
    pub fn file_stem(self) -> &'static str {
        match self {
            PropertyType::Apartment => "departamentos",
            PropertyType::House => "casas",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A numeric column of [`ListingRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    PriceUsd,
    AreaM2,
    PricePerM2,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::PriceUsd, Column::AreaM2, Column::PricePerM2];

    pub fn label(self) -> &'static str {
        match self {
            Column::PriceUsd => "Price (USD)",
            Column::AreaM2 => "Area (m²)",
            Column::PricePerM2 => "Price per m² (USD/m²)",
        }
    }

    pub fn get(self, record: &ListingRecord) -> Option<f64> {
        match self {
            Column::PriceUsd => record.price_usd,
            Column::AreaM2 => record.area_m2,
            Column::PricePerM2 => record.price_per_m2,
        }
    }

    /// Project the column out of a set of records, keeping gaps as `None`.
    pub fn values<'a, I>(self, records: I) -> Vec<Option<f64>>
    where
        I: IntoIterator<Item = &'a ListingRecord>,
    {
        records.into_iter().map(|r| self.get(r)).collect()
    }
}

// ---------------------------------------------------------------------------
// ListingTable – the complete normalized sheet
// ---------------------------------------------------------------------------

/// The normalized listing table with its room-label index.
#[derive(Debug, Clone, Default)]
pub struct ListingTable {
    pub records: Vec<ListingRecord>,
    /// Distinct truthy room labels, sorted.
    pub room_options: BTreeSet<RawValue>,
}

impl ListingTable {
    /// Normalize raw loader rows and build the room index.
    pub fn from_rows(rows: &[RawRow]) -> Self {
        Self::from_records(super::normalize::normalize_rows(rows))
    }

    pub fn from_records(records: Vec<ListingRecord>) -> Self {
        let room_options = records
            .iter()
            .filter_map(|r| r.rooms.as_ref())
            .filter(|v| v.is_truthy())
            .cloned()
            .collect();
        ListingTable {
            records,
            room_options,
        }
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(price: Option<f64>, area: Option<f64>, rooms: RawValue) -> ListingRecord {
        ListingRecord {
            price_usd: price,
            area_m2: area,
            rooms: Some(rooms),
            price_per_m2: None,
        }
    }

    #[test]
    fn room_options_skip_falsy_labels() {
        let table = ListingTable::from_records(vec![
            record(None, None, RawValue::Integer(3)),
            record(None, None, RawValue::Integer(0)),
            record(None, None, RawValue::String(String::new())),
            record(None, None, RawValue::Null),
            record(None, None, RawValue::Integer(2)),
            record(None, None, RawValue::Integer(3)),
        ]);
        let opts: Vec<_> = table.room_options.into_iter().collect();
        assert_eq!(opts, vec![RawValue::Integer(2), RawValue::Integer(3)]);
    }

    #[test]
    fn column_values_keep_gaps() {
        let rows = vec![
            record(Some(100.0), Some(10.0), RawValue::Integer(1)),
            record(None, Some(20.0), RawValue::Integer(1)),
        ];
        assert_eq!(Column::PriceUsd.values(&rows), vec![Some(100.0), None]);
        assert_eq!(Column::AreaM2.values(&rows), vec![Some(10.0), Some(20.0)]);
    }

    #[test]
    fn raw_value_ordering_groups_by_kind() {
        let mut set = BTreeSet::new();
        set.insert(RawValue::String("4+".into()));
        set.insert(RawValue::Integer(2));
        set.insert(RawValue::Float(1.5));
        set.insert(RawValue::Integer(1));
        let ordered: Vec<String> = set.iter().map(|v| v.to_string()).collect();
        assert_eq!(ordered, vec!["1", "2", "1.5", "4+"]);
    }
}
