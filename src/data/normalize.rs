//! Raw loader rows → [`ListingRecord`].
//!
//! Normalization never fails: a price or area cell that is absent, empty,
//! non-numeric, zero or non-finite simply becomes `None`.

use super::model::{ListingRecord, RawRow, RawValue};

const PRICE_KEYS: [&str; 3] = ["Precio_USD", "precio_usd", "PRECIO_USD"];
const AREA_KEYS: [&str; 3] = ["Superficie_m2", "superficie_m2", "SUPERFICIE_M2"];
const ROOM_KEYS: [&str; 3] = ["habitaciones", "Habitaciones", "HABITACIONES"];

/// Normalize every row of a sheet.
pub fn normalize_rows(rows: &[RawRow]) -> Vec<ListingRecord> {
    let records: Vec<ListingRecord> = rows.iter().map(normalize_row).collect();
    let missing_price = records.iter().filter(|r| r.price_usd.is_none()).count();
    let missing_area = records.iter().filter(|r| r.area_m2.is_none()).count();
    log::debug!(
        "Normalized {} rows ({missing_price} without price, {missing_area} without area)",
        records.len()
    );
    records
}

/// Normalize a single row.
pub fn normalize_row(row: &RawRow) -> ListingRecord {
    let price_usd = lookup(row, &PRICE_KEYS).and_then(parse_number);
    let area_m2 = lookup(row, &AREA_KEYS).and_then(parse_number);
    let rooms = lookup(row, &ROOM_KEYS).cloned();

    let price_per_m2 = match (price_usd, area_m2) {
        (Some(price), Some(area)) if area > 0.0 => Some(price / area),
        _ => None,
    };

    ListingRecord {
        price_usd,
        area_m2,
        rooms,
        price_per_m2,
    }
}

/// First non-null cell among the casing variants, in order.
fn lookup<'a>(row: &'a RawRow, keys: &[&str]) -> Option<&'a RawValue> {
    keys.iter()
        .filter_map(|k| row.get(*k))
        .find(|v| !matches!(v, RawValue::Null))
}

/// Permissive numeric read of a cell. Zero counts as missing.
fn parse_number(value: &RawValue) -> Option<f64> {
    let parsed = match value {
        RawValue::Float(v) => Some(*v),
        RawValue::Integer(i) => Some(*i as f64),
        RawValue::String(s) => parse_leading_f64(s),
        RawValue::Bool(_) | RawValue::Null => None,
    }?;
    (parsed.is_finite() && parsed != 0.0).then_some(parsed)
}

/// Parse the longest decimal literal at the start of `s` (after leading
/// whitespace): optional sign, digits, optional fraction, optional exponent.
/// `"120 m2"` → 120, `"1.5e3USD"` → 1500, `"abc"` → `None`.
fn parse_leading_f64(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}
