//! Rent calculators. These run off user-entered scalars, never off the
//! listing table.

pub mod annuity;
pub mod rent;

pub use annuity::{AnnuitySummary, CashFlow, annuity};
pub use rent::{RentRequirement, rent_requirement};

/// Convert a percentage as typed by the user (`10` for 10 %) to a rate.
pub fn percent_to_rate(pct: f64) -> f64 {
    pct / 100.0
}
