//! Numeric engine behind the real-estate market dashboard.
//!
//! Everything in here is synchronous and side-effect free apart from the
//! file loader: feed it a listing table and a selection, get back plain
//! value structs to render.

pub mod config;
pub mod dashboard;
pub mod data;
pub mod finance;
pub mod stats;
