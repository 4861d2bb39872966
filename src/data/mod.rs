//! Data layer: core types, loading, normalization and filtering.
//!
//! Architecture:
//! ```text
//!  .parquet / .json / .csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Vec<RawRow>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ normalize  │  RawRow → ListingRecord (price, area, rooms, price/m²)
//!   └───────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ ListingTable  │  Vec<ListingRecord>, room label index
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  room selection → visible indices, scatter points
//!   └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
