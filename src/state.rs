use std::path::{Path, PathBuf};

use rusty_realty::config::DashboardConfig;
use rusty_realty::dashboard::{DashboardInputs, FinanceView, MarketView};
use rusty_realty::data::filter::RoomFilter;
use rusty_realty::data::loader::load_listings;
use rusty_realty::data::model::{Column, ListingTable, PropertyType};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Chart selector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMode {
    Histogram(Column),
    PriceVsArea,
}

impl ChartMode {
    pub const ALL: [ChartMode; 4] = [
        ChartMode::Histogram(Column::PriceUsd),
        ChartMode::Histogram(Column::AreaM2),
        ChartMode::Histogram(Column::PricePerM2),
        ChartMode::PriceVsArea,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChartMode::Histogram(Column::PriceUsd) => "Prices",
            ChartMode::Histogram(Column::AreaM2) => "Area",
            ChartMode::Histogram(Column::PricePerM2) => "Price per m²",
            ChartMode::PriceVsArea => "Price vs. area",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Which sheet is selected.
    pub property_type: PropertyType,

    /// Loaded sheet (None until a file loads successfully).
    pub table: Option<ListingTable>,

    /// Selection and calculator values the views derive from.
    pub inputs: DashboardInputs,
    pub chart_mode: ChartMode,

    /// Derived data for the current selection (cached).
    pub market: Option<MarketView>,

    pub finance: FinanceView,

    /// Scatter colours by room label.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let inputs = config.inputs.clone();
        Self {
            property_type: config.property_type,
            table: None,
            finance: inputs.finance(),
            inputs,
            chart_mode: ChartMode::Histogram(Column::PriceUsd),
            market: None,
            color_map: None,
            status_message: None,
            config,
        }
    }

    /// Load the configured source of the selected property type.
    pub fn load_current(&mut self) {
        match self.config.sources.path_for(self.property_type) {
            Some(path) => {
                let path = path.to_path_buf();
                self.load_path(&path);
            }
            None => {
                self.clear_table();
                self.status_message = Some(format!(
                    "No data source configured for {}",
                    self.property_type
                ));
            }
        }
    }

    /// Switch sheet: reload and reset the room selection.
    pub fn set_property_type(&mut self, property_type: PropertyType) {
        if property_type == self.property_type && self.table.is_some() {
            return;
        }
        self.property_type = property_type;
        self.load_current();
    }

    /// Use `path` as the source of the selected property type and load it.
    pub fn open_path(&mut self, path: PathBuf) {
        self.config.sources.set(self.property_type, path.clone());
        self.load_path(&path);
    }

    fn load_path(&mut self, path: &Path) {
        match load_listings(path) {
            Ok(table) => self.set_table(table),
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.clear_table();
                self.status_message = Some(format!("Error loading data: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded sheet, reset the selection and colours.
    pub fn set_table(&mut self, table: ListingTable) {
        self.inputs.room_filter = RoomFilter::All;
        self.color_map = Some(ColorMap::new(&table.room_options));
        self.table = Some(table);
        self.status_message = None;
        self.refresh_market();
    }

    fn clear_table(&mut self) {
        self.table = None;
        self.market = None;
        self.color_map = None;
        self.inputs.room_filter = RoomFilter::All;
    }

    pub fn set_room_filter(&mut self, filter: RoomFilter) {
        if filter != self.inputs.room_filter {
            self.inputs.room_filter = filter;
            self.refresh_market();
        }
    }

    /// Recompute `market` after a selection change.
    pub fn refresh_market(&mut self) {
        self.market = self.table.as_ref().map(|table| self.inputs.market(table));
    }

    /// Recompute `finance` after a calculator input change.
    pub fn refresh_finance(&mut self) {
        self.finance = self.inputs.finance();
    }
}
