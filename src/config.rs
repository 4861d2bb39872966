use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::dashboard::DashboardInputs;
use crate::data::model::PropertyType;

/// Environment variable pointing at a config file.
pub const CONFIG_ENV: &str = "RUSTY_REALTY_CONFIG";
/// Config file picked up from the working directory when the variable is unset.
pub const CONFIG_FILE: &str = "rusty-realty.json";

// ---------------------------------------------------------------------------
// DashboardConfig
// ---------------------------------------------------------------------------

/// Startup settings. Every field is optional in the JSON file:
///
/// ```json
/// {
///   "sources": { "apartment": "data/departamentos.csv" },
///   "property_type": "house",
///   "histogram_bins": 30,
///   "annuity": { "years": 15, "discount_rate_pct": 8.5 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub sources: DataSources,
    /// Sheet shown on startup.
    pub property_type: PropertyType,
    /// Initial selection and calculator values.
    #[serde(flatten)]
    pub inputs: DashboardInputs,
    pub window: WindowConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            sources: DataSources::default(),
            property_type: PropertyType::Apartment,
            inputs: DashboardInputs::default(),
            window: WindowConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file. Out-of-range inputs are clamped with a
    /// warning.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config: DashboardConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;

        config.inputs.clamp_to_ranges();
        Ok(config)
    }

    /// `$RUSTY_REALTY_CONFIG`, then `./rusty-realty.json`, then defaults.
    pub fn discover() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            let path = PathBuf::from(path);
            log::info!("Using config from ${CONFIG_ENV}: {}", path.display());
            return Self::load(&path);
        }
        let local = Path::new(CONFIG_FILE);
        if local.is_file() {
            log::info!("Using config {CONFIG_FILE}");
            return Self::load(local);
        }
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Listing file per property type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataSources {
    pub apartment: Option<PathBuf>,
    pub house: Option<PathBuf>,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            apartment: Some(default_source(PropertyType::Apartment)),
            house: Some(default_source(PropertyType::House)),
        }
    }
}

impl DataSources {
    pub fn path_for(&self, property_type: PropertyType) -> Option<&Path> {
        match property_type {
            PropertyType::Apartment => self.apartment.as_deref(),
            PropertyType::House => self.house.as_deref(),
        }
    }

    pub fn set(&mut self, property_type: PropertyType, path: PathBuf) {
        match property_type {
            PropertyType::Apartment => self.apartment = Some(path),
            PropertyType::House => self.house = Some(path),
        }
    }
}

/// Where `generate_sample` writes its Parquet output.
pub fn default_source(property_type: PropertyType) -> PathBuf {
    Path::new("data").join(format!("{}.parquet", property_type.file_stem()))
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}
