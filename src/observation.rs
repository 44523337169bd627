//! Observation records
//!
//! One monitoring record (location, date, sea-surface conditions, stock and
//! biodiversity indices, eDNA biota, invasive flag) plus the numeric coercion
//! rules applied when records arrive from loosely typed sources.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::{normalize_species, GeoPoint, SpeciesInput, SpeciesList};

/// Invasive-species flag as recorded ("yes"/"no", any case)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvasiveFlag(String);

impl InvasiveFlag {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn yes() -> Self {
        Self("yes".to_string())
    }

    pub fn no() -> Self {
        Self("no".to_string())
    }

    /// True only when the raw value equals "yes" ignoring case
    pub fn is_set(&self) -> bool {
        self.0.eq_ignore_ascii_case("yes")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for InvasiveFlag {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A single monitoring record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: NaiveDate,
    pub latitude: f64,
    pub longitude: f64,
    pub region: String,
    /// Sea-surface temperature (°C)
    pub sea_temperature: f64,
    /// Salinity (ppt)
    pub salinity: f64,
    /// `None` when absent or unparseable; never triggers the low-stock rule
    pub fish_stock_index: Option<f64>,
    pub biodiversity_index: f64,
    pub detected_species: SpeciesList,
    pub invasive_flag: InvasiveFlag,
}

impl Observation {
    /// Minimal record; conditions default to zero, no stock index, no species, flag "no"
    pub fn new(
        timestamp: NaiveDate,
        location: GeoPoint,
        region: impl Into<String>,
        biodiversity_index: f64,
    ) -> Self {
        Self {
            timestamp,
            latitude: location.latitude,
            longitude: location.longitude,
            region: region.into(),
            sea_temperature: 0.0,
            salinity: 0.0,
            fish_stock_index: None,
            biodiversity_index,
            detected_species: SpeciesList::new(),
            invasive_flag: InvasiveFlag::no(),
        }
    }

    pub fn with_fish_stock(mut self, value: impl Into<Option<f64>>) -> Self {
        self.fish_stock_index = coerce_stock(value.into());
        self
    }

    pub fn with_conditions(mut self, sea_temperature: f64, salinity: f64) -> Self {
        self.sea_temperature = sea_temperature;
        self.salinity = salinity;
        self
    }

    pub fn with_species(mut self, species: impl Into<SpeciesInput>) -> Self {
        self.detected_species = normalize_species(&species.into());
        self
    }

    pub fn with_invasive_flag(mut self, flag: impl Into<InvasiveFlag>) -> Self {
        self.invasive_flag = flag.into();
        self
    }

    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

// ============================================================================
// Numeric coercion
// ============================================================================

/// Parse a numeric cell; blank, non-numeric and non-finite text yield `None`
pub fn coerce_number(raw: Option<&str>) -> Option<f64> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Stock index coercion: anything non-finite counts as missing
///
/// Missing stock is read as "infinitely high" by the classifier, so bad data
/// can never produce a fishing ban on its own.
pub fn coerce_stock(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
