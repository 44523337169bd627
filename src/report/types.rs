use std::fmt;

use serde::{Deserialize, Serialize};

use crate::advisory::AdvisoryStatus;
use crate::observation::{InvasiveFlag, Observation};
use crate::utils::SpeciesList;

/// Site conditions submitted for prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    pub region: String,
    pub sea_temperature: f64,
    pub salinity: f64,
    pub biodiversity_index: f64,
    pub detected_species: SpeciesList,
    pub invasive_flag: InvasiveFlag,
}

impl From<&Observation> for PredictionInput {
    fn from(obs: &Observation) -> Self {
        Self {
            region: obs.region.clone(),
            sea_temperature: obs.sea_temperature,
            salinity: obs.salinity,
            biodiversity_index: obs.biodiversity_index,
            detected_species: obs.detected_species.clone(),
            invasive_flag: obs.invasive_flag.clone(),
        }
    }
}

/// Output of the external prediction service for one row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub fish_stock_prediction: f64,
    /// Categorical label ("low" / "medium" / "high"); shown, never trusted for status
    pub biodiversity_risk_prediction: String,
    pub recommendation: String,
}

/// Structured justification report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryReport {
    pub region: String,
    pub status: AdvisoryStatus,
    pub headline: String,
    /// Three fixed lines plus at most one threshold line
    pub justification: Vec<String>,
    pub recommendation: String,
    pub species_risk: String,
}

impl fmt::Display for AdvisoryReport {
    /// Plain-text rendering; layout is part of the report contract
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.headline)?;
        writeln!(f)?;
        writeln!(f, "Justification:")?;
        writeln!(f, "- {}", self.justification.join("\n- "))?;
        writeln!(f)?;
        writeln!(f, "Proactive Recommendation:")?;
        writeln!(f, "{}", self.recommendation)?;
        writeln!(f)?;
        writeln!(f, "Species Risk:")?;
        write!(f, "{}", self.species_risk)
    }
}
