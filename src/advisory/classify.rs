//! Advisory classification
//!
//! Maps one observation's indicators to a single advisory status through a
//! fixed, ordered decision table. The first matching rule wins, so an
//! observation that is both invasive and low-stock reports `Invasive`.
//! Reordering [`ADVISORY_RULES`] changes observable behaviour.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::observation::Observation;

// ============================================================================
// Thresholds
// ============================================================================

/// Fish stock index below this value triggers a fishing ban
pub const FISH_STOCK_BAN_THRESHOLD: f64 = 30.0;

/// Biodiversity index below this value triggers a conservation zone
pub const BIODIVERSITY_CONSERVE_THRESHOLD: f64 = 40.0;

// ============================================================================
// Status
// ============================================================================

/// Policy advisory outcome for one location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryStatus {
    Invasive,
    Ban,
    Conserve,
    Ok,
}

impl AdvisoryStatus {
    /// All statuses in precedence order (most severe first)
    pub const ALL: [AdvisoryStatus; 4] = [
        AdvisoryStatus::Invasive,
        AdvisoryStatus::Ban,
        AdvisoryStatus::Conserve,
        AdvisoryStatus::Ok,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AdvisoryStatus::Invasive => "invasive",
            AdvisoryStatus::Ban => "ban",
            AdvisoryStatus::Conserve => "conserve",
            AdvisoryStatus::Ok => "ok",
        }
    }

    /// Anything other than `Ok` needs attention
    pub fn is_flagged(self) -> bool {
        self != AdvisoryStatus::Ok
    }
}

impl fmt::Display for AdvisoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdvisoryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "invasive" => Ok(AdvisoryStatus::Invasive),
            "ban" => Ok(AdvisoryStatus::Ban),
            "conserve" => Ok(AdvisoryStatus::Conserve),
            "ok" => Ok(AdvisoryStatus::Ok),
            other => Err(format!("Unknown advisory status: {}", other)),
        }
    }
}

// ============================================================================
// Decision table
// ============================================================================

/// The three indicators the decision table looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicators {
    pub invasive: bool,
    /// `None` reads as +infinity
    pub fish_stock_index: Option<f64>,
    pub biodiversity_index: f64,
}

impl Indicators {
    pub fn from_observation(obs: &Observation) -> Self {
        Self {
            invasive: obs.invasive_flag.is_set(),
            fish_stock_index: obs.fish_stock_index,
            biodiversity_index: obs.biodiversity_index,
        }
    }
}

/// One (predicate, status) row of the decision table
#[derive(Clone, Copy)]
pub struct AdvisoryRule {
    pub status: AdvisoryStatus,
    pub name: &'static str,
    pub matches: fn(&Indicators) -> bool,
}

impl fmt::Debug for AdvisoryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdvisoryRule")
            .field("status", &self.status)
            .field("name", &self.name)
            .finish()
    }
}

fn invasive_detected(ind: &Indicators) -> bool {
    ind.invasive
}

/// Stock index under the ban threshold; missing or NaN never qualifies
pub fn is_low_stock(fish_stock_index: Option<f64>) -> bool {
    matches!(fish_stock_index, Some(stock) if stock < FISH_STOCK_BAN_THRESHOLD)
}

/// Biodiversity index under the conservation threshold; NaN fails closed
pub fn is_low_biodiversity(biodiversity_index: f64) -> bool {
    biodiversity_index.is_nan() || biodiversity_index < BIODIVERSITY_CONSERVE_THRESHOLD
}

fn stock_below_threshold(ind: &Indicators) -> bool {
    is_low_stock(ind.fish_stock_index)
}

fn biodiversity_below_threshold(ind: &Indicators) -> bool {
    is_low_biodiversity(ind.biodiversity_index)
}

fn always(_: &Indicators) -> bool {
    true
}

/// Ordered decision table, evaluated top-down, first match wins
pub const ADVISORY_RULES: [AdvisoryRule; 4] = [
    AdvisoryRule {
        status: AdvisoryStatus::Invasive,
        name: "invasive flag set",
        matches: invasive_detected,
    },
    AdvisoryRule {
        status: AdvisoryStatus::Ban,
        name: "fish stock below ban threshold",
        matches: stock_below_threshold,
    },
    AdvisoryRule {
        status: AdvisoryStatus::Conserve,
        name: "biodiversity below conservation threshold",
        matches: biodiversity_below_threshold,
    },
    AdvisoryRule {
        status: AdvisoryStatus::Ok,
        name: "default",
        matches: always,
    },
];

/// Classify raw indicators
pub fn classify_indicators(indicators: &Indicators) -> AdvisoryStatus {
    ADVISORY_RULES
        .iter()
        .find(|rule| (rule.matches)(indicators))
        .map_or(AdvisoryStatus::Ok, |rule| rule.status)
}

/// Classify one observation
pub fn classify(obs: &Observation) -> AdvisoryStatus {
    classify_indicators(&Indicators::from_observation(obs))
}

/// Status selector for listing observations (`All` or one status)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Only(AdvisoryStatus),
}

impl StatusFilter {
    pub fn accepts(self, status: AdvisoryStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

/// Observations (paired with their status) that pass the filter, in input order
pub fn filter_by_status(
    observations: &[Observation],
    filter: StatusFilter,
) -> Vec<(&Observation, AdvisoryStatus)> {
    observations
        .iter()
        .map(|obs| (obs, classify(obs)))
        .filter(|(_, status)| filter.accepts(*status))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicators(invasive: bool, stock: Option<f64>, bio: f64) -> Indicators {
        Indicators {
            invasive,
            fish_stock_index: stock,
            biodiversity_index: bio,
        }
    }

    #[test]
    fn test_invasive_outranks_low_stock() {
        assert_eq!(
            classify_indicators(&indicators(true, Some(10.0), 20.0)),
            AdvisoryStatus::Invasive
        );
    }

    #[test]
    fn test_ban_outranks_conserve() {
        assert_eq!(
            classify_indicators(&indicators(false, Some(25.0), 35.0)),
            AdvisoryStatus::Ban
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        assert_eq!(
            classify_indicators(&indicators(false, Some(30.0), 40.0)),
            AdvisoryStatus::Ok
        );
        assert_eq!(
            classify_indicators(&indicators(false, Some(29.99), 80.0)),
            AdvisoryStatus::Ban
        );
        assert_eq!(
            classify_indicators(&indicators(false, Some(80.0), 39.99)),
            AdvisoryStatus::Conserve
        );
    }

    #[test]
    fn test_missing_stock_never_bans() {
        assert_eq!(
            classify_indicators(&indicators(false, None, 90.0)),
            AdvisoryStatus::Ok
        );
        assert_eq!(
            classify_indicators(&indicators(false, None, 10.0)),
            AdvisoryStatus::Conserve
        );
        assert_eq!(
            classify_indicators(&indicators(false, Some(f64::NAN), 90.0)),
            AdvisoryStatus::Ok
        );
    }

    #[test]
    fn test_nan_biodiversity_fails_closed() {
        assert_eq!(
            classify_indicators(&indicators(false, Some(70.0), f64::NAN)),
            AdvisoryStatus::Conserve
        );
    }

    #[test]
    fn test_rule_table_order_matches_precedence() {
        let order: Vec<AdvisoryStatus> = ADVISORY_RULES.iter().map(|r| r.status).collect();
        assert_eq!(order, AdvisoryStatus::ALL.to_vec());
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in AdvisoryStatus::ALL {
            assert_eq!(status.as_str().parse::<AdvisoryStatus>(), Ok(status));
        }
        assert!("closed".parse::<AdvisoryStatus>().is_err());
    }
}
