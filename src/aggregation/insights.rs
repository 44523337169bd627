//! Policy insights and critical alerts
//!
//! Single pass over the collection that tallies statuses, remembers the most
//! severe example of each flagged status, and counts species detected at
//! invasive sites. The headline follows status precedence
//! (invasive > ban > conserve > sustainable) regardless of raw counts.

use serde::Serialize;

use crate::advisory::{classify, AdvisoryStatus};
use crate::aggregation::StatusCounts;
use crate::observation::Observation;
use crate::utils::{SpeciesCount, SpeciesTally};

/// Number of invasive species reported in the insight card
pub const TOP_INVASIVE_SPECIES: usize = 3;

/// Headline for the action center
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CriticalAlert {
    Invasive { region: String },
    Ban { region: String, fish_stock_index: f64 },
    Conserve { region: String, biodiversity_index: f64 },
    Sustainable,
}

impl CriticalAlert {
    pub fn status(&self) -> Option<AdvisoryStatus> {
        match self {
            CriticalAlert::Invasive { .. } => Some(AdvisoryStatus::Invasive),
            CriticalAlert::Ban { .. } => Some(AdvisoryStatus::Ban),
            CriticalAlert::Conserve { .. } => Some(AdvisoryStatus::Conserve),
            CriticalAlert::Sustainable => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            CriticalAlert::Invasive { region } => format!(
                "🚨 High Risk: Invasive species detected near {}. Immediate containment and monitoring recommended. Review data in the Data Explorer.",
                region
            ),
            CriticalAlert::Ban { region, fish_stock_index } => format!(
                "🔴 Fishing Ban: {} flagged due to low Fish Stock Index ({:.0}). Review in Data Explorer.",
                region, fish_stock_index
            ),
            CriticalAlert::Conserve { region, biodiversity_index } => format!(
                "🟡 Conservation Zone: {} has low Biodiversity Index ({:.0}). Consider protective measures.",
                region, biodiversity_index
            ),
            CriticalAlert::Sustainable => {
                "✅ Overall conditions appear sustainable across monitored locations.".to_string()
            }
        }
    }
}

/// Action-center numbers for one snapshot
#[derive(Debug, Clone, Serialize)]
pub struct PolicyInsights<'a> {
    pub total: usize,
    pub counts: StatusCounts,
    pub ban_pct: u32,
    pub conserve_pct: u32,
    pub invasive_pct: u32,
    /// Lowest stock among `ban` rows (first one on ties)
    pub worst_ban: Option<&'a Observation>,
    /// Lowest biodiversity among `conserve` rows (first one on ties)
    pub worst_conserve: Option<&'a Observation>,
    pub first_invasive: Option<&'a Observation>,
    /// Species detected at invasive sites, first-seen order
    pub invasive_species: Vec<SpeciesCount>,
    pub top_invasive_species: Vec<SpeciesCount>,
    pub headline: CriticalAlert,
}

impl PolicyInsights<'_> {
    pub fn message(&self) -> String {
        self.headline.message()
    }

    /// "Tuna (4), Cod (2)"
    pub fn top_species_display(&self) -> String {
        self.top_invasive_species
            .iter()
            .map(SpeciesCount::display)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Whole-number share of `total`, guarding the empty collection
fn percent(count: usize, total: usize) -> u32 {
    (count as f64 / total.max(1) as f64 * 100.0).round() as u32
}

pub fn aggregate_insights(observations: &[Observation]) -> PolicyInsights<'_> {
    let mut counts = StatusCounts::default();
    let mut worst_ban: Option<&Observation> = None;
    let mut worst_conserve: Option<&Observation> = None;
    let mut first_invasive: Option<&Observation> = None;
    let mut tally = SpeciesTally::new();

    for obs in observations {
        let status = classify(obs);
        counts.increment(status);

        match status {
            AdvisoryStatus::Invasive => {
                first_invasive.get_or_insert(obs);
                tally.record_all(obs.detected_species.iter());
            }
            AdvisoryStatus::Ban => {
                // Ban rows always carry a stock value
                let stock = obs.fish_stock_index.unwrap_or(f64::INFINITY);
                let worse = worst_ban.map_or(true, |w| {
                    stock < w.fish_stock_index.unwrap_or(f64::INFINITY)
                });
                if worse {
                    worst_ban = Some(obs);
                }
            }
            AdvisoryStatus::Conserve => {
                let worse = worst_conserve
                    .map_or(true, |w| obs.biodiversity_index < w.biodiversity_index);
                if worse {
                    worst_conserve = Some(obs);
                }
            }
            AdvisoryStatus::Ok => {}
        }
    }

    let headline = if let Some(obs) = first_invasive {
        CriticalAlert::Invasive { region: obs.region.clone() }
    } else if let Some(obs) = worst_ban {
        CriticalAlert::Ban {
            region: obs.region.clone(),
            fish_stock_index: obs.fish_stock_index.unwrap_or_default(),
        }
    } else if let Some(obs) = worst_conserve {
        CriticalAlert::Conserve {
            region: obs.region.clone(),
            biodiversity_index: obs.biodiversity_index,
        }
    } else {
        CriticalAlert::Sustainable
    };

    let total = observations.len();
    tracing::debug!(
        "Insights: {} rows, invasive={}, ban={}, conserve={}",
        total,
        counts.invasive,
        counts.ban,
        counts.conserve
    );

    PolicyInsights {
        total,
        counts,
        ban_pct: percent(counts.ban, total),
        conserve_pct: percent(counts.conserve, total),
        invasive_pct: percent(counts.invasive, total),
        worst_ban,
        worst_conserve,
        first_invasive,
        top_invasive_species: tally.top(TOP_INVASIVE_SPECIES),
        invasive_species: tally.entries().to_vec(),
        headline,
    }
}
