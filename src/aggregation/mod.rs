//! Aggregation pipelines
//!
//! Independent reducers over a fully materialized observation collection:
//! - `heatmap`: region × month mean biodiversity grid
//! - `regional`: per-region mean fish stock
//! - `timeline`: per-time-bucket counts
//! - `insights`: status tallies and the critical-alert headline
//! - `summary`: collection-wide means and threshold breaches
//!
//! None of them keep state between calls; selection parameters (time bucket,
//! granularity) are always passed in explicitly.

pub mod heatmap;
pub mod regional;
pub mod timeline;
pub mod insights;
pub mod summary;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::advisory::AdvisoryStatus;
use crate::observation::Observation;

pub use heatmap::{aggregate_heatmap, BiodiversityHeatmap, HeatmapCell};
pub use regional::{aggregate_regional_stock, RegionalStock};
pub use timeline::{aggregate_timeline, observations_in_bucket, TimeBucketCount};
pub use insights::{aggregate_insights, CriticalAlert, PolicyInsights};
pub use summary::{summarize, CollectionSummary, ThresholdBreaches};

/// Tally of observations per advisory status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub invasive: usize,
    pub ban: usize,
    pub conserve: usize,
    pub ok: usize,
}

impl StatusCounts {
    pub fn increment(&mut self, status: AdvisoryStatus) {
        match status {
            AdvisoryStatus::Invasive => self.invasive += 1,
            AdvisoryStatus::Ban => self.ban += 1,
            AdvisoryStatus::Conserve => self.conserve += 1,
            AdvisoryStatus::Ok => self.ok += 1,
        }
    }

    pub fn get(&self, status: AdvisoryStatus) -> usize {
        match status {
            AdvisoryStatus::Invasive => self.invasive,
            AdvisoryStatus::Ban => self.ban,
            AdvisoryStatus::Conserve => self.conserve,
            AdvisoryStatus::Ok => self.ok,
        }
    }

    pub fn total(&self) -> usize {
        self.invasive + self.ban + self.conserve + self.ok
    }

    /// Everything that is not `Ok`
    pub fn flagged(&self) -> usize {
        AdvisoryStatus::ALL
            .into_iter()
            .filter(|status| status.is_flagged())
            .map(|status| self.get(status))
            .sum()
    }
}

/// Width of a time bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketGranularity {
    Day,
    #[default]
    Month,
}

impl BucketGranularity {
    /// Truncate a date to the start of its bucket
    pub fn truncate(self, date: NaiveDate) -> NaiveDate {
        match self {
            BucketGranularity::Day => date,
            // Day 1 exists in every month
            BucketGranularity::Month => date.with_day(1).unwrap_or(date),
        }
    }

    /// "YYYY-MM-DD" or "YYYY-MM"
    pub fn label(self, date: NaiveDate) -> String {
        match self {
            BucketGranularity::Day => date.format("%Y-%m-%d").to_string(),
            BucketGranularity::Month => date.format("%Y-%m").to_string(),
        }
    }
}

impl std::str::FromStr for BucketGranularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" => Ok(BucketGranularity::Day),
            "month" | "monthly" => Ok(BucketGranularity::Month),
            other => Err(format!("Unknown time bucket: {}", other)),
        }
    }
}

/// Every dashboard view computed from one snapshot
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView<'a> {
    pub summary: CollectionSummary,
    pub insights: PolicyInsights<'a>,
    pub regional_stock: Vec<RegionalStock>,
    pub heatmap: BiodiversityHeatmap,
    pub timeline: Vec<TimeBucketCount>,
}

/// Run all pipelines over the same snapshot
pub fn build_dashboard(observations: &[Observation], granularity: BucketGranularity) -> DashboardView<'_> {
    tracing::debug!(
        "Aggregating {} observations ({:?} buckets)",
        observations.len(),
        granularity
    );

    DashboardView {
        summary: summarize(observations),
        insights: aggregate_insights(observations),
        regional_stock: aggregate_regional_stock(observations),
        heatmap: aggregate_heatmap(observations),
        timeline: aggregate_timeline(observations, granularity),
    }
}
