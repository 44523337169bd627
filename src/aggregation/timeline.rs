//! Time-bucket counts
//!
//! Observation counts per day or month bucket with a per-status breakdown.
//! The flagged ratio replaces the dashboard's cosmetic anomaly score with a
//! deterministic share of non-`ok` rows.

use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::advisory::classify;
use crate::aggregation::{BucketGranularity, StatusCounts};
use crate::observation::Observation;

/// Counts for one time bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBucketCount {
    pub bucket: String,
    pub total: usize,
    pub by_status: StatusCounts,
    /// flagged / total
    pub flagged_ratio: f64,
}

/// Tally per bucket, buckets ascending
pub fn aggregate_timeline(
    observations: &[Observation],
    granularity: BucketGranularity,
) -> Vec<TimeBucketCount> {
    let mut buckets: FxHashMap<NaiveDate, StatusCounts> = FxHashMap::default();
    for obs in observations {
        buckets
            .entry(granularity.truncate(obs.timestamp))
            .or_default()
            .increment(classify(obs));
    }

    let mut keys: Vec<NaiveDate> = buckets.keys().copied().collect();
    keys.sort_unstable();

    keys.into_iter()
        .map(|key| {
            let counts = buckets[&key];
            let total = counts.total();
            TimeBucketCount {
                bucket: granularity.label(key),
                total,
                by_status: counts,
                flagged_ratio: counts.flagged() as f64 / total as f64,
            }
        })
        .collect()
}

/// Observations whose timestamp falls in the selected bucket
///
/// `bucket` is a label as produced by [`aggregate_timeline`]; an unknown
/// label selects nothing.
pub fn observations_in_bucket<'a>(
    observations: &'a [Observation],
    granularity: BucketGranularity,
    bucket: &str,
) -> Vec<&'a Observation> {
    observations
        .iter()
        .filter(|obs| granularity.label(obs.timestamp) == bucket)
        .collect()
}
