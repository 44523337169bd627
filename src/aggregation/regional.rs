//! Regional stock aggregation
//!
//! Mean fish stock index per region, regions in order of first appearance.
//! Rows without a stock index still count towards `observation_count` but
//! are left out of the mean.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::observation::Observation;

/// Average stock for one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalStock {
    pub region: String,
    /// `None` only if no row in the region carried a stock index
    pub mean_fish_stock_index: Option<f64>,
    pub observation_count: usize,
    pub stocked_count: usize,
}

pub fn aggregate_regional_stock(observations: &[Observation]) -> Vec<RegionalStock> {
    let mut order: Vec<&str> = Vec::new();
    let mut sums: FxHashMap<&str, (f64, usize, usize)> = FxHashMap::default();

    for obs in observations {
        let entry = sums.entry(obs.region.as_str()).or_insert_with(|| {
            order.push(obs.region.as_str());
            (0.0, 0, 0)
        });
        entry.1 += 1;
        if let Some(stock) = obs.fish_stock_index {
            entry.0 += stock;
            entry.2 += 1;
        }
    }

    order
        .into_iter()
        .map(|region| {
            let (sum, total, stocked) = sums[region];
            RegionalStock {
                region: region.to_string(),
                mean_fish_stock_index: (stocked > 0).then(|| sum / stocked as f64),
                observation_count: total,
                stocked_count: stocked,
            }
        })
        .collect()
}
