//! Biodiversity heatmap (region × month)
//!
//! Mean biodiversity index per (region, calendar month). Regions keep their
//! order of first appearance; months are ascending. Empty cells are an
//! explicit `NoData` marker and are never filled in.

use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::aggregation::BucketGranularity;
use crate::observation::Observation;

/// One grid cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeatmapCell {
    Mean { value: f64, count: usize },
    NoData,
}

impl HeatmapCell {
    pub fn value(&self) -> Option<f64> {
        match self {
            HeatmapCell::Mean { value, .. } => Some(*value),
            HeatmapCell::NoData => None,
        }
    }

    /// "57.3" or "N/A"
    pub fn display(&self) -> String {
        self.value()
            .map_or_else(|| "N/A".to_string(), |v| format!("{:.1}", v))
    }
}

/// Dense regions × months grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiodiversityHeatmap {
    pub regions: Vec<String>,
    /// "YYYY-MM" labels, ascending
    pub months: Vec<String>,
    /// `grid[region_idx][month_idx]`
    pub grid: Vec<Vec<HeatmapCell>>,
}

impl BiodiversityHeatmap {
    pub fn cell(&self, region: &str, month: &str) -> Option<HeatmapCell> {
        let row = self.regions.iter().position(|r| r == region)?;
        let col = self.months.iter().position(|m| m == month)?;
        Some(self.grid[row][col])
    }
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

/// Group by (region, month) and average the biodiversity index
pub fn aggregate_heatmap(observations: &[Observation]) -> BiodiversityHeatmap {
    let month = BucketGranularity::Month;

    let mut regions: Vec<String> = Vec::new();
    let mut region_index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut months: Vec<NaiveDate> = Vec::new();
    let mut cells: FxHashMap<(usize, NaiveDate), Accumulator> = FxHashMap::default();

    for obs in observations {
        let row = *region_index.entry(obs.region.as_str()).or_insert_with(|| {
            regions.push(obs.region.clone());
            regions.len() - 1
        });
        let bucket = month.truncate(obs.timestamp);
        if !months.contains(&bucket) {
            months.push(bucket);
        }

        let acc = cells.entry((row, bucket)).or_default();
        acc.sum += obs.biodiversity_index;
        acc.count += 1;
    }

    months.sort_unstable();

    let grid = (0..regions.len())
        .map(|row| {
            months
                .iter()
                .map(|bucket| match cells.get(&(row, *bucket)) {
                    Some(acc) if acc.count > 0 => HeatmapCell::Mean {
                        value: acc.sum / acc.count as f64,
                        count: acc.count,
                    },
                    _ => HeatmapCell::NoData,
                })
                .collect()
        })
        .collect();

    BiodiversityHeatmap {
        regions,
        months: months.into_iter().map(|m| month.label(m)).collect(),
        grid,
    }
}
