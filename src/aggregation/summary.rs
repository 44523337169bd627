//! Collection summary
//!
//! Headline numbers for an observation snapshot. `counts` uses the advisory
//! precedence (each row counted once); `breaches` counts every threshold a
//! row crosses independently, so one row can appear in several columns.

use serde::{Deserialize, Serialize};

use crate::advisory::{classify, is_low_biodiversity, is_low_stock};
use crate::aggregation::StatusCounts;
use crate::observation::Observation;

/// Independent threshold crossings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdBreaches {
    pub low_stock: usize,
    pub low_biodiversity: usize,
    pub invasive_flagged: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub count: usize,
    /// Mean over rows that carry a stock index
    pub mean_fish_stock_index: Option<f64>,
    pub mean_biodiversity_index: Option<f64>,
    pub counts: StatusCounts,
    pub breaches: ThresholdBreaches,
}

pub fn summarize(observations: &[Observation]) -> CollectionSummary {
    let mut counts = StatusCounts::default();
    let mut breaches = ThresholdBreaches::default();
    let (mut stock_sum, mut stock_n) = (0.0, 0usize);
    let mut bio_sum = 0.0;

    for obs in observations {
        counts.increment(classify(obs));

        if let Some(stock) = obs.fish_stock_index {
            stock_sum += stock;
            stock_n += 1;
        }
        if is_low_stock(obs.fish_stock_index) {
            breaches.low_stock += 1;
        }
        bio_sum += obs.biodiversity_index;
        if is_low_biodiversity(obs.biodiversity_index) {
            breaches.low_biodiversity += 1;
        }
        if obs.invasive_flag.is_set() {
            breaches.invasive_flagged += 1;
        }
    }

    let count = observations.len();
    CollectionSummary {
        count,
        mean_fish_stock_index: (stock_n > 0).then(|| stock_sum / stock_n as f64),
        mean_biodiversity_index: (count > 0).then(|| bio_sum / count as f64),
        counts,
        breaches,
    }
}
