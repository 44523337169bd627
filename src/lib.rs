//! Fishery Advisory Engine
//!
//! Policy advisory and aggregation layer for fisheries/ecosystem monitoring
//! data (sea-surface conditions, stock and biodiversity indices, eDNA biota,
//! invasive-species flags).
//!
//! - `advisory/`: Fixed-precedence status classifier and display tables
//! - `aggregation/`: Heatmap, regional stock, time-bucket and insight pipelines
//! - `compass`: Nearest monitored location and field verdict
//! - `report/`: Justification report synthesis and formatters
//! - `data`: Dataset loading with Polars
//!
//! Everything except `data` is pure: same snapshot in, same values out.

pub mod error;
pub mod utils;
pub mod observation;
pub mod advisory;
pub mod aggregation;
pub mod compass;
pub mod report;
pub mod data;
pub mod config;

// Re-export commonly used types
pub use error::{AdvisoryError, AdvisoryResult};
pub use observation::{InvasiveFlag, Observation};
pub use advisory::{classify, AdvisoryStatus, StatusFilter};
pub use aggregation::{build_dashboard, BucketGranularity, DashboardView};
pub use compass::{compass_reading, nearest, CompassReading, FieldVerdict, NearestResult};
pub use report::{AdvisoryReport, JsonFormatter, MarkdownFormatter, PredictionInput, PredictionResult, ReportSynthesizer};
pub use data::{ObservationData, RegionFilter};
pub use config::{AdvisoryConfig, OutputFormat};
pub use utils::{normalize_species, GeoPoint, SpeciesInput};
