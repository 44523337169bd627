//! Advisory report synthesis
//!
//! Turns a prediction result into a structured justification report and
//! renders reports and dashboard views as text, markdown or JSON.

pub mod types;
pub mod generator;
pub mod formatters;

pub use types::{AdvisoryReport, PredictionInput, PredictionResult};
pub use generator::ReportSynthesizer;
pub use formatters::{JsonFormatter, MarkdownFormatter};
