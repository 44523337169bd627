//! Runtime configuration
//!
//! Read from environment variables by the dashboard binary. Unparseable
//! values fall back to the defaults with a warning rather than aborting.

use std::path::PathBuf;
use std::str::FromStr;

use crate::aggregation::BucketGranularity;
use crate::data::RegionFilter;
use crate::utils::GeoPoint;

/// Default dataset location (relative to the working directory)
pub const DEFAULT_DATA_PATH: &str = "data/synthetic_ocean_data.csv";

/// Compass start point (northern Indian Ocean)
pub const DEFAULT_REFERENCE: GeoPoint = GeoPoint { latitude: 15.0, longitude: 80.0 };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Text,
    #[default]
    Markdown,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdvisoryConfig {
    pub data_path: PathBuf,
    pub reference: GeoPoint,
    pub time_bucket: BucketGranularity,
    /// `None` disables region filtering
    pub region_filter: Option<RegionFilter>,
    pub output_format: OutputFormat,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            reference: DEFAULT_REFERENCE,
            time_bucket: BucketGranularity::Month,
            region_filter: Some(RegionFilter::northern_indian_ocean()),
            output_format: OutputFormat::Markdown,
        }
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}, using default", key, value);
            default
        }),
        None => default,
    }
}

impl AdvisoryConfig {
    /// Configuration from process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Configuration from an arbitrary key lookup
    ///
    /// Keys: DATA_PATH, REFERENCE_LAT, REFERENCE_LON, TIME_BUCKET,
    /// REGION_FILTER (`india` | `none`), OUTPUT_FORMAT.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_path = lookup("DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);

        let reference = GeoPoint::new(
            parse_or("REFERENCE_LAT", lookup("REFERENCE_LAT"), DEFAULT_REFERENCE.latitude),
            parse_or("REFERENCE_LON", lookup("REFERENCE_LON"), DEFAULT_REFERENCE.longitude),
        );

        let region_filter = match lookup("REGION_FILTER").as_deref().map(str::trim) {
            None => defaults.region_filter,
            Some(v) if v.eq_ignore_ascii_case("none") || v.eq_ignore_ascii_case("off") => None,
            Some(v) if v.eq_ignore_ascii_case("india") => Some(RegionFilter::northern_indian_ocean()),
            Some(other) => {
                tracing::warn!("Ignoring invalid REGION_FILTER={:?}, using default", other);
                defaults.region_filter
            }
        };

        Self {
            data_path,
            reference,
            time_bucket: parse_or("TIME_BUCKET", lookup("TIME_BUCKET"), defaults.time_bucket),
            region_filter,
            output_format: parse_or("OUTPUT_FORMAT", lookup("OUTPUT_FORMAT"), defaults.output_format),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AdvisoryConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AdvisoryConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, AdvisoryConfig::default());
        assert_eq!(config.reference, GeoPoint::new(15.0, 80.0));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DATA_PATH", "/tmp/obs.parquet"),
            ("REFERENCE_LAT", "12.5"),
            ("TIME_BUCKET", "day"),
            ("REGION_FILTER", "none"),
            ("OUTPUT_FORMAT", "json"),
        ]);
        assert_eq!(config.data_path, PathBuf::from("/tmp/obs.parquet"));
        assert_eq!(config.reference, GeoPoint::new(12.5, 80.0));
        assert_eq!(config.time_bucket, BucketGranularity::Day);
        assert_eq!(config.region_filter, None);
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[("REFERENCE_LON", "east"), ("TIME_BUCKET", "fortnight")]);
        assert_eq!(config.reference.longitude, 80.0);
        assert_eq!(config.time_bucket, BucketGranularity::Month);
    }
}
