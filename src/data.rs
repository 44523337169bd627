//! Data Loading
//!
//! Reads observation datasets (CSV or Parquet) with Polars, validates the
//! required columns, and coerces every row into an [`Observation`].
//! Rows that cannot be coerced are skipped and reported, never guessed.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{AdvisoryError, AdvisoryResult};
use crate::observation::{coerce_number, InvasiveFlag, Observation};
use crate::utils::{normalize_species, BoundingBox, GeoPoint, SpeciesInput};

/// Columns every dataset must provide
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "date",
    "lat",
    "lon",
    "region",
    "sea_temperature",
    "salinity",
    "fish_stock_index",
    "biodiversity_index",
    "eDNA_detected_species",
    "invasive_species_flag",
];

/// Region names kept by the northern Indian Ocean focus
pub const INDIAN_OCEAN_REGIONS: [&str; 6] = [
    "Bay of Bengal",
    "Arabian Sea",
    "Laccadive Sea",
    "Indian Ocean",
    "Andaman Sea",
    "Persian Gulf",
];

/// Region allow-list plus bounding box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionFilter {
    pub regions: Vec<String>,
    pub bounds: BoundingBox,
}

impl RegionFilter {
    /// Northern Indian Ocean: named regions inside lat 0..30, lon 50..100
    pub fn northern_indian_ocean() -> Self {
        Self {
            regions: INDIAN_OCEAN_REGIONS.iter().map(|r| r.to_string()).collect(),
            bounds: BoundingBox {
                lat_min: 0.0,
                lat_max: 30.0,
                lon_min: 50.0,
                lon_max: 100.0,
            },
        }
    }

    pub fn matches(&self, obs: &Observation) -> bool {
        self.regions.iter().any(|r| r == &obs.region) && self.bounds.contains(obs.location())
    }

    pub fn apply(&self, observations: Vec<Observation>) -> Vec<Observation> {
        observations.into_iter().filter(|obs| self.matches(obs)).collect()
    }
}

/// A row that was skipped during loading
#[derive(Debug, Clone, PartialEq)]
pub struct RowRejection {
    pub row: usize,
    pub error: AdvisoryError,
}

/// Loaded observation snapshot
#[derive(Debug, Clone, Default)]
pub struct ObservationData {
    pub observations: Vec<Observation>,
    pub rejected: Vec<RowRejection>,
}

impl ObservationData {
    /// Load a dataset from disk, optionally restricted to a region filter
    pub fn load(path: &Path, filter: Option<&RegionFilter>) -> Result<Self> {
        tracing::info!("Loading observations from {:?}", path);

        let df = read_frame(path)?;
        let mut data = Self::from_frame(&df)
            .with_context(|| format!("Failed to read observations from {:?}", path))?;

        if let Some(filter) = filter {
            let before = data.observations.len();
            data.observations = filter.apply(data.observations);
            tracing::info!(
                "Region filter kept {} of {} observations",
                data.observations.len(),
                before
            );
        }

        tracing::info!(
            "  Observations: {} (rejected rows: {})",
            data.observations.len(),
            data.rejected.len()
        );

        Ok(data)
    }

    /// Coerce an in-memory frame into observations
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        validate_columns(df)?;

        let date = df.column("date")?.cast(&DataType::String)?;
        let region = df.column("region")?.cast(&DataType::String)?;
        let invasive = df.column("invasive_species_flag")?.cast(&DataType::String)?;

        // Species arrive either as a list column (Parquet) or comma-separated text (CSV)
        let species_raw = df.column("eDNA_detected_species")?;
        let species_text;
        let species = match species_raw.list() {
            Ok(list) => SpeciesColumn::List(list),
            Err(_) => {
                species_text = species_raw.cast(&DataType::String)?;
                SpeciesColumn::Delimited(species_text.str()?)
            }
        };

        let columns = RawColumns {
            date: date.str()?,
            lat: NumericColumn::from_column(df.column("lat")?)?,
            lon: NumericColumn::from_column(df.column("lon")?)?,
            region: region.str()?,
            temperature: NumericColumn::from_column(df.column("sea_temperature")?)?,
            salinity: NumericColumn::from_column(df.column("salinity")?)?,
            stock: NumericColumn::from_column(df.column("fish_stock_index")?)?,
            biodiversity: NumericColumn::from_column(df.column("biodiversity_index")?)?,
            invasive: invasive.str()?,
            species,
        };

        let mut data = ObservationData::default();
        for idx in 0..df.height() {
            match columns.observation(idx) {
                Ok(obs) => data.observations.push(obs),
                Err(error) => {
                    tracing::warn!("Skipping row: {}", error);
                    data.rejected.push(RowRejection { row: idx, error });
                }
            }
        }

        Ok(data)
    }
}

/// Report every missing required column at once
pub fn validate_columns(df: &DataFrame) -> AdvisoryResult<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| df.column(name).is_err())
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AdvisoryError::MissingColumns(missing))
    }
}

fn read_frame(path: &Path) -> Result<DataFrame> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("csv") => CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
            .finish()
            .with_context(|| format!("Failed to load observations CSV: {:?}", path)),
        Some("parquet") => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to scan parquet: {:?}", path))?
            .collect()
            .with_context(|| format!("Failed to load observations parquet: {:?}", path)),
        _ => Err(AdvisoryError::UnsupportedFormat(path.display().to_string()).into()),
    }
}

/// Accepts ISO dates (optionally with a time part) and DD-MM-YYYY
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let head = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(head, "%d-%m-%Y"))
        .ok()
}

/// Numeric field as read from the frame
///
/// Text cells (mixed CSV columns) go through [`coerce_number`]; typed
/// columns only drop non-finite values.
enum NumericColumn {
    Float(Float64Chunked),
    Text(StringChunked),
}

impl NumericColumn {
    fn from_column(column: &Column) -> PolarsResult<Self> {
        match column.dtype() {
            DataType::String => Ok(NumericColumn::Text(column.str()?.clone())),
            _ => {
                let cast = column.cast(&DataType::Float64)?;
                Ok(NumericColumn::Float(cast.f64()?.clone()))
            }
        }
    }

    fn get(&self, idx: usize) -> Option<f64> {
        match self {
            NumericColumn::Float(values) => values.get(idx).filter(|v| v.is_finite()),
            NumericColumn::Text(values) => coerce_number(values.get(idx)),
        }
    }
}

enum SpeciesColumn<'a> {
    List(&'a ListChunked),
    Delimited(&'a StringChunked),
}

impl SpeciesColumn<'_> {
    fn input(&self, idx: usize) -> SpeciesInput {
        match self {
            SpeciesColumn::List(list) => list
                .get_as_series(idx)
                .and_then(|series| {
                    series.str().ok().map(|names| {
                        names.into_iter().flatten().map(str::to_string).collect::<Vec<_>>()
                    })
                })
                .map_or(SpeciesInput::Missing, SpeciesInput::List),
            SpeciesColumn::Delimited(text) => SpeciesInput::from(text.get(idx)),
        }
    }
}

struct RawColumns<'a> {
    date: &'a StringChunked,
    lat: NumericColumn,
    lon: NumericColumn,
    region: &'a StringChunked,
    temperature: NumericColumn,
    salinity: NumericColumn,
    stock: NumericColumn,
    biodiversity: NumericColumn,
    invasive: &'a StringChunked,
    species: SpeciesColumn<'a>,
}

impl RawColumns<'_> {
    fn required(&self, col: &NumericColumn, idx: usize, field: &'static str) -> AdvisoryResult<f64> {
        col.get(idx).ok_or_else(|| AdvisoryError::InvalidField {
                row: idx,
                field,
                reason: "missing or non-numeric".to_string(),
            })
    }

    fn observation(&self, idx: usize) -> AdvisoryResult<Observation> {
        let raw_date = self.date.get(idx).unwrap_or_default();
        let timestamp = parse_date(raw_date).ok_or_else(|| AdvisoryError::InvalidField {
            row: idx,
            field: "date",
            reason: format!("unrecognised date '{}'", raw_date),
        })?;

        let region = self
            .region
            .get(idx)
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| AdvisoryError::InvalidField {
                row: idx,
                field: "region",
                reason: "missing region".to_string(),
            })?;

        let location = GeoPoint::new(
            self.required(&self.lat, idx, "lat")?,
            self.required(&self.lon, idx, "lon")?,
        );

        Ok(Observation {
            timestamp,
            latitude: location.latitude,
            longitude: location.longitude,
            region: region.to_string(),
            sea_temperature: self.required(&self.temperature, idx, "sea_temperature")?,
            salinity: self.required(&self.salinity, idx, "salinity")?,
            fish_stock_index: self.stock.get(idx),
            biodiversity_index: self.required(&self.biodiversity, idx, "biodiversity_index")?,
            detected_species: normalize_species(&self.species.input(idx)),
            invasive_flag: InvasiveFlag::new(self.invasive.get(idx).unwrap_or_default()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        df!(
            "date" => &["2025-01-03", "2025-02-14", "not-a-date", "16-06-2022"],
            "lat" => &[15.2, 18.0, 10.0, 12.1],
            "lon" => &[87.1, 64.0, 72.0, 97.3],
            "region" => &["Bay of Bengal", "Arabian Sea", "Laccadive Sea", "Andaman Sea"],
            "sea_temperature" => &[27.5, 24.0, 26.0, 28.1],
            "salinity" => &[33.2, 35.9, 34.4, 32.8],
            "fish_stock_index" => &["25.5", "n/a", "60", "48"],
            "biodiversity_index" => &["61.0", "38.5", "70", "bad"],
            "eDNA_detected_species" => &["Tuna, Mackerel", "", "Cod", "Snapper"],
            "invasive_species_flag" => &["no", "YES", "no", "no"]
        )
        .unwrap()
    }

    #[test]
    fn test_from_frame_coerces_rows() {
        let data = ObservationData::from_frame(&sample_frame()).unwrap();

        assert_eq!(data.observations.len(), 2);
        let first = &data.observations[0];
        assert_eq!(first.region, "Bay of Bengal");
        assert_eq!(first.fish_stock_index, Some(25.5));
        assert_eq!(first.detected_species.as_slice(), ["Tuna", "Mackerel"]);

        // Malformed stock reads as missing, not zero
        let second = &data.observations[1];
        assert_eq!(second.fish_stock_index, None);
        assert!(second.invasive_flag.is_set());
        assert!(second.detected_species.is_empty());
    }

    #[test]
    fn test_rejected_rows_are_reported() {
        let data = ObservationData::from_frame(&sample_frame()).unwrap();

        let rejected: Vec<(usize, &'static str)> = data
            .rejected
            .iter()
            .map(|r| match &r.error {
                AdvisoryError::InvalidField { row, field, .. } => (*row, *field),
                other => panic!("unexpected error {:?}", other),
            })
            .collect();
        assert_eq!(rejected, vec![(2, "date"), (3, "biodiversity_index")]);
    }

    #[test]
    fn test_text_cells_use_numeric_coercion() {
        let df = df!(
            "date" => &["2025-01-03", "2025-01-04", "2025-01-05", "2025-01-06"],
            "lat" => &[15.2, 15.3, 15.4, 15.5],
            "lon" => &[87.1, 87.2, 87.3, 87.4],
            "region" => &["Bay of Bengal", "Bay of Bengal", "Bay of Bengal", "Bay of Bengal"],
            "sea_temperature" => &[27.5, 27.5, 27.5, 27.5],
            "salinity" => &[33.2, 33.2, 33.2, 33.2],
            "fish_stock_index" => &["inf", "NaN", " 42 ", "12"],
            "biodiversity_index" => &[" 42 ", "61", "55", "NaN"],
            "eDNA_detected_species" => &["", "", "", ""],
            "invasive_species_flag" => &["no", "no", "no", "no"]
        )
        .unwrap();

        let data = ObservationData::from_frame(&df).unwrap();

        let stocks: Vec<Option<f64>> = data.observations.iter().map(|o| o.fish_stock_index).collect();
        assert_eq!(stocks, vec![None, None, Some(42.0)]);
        assert_eq!(data.observations[0].biodiversity_index, 42.0);

        // Non-finite biodiversity is rejected rather than classified
        assert_eq!(data.rejected.len(), 1);
        assert_eq!(data.rejected[0].row, 3);
    }

    #[test]
    fn test_list_species_column() {
        let mut df = df!(
            "date" => &["2025-01-03", "2025-01-04"],
            "lat" => &[15.2, 12.1],
            "lon" => &[87.1, 97.3],
            "region" => &["Bay of Bengal", "Andaman Sea"],
            "sea_temperature" => &[27.5, 28.1],
            "salinity" => &[33.2, 32.8],
            "fish_stock_index" => &[55.0, 48.0],
            "biodiversity_index" => &[61.0, 52.0],
            "invasive_species_flag" => &["no", "yes"]
        )
        .unwrap();
        let species = Series::new(
            "eDNA_detected_species".into(),
            &[
                Series::new("".into(), &["Tuna", "Cod"]),
                Series::new("".into(), &["Snapper"]),
            ],
        );
        df.with_column(species).unwrap();

        let data = ObservationData::from_frame(&df).unwrap();

        assert!(data.rejected.is_empty());
        assert_eq!(data.observations[0].detected_species.as_slice(), ["Tuna", "Cod"]);
        assert_eq!(data.observations[1].detected_species.as_slice(), ["Snapper"]);
    }

    #[test]
    fn test_region_names_are_not_trimmed() {
        let df = df!(
            "date" => &["2025-01-03", "2025-01-04"],
            "lat" => &[15.2, 15.3],
            "lon" => &[87.1, 87.2],
            "region" => &[" Bay of Bengal", "   "],
            "sea_temperature" => &[27.5, 27.5],
            "salinity" => &[33.2, 33.2],
            "fish_stock_index" => &[55.0, 55.0],
            "biodiversity_index" => &[61.0, 61.0],
            "eDNA_detected_species" => &["", ""],
            "invasive_species_flag" => &["no", "no"]
        )
        .unwrap();

        let data = ObservationData::from_frame(&df).unwrap();

        assert_eq!(data.observations.len(), 1);
        assert_eq!(data.observations[0].region, " Bay of Bengal");
        assert_eq!(data.rejected[0].row, 1);

        // Exact name match, so padded names fall outside the allow-list
        let kept = RegionFilter::northern_indian_ocean().apply(data.observations);
        assert!(kept.is_empty());
    }

    #[test]
    fn test_missing_columns() {
        let df = df!(
            "date" => &["2025-01-03"],
            "region" => &["Bay of Bengal"]
        )
        .unwrap();

        match validate_columns(&df) {
            Err(AdvisoryError::MissingColumns(missing)) => {
                assert_eq!(missing.len(), 8);
                assert_eq!(missing[0], "lat");
                assert!(missing.contains(&"invasive_species_flag".to_string()));
            }
            other => panic!("expected missing columns, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2025-03-09"), NaiveDate::from_ymd_opt(2025, 3, 9));
        assert_eq!(parse_date("2025-03-09 12:30:00"), NaiveDate::from_ymd_opt(2025, 3, 9));
        assert_eq!(parse_date("16-06-2022"), NaiveDate::from_ymd_opt(2022, 6, 16));
        assert_eq!(parse_date("June 2022"), None);
    }

    #[test]
    fn test_region_filter() {
        let filter = RegionFilter::northern_indian_ocean();
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        let inside = Observation::new(date, GeoPoint::new(15.0, 87.0), "Bay of Bengal", 50.0);
        let outside_box = Observation::new(date, GeoPoint::new(-5.0, 80.0), "Indian Ocean", 50.0);
        let other_region = Observation::new(date, GeoPoint::new(12.0, 80.0), "South China Sea", 50.0);

        let kept = filter.apply(vec![inside.clone(), outside_box, other_region]);
        assert_eq!(kept, vec![inside]);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = read_frame(Path::new("observations.xlsx")).unwrap_err();
        assert!(err.to_string().contains("Unsupported dataset format"));
    }
}
