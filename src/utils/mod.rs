//! Utility modules for the advisory engine
//!
//! Contains shared functionality used across classification and aggregation:
//! - Species: eDNA species list normalization and frequency tallies
//! - Geo: Great-circle distance and bounding boxes

pub mod species;
pub mod geo;

// Re-export commonly used types
pub use species::{normalize_species, SpeciesInput, SpeciesList, SpeciesTally, SpeciesCount};
pub use geo::{haversine_km, BoundingBox, GeoPoint, EARTH_RADIUS_KM};
