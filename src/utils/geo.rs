//! Geospatial helpers
//!
//! Great-circle (haversine) distance on a spherical Earth. Inputs are
//! signed decimal degrees; trig runs through `libm`.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used for all distances (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// Haversine distance between two points in kilometres
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let sin_lat = libm::sin(d_lat / 2.0);
    let sin_lon = libm::sin(d_lon / 2.0);
    let h = sin_lat * sin_lat + libm::cos(lat1) * libm::cos(lat2) * sin_lon * sin_lon;

    // Rounding can push h marginally above 1 for antipodal points; NaN passes through
    2.0 * EARTH_RADIUS_KM * libm::asin(libm::sqrt(h.clamp(0.0, 1.0)))
}

/// Inclusive latitude/longitude rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    pub fn contains(&self, point: GeoPoint) -> bool {
        point.latitude >= self.lat_min
            && point.latitude <= self.lat_max
            && point.longitude >= self.lon_min
            && point.longitude <= self.lon_max
    }
}
