//! Fisherman's compass
//!
//! Finds the monitored location closest to a reference point (typically the
//! current map centre) and turns its advisory status into field guidance.
//! Linear scan; recomputed on every reference change.

use serde::Serialize;

use crate::advisory::{classify, AdvisoryStatus};
use crate::error::{AdvisoryError, AdvisoryResult};
use crate::observation::Observation;
use crate::utils::{haversine_km, GeoPoint};

/// Closest observation to a reference point
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NearestResult<'a> {
    pub observation: &'a Observation,
    pub distance_km: f64,
    pub status: AdvisoryStatus,
}

/// Minimum great-circle distance observation
///
/// Exact ties keep the first observation in input order. Rows whose
/// coordinates are not finite are never selected.
pub fn nearest(reference: GeoPoint, observations: &[Observation]) -> AdvisoryResult<NearestResult<'_>> {
    if !reference.is_finite() {
        return Err(AdvisoryError::NonFiniteReference {
            latitude: reference.latitude,
            longitude: reference.longitude,
        });
    }

    let mut best: Option<(&Observation, f64)> = None;
    for obs in observations {
        let distance = haversine_km(reference, obs.location());
        if distance.is_nan() {
            continue;
        }
        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((obs, distance));
        }
    }

    let (observation, distance_km) = best.ok_or(AdvisoryError::EmptyInput)?;
    Ok(NearestResult {
        observation,
        distance_km,
        status: classify(observation),
    })
}

// ============================================================================
// Field verdict
// ============================================================================

/// Three-tier field guidance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictTier {
    Safe,
    Caution,
    Stop,
}

impl VerdictTier {
    /// Badge text on the compass dial
    pub fn badge(self) -> &'static str {
        match self {
            VerdictTier::Safe => "SAFE",
            VerdictTier::Caution => "CAUTION",
            VerdictTier::Stop => "STOP",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldVerdict {
    pub tier: VerdictTier,
    pub headline: &'static str,
    pub description: &'static str,
}

pub fn field_verdict(status: AdvisoryStatus) -> FieldVerdict {
    match status {
        AdvisoryStatus::Invasive => FieldVerdict {
            tier: VerdictTier::Stop,
            headline: "AVOID THIS ZONE",
            description: "Elevated ecological risk and low expected return.",
        },
        AdvisoryStatus::Ban => FieldVerdict {
            tier: VerdictTier::Stop,
            headline: "AVOID THIS ZONE",
            description: "Restricted zone. Policy intervention recommended.",
        },
        AdvisoryStatus::Conserve => FieldVerdict {
            tier: VerdictTier::Caution,
            headline: "PROCEED WITH CAUTION",
            description: "Conservation priority area. Returns may be limited.",
        },
        AdvisoryStatus::Ok => FieldVerdict {
            tier: VerdictTier::Safe,
            headline: "FISH HERE SAFELY",
            description: "Favourable conditions for sustainable operations.",
        },
    }
}

/// Nearest location plus the verdict derived from it
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CompassReading<'a> {
    pub reference: GeoPoint,
    pub nearest: NearestResult<'a>,
    pub verdict: FieldVerdict,
}

pub fn compass_reading(reference: GeoPoint, observations: &[Observation]) -> AdvisoryResult<CompassReading<'_>> {
    let nearest = nearest(reference, observations)?;
    tracing::debug!(
        "Nearest to ({:.3}, {:.3}): {} at {:.1} km ({})",
        reference.latitude,
        reference.longitude,
        nearest.observation.region,
        nearest.distance_km,
        nearest.status
    );

    Ok(CompassReading {
        reference,
        nearest,
        verdict: field_verdict(nearest.status),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn obs(region: &str, lat: f64, lon: f64) -> Observation {
        Observation::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            GeoPoint::new(lat, lon),
            region,
            70.0,
        )
        .with_fish_stock(80.0)
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let err = nearest(GeoPoint::new(0.0, 0.0), &[]).unwrap_err();
        assert_eq!(err, AdvisoryError::EmptyInput);
    }

    #[test]
    fn test_first_listed_wins_ties() {
        let rows = vec![obs("East", 0.0, 1.0), obs("North", 1.0, 0.0)];
        let result = nearest(GeoPoint::new(0.0, 0.0), &rows).unwrap();
        assert_eq!(result.observation.region, "East");
        assert_relative_eq!(result.distance_km, 111.195, epsilon = 0.001);

        let reversed = vec![obs("North", 1.0, 0.0), obs("East", 0.0, 1.0)];
        let result = nearest(GeoPoint::new(0.0, 0.0), &reversed).unwrap();
        assert_eq!(result.observation.region, "North");
    }

    #[test]
    fn test_non_finite_reference_is_rejected() {
        let rows = vec![obs("Bay of Bengal", 15.0, 87.0)];
        let err = nearest(GeoPoint::new(f64::NAN, 80.0), &rows).unwrap_err();
        assert!(matches!(err, AdvisoryError::NonFiniteReference { .. }));
    }

    #[test]
    fn test_nan_row_never_selected() {
        let rows = vec![obs("Broken", f64::NAN, 87.0), obs("Arabian Sea", 18.0, 64.0)];
        let result = nearest(GeoPoint::new(15.0, 80.0), &rows).unwrap();
        assert_eq!(result.observation.region, "Arabian Sea");

        let only_broken = vec![obs("Broken", f64::NAN, 87.0)];
        assert_eq!(
            nearest(GeoPoint::new(15.0, 80.0), &only_broken).unwrap_err(),
            AdvisoryError::EmptyInput
        );
    }

    #[test]
    fn test_picks_minimum_distance() {
        let rows = vec![
            obs("Persian Gulf", 25.0, 54.0),
            obs("Bay of Bengal", 15.0, 87.0),
            obs("Arabian Sea", 18.0, 64.0),
        ];
        let result = nearest(GeoPoint::new(15.0, 80.0), &rows).unwrap();
        assert_eq!(result.observation.region, "Bay of Bengal");
        assert_eq!(result.status, AdvisoryStatus::Ok);
    }

    #[test]
    fn test_verdict_tiers() {
        assert_eq!(field_verdict(AdvisoryStatus::Ok).headline, "FISH HERE SAFELY");
        assert_eq!(field_verdict(AdvisoryStatus::Conserve).tier, VerdictTier::Caution);
        assert_eq!(field_verdict(AdvisoryStatus::Ban).headline, "AVOID THIS ZONE");
        assert_eq!(field_verdict(AdvisoryStatus::Invasive).tier.badge(), "STOP");
    }

    #[test]
    fn test_reading_uses_nearest_status() {
        let rows = vec![
            obs("Andaman Sea", 12.0, 97.0).with_invasive_flag("yes"),
            obs("Persian Gulf", 25.0, 54.0),
        ];
        let reading = compass_reading(GeoPoint::new(11.0, 95.0), &rows).unwrap();
        assert_eq!(reading.nearest.status, AdvisoryStatus::Invasive);
        assert_eq!(reading.verdict.tier, VerdictTier::Stop);
    }
}
