use crate::advisory::{classify_indicators, AdvisoryStatus, Indicators};
use crate::observation::coerce_stock;
use crate::report::types::{AdvisoryReport, PredictionInput, PredictionResult};

/// Headline phrase per status
fn status_text(status: AdvisoryStatus) -> &'static str {
    match status {
        AdvisoryStatus::Invasive => "HIGH RISK: INVASIVE SPECIES – RAPID RESPONSE",
        AdvisoryStatus::Ban => "RESTRICTED ZONE – POLICY INTERVENTION RECOMMENDED",
        AdvisoryStatus::Conserve => "CONSERVATION PRIORITY – BIODIVERSITY SUPPORT",
        AdvisoryStatus::Ok => "AUTHORIZED OPERATIONS – SUSTAINABLE FISHERIES",
    }
}

/// Extra justification line naming the rule that fired
fn threshold_line(status: AdvisoryStatus) -> Option<&'static str> {
    match status {
        AdvisoryStatus::Ban => Some("This falls below the 30-point threshold for a fishing ban."),
        AdvisoryStatus::Conserve => {
            Some("Biodiversity Index is below 40, triggering a conservation recommendation.")
        }
        AdvisoryStatus::Invasive => {
            Some("Invasive species flag is set, elevating risk regardless of other indicators.")
        }
        AdvisoryStatus::Ok => None,
    }
}

fn recommendation_text(status: AdvisoryStatus) -> &'static str {
    match status {
        AdvisoryStatus::Invasive => "Initiate rapid response protocols: targeted removal operations, heightened surveillance, and temporary activity controls. Notify coastal authorities and fishing cooperatives.",
        AdvisoryStatus::Ban => "Enact a time-bound fishing restriction (e.g., 6 months) to facilitate stock recovery. Implement enforcement patrols and publish guidance to fleets.",
        AdvisoryStatus::Conserve => "Designate a conservation priority zone with selective-gear measures and bycatch mitigation. Increase eDNA sampling frequency and habitat monitoring.",
        AdvisoryStatus::Ok => "Proceed under sustainable quotas with periodic review. Maintain routine eDNA sampling and compliance checks.",
    }
}

/// Report synthesizer
///
/// Deterministic template fill. Status is re-derived from the predicted
/// stock plus the submitted invasive flag and biodiversity index, so the
/// text always agrees with the numbers shown next to it.
pub struct ReportSynthesizer;

impl ReportSynthesizer {
    pub fn synthesize(
        input: &PredictionInput,
        predicted_stock: f64,
        predicted_risk_label: &str,
    ) -> AdvisoryReport {
        let invasive = input.invasive_flag.is_set();
        let status = classify_indicators(&Indicators {
            invasive,
            fish_stock_index: coerce_stock(Some(predicted_stock)),
            biodiversity_index: input.biodiversity_index,
        });

        let headline = format!(
            "Predicted Status for {}: {}.",
            input.region,
            status_text(status)
        );

        let mut justification = vec![
            format!("Fish Stock Index is predicted at {:.1}.", predicted_stock),
            format!(
                "Biodiversity Index provided is {:.1} (risk class: {}).",
                input.biodiversity_index, predicted_risk_label
            ),
            format!(
                "Sea Temperature {:.1}°C and Salinity {:.1} ppt provide the environmental context.",
                input.sea_temperature, input.salinity
            ),
        ];
        if let Some(line) = threshold_line(status) {
            justification.push(line.to_string());
        }

        let species = if input.detected_species.is_empty() {
            "None detected".to_string()
        } else {
            input.detected_species.join(", ")
        };
        let species_risk = if invasive {
            format!("Invasive species risk present. eDNA indicates: {}.", species)
        } else {
            format!("No invasive species flagged. eDNA indicates: {}.", species)
        };

        AdvisoryReport {
            region: input.region.clone(),
            status,
            headline,
            justification,
            recommendation: recommendation_text(status).to_string(),
            species_risk,
        }
    }

    /// Synthesize from a full prediction result
    pub fn from_prediction(input: &PredictionInput, prediction: &PredictionResult) -> AdvisoryReport {
        Self::synthesize(
            input,
            prediction.fish_stock_prediction,
            &prediction.biodiversity_risk_prediction,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::InvasiveFlag;
    use crate::utils::SpeciesList;

    fn input(bio: f64, flag: &str, species: &[&str]) -> PredictionInput {
        PredictionInput {
            region: "X".to_string(),
            sea_temperature: 22.0,
            salinity: 34.0,
            biodiversity_index: bio,
            detected_species: species.iter().map(|s| s.to_string()).collect::<SpeciesList>(),
            invasive_flag: InvasiveFlag::new(flag),
        }
    }

    #[test]
    fn test_low_predicted_stock_bans_before_conserve() {
        let report = ReportSynthesizer::synthesize(&input(35.0, "no", &[]), 25.0, "high");

        assert_eq!(report.status, AdvisoryStatus::Ban);
        assert!(report.headline.contains("RESTRICTED ZONE"));
        assert_eq!(report.justification.len(), 4);
        assert!(report.justification[3].contains("below the 30-point threshold"));
        assert_eq!(report.species_risk, "No invasive species flagged. eDNA indicates: None detected.");
    }

    #[test]
    fn test_invasive_flag_overrides_stock() {
        let report = ReportSynthesizer::synthesize(&input(60.0, "Yes", &["Tuna", "Mackerel"]), 10.0, "low");

        assert_eq!(report.status, AdvisoryStatus::Invasive);
        assert_eq!(
            report.headline,
            "Predicted Status for X: HIGH RISK: INVASIVE SPECIES – RAPID RESPONSE."
        );
        assert_eq!(
            report.species_risk,
            "Invasive species risk present. eDNA indicates: Tuna, Mackerel."
        );
        assert!(report.recommendation.starts_with("Initiate rapid response protocols"));
    }

    #[test]
    fn test_ok_status_has_three_justification_lines() {
        let report = ReportSynthesizer::synthesize(&input(60.0, "no", &["Tuna"]), 72.34, "low");

        assert_eq!(report.status, AdvisoryStatus::Ok);
        assert_eq!(
            report.justification,
            vec![
                "Fish Stock Index is predicted at 72.3.",
                "Biodiversity Index provided is 60.0 (risk class: low).",
                "Sea Temperature 22.0°C and Salinity 34.0 ppt provide the environmental context.",
            ]
        );
    }

    #[test]
    fn test_conserve_line() {
        let report = ReportSynthesizer::synthesize(&input(35.0, "no", &[]), 55.0, "medium");
        assert_eq!(report.status, AdvisoryStatus::Conserve);
        assert_eq!(
            report.justification.last().unwrap(),
            "Biodiversity Index is below 40, triggering a conservation recommendation."
        );
    }

    #[test]
    fn test_collaborator_label_is_not_trusted() {
        let prediction = PredictionResult {
            fish_stock_prediction: 80.0,
            biodiversity_risk_prediction: "high".to_string(),
            recommendation: "Fishing ban".to_string(),
        };
        let report = ReportSynthesizer::from_prediction(&input(75.0, "no", &[]), &prediction);
        assert_eq!(report.status, AdvisoryStatus::Ok);
        assert!(report.justification[1].contains("risk class: high"));
    }

    #[test]
    fn test_plain_text_layout() {
        let report = ReportSynthesizer::synthesize(&input(35.0, "no", &["Cod"]), 25.0, "high");
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Predicted Status for X: RESTRICTED ZONE – POLICY INTERVENTION RECOMMENDED.");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Justification:");
        assert_eq!(lines[3], "- Fish Stock Index is predicted at 25.0.");
        assert_eq!(lines[6], "- This falls below the 30-point threshold for a fishing ban.");
        assert_eq!(lines[8], "Proactive Recommendation:");
        assert_eq!(lines[11], "Species Risk:");
        assert_eq!(lines[12], "No invasive species flagged. eDNA indicates: Cod.");
        assert_eq!(lines.len(), 13);
    }
}
