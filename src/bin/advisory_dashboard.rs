// Advisory dashboard binary
//
// Loads an observation dataset, runs every aggregation pipeline plus the
// compass lookup, and prints the result.
// Usage: DATA_PATH=data/obs.csv OUTPUT_FORMAT=markdown cargo run --bin advisory_dashboard

use fishery_advisory::{
    build_dashboard, compass_reading, AdvisoryConfig, AdvisoryError, JsonFormatter,
    MarkdownFormatter, ObservationData, OutputFormat,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fishery_advisory=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AdvisoryConfig::from_env();
    tracing::info!("Configuration:");
    tracing::info!("  DATA_PATH: {:?}", config.data_path);
    tracing::info!(
        "  REFERENCE: ({}, {})",
        config.reference.latitude,
        config.reference.longitude
    );
    tracing::info!("  TIME_BUCKET: {:?}", config.time_bucket);
    tracing::info!("  REGION_FILTER: {}", config.region_filter.is_some());

    let data = ObservationData::load(&config.data_path, config.region_filter.as_ref())?;
    let observations = &data.observations;

    let view = build_dashboard(observations, config.time_bucket);
    let reading = match compass_reading(config.reference, observations) {
        Ok(reading) => Some(reading),
        Err(AdvisoryError::EmptyInput) => {
            tracing::warn!("No observations left after filtering; compass unavailable");
            None
        }
        Err(e) => return Err(e.into()),
    };

    match config.output_format {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "dashboard": view,
                "compass": reading,
            });
            println!("{}", JsonFormatter::format(&payload)?);
        }
        OutputFormat::Markdown => {
            println!("{}", MarkdownFormatter::format_dashboard(&view, reading.as_ref()));
        }
        OutputFormat::Text => {
            println!("{}", view.insights.message());
            println!(
                "Restricted: {} | Conservation: {} | Invasive: {} | Total: {}",
                view.insights.counts.ban,
                view.insights.counts.conserve,
                view.insights.counts.invasive,
                view.insights.total
            );
            if let Some(reading) = &reading {
                println!(
                    "{} - nearest: {} ({:.1} km)",
                    reading.verdict.headline,
                    reading.nearest.observation.region,
                    reading.nearest.distance_km
                );
            }
        }
    }

    Ok(())
}
