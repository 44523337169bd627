use crate::advisory::{label, AdvisoryStatus};
use crate::aggregation::DashboardView;
use crate::compass::CompassReading;
use crate::report::types::AdvisoryReport;

/// Markdown formatter for reports and dashboard views
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Format an advisory report as markdown
    pub fn format_report(report: &AdvisoryReport) -> String {
        let mut md = String::with_capacity(1024);

        md.push_str(&format!("# {}\n\n", report.headline));

        md.push_str("## Justification\n\n");
        for line in &report.justification {
            md.push_str(&format!("- {}\n", line));
        }

        md.push_str("\n## Proactive Recommendation\n\n");
        md.push_str(&format!("{}\n\n", report.recommendation));

        md.push_str("## Species Risk\n\n");
        md.push_str(&format!("{}\n", report.species_risk));

        md
    }

    /// Format the policy dashboard (action center, regional stock, heatmap, timeline)
    pub fn format_dashboard(view: &DashboardView<'_>, compass: Option<&CompassReading<'_>>) -> String {
        let mut md = String::with_capacity(4096);
        let insights = &view.insights;

        md.push_str("# Policy Insights & Action Center\n\n");
        md.push_str(&format!("{}\n\n", insights.message()));

        md.push_str("| Advisory | Locations | Share |\n");
        md.push_str("|----------|-----------|-------|\n");
        md.push_str(&format!(
            "| {} | {} | {}% |\n",
            label(AdvisoryStatus::Ban),
            insights.counts.ban,
            insights.ban_pct
        ));
        md.push_str(&format!(
            "| {} | {} | {}% |\n",
            label(AdvisoryStatus::Conserve),
            insights.counts.conserve,
            insights.conserve_pct
        ));
        md.push_str(&format!(
            "| {} | {} | {}% |\n\n",
            label(AdvisoryStatus::Invasive),
            insights.counts.invasive,
            insights.invasive_pct
        ));
        if !insights.top_invasive_species.is_empty() {
            md.push_str(&format!(
                "*Most frequently detected biota:* {}\n\n",
                insights.top_species_display()
            ));
        }

        if let Some(reading) = compass {
            md.push_str("## Fisherman's Compass\n\n");
            md.push_str(&format!(
                "**{}** [{}] - {}  \n",
                reading.verdict.headline,
                reading.verdict.tier.badge(),
                reading.verdict.description
            ));
            md.push_str(&format!(
                "Nearest monitored location: {} ({:.4}, {:.4}), {:.1} km away\n\n",
                reading.nearest.observation.region,
                reading.nearest.observation.latitude,
                reading.nearest.observation.longitude,
                reading.nearest.distance_km
            ));
        }

        md.push_str("## Fisheries Sustainability Index by Region\n\n");
        md.push_str("| Region | Avg Stock | Locations |\n");
        md.push_str("|--------|-----------|-----------|\n");
        for row in &view.regional_stock {
            let avg = row
                .mean_fish_stock_index
                .map_or_else(|| "N/A".to_string(), |v| format!("{:.1}", v));
            md.push_str(&format!("| {} | {} | {} |\n", row.region, avg, row.observation_count));
        }

        md.push_str("\n## Biodiversity Heatmap (Region x Month)\n\n");
        if view.heatmap.months.is_empty() {
            md.push_str("No observations.\n");
        } else {
            md.push_str("| Region \\ Month |");
            for month in &view.heatmap.months {
                md.push_str(&format!(" {} |", month));
            }
            md.push('\n');
            md.push_str("|---|");
            md.push_str(&"---|".repeat(view.heatmap.months.len()));
            md.push('\n');
            for (region, cells) in view.heatmap.regions.iter().zip(&view.heatmap.grid) {
                md.push_str(&format!("| {} |", region));
                for cell in cells {
                    md.push_str(&format!(" {} |", cell.display()));
                }
                md.push('\n');
            }
        }

        md.push_str("\n## Observations per Time Bucket\n\n");
        md.push_str("| Bucket | Total | Flagged |\n");
        md.push_str("|--------|-------|---------|\n");
        for bucket in &view.timeline {
            md.push_str(&format!(
                "| {} | {} | {:.0}% |\n",
                bucket.bucket,
                bucket.total,
                bucket.flagged_ratio * 100.0
            ));
        }

        md
    }
}
