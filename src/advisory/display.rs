//! Advisory status display tables
//!
//! Every surface that shows a status (data table cell, map marker, popup,
//! compass verdict) reads its text and styling from here so the wording
//! and colours cannot drift between call sites.

use serde::{Deserialize, Serialize};

use crate::advisory::classify::AdvisoryStatus;

/// Map marker tier (three colours for four statuses)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerTier {
    Red,
    Yellow,
    Green,
}

impl MarkerTier {
    pub fn hex(self) -> &'static str {
        match self {
            MarkerTier::Red => "#b91c1c",
            MarkerTier::Yellow => "#b45309",
            MarkerTier::Green => "#065f46",
        }
    }
}

/// Display metadata for one status
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusDisplay {
    pub status: AdvisoryStatus,
    /// Advisory text shown next to a record
    pub label: &'static str,
    /// Short name used in status pickers
    pub filter_label: &'static str,
    pub color_class: &'static str,
    pub background_class: &'static str,
    pub marker: MarkerTier,
    pub popup_title: &'static str,
    pub popup_benefit: &'static str,
}

// ============================================================================
// EMBEDDED DISPLAY TABLE (precedence order)
// ============================================================================

static STATUS_DISPLAY: [StatusDisplay; 4] = [
    StatusDisplay {
        status: AdvisoryStatus::Invasive,
        label: "INVASIVE SPECIES RISK: Rapid Response Advised",
        filter_label: "Invasive Species Risk",
        color_class: "text-red-300",
        background_class: "bg-red-900/30",
        marker: MarkerTier::Red,
        popup_title: "Restricted: Invasive Species Risk",
        popup_benefit: "Low expected yield; ecological harm likely.",
    },
    StatusDisplay {
        status: AdvisoryStatus::Ban,
        label: "RESTRICTED ZONE: Policy Intervention Recommended",
        filter_label: "Restricted Zone: Policy Intervention",
        color_class: "text-amber-300",
        background_class: "bg-amber-900/30",
        marker: MarkerTier::Yellow,
        popup_title: "Restricted Zone: Policy Intervention",
        popup_benefit: "Low stock levels; avoid operational losses.",
    },
    StatusDisplay {
        status: AdvisoryStatus::Conserve,
        label: "CONSERVATION PRIORITY: Biodiversity Support Required",
        filter_label: "Conservation Priority",
        color_class: "text-amber-300",
        background_class: "bg-amber-900/30",
        marker: MarkerTier::Yellow,
        popup_title: "Conservation Priority",
        popup_benefit: "Proceed cautiously; expected returns are limited.",
    },
    StatusDisplay {
        status: AdvisoryStatus::Ok,
        label: "AUTHORIZED: Sustainable Operations",
        filter_label: "Authorized: Sustainable Operations",
        color_class: "text-emerald-300",
        background_class: "bg-emerald-900/30",
        marker: MarkerTier::Green,
        popup_title: "Authorized: Sustainable Operations",
        popup_benefit: "Favourable conditions; efficient effort expected.",
    },
];

/// Full display row for a status
pub fn status_display(status: AdvisoryStatus) -> &'static StatusDisplay {
    let idx = match status {
        AdvisoryStatus::Invasive => 0,
        AdvisoryStatus::Ban => 1,
        AdvisoryStatus::Conserve => 2,
        AdvisoryStatus::Ok => 3,
    };
    &STATUS_DISPLAY[idx]
}

pub fn label(status: AdvisoryStatus) -> &'static str {
    status_display(status).label
}

pub fn color_class(status: AdvisoryStatus) -> &'static str {
    status_display(status).color_class
}

pub fn background_class(status: AdvisoryStatus) -> &'static str {
    status_display(status).background_class
}

pub fn marker_tier(status: AdvisoryStatus) -> MarkerTier {
    status_display(status).marker
}
