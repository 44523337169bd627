pub mod classify;
pub mod display;

pub use classify::{
    classify, classify_indicators, filter_by_status, is_low_biodiversity, is_low_stock, AdvisoryRule, AdvisoryStatus, Indicators,
    StatusFilter, ADVISORY_RULES, BIODIVERSITY_CONSERVE_THRESHOLD, FISH_STOCK_BAN_THRESHOLD,
};
pub use display::{
    background_class, color_class, label, marker_tier, status_display, MarkerTier, StatusDisplay,
};
