use serde::Serialize;
use serde_json;

/// JSON formatter for reports and dashboard views
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format as pretty-printed JSON
    pub fn format<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(value)
    }

    /// Format as compact JSON (no whitespace)
    pub fn format_compact<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
        serde_json::to_string(value)
    }
}
