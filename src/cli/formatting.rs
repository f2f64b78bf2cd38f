//! Formatting utilities for CLI output.
//!
//! Styled headers and errors, and compact rendering of settings values.

use serde_json::Value;

/// ANSI color codes for terminal output
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Dim text
    pub const DIM: &'static str = "\x1b[2m";

    /// Red color
    pub const RED: &'static str = "\x1b[31m";
    /// Green color
    pub const GREEN: &'static str = "\x1b[32m";
    /// Cyan color
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Formats section headers with styling
pub fn format_header(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::CYAN, text, Colors::RESET)
}

/// Formats the highlighted entry of a list
pub fn format_current(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::GREEN, text, Colors::RESET)
}

/// Formats descriptions with muted styling
pub fn format_description(text: &str) -> String {
    format!("{}{}{}", Colors::DIM, text, Colors::RESET)
}

/// Formats error messages with red styling
pub fn format_error(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::RED, text, Colors::RESET)
}

/// Formats a settings value for one-line CLI output.
///
/// Scalars print as JSON; objects print their fields inline.
///
/// # Examples
///
/// ```
/// use horloge::cli::formatting::format_json_value;
/// use serde_json::json;
///
/// assert_eq!(format_json_value(&json!("Modern")), "\"Modern\"");
/// assert_eq!(format_json_value(&json!({"width": 350, "height": 350})), "{height: 350, width: 350}");
/// ```
pub fn format_json_value(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let fields: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{key}: {}", format_json_value(value)))
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
        Value::Array(items) => format!("[{}]", items.len()),
        other => other.to_string(),
    }
}
