use colored::Colorize;
use xml_compare_core::{format_summary, format_text, ComparisonResult};

/// Render a result for terminal output.
pub fn render_text(result: &ComparisonResult<'_>) -> String {
    let raw = format_text(result);
    if result.succeeded() {
        raw.green().to_string()
    } else {
        raw.red().to_string()
    }
}

/// Render the one-line summary for terminal output.
pub fn render_summary(result: &ComparisonResult<'_>) -> String {
    format_summary(result).cyan().to_string()
}
