/// Marker rendered in place of a missing or non-numeric value.
pub const NOT_AVAILABLE: &str = "N/A";

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Format a number for on-screen display.
///
/// Two decimal places, negatives shown in parentheses: `-23.5` → `(23.50)`.
pub fn display_number(value: Option<f64>) -> String {
    match finite(value) {
        Some(v) if v < 0.0 => format!("({:.2})", v.abs()),
        Some(v) => format!("{:.2}", v),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Format a number for a spreadsheet-bound export cell.
///
/// Non-negative values are plain text (`100.00`). Negative values become a
/// text formula (`="(5.00)"`) so spreadsheet software shows the parenthesized
/// form verbatim instead of coercing it back to a number.
pub fn export_number(value: Option<f64>) -> String {
    match finite(value) {
        Some(v) if v < 0.0 => format!("=\"({:.2})\"", v.abs()),
        Some(v) => format!("{:.2}", v),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Escape one free-text cell for a delimited export.
///
/// Values containing the separator, a double quote, or a line break are
/// wrapped in quotes with inner quotes doubled. Anything else passes through
/// unchanged. Absent text becomes an empty cell, never [`NOT_AVAILABLE`].
pub fn escape_cell(value: Option<&str>, separator: char) -> String {
    let Some(text) = value else {
        return String::new();
    };
    let needs_quotes = text
        .chars()
        .any(|c| c == separator || c == '"' || c == '\n' || c == '\r');
    if needs_quotes {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// Reverse [`escape_cell`] for a single cell.
pub fn unescape_cell(cell: &str) -> String {
    match cell
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\"\"", "\""),
        None => cell.to_string(),
    }
}
