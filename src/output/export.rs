use crate::config::ExportConfig;
use crate::report::{Cell, Report};

use super::format::{escape_cell, export_number};

const BYTE_ORDER_MARK: &str = "\u{feff}";

/// A report rendered for spreadsheet import.
///
/// Layout: title line, metadata lines, exactly one header row, data rows.
/// Title and metadata lines are a single escaped cell each.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    pub lines: Vec<String>,
    pub byte_order_mark: bool,
}

impl ExportDocument {
    pub fn from_report(report: &Report, options: &ExportConfig) -> Self {
        let sep = options.separator_char();
        let mut lines = Vec::with_capacity(report.rows.len() + report.metadata.len() + 2);

        lines.push(escape_cell(Some(&report.title), sep));
        lines.extend(report.metadata.iter().map(|line| escape_cell(Some(line), sep)));
        lines.push(join(report.columns.iter().map(|c| escape_cell(Some(c), sep)), sep));
        lines.extend(
            report
                .rows
                .iter()
                .map(|row| join(row.iter().map(|cell| export_cell(cell, sep)), sep)),
        );

        Self {
            lines,
            byte_order_mark: options.byte_order_mark,
        }
    }

    /// The document as text with `\n` line endings.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.byte_order_mark {
            out.push_str(BYTE_ORDER_MARK);
        }
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Numbers go out exactly as `export_number` produces them, never escaped.
fn export_cell(cell: &Cell, separator: char) -> String {
    match cell {
        Cell::Text(text) => escape_cell(text.as_deref(), separator),
        Cell::Number(value) => export_number(*value),
        Cell::Count(count) => count.to_string(),
        Cell::Flag(true) => "Yes".to_string(),
        Cell::Flag(false) => String::new(),
    }
}

fn join(cells: impl Iterator<Item = String>, separator: char) -> String {
    cells.collect::<Vec<_>>().join(&separator.to_string())
}
