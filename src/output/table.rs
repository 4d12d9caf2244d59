use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::report::{Cell, Report};

use super::format::display_number;

const COLUMN_GAP: &str = "  ";
/// Text columns never shrink below this when fitting the terminal
const MIN_TEXT_WIDTH: usize = 8;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn display_cell(cell: &Cell) -> String {
    match cell {
        Cell::Text(text) => text.clone().unwrap_or_default(),
        Cell::Number(value) => display_number(*value),
        Cell::Count(count) => count.to_string(),
        Cell::Flag(true) => "Yes".to_string(),
        Cell::Flag(false) => String::new(),
    }
}

fn is_numeric(cell: &Cell) -> bool {
    matches!(cell, Cell::Number(_) | Cell::Count(_))
}

/// Render a report as an aligned table for the terminal.
pub fn format_table(report: &Report, use_colors: bool) -> String {
    format_table_with_width(report, use_colors, get_terminal_width())
}

fn format_table_with_width(report: &Report, use_colors: bool, term_width: Option<usize>) -> String {
    let mut out = Vec::new();
    if use_colors {
        out.push(report.title.bold().to_string());
        out.extend(report.metadata.iter().map(|m| m.dimmed().to_string()));
    } else {
        out.push(report.title.clone());
        out.extend(report.metadata.iter().cloned());
    }
    out.push(String::new());

    if report.rows.is_empty() {
        out.push("No results found.".to_string());
        return out.join("\n");
    }

    let cells: Vec<Vec<String>> = report
        .rows
        .iter()
        .map(|row| row.iter().map(display_cell).collect())
        .collect();
    let widths = column_widths(report, &cells, term_width);

    let header: Vec<String> = report
        .columns
        .iter()
        .zip(&widths)
        .map(|(name, &w)| format!("{:<w$}", truncate_text(name, w)))
        .collect();
    let header = header.join(COLUMN_GAP);
    out.push(if use_colors {
        header.trim_end().bold().to_string()
    } else {
        header.trim_end().to_string()
    });

    for (row, texts) in report.rows.iter().zip(&cells) {
        let line: Vec<String> = row
            .iter()
            .zip(texts)
            .zip(&widths)
            .map(|((cell, text), &w)| {
                let text = truncate_text(text, w);
                let padded = if is_numeric(cell) {
                    format!("{:>w$}", text)
                } else {
                    format!("{:<w$}", text)
                };
                match cell {
                    Cell::Number(Some(v)) if use_colors && *v < 0.0 => padded.red().to_string(),
                    Cell::Flag(true) if use_colors => padded.green().to_string(),
                    _ => padded,
                }
            })
            .collect();
        out.push(line.join(COLUMN_GAP).trim_end().to_string());
    }

    out.join("\n")
}

/// Natural column widths, with the widest text column shrunk when the table
/// would overflow a known terminal width.
fn column_widths(report: &Report, cells: &[Vec<String>], term_width: Option<usize>) -> Vec<usize> {
    let mut widths: Vec<usize> = report
        .columns
        .iter()
        .map(|c| c.chars().count())
        .collect();
    for row in cells {
        for (width, text) in widths.iter_mut().zip(row) {
            *width = (*width).max(text.chars().count());
        }
    }

    let Some(limit) = term_width else {
        return widths;
    };
    let total = widths.iter().sum::<usize>() + COLUMN_GAP.len() * widths.len().saturating_sub(1);
    if total <= limit {
        return widths;
    }

    let text_columns = report.rows.first().map(|row| {
        row.iter()
            .enumerate()
            .filter(|(_, cell)| matches!(cell, Cell::Text(_)))
            .map(|(idx, _)| idx)
            .collect::<Vec<_>>()
    });
    if let Some(widest) = text_columns
        .unwrap_or_default()
        .into_iter()
        .max_by_key(|&idx| widths[idx])
    {
        let excess = total - limit;
        widths[widest] = widths[widest].saturating_sub(excess).max(MIN_TEXT_WIDTH);
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportKind;

    fn report(rows: Vec<Vec<Cell>>) -> Report {
        Report {
            kind: ReportKind::Totals,
            title: "Meet - Cross-Event Totals".to_string(),
            metadata: vec!["Generated: 2024-05-01 10:00".to_string()],
            columns: crate::report::totals::COLUMNS,
            rows,
        }
    }

    fn row(name: &str, total: f64, overall: bool) -> Vec<Cell> {
        vec![
            Cell::text("North"),
            Cell::Count(1),
            Cell::Text(None),
            Cell::text(name),
            Cell::text("F"),
            Cell::Count(2),
            Cell::number(total),
            Cell::Flag(overall),
        ]
    }

    #[test]
    fn test_empty_report() {
        let result = format_table_with_width(&report(vec![]), false, None);
        assert!(result.starts_with("Meet - Cross-Event Totals\nGenerated:"));
        assert!(result.ends_with("No results found."));
    }

    #[test]
    fn test_rows_are_aligned_and_negative_parenthesized() {
        let result = format_table_with_width(
            &report(vec![row("Ada", 19.5, true), row("Grace", -2.25, false)]),
            false,
            None,
        );
        let lines: Vec<&str> = result.lines().collect();
        assert!(lines[3].starts_with("Region"));
        assert!(lines[4].contains("Ada"));
        assert!(lines[4].contains("19.50"));
        assert!(lines[4].ends_with("Yes"));
        assert!(lines[5].contains("(2.25)"));
        // Numbers are right-aligned to the same column edge
        let end_a = lines[4].find("19.50").map(|i| i + 5);
        let end_b = lines[5].find("(2.25)").map(|i| i + 6);
        assert_eq!(end_a, end_b);
    }

    #[test]
    fn test_narrow_terminal_truncates_widest_text() {
        let long = "Bartholomew Montgomery-Fitzgerald";
        let result =
            format_table_with_width(&report(vec![row(long, 1.0, false)]), false, Some(60));
        assert!(!result.contains(long));
        assert!(result.contains("..."));
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("Short", 20), "Short");
        assert_eq!(truncate_text("This is a very long name", 15), "This is a ve...");
        assert_eq!(truncate_text("Hello world", 3), "Hel");
    }
}
