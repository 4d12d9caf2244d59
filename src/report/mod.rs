pub mod events;
pub mod marks;
pub mod summary;
pub mod teams;
pub mod totals;

use chrono::Local;
use clap::ValueEnum;
use tracing::{debug, warn};

use crate::config::RankingConfig;
use crate::model::{Event, MarkBook, Snapshot, Student};

/// Which result sheet to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Per-event regional top-N with overall qualifiers
    Events,
    /// Team A vs team B per region and event
    Teams,
    /// Cross-event totals ranked by region
    Totals,
    /// Region x event long-format summary
    Summary,
    /// Raw marks with computed round scores
    Marks,
}

impl ReportKind {
    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Events => "Event Rankings",
            ReportKind::Teams => "Team Results",
            ReportKind::Totals => "Cross-Event Totals",
            ReportKind::Summary => "Region Summary",
            ReportKind::Marks => "Mark Sheet",
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            ReportKind::Events => events::COLUMNS,
            ReportKind::Teams => teams::COLUMNS,
            ReportKind::Totals => totals::COLUMNS,
            ReportKind::Summary => summary::COLUMNS,
            ReportKind::Marks => marks::COLUMNS,
        }
    }
}

/// A report cell before it is rendered for a particular surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(Option<String>),
    Number(Option<f64>),
    Count(usize),
    Flag(bool),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(Some(value.into()))
    }

    pub fn opt_text(value: Option<&str>) -> Self {
        Cell::Text(value.map(str::to_string))
    }

    pub fn number(value: f64) -> Self {
        Cell::Number(Some(value))
    }
}

/// Filters applied before any scoring happens.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Event id or display name
    pub event: Option<String>,
    pub gender: Option<String>,
    /// Performance category of mark records
    pub category: Option<String>,
}

impl Selection {
    pub fn events<'a>(&self, snapshot: &'a Snapshot) -> Vec<&'a Event> {
        snapshot
            .events
            .iter()
            .filter(|e| self.event.as_deref().map_or(true, |sel| e.matches(sel)))
            .filter(|e| self.gender_matches(e.gender()))
            .collect()
    }

    pub fn students<'a>(&self, snapshot: &'a Snapshot) -> Vec<&'a Student> {
        snapshot
            .students
            .iter()
            .filter(|s| self.gender_matches(s.gender()))
            .collect()
    }

    fn gender_matches(&self, gender: Option<&str>) -> bool {
        match self.gender.as_deref() {
            None => true,
            Some(wanted) => gender.is_some_and(|g| g.eq_ignore_ascii_case(wanted.trim())),
        }
    }

    /// Human-readable description of the active filters.
    pub fn describe(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(ref event) = self.event {
            lines.push(format!("Event: {}", event));
        }
        if let Some(ref gender) = self.gender {
            lines.push(format!("Gender: {}", gender));
        }
        if let Some(ref category) = self.category {
            lines.push(format!("Category: {}", category));
        }
        lines
    }
}

/// A fully computed report: fixed columns plus rows of unrendered cells.
#[derive(Debug, Clone)]
pub struct Report {
    pub kind: ReportKind,
    pub title: String,
    /// Free-text lines printed above the header row
    pub metadata: Vec<String>,
    pub columns: &'static [&'static str],
    pub rows: Vec<Vec<Cell>>,
}

/// Cross-event totals are defined over every event, so an event filter does
/// not apply to them.
fn effective_selection(kind: ReportKind, selection: &Selection) -> Selection {
    let mut selection = selection.clone();
    if kind == ReportKind::Totals {
        if let Some(event) = selection.event.take() {
            warn!(event = %event, "Event filter ignored for cross-event totals");
        }
    }
    selection
}

/// Run the engine over one snapshot and lay the results out as `kind`.
pub fn build_report(
    kind: ReportKind,
    snapshot: &Snapshot,
    ranking: &RankingConfig,
    selection: &Selection,
    heading: &str,
) -> Report {
    let selection = &effective_selection(kind, selection);
    let book = MarkBook::new(snapshot, selection.category.as_deref());
    if book.is_empty() {
        warn!(category = ?selection.category, "No mark records to report on");
    }
    debug!(
        report = ?kind,
        students = snapshot.students.len(),
        events = snapshot.events.len(),
        marks = book.len(),
        "Building report"
    );

    let rows = match kind {
        ReportKind::Events => {
            let standings = events::event_standings(snapshot, &book, ranking, selection);
            events::rows(&standings)
        }
        ReportKind::Teams => teams::rows(snapshot, &book, ranking, selection),
        ReportKind::Totals => totals::rows(snapshot, &book, ranking, selection),
        ReportKind::Summary => {
            let standings = events::event_standings(snapshot, &book, ranking, selection);
            summary::rows(&standings)
        }
        ReportKind::Marks => marks::rows(snapshot, &book, selection),
    };

    let mut metadata = vec![format!("Generated: {}", Local::now().format("%Y-%m-%d %H:%M"))];
    metadata.extend(selection.describe());

    Report {
        kind,
        title: format!("{} - {}", heading, kind.title()),
        metadata,
        columns: kind.columns(),
        rows,
    }
}
