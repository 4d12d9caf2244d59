use super::{Cell, Selection};
use crate::model::{MarkBook, MarkEntry, Snapshot, Student};
use crate::scoring::round_breakdown;

pub const COLUMNS: &[&str] = &[
    "Event", "Index", "Name", "Region", "Category", "Round", "D", "P", "E1", "E2", "E3", "E4",
    "Trimmed", "Score",
];

/// One row per submitted round, raw fields next to the computed score.
pub fn rows(snapshot: &Snapshot, marks: &MarkBook, selection: &Selection) -> Vec<Vec<Cell>> {
    let students = selection.students(snapshot);
    let mut rows = Vec::new();

    for event in selection.events(snapshot) {
        for student in &students {
            let Some(record) = marks.get(&student.id, &event.id) else {
                continue;
            };
            let category = record.category.as_deref();

            rows.push(round_row(&event.name, student, category, 1, &record.round1));
            if let Some(round2) = record.submitted_round2() {
                rows.push(round_row(&event.name, student, category, 2, round2));
            }
        }
    }

    rows
}

fn round_row(
    event: &str,
    student: &Student,
    category: Option<&str>,
    round: usize,
    entry: &MarkEntry,
) -> Vec<Cell> {
    let breakdown = round_breakdown(entry);
    let mut row = vec![
        Cell::text(event),
        Cell::opt_text(student.index_code.as_deref()),
        Cell::text(&student.name),
        Cell::opt_text(student.region()),
        Cell::opt_text(category),
        Cell::Count(round),
        Cell::opt_text(entry.d.as_deref()),
        Cell::opt_text(entry.p.as_deref()),
    ];
    row.extend(entry.measures().into_iter().map(Cell::opt_text));
    row.push(Cell::number(breakdown.trimmed));
    row.push(Cell::number(breakdown.score));
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Event, MarkRecord};

    fn text(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn test_mark_rows_show_raw_fields_and_scores() {
        let snapshot = Snapshot {
            students: vec![Student {
                id: "s1".to_string(),
                name: "Ada".to_string(),
                index_code: text("A-01"),
                region: text("North"),
                team: None,
                gender: None,
            }],
            events: vec![Event {
                id: "e1".to_string(),
                name: "Vault".to_string(),
                gender: None,
            }],
            marks: vec![MarkRecord {
                student_id: "s1".to_string(),
                event_id: "e1".to_string(),
                category: text("Senior"),
                round1: MarkEntry {
                    d: text("2"),
                    p: text("0.5"),
                    e1: text("9"),
                    e2: text("7"),
                    e3: text("8"),
                    e4: None,
                },
                round2: Some(MarkEntry::default()),
            }],
        };
        let book = MarkBook::new(&snapshot, None);
        let rows = rows(&snapshot, &book, &Selection::default());

        // Blank second round is not a submitted round
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.len(), COLUMNS.len());
        assert_eq!(row[4], Cell::text("Senior"));
        assert_eq!(row[5], Cell::Count(1));
        assert_eq!(row[7], Cell::text("0.5"));
        assert_eq!(row[11], Cell::Text(None));
        assert_eq!(row[12], Cell::number(8.0));
        assert_eq!(row[13], Cell::number(9.5));
    }
}
