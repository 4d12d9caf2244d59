use super::{Cell, Selection};
use crate::config::RankingConfig;
use crate::model::{MarkBook, Snapshot, Student};
use crate::ranking::{rankable_totals, select_overall, top_n_by_group, CrossEventTotal};

pub const COLUMNS: &[&str] = &[
    "Region", "Rank", "Index", "Name", "Gender", "Events", "Total", "Overall",
];

fn region_of<'a>(entry: &(&'a Student, CrossEventTotal)) -> Option<&'a str> {
    entry.0.region()
}

/// Cross-event totals, ranked within each region and flagged overall.
///
/// Totals always run over every event in the snapshot; only the student set
/// is narrowed by the selection.
pub fn rows(
    snapshot: &Snapshot,
    marks: &MarkBook,
    ranking: &RankingConfig,
    selection: &Selection,
) -> Vec<Vec<Cell>> {
    let students = selection.students(snapshot);
    let events: Vec<_> = snapshot.events.iter().collect();

    let scored: Vec<_> = rankable_totals(&students, &events, marks)
        .into_iter()
        .map(|(student, total)| ((student, total), total.total))
        .collect();

    let union: Vec<_> = top_n_by_group(scored, region_of, ranking.group_top_n)
        .into_values()
        .flatten()
        .collect();
    let mut placings = select_overall(union, ranking.overall_top_k, ranking.overall_cutoff);
    placings.sort_by(|a, b| {
        a.entry
            .group
            .cmp(b.entry.group)
            .then(a.entry.rank.cmp(&b.entry.rank))
    });

    placings
        .into_iter()
        .map(|placing| {
            let (student, total) = placing.entry.entity;
            vec![
                Cell::text(placing.entry.group),
                Cell::Count(placing.entry.rank),
                Cell::opt_text(student.index_code.as_deref()),
                Cell::text(&student.name),
                Cell::opt_text(student.gender()),
                Cell::Count(total.events_counted),
                Cell::number(total.total),
                Cell::Flag(placing.overall),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Event, MarkEntry, MarkRecord};

    fn student(id: &str, region: &str) -> Student {
        Student {
            id: id.to_string(),
            name: format!("Student {}", id),
            index_code: None,
            region: Some(region.to_string()),
            team: None,
            gender: Some("F".to_string()),
        }
    }

    fn mark(student: &str, event: &str, r1: &str, r2: &str) -> MarkRecord {
        let entry = |v: &str| MarkEntry {
            e1: Some(v.to_string()),
            ..Default::default()
        };
        MarkRecord {
            student_id: student.to_string(),
            event_id: event.to_string(),
            category: None,
            round1: entry(r1),
            round2: Some(entry(r2)),
        }
    }

    fn snapshot() -> Snapshot {
        let event = |id: &str, gender: &str| Event {
            id: id.to_string(),
            name: id.to_string(),
            gender: Some(gender.to_string()),
        };
        Snapshot {
            students: vec![student("1", "X"), student("2", "X"), student("3", "Y")],
            events: vec![event("e1", "F"), event("e2", "M")],
            marks: vec![
                mark("1", "e1", "5", "100"),
                mark("1", "e2", "4", "100"),
                mark("2", "e1", "20", "0"),
                mark("3", "e1", "0", "50"),
            ],
        }
    }

    #[test]
    fn test_totals_use_round_one_and_drop_zero() {
        let snapshot = snapshot();
        let book = MarkBook::new(&snapshot, None);
        let rows = rows(
            &snapshot,
            &book,
            &RankingConfig::default(),
            &Selection::default(),
        );

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][3], Cell::text("Student 2"));
        assert_eq!(rows[0][6], Cell::number(20.0));
        assert_eq!(rows[1][3], Cell::text("Student 1"));
        assert_eq!(rows[1][5], Cell::Count(2));
        assert_eq!(rows[1][6], Cell::number(9.0));
        assert!(rows.iter().all(|r| r[0] == Cell::text("X")));
    }

    #[test]
    fn test_totals_span_every_event_regardless_of_filters() {
        let snapshot = snapshot();
        let book = MarkBook::new(&snapshot, None);
        let selection = Selection {
            event: Some("e1".to_string()),
            gender: Some("F".to_string()),
            ..Default::default()
        };
        let rows = rows(&snapshot, &book, &RankingConfig::default(), &selection);

        // Student 1 keeps the e2 mark even though e2 is a different event and gender
        assert_eq!(rows[1][3], Cell::text("Student 1"));
        assert_eq!(rows[1][5], Cell::Count(2));
        assert_eq!(rows[1][6], Cell::number(9.0));
    }
}
