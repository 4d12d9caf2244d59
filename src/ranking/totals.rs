use tracing::debug;

use crate::model::{Event, MarkBook, Student};

/// A student's first-round scores summed across every event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossEventTotal {
    pub total: f64,
    /// Events that had a mark record for the student
    pub events_counted: usize,
}

/// Sum the round-one score of every event the student has a mark for.
///
/// Events without a mark contribute nothing. Returns `None` when no event
/// contributed at all.
pub fn cross_event_total(
    student_id: &str,
    events: &[&Event],
    marks: &MarkBook,
) -> Option<CrossEventTotal> {
    let scores: Vec<f64> = events
        .iter()
        .filter_map(|event| marks.get(student_id, &event.id))
        .map(|record| record.first_round_score())
        .collect();

    if scores.is_empty() {
        return None;
    }

    Some(CrossEventTotal {
        total: scores.iter().sum(),
        events_counted: scores.len(),
    })
}

/// Totals for every student that has a result.
///
/// A student whose total is exactly zero is treated as having no result and
/// is dropped along with students that have no marks.
pub fn rankable_totals<'a>(
    students: &[&'a Student],
    events: &[&Event],
    marks: &MarkBook,
) -> Vec<(&'a Student, CrossEventTotal)> {
    let totals: Vec<_> = students
        .iter()
        .copied()
        .filter_map(|student| {
            cross_event_total(&student.id, events, marks).map(|total| (student, total))
        })
        .filter(|(_, total)| total.total != 0.0)
        .collect();

    debug!(
        students = students.len(),
        with_result = totals.len(),
        "Computed cross-event totals"
    );
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MarkEntry, MarkRecord, Snapshot};

    fn student(id: &str) -> Student {
        Student {
            id: id.to_string(),
            name: id.to_uppercase(),
            index_code: None,
            region: Some("X".to_string()),
            team: None,
            gender: None,
        }
    }

    fn event(id: &str) -> Event {
        Event {
            id: id.to_string(),
            name: id.to_string(),
            gender: None,
        }
    }

    fn mark(student: &str, event: &str, r1: &str, r2: Option<&str>) -> MarkRecord {
        let entry = |v: &str| MarkEntry {
            e1: Some(v.to_string()),
            ..Default::default()
        };
        MarkRecord {
            student_id: student.to_string(),
            event_id: event.to_string(),
            category: None,
            round1: entry(r1),
            round2: r2.map(entry),
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            students: vec![student("s1"), student("s2"), student("s3"), student("s4")],
            events: vec![event("e1"), event("e2"), event("e3")],
            marks: vec![
                mark("s1", "e1", "8", Some("2")),
                mark("s1", "e3", "7", None),
                mark("s2", "e2", "0", None),
                mark("s4", "e1", "5", None),
                mark("s4", "e2", "-5", None),
            ],
        }
    }

    fn refs<T>(items: &[T]) -> Vec<&T> {
        items.iter().collect()
    }

    #[test]
    fn test_sums_round_one_only() {
        let snapshot = snapshot();
        let book = MarkBook::new(&snapshot, None);
        let total = cross_event_total("s1", &refs(&snapshot.events), &book).unwrap();
        assert_eq!(total.total, 15.0);
        assert_eq!(total.events_counted, 2);
    }

    #[test]
    fn test_no_marks_is_absent() {
        let snapshot = snapshot();
        let book = MarkBook::new(&snapshot, None);
        assert!(cross_event_total("s3", &refs(&snapshot.events), &book).is_none());
    }

    #[test]
    fn test_zero_total_is_excluded_from_ranking() {
        let snapshot = snapshot();
        let book = MarkBook::new(&snapshot, None);

        // s2 scored exactly zero and s4's marks cancel out
        let events = refs(&snapshot.events);
        assert_eq!(cross_event_total("s2", &events, &book).unwrap().total, 0.0);
        let ranked = rankable_totals(&refs(&snapshot.students), &events, &book);
        let ids: Vec<&str> = ranked.iter().map(|(s, _)| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s1"]);
    }
}
