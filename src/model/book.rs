use std::collections::HashMap;

use tracing::warn;

use super::records::{MarkRecord, Snapshot};

/// Lookup of mark records by (student id, event id).
///
/// A pair with no record is simply absent; callers exclude it rather than
/// scoring it as zero.
#[derive(Debug, Default)]
pub struct MarkBook<'a> {
    records: HashMap<&'a str, HashMap<&'a str, &'a MarkRecord>>,
    len: usize,
}

impl<'a> MarkBook<'a> {
    /// Index every mark in the snapshot, optionally keeping only one
    /// performance category.
    pub fn new(snapshot: &'a Snapshot, category: Option<&str>) -> Self {
        let mut records: HashMap<&'a str, HashMap<&'a str, &'a MarkRecord>> = HashMap::new();
        let mut len = 0;
        for record in &snapshot.marks {
            if let Some(wanted) = category {
                let matches = record
                    .category
                    .as_deref()
                    .is_some_and(|c| c.trim().eq_ignore_ascii_case(wanted.trim()));
                if !matches {
                    continue;
                }
            }

            let by_event = records.entry(record.student_id.as_str()).or_default();
            if by_event.insert(record.event_id.as_str(), record).is_some() {
                warn!(
                    student = %record.student_id,
                    event = %record.event_id,
                    "Duplicate mark record, keeping the later one"
                );
            } else {
                len += 1;
            }
        }
        Self { records, len }
    }

    pub fn get(&self, student_id: &str, event_id: &str) -> Option<&'a MarkRecord> {
        self.records
            .get(student_id)
            .and_then(|by_event| by_event.get(event_id))
            .copied()
    }

    /// Number of distinct (student, event) pairs with a record.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
