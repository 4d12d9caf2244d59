use super::round::round_score;
use crate::model::{MarkEntry, MarkRecord};

/// Resolve the final score for one (student, event) pair.
///
/// When a second round was submitted (any field non-blank) the two round
/// scores are averaged; otherwise the first round stands alone.
pub fn final_score(round1: &MarkEntry, round2: Option<&MarkEntry>) -> f64 {
    let first = round_score(round1);
    match round2.filter(|r| !r.is_blank()) {
        Some(second) => (first + round_score(second)) / 2.0,
        None => first,
    }
}

/// First-round score only. Cross-event totals are defined over round one
/// and must ignore any second round.
pub fn first_round_score(round1: &MarkEntry) -> f64 {
    round_score(round1)
}

impl MarkRecord {
    pub fn final_score(&self) -> f64 {
        final_score(&self.round1, self.round2.as_ref())
    }

    pub fn first_round_score(&self) -> f64 {
        first_round_score(&self.round1)
    }

    /// Round two, if it carries any submitted field.
    pub fn submitted_round2(&self) -> Option<&MarkEntry> {
        self.round2.as_ref().filter(|r| !r.is_blank())
    }
}
