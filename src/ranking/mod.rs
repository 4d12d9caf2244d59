pub mod group;
pub mod overall;
pub mod team;
pub mod totals;

pub use group::{top_n_by_group, GroupRankedEntry};
pub use overall::{select_overall, CutoffPolicy, OverallEntry};
pub use team::{aggregate_teams, aggregate_teams_by_group, TeamResult, Verdict};
pub use totals::{cross_event_total, rankable_totals, CrossEventTotal};

use std::cmp::Ordering;

/// Comparator for descending score order. Scores are always finite, so the
/// fallback never decides an ordering in practice.
pub(crate) fn score_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
