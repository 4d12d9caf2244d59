use serde::{Deserialize, Serialize};

use super::group::GroupRankedEntry;
use super::score_desc;

/// How the overall top-K boundary treats equal scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CutoffPolicy {
    /// Flag exactly the first K positions of the sorted list.
    #[default]
    Positional,
    /// Also flag entries tied with the K-th flagged score.
    IncludeTies,
}

/// A group-ranked entry placed in the global ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct OverallEntry<T, K> {
    pub entry: GroupRankedEntry<T, K>,
    pub overall: bool,
}

/// Sort the union of every group's top-N by score descending and flag the
/// leading `k` entries as overall qualifiers.
///
/// The sort is stable: equal scores keep the order in which the groups were
/// concatenated. In-group ranks are left untouched.
pub fn select_overall<T, K>(
    mut entries: Vec<GroupRankedEntry<T, K>>,
    k: usize,
    policy: CutoffPolicy,
) -> Vec<OverallEntry<T, K>> {
    entries.sort_by(|a, b| score_desc(a.score, b.score));

    let boundary = match policy {
        CutoffPolicy::Positional => None,
        CutoffPolicy::IncludeTies => k
            .checked_sub(1)
            .and_then(|i| entries.get(i))
            .map(|e| e.score),
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| {
            let overall = idx < k || boundary.is_some_and(|b| entry.score == b);
            OverallEntry { entry, overall }
        })
        .collect()
}
