use std::collections::BTreeMap;

use super::score_desc;

/// An entity placed within its group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRankedEntry<T, K> {
    pub entity: T,
    pub score: f64,
    pub group: K,
    /// 1-based, unique within the group
    pub rank: usize,
}

/// Partition scored entities by group, and keep the best `n` of each group.
///
/// Each group is stable-sorted by score descending, so entities with equal
/// scores keep their input order and receive distinct consecutive ranks.
/// Entities with no group key are left out. Groups come back in ascending
/// key order.
pub fn top_n_by_group<T, K, F>(
    scored: Vec<(T, f64)>,
    group_of: F,
    n: usize,
) -> BTreeMap<K, Vec<GroupRankedEntry<T, K>>>
where
    K: Ord + Clone,
    F: Fn(&T) -> Option<K>,
{
    let mut partitions: BTreeMap<K, Vec<(T, f64)>> = BTreeMap::new();
    for (entity, score) in scored {
        if let Some(key) = group_of(&entity) {
            partitions.entry(key).or_default().push((entity, score));
        }
    }

    partitions
        .into_iter()
        .filter(|_| n > 0)
        .map(|(key, mut members)| {
            members.sort_by(|a, b| score_desc(a.1, b.1));
            let ranked = members
                .into_iter()
                .take(n)
                .enumerate()
                .map(|(idx, (entity, score))| GroupRankedEntry {
                    entity,
                    score,
                    group: key.clone(),
                    rank: idx + 1,
                })
                .collect();
            (key, ranked)
        })
        .collect()
}
