use std::collections::BTreeMap;
use std::fmt;

use super::score_desc;
use crate::model::TeamLabel;

/// Outcome of a head-to-head between the two teams of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    TeamA,
    TeamB,
    Tie,
    /// Team A scored and team B had no scored member
    TeamAUncontested,
    /// Team B scored and team A had no scored member
    TeamBUncontested,
    NoData,
}

impl Verdict {
    /// Decide the winner from each team's sum; `None` means the team had no
    /// scored member at all.
    pub fn resolve(sum_a: Option<f64>, sum_b: Option<f64>) -> Self {
        match (sum_a, sum_b) {
            (Some(a), Some(b)) if a > b => Verdict::TeamA,
            (Some(a), Some(b)) if b > a => Verdict::TeamB,
            (Some(_), Some(_)) => Verdict::Tie,
            (Some(_), None) => Verdict::TeamAUncontested,
            (None, Some(_)) => Verdict::TeamBUncontested,
            (None, None) => Verdict::NoData,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::TeamA => write!(f, "{}", TeamLabel::A),
            Verdict::TeamB => write!(f, "{}", TeamLabel::B),
            Verdict::Tie => f.write_str("Tie"),
            Verdict::TeamAUncontested => write!(f, "{} (other team absent)", TeamLabel::A),
            Verdict::TeamBUncontested => write!(f, "{} (other team absent)", TeamLabel::B),
            Verdict::NoData => f.write_str("No data"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamResult<K> {
    pub group: K,
    /// Sum of team A's counted scores, absent when A had no scored member
    pub sum_a: Option<f64>,
    pub sum_b: Option<f64>,
    /// How many scores were counted toward each sum
    pub counted_a: usize,
    pub counted_b: usize,
    pub verdict: Verdict,
}

/// Sum the best `team_size` scores of each team and decide a winner.
///
/// Members without a team label are ignored. Returns `None` when neither team
/// has a scored member, so an empty group yields no result at all.
pub fn aggregate_teams<K, I>(group: K, members: I, team_size: usize) -> Option<TeamResult<K>>
where
    I: IntoIterator<Item = (Option<TeamLabel>, f64)>,
{
    let mut team_a = Vec::new();
    let mut team_b = Vec::new();
    for (label, score) in members {
        match label {
            Some(TeamLabel::A) => team_a.push(score),
            Some(TeamLabel::B) => team_b.push(score),
            None => {}
        }
    }

    let (sum_a, counted_a) = best_sum(team_a, team_size);
    let (sum_b, counted_b) = best_sum(team_b, team_size);

    match Verdict::resolve(sum_a, sum_b) {
        Verdict::NoData => None,
        verdict => Some(TeamResult {
            group,
            sum_a,
            sum_b,
            counted_a,
            counted_b,
            verdict,
        }),
    }
}

/// Group members by key, then run [`aggregate_teams`] on every group.
/// Results come back in ascending key order; groups without data are absent.
pub fn aggregate_teams_by_group<T, K, G, L>(
    scored: Vec<(T, f64)>,
    group_of: G,
    team_of: L,
    team_size: usize,
) -> Vec<TeamResult<K>>
where
    K: Ord,
    G: Fn(&T) -> Option<K>,
    L: Fn(&T) -> Option<TeamLabel>,
{
    let mut groups: BTreeMap<K, Vec<(Option<TeamLabel>, f64)>> = BTreeMap::new();
    for (entity, score) in &scored {
        if let Some(key) = group_of(entity) {
            groups.entry(key).or_default().push((team_of(entity), *score));
        }
    }

    groups
        .into_iter()
        .filter_map(|(key, members)| aggregate_teams(key, members, team_size))
        .collect()
}

fn best_sum(mut scores: Vec<f64>, team_size: usize) -> (Option<f64>, usize) {
    if scores.is_empty() {
        return (None, 0);
    }
    scores.sort_by(|a, b| score_desc(*a, *b));
    let counted = scores.len().min(team_size);
    (Some(scores.iter().take(counted).sum()), counted)
}
