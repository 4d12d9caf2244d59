use tracing::debug;

use super::{Cell, Selection};
use crate::config::RankingConfig;
use crate::model::{MarkBook, Snapshot, Student, TeamLabel};
use crate::ranking::aggregate_teams_by_group;

pub const COLUMNS: &[&str] = &[
    "Event",
    "Region",
    "Team A Total",
    "Team A Counted",
    "Team B Total",
    "Team B Counted",
    "Winner",
];

fn region_of<'a>(student: &&'a Student) -> Option<&'a str> {
    student.region()
}

fn team_of(student: &&Student) -> Option<TeamLabel> {
    student.team_label()
}

/// One row per region per event that has team data.
pub fn rows(
    snapshot: &Snapshot,
    marks: &MarkBook,
    ranking: &RankingConfig,
    selection: &Selection,
) -> Vec<Vec<Cell>> {
    let mut rows = Vec::new();

    for event in selection.events(snapshot) {
        // Only students with both a region and a team take part
        let members: Vec<(&Student, f64)> = snapshot
            .students
            .iter()
            .filter(|s| s.region().is_some() && s.team_label().is_some())
            .filter_map(|s| marks.get(&s.id, &event.id).map(|r| (s, r.final_score())))
            .collect();

        let results = aggregate_teams_by_group(members, region_of, team_of, ranking.team_size);
        debug!(event = %event.name, regions = results.len(), "Aggregated teams");

        rows.extend(results.into_iter().map(|result| {
            vec![
                Cell::text(&event.name),
                Cell::text(result.group),
                Cell::Number(result.sum_a),
                Cell::Count(result.counted_a),
                Cell::Number(result.sum_b),
                Cell::Count(result.counted_b),
                Cell::text(result.verdict.to_string()),
            ]
        }));
    }

    rows
}
