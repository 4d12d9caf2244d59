use std::collections::BTreeMap;

use tracing::debug;

use super::{Cell, Selection};
use crate::config::RankingConfig;
use crate::model::{Event, MarkBook, MarkRecord, Snapshot, Student};
use crate::ranking::{select_overall, top_n_by_group, OverallEntry};
use crate::scoring::round_score;

pub const COLUMNS: &[&str] = &[
    "Event", "Gender", "Region", "Rank", "Index", "Name", "Round 1", "Round 2", "Final", "Overall",
];

/// A student entered in one event, with the marks they received.
#[derive(Debug, Clone, Copy)]
pub struct Entrant<'a> {
    pub student: &'a Student,
    pub record: &'a MarkRecord,
}

#[derive(Debug, Clone)]
pub struct EventStanding<'a> {
    pub event: &'a Event,
    /// Scored entrants per region
    pub entrants: BTreeMap<&'a str, usize>,
    /// Regional top-N entries, ordered by region then rank
    pub placings: Vec<OverallEntry<Entrant<'a>, &'a str>>,
}

fn region_of<'a>(entrant: &Entrant<'a>) -> Option<&'a str> {
    entrant.student.region()
}

/// Rank every selected event: regional top-N by final score, then overall
/// top-K across the union of the regional results.
pub fn event_standings<'a>(
    snapshot: &'a Snapshot,
    marks: &MarkBook<'a>,
    ranking: &RankingConfig,
    selection: &Selection,
) -> Vec<EventStanding<'a>> {
    selection
        .events(snapshot)
        .into_iter()
        .map(|event| standing_for(event, &snapshot.students, marks, ranking))
        .collect()
}

fn standing_for<'a>(
    event: &'a Event,
    students: &'a [Student],
    marks: &MarkBook<'a>,
    ranking: &RankingConfig,
) -> EventStanding<'a> {
    let scored: Vec<(Entrant<'a>, f64)> = students
        .iter()
        .filter_map(|student| {
            marks
                .get(&student.id, &event.id)
                .map(|record| (Entrant { student, record }, record.final_score()))
        })
        .collect();

    let mut entrants: BTreeMap<&'a str, usize> = BTreeMap::new();
    for (entrant, _) in &scored {
        if let Some(region) = region_of(entrant) {
            *entrants.entry(region).or_insert(0) += 1;
        }
    }

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

    debug!(
        event = %event.name,
        regions = entrants.len(),
        placed = placings.len(),
        "Ranked event"
    );

    EventStanding {
        event,
        entrants,
        placings,
    }
}

pub fn rows(standings: &[EventStanding]) -> Vec<Vec<Cell>> {
    standings
        .iter()
        .flat_map(|standing| {
            standing.placings.iter().map(move |placing| {
                let Entrant { student, record } = placing.entry.entity;
                vec![
                    Cell::text(&standing.event.name),
                    Cell::opt_text(standing.event.gender()),
                    Cell::text(placing.entry.group),
                    Cell::Count(placing.entry.rank),
                    Cell::opt_text(student.index_code.as_deref()),
                    Cell::text(&student.name),
                    Cell::number(round_score(&record.round1)),
                    Cell::Number(record.submitted_round2().map(round_score)),
                    Cell::number(placing.entry.score),
                    Cell::Flag(placing.overall),
                ]
            })
        })
        .collect()
}
