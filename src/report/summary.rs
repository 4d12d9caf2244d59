use super::events::EventStanding;
use super::Cell;

pub const COLUMNS: &[&str] = &[
    "Region", "Event", "Entrants", "Placed", "Best", "Leader", "Overall",
];

/// Long-format region x event summary derived from the event standings.
///
/// Every region with at least one scored entrant gets a row for the event,
/// even when none of its entrants qualified overall.
pub fn rows(standings: &[EventStanding]) -> Vec<Vec<Cell>> {
    let mut rows = Vec::new();

    for standing in standings {
        for (&region, &entrants) in &standing.entrants {
            let in_region: Vec<_> = standing
                .placings
                .iter()
                .filter(|p| p.entry.group == region)
                .collect();
            let leader = in_region.iter().find(|p| p.entry.rank == 1);
            let overall = in_region.iter().filter(|p| p.overall).count();

            rows.push(vec![
                Cell::text(region),
                Cell::text(&standing.event.name),
                Cell::Count(entrants),
                Cell::Count(in_region.len()),
                Cell::Number(leader.map(|p| p.entry.score)),
                Cell::opt_text(leader.map(|p| p.entry.entity.student.name.as_str())),
                Cell::Count(overall),
            ]);
        }
    }

    // Region-major so each region's events read together
    rows.sort_by(|a, b| region_key(a).cmp(&region_key(b)));
    rows
}

fn region_key(row: &[Cell]) -> Option<&str> {
    match row.first() {
        Some(Cell::Text(region)) => region.as_deref(),
        _ => None,
    }
}
