use crate::model::MarkEntry;

/// How a round score was put together, kept for audit output.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundBreakdown {
    pub bonus: f64,
    pub penalty: f64,
    /// Repeated-measure values that parsed, in submission order
    pub measures: Vec<f64>,
    pub trimmed: f64,
    pub score: f64,
}

/// Parse one submitted mark. Blank, unparseable, and non-finite text is
/// treated as not submitted.
pub fn parse_mark(raw: Option<&str>) -> Option<f64> {
    let text = raw?.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Outlier-resistant summary of up to four repeated measures.
///
/// 0 values → 0, 1 → the value, 2 → their mean, 3 → the median,
/// 4 → mean of the middle two. The result does not depend on input order.
pub fn trimmed_component(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    match sorted.as_slice() {
        [] => 0.0,
        [only] => *only,
        [a, b] => (a + b) / 2.0,
        [_, mid, _] => *mid,
        [_, lo, hi, _] => (lo + hi) / 2.0,
        // More than four measures never come from a MarkEntry; drop the
        // extremes and average what remains.
        [_, middle @ .., _] => middle.iter().sum::<f64>() / middle.len() as f64,
    }
}

pub fn round_breakdown(entry: &MarkEntry) -> RoundBreakdown {
    let bonus = parse_mark(entry.d.as_deref()).unwrap_or(0.0);
    let penalty = parse_mark(entry.p.as_deref()).unwrap_or(0.0);
    let measures: Vec<f64> = entry
        .measures()
        .into_iter()
        .filter_map(parse_mark)
        .collect();
    let trimmed = trimmed_component(&measures);

    RoundBreakdown {
        bonus,
        penalty,
        measures,
        trimmed,
        score: trimmed + bonus - penalty,
    }
}

/// Score one round: trimmed component plus bonus minus penalty.
pub fn round_score(entry: &MarkEntry) -> f64 {
    round_breakdown(entry).score
}
