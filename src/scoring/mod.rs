pub mod event;
pub mod round;

pub use event::{final_score, first_round_score};
pub use round::{parse_mark, round_breakdown, round_score, trimmed_component, RoundBreakdown};
