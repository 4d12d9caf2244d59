use serde::{Deserialize, Serialize};
use std::fmt;

use super::marks::{lenient_id, lenient_text, MarkEntry};

/// One of the two team labels a student may carry within a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TeamLabel {
    A,
    B,
}

impl TeamLabel {
    /// Parse a raw team label. Anything other than `A`/`B` (case-insensitive)
    /// is treated as "no team".
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "A" | "a" => Some(TeamLabel::A),
            "B" | "b" => Some(TeamLabel::B),
            _ => None,
        }
    }
}

impl fmt::Display for TeamLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamLabel::A => write!(f, "Team A"),
            TeamLabel::B => write!(f, "Team B"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Student {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    pub name: String,
    /// Index / reference code printed on result sheets
    #[serde(default, alias = "index", deserialize_with = "lenient_text")]
    pub index_code: Option<String>,
    #[serde(default, alias = "province")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub team: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

impl Student {
    /// Region label, or `None` when missing or blank.
    pub fn region(&self) -> Option<&str> {
        non_blank(self.region.as_deref())
    }

    pub fn team_label(&self) -> Option<TeamLabel> {
        self.team.as_deref().and_then(TeamLabel::parse)
    }

    pub fn gender(&self) -> Option<&str> {
        non_blank(self.gender.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Event {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub gender: Option<String>,
}

impl Event {
    pub fn gender(&self) -> Option<&str> {
        non_blank(self.gender.as_deref())
    }

    /// Match an event selector against either the id or the display name.
    pub fn matches(&self, selector: &str) -> bool {
        self.id == selector || self.name.eq_ignore_ascii_case(selector.trim())
    }
}

/// Marks for one (student, event) pair.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MarkRecord {
    #[serde(deserialize_with = "lenient_id")]
    pub student_id: String,
    #[serde(deserialize_with = "lenient_id")]
    pub event_id: String,
    /// Performance category discriminator
    #[serde(default)]
    pub category: Option<String>,
    pub round1: MarkEntry,
    #[serde(default)]
    pub round2: Option<MarkEntry>,
}

/// One consistent batch of records. Rankings are only ever computed over a
/// complete snapshot, never over partially refreshed marks.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Snapshot {
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub marks: Vec<MarkRecord>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
