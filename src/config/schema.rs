use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ranking::CutoffPolicy;

/// Top-level configuration file.
///
/// Example YAML:
/// ```yaml
/// source:
///   base_url: https://results.example.org/api
///   timeout: 30s
/// ranking:
///   group_top_n: 3
///   overall_top_k: 8
///   overall_cutoff: include_ties
/// export:
///   separator: ";"
///   byte_order_mark: false
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub ranking: RankingConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

/// Where the HTTP source fetches its snapshot from.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct SourceConfig {
    pub base_url: String,
    pub students_path: String,
    pub events_path: String,
    pub marks_path: String,
    /// Per-request timeout in humantime form ("30s", "1m")
    pub timeout: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://results.example.org/api".to_string(),
            students_path: "/students".to_string(),
            events_path: "/events".to_string(),
            marks_path: "/marks".to_string(),
            timeout: "30s".to_string(),
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Result<Duration, humantime::DurationError> {
        humantime::parse_duration(self.timeout.trim())
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Parameters of the ranking engine.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct RankingConfig {
    /// Entries kept per region
    pub group_top_n: usize,
    /// Overall qualifiers across all regions
    pub overall_top_k: usize,
    /// Best scores summed per team
    pub team_size: usize,
    pub overall_cutoff: CutoffPolicy,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            group_top_n: 3,
            overall_top_k: 8,
            team_size: 5,
            overall_cutoff: CutoffPolicy::Positional,
        }
    }
}

/// Delimited export settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ExportConfig {
    /// Single-character field separator
    pub separator: String,
    pub byte_order_mark: bool,
    /// Heading used in report titles
    pub title: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            separator: ",".to_string(),
            byte_order_mark: true,
            title: "Competition Results".to_string(),
        }
    }
}

impl ExportConfig {
    /// The separator as a char. Falls back to a comma when the configured
    /// value is not exactly one character; validation reports that case.
    pub fn separator_char(&self) -> char {
        let mut chars = self.separator.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => ',',
        }
    }
}
