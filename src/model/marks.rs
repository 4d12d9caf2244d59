use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Raw mark fields for one round, exactly as submitted.
///
/// Every field is optional text. `None` (or a blank string) means the field
/// was not submitted, which is distinct from a submitted `"0"`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MarkEntry {
    /// Bonus
    #[serde(rename = "D", alias = "d", default, deserialize_with = "lenient_text")]
    pub d: Option<String>,

    /// Penalty
    #[serde(rename = "P", alias = "p", default, deserialize_with = "lenient_text")]
    pub p: Option<String>,

    #[serde(rename = "E1", alias = "e1", default, deserialize_with = "lenient_text")]
    pub e1: Option<String>,

    #[serde(rename = "E2", alias = "e2", default, deserialize_with = "lenient_text")]
    pub e2: Option<String>,

    #[serde(rename = "E3", alias = "e3", default, deserialize_with = "lenient_text")]
    pub e3: Option<String>,

    #[serde(rename = "E4", alias = "e4", default, deserialize_with = "lenient_text")]
    pub e4: Option<String>,
}

impl MarkEntry {
    /// The four repeated-measure fields in submission order.
    pub fn measures(&self) -> [Option<&str>; 4] {
        [
            self.e1.as_deref(),
            self.e2.as_deref(),
            self.e3.as_deref(),
            self.e4.as_deref(),
        ]
    }

    /// True when none of the six fields carries a value.
    pub fn is_blank(&self) -> bool {
        [self.d.as_deref(), self.p.as_deref()]
            .into_iter()
            .chain(self.measures())
            .all(is_blank_field)
    }
}

fn is_blank_field(field: Option<&str>) -> bool {
    field.map_or(true, |s| s.trim().is_empty())
}

/// Accept text, numbers, or null for a field that is carried as text.
///
/// The data source is not consistent about quoting numeric marks, so a JSON
/// number is kept as its textual form and parsed later like any other mark.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

/// Like [`lenient_text`] but for identifiers that must be present.
pub(crate) fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_text(deserializer)?
        .ok_or_else(|| serde::de::Error::custom("identifier must not be null"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_entry_is_blank() {
        assert!(MarkEntry::default().is_blank());
    }

    #[test]
    fn test_whitespace_fields_are_blank() {
        let entry = MarkEntry {
            d: Some("  ".to_string()),
            e3: Some(String::new()),
            ..Default::default()
        };
        assert!(entry.is_blank());
    }

    #[test]
    fn test_submitted_zero_is_not_blank() {
        let entry = MarkEntry {
            p: Some("0".to_string()),
            ..Default::default()
        };
        assert!(!entry.is_blank());
    }

    #[test]
    fn test_parse_mixed_text_and_numbers() {
        let json = r#"{"D": 1.5, "P": "0.3", "E1": "8.1", "E2": 8, "E3": null}"#;
        let entry: MarkEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.d.as_deref(), Some("1.5"));
        assert_eq!(entry.p.as_deref(), Some("0.3"));
        assert_eq!(entry.e1.as_deref(), Some("8.1"));
        assert_eq!(entry.e2.as_deref(), Some("8"));
        assert_eq!(entry.e3, None);
        assert_eq!(entry.e4, None);
    }

    #[test]
    fn test_lowercase_aliases() {
        let json = r#"{"d": "2", "e4": "7.5"}"#;
        let entry: MarkEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.d.as_deref(), Some("2"));
        assert_eq!(entry.e4.as_deref(), Some("7.5"));
    }

    #[test]
    fn test_measures_order() {
        let entry = MarkEntry {
            e1: Some("1".to_string()),
            e4: Some("4".to_string()),
            ..Default::default()
        };
        assert_eq!(entry.measures(), [Some("1"), None, None, Some("4")]);
    }
}
