use super::Config;

/// Separators that cannot occur inside a number, count or flag cell, which
/// are written without quoting
pub const ALLOWED_SEPARATORS: &[char] = &[',', ';', '\t', '|'];

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let ranking = &config.ranking;
    if ranking.group_top_n == 0 {
        errors.push("ranking.group_top_n: must be at least 1".to_string());
    }
    if ranking.overall_top_k == 0 {
        errors.push("ranking.overall_top_k: must be at least 1".to_string());
    }
    if ranking.team_size == 0 {
        errors.push("ranking.team_size: must be at least 1".to_string());
    }

    let separator = &config.export.separator;
    if separator.chars().count() != 1 {
        errors.push(format!(
            "export.separator: must be a single character, got '{}'",
            separator
        ));
    } else if !ALLOWED_SEPARATORS.contains(&config.export.separator_char()) {
        errors.push(format!(
            "export.separator: '{}' is not supported, use one of , ; | or a tab",
            separator.escape_default()
        ));
    }

    let source = &config.source;
    if let Err(e) = source.timeout() {
        errors.push(format!("source.timeout: invalid '{}' - {}", source.timeout, e));
    }
    if !(source.base_url.starts_with("http://") || source.base_url.starts_with("https://")) {
        errors.push(format!(
            "source.base_url: must start with http:// or https://, got '{}'",
            source.base_url
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
