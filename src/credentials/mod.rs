use thiserror::Error;

/// Environment variable holding the bearer token for the HTTP source
pub const ENV_TOKEN_VAR: &str = "MARK_TALLY_TOKEN";

#[derive(Debug, Error, PartialEq)]
pub enum CredentialError {
    #[error("No API token provided. Pass --token or set {}", ENV_TOKEN_VAR)]
    TokenNotFound,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Check for a token in the MARK_TALLY_TOKEN environment variable.
/// Returns Some(token) if the env var is set and non-empty, None otherwise.
pub fn get_token_from_env() -> Option<String> {
    std::env::var(ENV_TOKEN_VAR).ok().as_deref().and_then(non_empty)
}

/// Pick the token for this run. An explicit flag wins over the environment.
pub fn resolve_token(flag: Option<&str>) -> Result<String, CredentialError> {
    resolve_token_from(flag, get_token_from_env())
}

fn resolve_token_from(flag: Option<&str>, env: Option<String>) -> Result<String, CredentialError> {
    flag.and_then(non_empty)
        .or(env)
        .ok_or(CredentialError::TokenNotFound)
}
