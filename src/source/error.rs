use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Unauthorized - token may be invalid or expired")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limited - please wait before retrying")]
    RateLimited,

    #[error("Server error: {0}")]
    Server(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid snapshot data in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl SourceError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 | 403 => SourceError::Unauthorized,
            404 => SourceError::NotFound(truncated),
            429 => SourceError::RateLimited,
            500..=599 => SourceError::Server(truncated),
            _ => SourceError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }

    /// Worth another attempt: rate limits, server errors and network failures.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            SourceError::RateLimited | SourceError::Server(_) | SourceError::Network(_)
        )
    }

    /// The snapshot itself could not be read or understood.
    pub fn is_input(&self) -> bool {
        matches!(self, SourceError::Io { .. } | SourceError::Parse { .. })
    }
}
