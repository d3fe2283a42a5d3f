// Library error types
//
// Failures are confined to the fetch boundary: normalization and resolution
// tolerate malformed input silently and never produce errors of their own.

/// Errors surfaced by the menu access layer
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("invalid source url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("upstream error: {0}")]
    Upstream(String),
}

impl From<reqwest::Error> for MenuError {
    fn from(err: reqwest::Error) -> Self {
        // Don't lose the reqwest detail, but collapse to a single variant so
        // callers only see one kind of transport failure
        MenuError::Fetch(err.to_string())
    }
}
