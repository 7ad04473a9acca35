//! Error types for prgate-github

use thiserror::Error;

/// Errors that can occur talking to the GitHub REST API
#[derive(Error, Debug)]
pub enum GithubError {
    /// Transport-level failure (DNS, TLS, connection, timeout)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Non-success status with a body that is not a merge response
    #[error("GitHub API returned {status} for {url}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Token cannot be sent as a header value
    #[error("invalid token: {0}")]
    InvalidToken(String),
}

impl From<reqwest::Error> for GithubError {
    fn from(err: reqwest::Error) -> Self {
        GithubError::Http(err.to_string())
    }
}

/// Result type for GitHub adapter operations
pub type Result<T> = std::result::Result<T, GithubError>;
