//! Domain-level error taxonomy for prgate.
//!
//! Validation itself never fails; these errors cover configuration,
//! collaborator I/O and report persistence.

/// prgate domain errors.
#[derive(Debug, thiserror::Error)]
pub enum PrGateError {
    #[error("invalid pattern for {field}: {source}")]
    InvalidPattern {
        field: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("pull request source error: {0}")]
    Source(String),

    #[error("merge error for PR #{number}: {message}")]
    Merge { number: u64, message: String },

    #[error("digest mismatch: expected {expected}, got {actual}")]
    DigestMismatch { expected: String, actual: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for prgate domain operations.
pub type Result<T> = std::result::Result<T, PrGateError>;
