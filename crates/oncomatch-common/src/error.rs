use thiserror::Error;

/// Error taxonomy for the matcher pipeline.
///
/// `Config` and `Mapping` are fatal and never retried. Soft conditions
/// (missing optional resources, unmapped stage codes) are logged by the
/// rules and do not surface here.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Mapping error: {0}")]
    Mapping(String),

    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Response parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, MatchError>;
