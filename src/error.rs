use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResultSyncError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP request to {url} failed with status: {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Structure mismatch: {0}")]
    Structure(String),

    #[error("Credential missing: {0}")]
    CredentialMissing(String),

    #[error("Publish error: {0}")]
    Publish(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl ResultSyncError {
    /// Short failure label, logged as the `kind` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) | Self::HttpStatus { .. } => "network",
            Self::Structure(_) => "structure",
            Self::Config(_) => "config",
            Self::CredentialMissing(_) => "credential",
            Self::Publish(_) => "publish",
            Self::Other(_) => "other",
        }
    }

    pub fn structure(msg: impl Into<String>) -> Self {
        Self::Structure(msg.into())
    }

    pub fn publish(msg: impl Into<String>) -> Self {
        Self::Publish(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, ResultSyncError>;
