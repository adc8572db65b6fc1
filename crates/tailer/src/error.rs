use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TailError {
    #[error("Log file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to create backup file at {}: {source}", path.display())]
    BackupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl TailError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TailError::Io { path: path.into(), source }
    }

    /// True when the caller should answer with a "not found" status rather
    /// than a generic failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TailError::NotFound(_))
    }
}

/// Raised by the streaming dispatcher once the consumer has gone away.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Stream consumer disconnected")]
    Disconnected,
    #[error("Failed to encode frame payload: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type TailResult<T> = Result<T, TailError>;
