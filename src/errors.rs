use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: StorageFault,
    },

    #[error("Storage task did not complete: {0}")]
    Interrupted(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Underlying cause of a storage failure. Reading, writing and parsing all
/// surface through the same `AppError::Storage` variant.
#[derive(Debug, Error)]
pub enum StorageFault {
    #[error("I/O error while accessing a file or resource: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed contact data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification for callers that map outcomes onto a response
/// protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Storage,
    Config,
}

impl AppError {
    pub fn storage(path: impl Into<PathBuf>, source: impl Into<StorageFault>) -> Self {
        AppError::Storage {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::Storage { .. } | AppError::Interrupted(_) => ErrorKind::Storage,
            AppError::Config(_) => ErrorKind::Config,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
