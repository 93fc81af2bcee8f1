use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("{context}: {source}")]
    IoContext {
        context: String,
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("failed to serialize JSON: {source}")]
    JsonSerialize { source: serde_json::Error },

    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    Message(String),
}

impl AppError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn json(path: &Path, source: serde_json::Error) -> Self {
        AppError::Json {
            path: path.display().to_string(),
            source,
        }
    }
}
