use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JetpackError {
    #[error("invalid action {0}: expected 0 (idle) or 1 (thrust)")]
    InvalidAction(i64),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, JetpackError>;
