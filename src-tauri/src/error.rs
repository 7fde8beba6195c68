use crate::models::scan_types::Category;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error returned across the command boundary to the front end.
#[derive(Debug, Serialize)]
pub struct AppError {
    pub message: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{name} is not an image (declared type: {mime_type:?})")]
    RejectedFile { name: String, mime_type: String },
    #[error("An analysis is already running")]
    Busy,
    #[error("{name} could not be decoded: {source}")]
    Encoding {
        name: String,
        #[source]
        source: base64::DecodeError,
    },
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No candidate labels for {0}")]
    NoCandidates(Category),
    #[error("Classifier returned a result for {actual} while {expected} was requested")]
    CategoryMismatch { expected: Category, actual: Category },
    #[error("Classifier backend failed: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        AppError {
            message: err.to_string(),
        }
    }
}
