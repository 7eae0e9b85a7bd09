// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The source could not be opened or decoded. Aborts the extraction call.
    #[error("Unreadable source {}: {reason}", .path.display())]
    UnreadableSource { path: PathBuf, reason: String },

    /// A local structural problem. The offending label, row or page is skipped and
    /// extraction continues.
    #[error("Malformed structure in {} ({location}): {reason}", .path.display())]
    MalformedStructure {
        path: PathBuf,
        location: String,
        reason: String,
    },
}

impl ExtractError {
    pub fn unreadable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ExtractError::UnreadableSource {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, location: impl Into<String>, reason: impl ToString) -> Self {
        ExtractError::MalformedStructure {
            path: path.into(),
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
