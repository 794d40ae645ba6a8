//! Error kinds for loading and writing a single blueprint document.
//!
//! Schema problems are not errors here: they are collected as findings by the
//! gate runner so one run reports every defect at once.
use std::path::PathBuf;
use thiserror::Error;

/// Failure to load or persist one document.
#[derive(Error, Debug)]
pub enum BlueprintError {
    /// The input path does not exist.
    #[error("file not found at {}", .path.display())]
    MissingFile { path: PathBuf },

    /// The content is not a parseable JSON document of the expected shape.
    #[error("invalid JSON in {} - {detail}", .path.display())]
    MalformedInput { path: PathBuf, detail: String },

    /// The file exists but could not be read.
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing an emitted artifact failed.
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A derived view could not be serialized.
    #[error("failed to serialize {name}")]
    Serialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

impl BlueprintError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, detail: impl ToString) -> Self {
        BlueprintError::MalformedInput {
            path: path.into(),
            detail: detail.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BlueprintError>;
