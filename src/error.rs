//! Error taxonomy for the extraction pipeline.
//!
//! Fatal conditions (`RootNotFound`, `UnsupportedTarget`) abort a run before any work.
//! `ArchiveCorrupt` and `MalformedDocument` are scoped to one archive or one document;
//! the orchestrator decides whether they skip or abort (see [`PipelineConfig::strict`](crate::PipelineConfig)).

use std::path::PathBuf;
use thiserror::Error;

use crate::types::Category;

#[derive(Error, Debug)]
pub enum DwkitError {
    #[error("data root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("corrupt archive {}: {reason}", archive.display())]
    ArchiveCorrupt { archive: PathBuf, reason: String },

    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("dataset '{dataset}' has no {category} data")]
    UnsupportedTarget {
        dataset: &'static str,
        category: Category,
    },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("worker task panicked: {0}")]
    TaskPanicked(String),

    #[error("run cancelled; partial output was flushed")]
    Cancelled,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DwkitError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedDocument(reason.into())
    }

    pub fn archive_corrupt(archive: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ArchiveCorrupt {
            archive: archive.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for DwkitError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedDocument(e.to_string())
    }
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, DwkitError>;
