//! Public and internal types for the dwkit API and pipeline.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::utils::config::Defaults;

/// Which half of a dataset is read: annotated label files or raw source files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    #[serde(alias = "라벨링")]
    #[value(alias = "라벨링")]
    Label,
    #[serde(alias = "원천")]
    #[value(alias = "원천")]
    Source,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Label => "label",
            Category::Source => "source",
        }
    }

    /// Letter used in split archive names (`TL1.zip`, `VS1.zip`, ...).
    pub fn archive_marker(&self) -> char {
        match self {
            Category::Label => 'L',
            Category::Source => 'S',
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One compressed container found under the data root.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArchivePath {
    pub path: PathBuf,
    pub category: Category,
}

impl ArchivePath {
    pub fn new(path: impl Into<PathBuf>, category: Category) -> Self {
        Self {
            path: path.into(),
            category,
        }
    }

    /// File name for logs and progress bars; falls back to the full path.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// One JSON document on disk. `archive` points back at the container it was unpacked from;
/// `None` means the file is source data read in place and must never be deleted.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    pub path: PathBuf,
    pub archive: Option<Arc<Path>>,
}

impl DocumentPath {
    pub fn new(path: impl Into<PathBuf>, archive: Option<Arc<Path>>) -> Self {
        Self {
            path: path.into(),
            archive,
        }
    }

    pub fn from_decompression(&self) -> bool {
        self.archive.is_some()
    }
}

/// Run configuration. Captured once when the pipeline is built and never mutated.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Directory holding archives (or already-expanded documents when `unzip` is false).
    pub data_root: PathBuf,
    /// Corpus file; created if absent, always appended to.
    pub output: PathBuf,
    /// Directory under which the run's private scratch workspace is created.
    pub temp_root: PathBuf,
    pub category: Category,
    /// Decompress archives. When false, documents are read directly from `data_root`.
    pub unzip: bool,
    /// Worker count. `None` uses every available core.
    pub num_workers: Option<usize>,
    /// Abort the run on the first document failure instead of skipping it.
    pub strict: bool,
    /// Draw kdam progress bars on stderr.
    pub show_progress: bool,
    /// List every skipped document in the end-of-run report.
    pub verbose: bool,
}

impl PipelineConfig {
    /// Config with defaults for everything but the two required paths.
    pub fn new(data_root: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
            output: output.into(),
            temp_root: PathBuf::from(Defaults::TEMP_DIR),
            category: Category::Label,
            unzip: true,
            num_workers: None,
            strict: false,
            show_progress: false,
            verbose: false,
        }
    }
}

/// Archive that could not be unpacked; its documents produced no output.
#[derive(Clone, Debug)]
pub struct FailedArchive {
    pub path: PathBuf,
    pub reason: String,
}

/// Document whose parse or extraction failed and was skipped.
#[derive(Clone, Debug)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub archive: Option<PathBuf>,
    pub reason: String,
}

/// Counters and failure lists for one completed run.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    pub archives_found: usize,
    pub archives_processed: usize,
    pub failed_archives: Vec<FailedArchive>,
    pub documents_found: usize,
    pub documents_extracted: usize,
    pub skipped_documents: Vec<SkippedDocument>,
    pub lines_written: usize,
    pub bytes_decompressed: u64,
}

impl RunSummary {
    pub fn documents_skipped(&self) -> usize {
        self.skipped_documents.len()
    }
}
