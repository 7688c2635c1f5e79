//! Application configuration constants.
//! Defaults, naming conventions and tuning in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    config_filename: String,
    workspace_prefix: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                config_filename: format!(".{pkg}.toml"),
                workspace_prefix: format!(".{pkg}-"),
            }
        })
    }

    /// Per-dataset config file looked up in the data root (e.g. `.dwkit.toml`).
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// Prefix of the run-scoped scratch directory created under the temp root.
    pub fn workspace_prefix(&self) -> &str {
        &self.workspace_prefix
    }
}

// ---- Defaults ----

/// Built-in defaults, lowest layer under `.dwkit.toml`, env and CLI.
pub struct Defaults;

impl Defaults {
    pub const TEMP_DIR: &'static str = "./temp";
    pub const WEB_DATA_CORPUS_OUTPUT: &'static str = "./data/web_data_corpus.txt";
    pub const KOREAN_SNS_OUTPUT: &'static str = "./data/korean_sns.txt";
}

// ---- Naming conventions ----

/// Archive and document file naming.
pub struct Naming;

impl Naming {
    pub const ARCHIVE_EXTENSION: &'static str = "zip";
    pub const DOCUMENT_EXTENSION: &'static str = "json";
    /// Leading letters of split archives: `T`raining and `V`alidation.
    pub const SPLIT_PREFIXES: [char; 2] = ['T', 'V'];
    /// Only version 1 archives (`TL1.zip`, `VS1.zip`) are part of a release.
    pub const ARCHIVE_VERSION: char = '1';
    /// Directory macOS zip tools add next to the real entries.
    pub const MACOS_METADATA_DIR: &'static str = "__MACOSX";
}

// ---- Worker threads ----

/// Worker count bounds. Use [`WorkerThreadLimits::current()`] to fill `all_threads` from rayon.
#[derive(Clone, Copy, Debug)]
pub struct WorkerThreadLimits {
    /// Available threads (from rayon); set by [`WorkerThreadLimits::current()`].
    pub all_threads: usize,
    /// Never run fewer workers than this.
    pub floor: usize,
}

impl Default for WorkerThreadLimits {
    fn default() -> Self {
        Self {
            all_threads: 0, // use current() to set from rayon
            floor: Self::FLOOR_THREADS,
        }
    }
}

impl WorkerThreadLimits {
    pub const FLOOR_THREADS: usize = 1;

    /// Build limits with `all_threads` set from `rayon::current_num_threads()`.
    pub fn current() -> Self {
        Self {
            all_threads: rayon::current_num_threads(),
            ..Self::default()
        }
    }
}

// ---- Channels ----

/// Pending documents buffered per worker. Workers discard whatever is still queued once the
/// run is cancelled.
pub const DOCUMENTS_PER_WORKER_IN_FLIGHT: usize = 2;

// ---- Progress ----

/// Progress bar tuning.
pub struct ProgressConsts;

impl ProgressConsts {
    /// Redraw the byte bar at most once per this many extracted bytes (8 MB).
    pub const BYTES_REFRESH_STEP: u64 = 8 * 1024 * 1024;
}

// ---- Extraction ----

/// Read buffer for copying one zip entry to disk (bytes). 256 KB.
pub const ENTRY_COPY_BUFFER_SIZE: usize = 256 * 1024;
