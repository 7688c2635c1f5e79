//! Engine module: CLI surface, progress display and path helpers around the pipeline

pub mod arg_parser;
pub mod cli;
pub mod parallel;
pub mod progress;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::{Cli, Commands, CommonArgs, RunRequest};
pub use cli::{build_config, handle_run};
pub use parallel::{normalize_num_proc, resolve_num_workers};
pub use tools::{ArchiveNaming, is_document_file, is_os_hidden_file, is_under_macos_metadata};
