pub mod config;
pub mod dwkit_toml;
pub mod fd_limit;
pub mod logger;
pub mod tempfiles;

pub use config::*;
pub use dwkit_toml::{apply_file_to_config, load_dwkit_toml, parse_dwkit_toml};
pub use fd_limit::{FDS_PER_WORKER, cap_workers_by_fd_limit, max_open_fds, max_workers_by_fd_limit};
pub use logger::{Colors, setup_logging};
pub use tempfiles::{Workspace, ensure_output_file, remove_archive_dir};
