//! Scratch space for decompression and the output file the run appends to.

use log::{debug, warn};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::error::{DwkitError, Result};
use crate::utils::config::PackagePaths;

/// Run-scoped scratch directory under the configured temp root.
///
/// Every archive gets its own sub-directory so one archive's documents never share a
/// directory with the next. The whole tree is removed by [`Workspace::close`], or by drop
/// if the run unwinds early.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create `temp_root` if missing and a fresh private directory inside it.
    pub fn create(temp_root: &Path) -> Result<Self> {
        fs::create_dir_all(temp_root).map_err(|e| {
            DwkitError::io(format!("create temp root {}", temp_root.display()), e)
        })?;
        let dir = tempfile::Builder::new()
            .prefix(PackagePaths::get().workspace_prefix())
            .tempdir_in(temp_root)
            .map_err(|e| {
                DwkitError::io(format!("create workspace in {}", temp_root.display()), e)
            })?;
        debug!("Workspace at {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Fresh, empty directory for the `index`-th archive.
    pub fn archive_dir(&self, index: usize) -> Result<PathBuf> {
        let path = self.dir.path().join(format!("archive-{index:05}"));
        if path.exists() {
            remove_archive_dir(&path);
        }
        fs::create_dir(&path)
            .map_err(|e| DwkitError::io(format!("create {}", path.display()), e))?;
        Ok(path)
    }

    /// Remove the workspace. Failure is reported, the directory is left for the OS to reap.
    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir
            .close()
            .map_err(|e| DwkitError::io(format!("remove workspace {}", path.display()), e))
    }
}

/// Remove one archive's scratch directory (anything left after its documents were deleted).
/// Logged, never fatal.
pub fn remove_archive_dir(path: &Path) {
    if let Err(e) = fs::remove_dir_all(path)
        && e.kind() != std::io::ErrorKind::NotFound
    {
        warn!("Could not remove scratch dir {}: {}", path.display(), e);
    }
}

/// Make sure the output file (and its parent directory) exists before any worker starts.
pub fn ensure_output_file(output: &Path) -> Result<()> {
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .map_err(|e| DwkitError::io(format!("create {}", parent.display()), e))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(output)
        .map_err(|e| DwkitError::io(format!("create output {}", output.display()), e))?;
    Ok(())
}
