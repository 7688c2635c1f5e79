//! Archive and document locators: recursive walks filtered by file name.

use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use crate::engine::tools::{ArchiveNaming, is_document_file};
use crate::error::{DwkitError, Result};
use crate::types::{ArchivePath, Category, DocumentPath};

/// One result from a directory walk: either a file to consider or an error with optional path.
pub enum WalkOutcome {
    Ok(PathBuf),
    Err { msg: String, path: Option<PathBuf> },
}

/// Convert a walkdir result into [`WalkOutcome`]. Directories and other non-files yield `None`.
pub fn to_outcome_walkdir(r: walkdir::Result<walkdir::DirEntry>) -> Option<WalkOutcome> {
    match r {
        Ok(entry) if entry.file_type().is_file() => Some(WalkOutcome::Ok(entry.into_path())),
        Ok(_) => None,
        Err(err) => Some(WalkOutcome::Err {
            msg: format!("{}", err),
            path: err.path().map(PathBuf::from),
        }),
    }
}

/// Files kept by a walk plus the paths that could not be read.
#[derive(Debug, Default)]
pub struct WalkResult {
    pub paths: Vec<PathBuf>,
    pub skipped: Vec<(PathBuf, String)>,
}

/// Consume `iter`, keep files accepted by `include`, record unreadable entries.
/// Walk errors never abort: a missing subtree only shrinks the result.
pub fn run_walk_loop<I, F>(iter: I, include: F) -> WalkResult
where
    I: Iterator<Item = WalkOutcome>,
    F: Fn(&Path) -> bool,
{
    let mut result = WalkResult::default();
    for outcome in iter {
        match outcome {
            WalkOutcome::Ok(path) => {
                if include(&path) {
                    result.paths.push(path);
                }
            }
            WalkOutcome::Err { msg, path } => {
                let path = path.unwrap_or_else(|| PathBuf::from("<no-path>"));
                warn!("Cannot read {}: {}", path.display(), msg);
                result.skipped.push((path, msg));
            }
        }
    }
    result
}

fn walk_files<F>(root: &Path, include: F) -> WalkResult
where
    F: Fn(&Path) -> bool,
{
    let iter = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(to_outcome_walkdir);
    run_walk_loop(iter, include)
}

/// Archive locator: every archive under `root` whose name follows `naming`.
/// Empty when nothing matches; `RootNotFound` when `root` is not a directory.
/// Sorted by path so repeated runs visit archives in the same order.
pub fn find_archives(
    root: &Path,
    naming: ArchiveNaming,
    category: Category,
) -> Result<Vec<ArchivePath>> {
    ensure_root(root)?;
    let mut paths = walk_files(root, |p| naming.matches_path(p)).paths;
    paths.sort();
    debug!("Found {} archive(s) under {}", paths.len(), root.display());
    Ok(paths
        .into_iter()
        .map(|p| ArchivePath::new(p, category))
        .collect())
}

/// Document locator: every JSON document under `dir`, tagged with the archive it came from.
pub fn find_documents(dir: &Path, archive: Option<Arc<Path>>) -> Vec<DocumentPath> {
    walk_files(dir, is_document_file)
        .paths
        .into_iter()
        .map(|p| DocumentPath::new(p, archive.clone()))
        .collect()
}

/// `RootNotFound` unless `root` is an existing directory.
pub fn ensure_root(root: &Path) -> Result<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(DwkitError::RootNotFound(root.to_path_buf()))
    }
}
