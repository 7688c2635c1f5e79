//! Path and naming utilities

use std::path::{Component, Path};

use crate::types::Category;
use crate::utils::config::Naming;

/// How a dataset names the archives that belong to one category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveNaming {
    /// Every `*.zip` under the root.
    AnyZip,
    /// Split archives ending in `<T|V><marker>1.zip`, e.g. `TL1.zip` or `VS1.zip`.
    Split { marker: char },
}

impl ArchiveNaming {
    pub fn split(category: Category) -> Self {
        ArchiveNaming::Split {
            marker: category.archive_marker(),
        }
    }

    pub fn matches(&self, file_name: &str) -> bool {
        let Some(stem) = file_name
            .strip_suffix(Naming::ARCHIVE_EXTENSION)
            .and_then(|s| s.strip_suffix('.'))
        else {
            return false;
        };
        match self {
            ArchiveNaming::AnyZip => !stem.is_empty(),
            ArchiveNaming::Split { marker } => {
                let mut tail = stem.chars().rev();
                tail.next() == Some(Naming::ARCHIVE_VERSION)
                    && tail.next() == Some(*marker)
                    && tail
                        .next()
                        .is_some_and(|c| Naming::SPLIT_PREFIXES.contains(&c))
            }
        }
    }

    /// Match on the final path component.
    pub fn matches_path(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| self.matches(n))
    }
}

/// Check if a file should be excluded based on OS-specific hidden files
pub fn is_os_hidden_file(path: &Path) -> bool {
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        match name {
            // macOS
            ".DS_Store" | ".AppleDouble" | ".LSOverride" => true,
            // Windows
            "Thumbs.db" | "ehthumbs.db" | "Desktop.ini" => true,
            // Linux
            ".directory" => true,
            _ => {
                // macOS resource fork files start with ._
                name.starts_with("._")
            }
        }
    } else {
        false
    }
}

/// True if any component is the `__MACOSX` metadata directory zip tools on macOS add.
pub fn is_under_macos_metadata(path: &Path) -> bool {
    path.components().any(|c| match c {
        Component::Normal(name) => name == Naming::MACOS_METADATA_DIR,
        _ => false,
    })
}

/// True for a `.json` file that holds a real document (not an OS artefact).
pub fn is_document_file(path: &Path) -> bool {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(Naming::DOCUMENT_EXTENSION));
    is_json && !is_os_hidden_file(path) && !is_under_macos_metadata(path)
}
