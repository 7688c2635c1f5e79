//! Decompressor: unpack one zip archive, entry by entry, into a scratch directory.

use log::debug;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;
use zip::ZipArchive;

use crate::error::{DwkitError, Result};
use crate::types::ArchivePath;
use crate::utils::config::ENTRY_COPY_BUFFER_SIZE;

/// What one successful decompression produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecompressStats {
    pub entries: usize,
    pub bytes: u64,
}

/// Sum of uncompressed entry sizes from the central directory (no decompression).
pub fn uncompressed_size<R: Read + Seek>(zip: &mut ZipArchive<R>) -> zip::result::ZipResult<u64> {
    let mut total = 0_u64;
    for i in 0..zip.len() {
        total += zip.by_index_raw(i)?.size();
    }
    Ok(total)
}

/// Extract every entry of `archive` under `dest`, preserving relative paths.
///
/// `on_progress(done, total)` is called once before the first entry and after each entry,
/// with cumulative uncompressed bytes. Any failure to open the container or read an entry is
/// `ArchiveCorrupt`; entries already written stay in `dest` and the caller must discard it.
pub fn decompress<F>(archive: &ArchivePath, dest: &Path, mut on_progress: F) -> Result<DecompressStats>
where
    F: FnMut(u64, u64),
{
    let corrupt = |reason: String| DwkitError::archive_corrupt(&archive.path, reason);

    let file = File::open(&archive.path).map_err(|e| corrupt(e.to_string()))?;
    let mut zip = ZipArchive::new(BufReader::new(file)).map_err(|e| corrupt(e.to_string()))?;
    let total = uncompressed_size(&mut zip).map_err(|e| corrupt(e.to_string()))?;
    on_progress(0, total);

    let mut stats = DecompressStats::default();
    for i in 0..zip.len() {
        let mut entry = zip
            .by_index(i)
            .map_err(|e| corrupt(format!("entry #{i}: {e}")))?;
        let Some(rel) = entry.enclosed_name() else {
            return Err(corrupt(format!(
                "entry '{}' points outside the archive",
                entry.name()
            )));
        };
        let target = dest.join(rel);

        if entry.is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| DwkitError::io(format!("create {}", target.display()), e))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| DwkitError::io(format!("create {}", parent.display()), e))?;
            }
            let out = File::create(&target)
                .map_err(|e| DwkitError::io(format!("create {}", target.display()), e))?;
            let mut out = BufWriter::with_capacity(ENTRY_COPY_BUFFER_SIZE, out);
            io::copy(&mut entry, &mut out)
                .and_then(|_| out.flush())
                .map_err(|e| corrupt(format!("entry '{}': {e}", entry.name())))?;
        }

        stats.entries += 1;
        stats.bytes += entry.size();
        on_progress(stats.bytes, total);
    }

    debug!(
        "{}: {} entries, {} bytes",
        archive.name(),
        stats.entries,
        stats.bytes
    );
    Ok(stats)
}
