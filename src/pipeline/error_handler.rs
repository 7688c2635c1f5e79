use log::{info, warn};

use crate::error::DwkitError;
use crate::types::{DocumentPath, RunSummary, SkippedDocument};
use crate::utils::Colors;

/// Attach the document path to a per-document failure so an aborted run names its culprit.
pub fn with_document_context(error: DwkitError, document: &DocumentPath) -> DwkitError {
    match error {
        DwkitError::MalformedDocument(reason) => {
            DwkitError::MalformedDocument(format!("{}: {}", document.path.display(), reason))
        }
        DwkitError::TaskPanicked(msg) => {
            DwkitError::TaskPanicked(format!("{}: {}", document.path.display(), msg))
        }
        other => other,
    }
}

pub fn skipped_document(document: &DocumentPath, error: &DwkitError) -> SkippedDocument {
    SkippedDocument {
        path: document.path.clone(),
        archive: document.archive.as_ref().map(|a| a.to_path_buf()),
        reason: error.to_string(),
    }
}

/// Log skipped documents and failed archives after a run. Individual paths only when verbose.
pub fn report_skipped(summary: &RunSummary, verbose: bool) {
    for failed in &summary.failed_archives {
        warn!("Archive skipped: {} ({})", failed.path.display(), failed.reason);
    }
    let skipped = summary.documents_skipped();
    if skipped > 0 {
        warn!("Skipped {} document(s) that could not be parsed or extracted", skipped);
        if verbose {
            for doc in &summary.skipped_documents {
                match &doc.archive {
                    Some(archive) => eprintln!(
                        "  skipped: {} (from {}): {}",
                        doc.path.display(),
                        archive.display(),
                        doc.reason
                    ),
                    None => eprintln!("  skipped: {}: {}", doc.path.display(), doc.reason),
                }
            }
        }
    }
}

/// One-line run summary at info level.
pub fn log_summary(summary: &RunSummary) {
    info!(
        "Archives: {}/{} | {} | {} | {} | {} lines",
        summary.archives_processed,
        summary.archives_found,
        Colors::colorize(
            Colors::EXTRACTED,
            &format!("Extracted: {}", summary.documents_extracted)
        ),
        Colors::colorize(
            Colors::SKIPPED,
            &format!("Skipped: {}", summary.documents_skipped())
        ),
        Colors::colorize(
            Colors::FAILED,
            &format!("Failed archives: {}", summary.failed_archives.len())
        ),
        summary.lines_written
    );
}
