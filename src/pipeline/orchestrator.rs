//! Pipeline orchestrator: discovery, then per archive decompress → extract → clean.
//!
//! One archive is expanded at a time. Archive N+1 is not opened until archive N's documents
//! have been extracted and deleted, which bounds scratch disk usage to the largest archive.

use log::{debug, info, warn};
use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;

use crate::dataset::{ExtractionStrategy, ensure_supported};
use crate::engine::progress::{DecompressProgress, DocumentProgress};
use crate::error::{DwkitError, Result};
use crate::pipeline::context::{CancelToken, PipelineTuning};
use crate::pipeline::decompress::decompress;
use crate::pipeline::error_handler::{
    log_summary, report_skipped, skipped_document, with_document_context,
};
use crate::pipeline::parser::read_document;
use crate::pipeline::sink::OutputSink;
use crate::pipeline::walk::{ensure_root, find_archives, find_documents};
use crate::pipeline::workers::{TaskOutcome, WorkerPool};
use crate::types::{DocumentPath, FailedArchive, PipelineConfig, RunSummary};
use crate::utils::tempfiles::{Workspace, ensure_output_file, remove_archive_dir};

/// Where the orchestrator is. `Done` and `Failed` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Discovering,
    Decompressing,
    Extracting,
    Cleaning,
    Done,
    Failed,
}

impl PipelineState {
    fn advance(&mut self, next: PipelineState) {
        debug!("state: {:?} -> {:?}", self, next);
        *self = next;
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }
}

/// Single-use pipeline over one dataset strategy.
pub struct Pipeline<S: ExtractionStrategy> {
    config: PipelineConfig,
    strategy: S,
    pool: WorkerPool,
    workspace: Option<Workspace>,
    state: PipelineState,
    summary: RunSummary,
}

impl<S: ExtractionStrategy> Pipeline<S> {
    /// Validate the category, create the output file and, when unzipping, the scratch workspace.
    /// Fails with `UnsupportedTarget` before touching the filesystem.
    pub fn new(config: PipelineConfig, strategy: S) -> Result<Self> {
        ensure_supported(&strategy, config.category)?;
        ensure_output_file(&config.output)?;
        let workspace = if config.unzip {
            Some(Workspace::create(&config.temp_root)?)
        } else {
            None
        };
        let pool = WorkerPool::new(PipelineTuning::resolve(config.num_workers));
        debug!(
            "{} CONFIG:{:#?}",
            env!("CARGO_PKG_NAME").to_uppercase(),
            config
        );
        Ok(Self {
            config,
            strategy,
            pool,
            workspace,
            state: PipelineState::Idle,
            summary: RunSummary::default(),
        })
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Counters of the last run. Filled on failure and cancellation too, with partial counts.
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Scratch directory of this run, if decompression is enabled.
    pub fn workspace_path(&self) -> Option<&Path> {
        self.workspace.as_ref().map(|w| w.path())
    }

    /// Run to completion. Output is flushed on every path; the workspace stays until [`Self::close`].
    pub fn run(&mut self, cancel: &CancelToken) -> Result<RunSummary> {
        if self.state != PipelineState::Idle {
            return Err(DwkitError::Config(format!(
                "pipeline already ran (state {:?})",
                self.state
            )));
        }
        let result = self.run_inner(cancel);
        let terminal = if result.is_ok() {
            PipelineState::Done
        } else {
            PipelineState::Failed
        };
        self.state.advance(terminal);
        result
    }

    /// Remove the scratch workspace.
    pub fn close(mut self) -> Result<()> {
        match self.workspace.take() {
            Some(workspace) => workspace.close(),
            None => Ok(()),
        }
    }

    fn run_inner(&mut self, cancel: &CancelToken) -> Result<RunSummary> {
        self.state.advance(PipelineState::Discovering);
        ensure_root(&self.config.data_root)?;

        // Strict mode cancels this child; the caller's token is only read.
        let run_cancel = cancel.child();
        let mut sink = OutputSink::open(&self.config.output)?;
        let mut summary = RunSummary::default();

        let outcome = if self.config.unzip {
            self.run_with_unzip(&mut sink, &mut summary, &run_cancel)
        } else {
            self.run_without_unzip(&mut sink, &mut summary, &run_cancel)
        };
        let flushed = sink.finish();
        summary.lines_written = *flushed.as_ref().unwrap_or(&0);

        report_skipped(&summary, self.config.verbose);
        log_summary(&summary);
        self.summary = summary.clone();
        outcome?;
        flushed?;
        if cancel.is_cancelled() {
            return Err(DwkitError::Cancelled);
        }
        Ok(summary)
    }

    fn run_with_unzip(
        &mut self,
        sink: &mut OutputSink,
        summary: &mut RunSummary,
        cancel: &CancelToken,
    ) -> Result<()> {
        let category = self.config.category;
        let naming = self.strategy.archive_naming(category);
        let archives = find_archives(&self.config.data_root, naming, category)?;
        summary.archives_found = archives.len();
        if archives.is_empty() {
            warn!(
                "No {} archives for {} under {}",
                category,
                self.strategy.name(),
                self.config.data_root.display()
            );
        }
        let workspace = self
            .workspace
            .as_ref()
            .ok_or_else(|| DwkitError::Config("unzip enabled without a workspace".into()))?;

        for (index, archive) in archives.iter().enumerate() {
            if cancel.is_cancelled() {
                info!(
                    "Stopping before {} ({} archive(s) left)",
                    archive.name(),
                    archives.len() - index
                );
                break;
            }

            self.state.advance(PipelineState::Decompressing);
            let dir = workspace.archive_dir(index)?;
            let mut progress = DecompressProgress::new(self.config.show_progress, &archive.name());
            let unpacked = decompress(archive, &dir, |done, total| progress.observe(done, total));
            progress.finish();
            let stats = match unpacked {
                Ok(stats) => stats,
                Err(e) => {
                    warn!("Skipping archive {}: {}", archive.path.display(), e);
                    summary.failed_archives.push(FailedArchive {
                        path: archive.path.clone(),
                        reason: e.to_string(),
                    });
                    remove_archive_dir(&dir);
                    continue;
                }
            };
            summary.bytes_decompressed += stats.bytes;

            self.state.advance(PipelineState::Extracting);
            let owner: Arc<Path> = Arc::from(archive.path.as_path());
            let documents = find_documents(&dir, Some(owner));
            summary.documents_found += documents.len();
            let extracted = self.extract_batch(&documents, &archive.name(), sink, summary, cancel);

            self.state.advance(PipelineState::Cleaning);
            let removed = delete_documents(&documents);
            remove_archive_dir(&dir);
            debug!("{}: removed {} document(s)", archive.name(), removed);

            extracted?;
            sink.flush()?;
            if cancel.is_cancelled() {
                info!("{}: cancelled before all documents ran", archive.name());
            } else {
                summary.archives_processed += 1;
            }
        }
        Ok(())
    }

    fn run_without_unzip(
        &mut self,
        sink: &mut OutputSink,
        summary: &mut RunSummary,
        cancel: &CancelToken,
    ) -> Result<()> {
        let documents = find_documents(&self.config.data_root, None);
        summary.documents_found = documents.len();
        self.state.advance(PipelineState::Extracting);
        self.extract_batch(&documents, "documents", sink, summary, cancel)
    }

    /// Parse + extract `documents` on the pool, writing each batch as it completes.
    /// Returns an error only for conditions that abort the run: sink failure, or any
    /// document failure in strict mode.
    fn extract_batch(
        &self,
        documents: &[DocumentPath],
        label: &str,
        sink: &mut OutputSink,
        summary: &mut RunSummary,
        cancel: &CancelToken,
    ) -> Result<()> {
        let strategy = &self.strategy;
        let category = self.config.category;
        let strict = self.config.strict;
        let mut progress = DocumentProgress::new(
            self.config.show_progress,
            documents.len(),
            format!("{label} extracting"),
        );
        let mut fatal: Option<DwkitError> = None;
        let mut sink_broken = false;

        let report = self.pool.run(
            documents,
            cancel,
            |document| {
                let parsed = read_document(document)?;
                strategy.extract(&parsed, category)
            },
            |outcome| {
                progress.advance();
                match outcome {
                    // Documents that finish after a strict abort are still written.
                    TaskOutcome::Completed { output, .. } => {
                        if sink_broken {
                            return;
                        }
                        match sink.write_batch(&output) {
                            Ok(_) => summary.documents_extracted += 1,
                            Err(e) => {
                                sink_broken = true;
                                if fatal.is_none() {
                                    fatal = Some(e);
                                }
                                cancel.cancel();
                            }
                        }
                    }
                    TaskOutcome::Failed { document, error } => {
                        warn!("Skipping {}: {}", document.path.display(), error);
                        summary
                            .skipped_documents
                            .push(skipped_document(&document, &error));
                        if strict && fatal.is_none() {
                            fatal = Some(with_document_context(error, &document));
                            cancel.cancel();
                        }
                    }
                }
            },
        );
        progress.finish();
        debug!(
            "{}: {} submitted, {} completed, {} failed",
            label, report.submitted, report.completed, report.failed
        );
        match fatal {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Delete decompressed documents. Source files (no owning archive) are never touched.
/// Failures are logged; returns how many files were removed.
pub fn delete_documents(documents: &[DocumentPath]) -> usize {
    documents
        .par_iter()
        .filter(|d| d.from_decompression())
        .filter(|d| match std::fs::remove_file(&d.path) {
            Ok(()) => true,
            Err(e) => {
                warn!("Could not delete {}: {}", d.path.display(), e);
                false
            }
        })
        .count()
}
