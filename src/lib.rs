//! dwkit: turn zipped JSON dataset releases into a flat, one-sentence-per-line text corpus.

pub mod dataset;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use dataset::{Dataset, ExtractionStrategy, KoreanSns, WebDataCorpus};
pub use error::{DwkitError, Result};
pub use pipeline::{CancelToken, Pipeline, PipelineState};

use log::warn;

/// Single entry point: build a [`Pipeline`] for `strategy`, run it, and always reclaim the
/// scratch workspace afterwards.
///
/// Fails before any document is read with `UnsupportedTarget` (category not shipped by the
/// dataset) or `RootNotFound`. Corrupt archives and bad documents are skipped and reported in
/// the returned [`RunSummary`] unless `config.strict` is set.
///
/// ```ignore
/// let config = dwkit::PipelineConfig::new("/data/aihub/624", "corpus.txt");
/// let summary = dwkit::extract_corpus(config, dwkit::Dataset::WebDataCorpus, &dwkit::CancelToken::new())?;
/// println!("{} lines", summary.lines_written);
/// ```
pub fn extract_corpus<S: ExtractionStrategy>(
    config: PipelineConfig,
    strategy: S,
    cancel: &CancelToken,
) -> Result<RunSummary> {
    let mut pipeline = Pipeline::new(config, strategy)?;
    let result = pipeline.run(cancel);
    if let Err(e) = pipeline.close() {
        warn!("{}", e);
    }
    result
}
