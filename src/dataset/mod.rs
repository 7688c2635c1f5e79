//! Dataset-specific extraction: which archives belong to a run and which fields become lines.
//!
//! The pipeline is generic over [`ExtractionStrategy`]; [`Dataset`] picks a built-in strategy
//! from configuration.

pub mod korean_sns;
pub mod lines;
pub mod web_corpus;

pub use korean_sns::KoreanSns;
pub use lines::{LineCollector, clean_line};
pub use web_corpus::WebDataCorpus;

use crate::engine::tools::ArchiveNaming;
use crate::error::{DwkitError, Result};
use crate::pipeline::parser::StructuredDocument;
use crate::types::Category;

/// Maps one decoded document to corpus lines for one dataset family.
///
/// Implementations are pure: no I/O, no shared state. They run concurrently on pool workers.
pub trait ExtractionStrategy: Send + Sync {
    /// Stable name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Categories this dataset ships.
    fn categories(&self) -> &'static [Category];

    fn supports(&self, category: Category) -> bool {
        self.categories().contains(&category)
    }

    /// Archive file naming for `category`.
    fn archive_naming(&self, category: Category) -> ArchiveNaming;

    /// Extract lines in document order. Lines never contain a newline or the redaction marker.
    fn extract(&self, document: &StructuredDocument, category: Category) -> Result<Vec<String>>;
}

pub(crate) fn unsupported<S: ExtractionStrategy + ?Sized>(strategy: &S, category: Category) -> DwkitError {
    DwkitError::UnsupportedTarget {
        dataset: strategy.name(),
        category,
    }
}

/// Fail fast when `category` can never be extracted for this dataset.
pub fn ensure_supported<S: ExtractionStrategy + ?Sized>(strategy: &S, category: Category) -> Result<()> {
    if strategy.supports(category) {
        Ok(())
    } else {
        Err(unsupported(strategy, category))
    }
}

/// Built-in datasets, selectable from the CLI or config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dataset {
    WebDataCorpus,
    KoreanSns,
}

impl ExtractionStrategy for Dataset {
    fn name(&self) -> &'static str {
        match self {
            Dataset::WebDataCorpus => WebDataCorpus.name(),
            Dataset::KoreanSns => KoreanSns.name(),
        }
    }

    fn categories(&self) -> &'static [Category] {
        match self {
            Dataset::WebDataCorpus => WebDataCorpus.categories(),
            Dataset::KoreanSns => KoreanSns.categories(),
        }
    }

    fn archive_naming(&self, category: Category) -> ArchiveNaming {
        match self {
            Dataset::WebDataCorpus => WebDataCorpus.archive_naming(category),
            Dataset::KoreanSns => KoreanSns.archive_naming(category),
        }
    }

    fn extract(&self, document: &StructuredDocument, category: Category) -> Result<Vec<String>> {
        match self {
            Dataset::WebDataCorpus => WebDataCorpus.extract(document, category),
            Dataset::KoreanSns => KoreanSns.extract(document, category),
        }
    }
}
