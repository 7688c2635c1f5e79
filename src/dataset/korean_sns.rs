//! Korean SNS dialogue corpus. Label data only: the release ships no source files.
//!
//! Utterances mask personal information with `#`-delimited tags.

use serde::Deserialize;

use super::lines::LineCollector;
use super::{ExtractionStrategy, unsupported};
use crate::engine::tools::ArchiveNaming;
use crate::error::Result;
use crate::pipeline::parser::StructuredDocument;
use crate::types::Category;

pub const MASK_MARKER: &str = "#";

#[derive(Deserialize)]
struct SnsDocument<'a> {
    #[serde(borrow)]
    data: Vec<Dialogue<'a>>,
}

#[derive(Deserialize)]
struct Dialogue<'a> {
    #[serde(borrow)]
    body: Vec<Turn<'a>>,
}

#[derive(Deserialize)]
struct Turn<'a> {
    utterance: &'a str,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct KoreanSns;

impl ExtractionStrategy for KoreanSns {
    fn name(&self) -> &'static str {
        "korean-sns"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Label]
    }

    fn archive_naming(&self, _category: Category) -> ArchiveNaming {
        ArchiveNaming::AnyZip
    }

    fn extract(&self, document: &StructuredDocument, category: Category) -> Result<Vec<String>> {
        if category != Category::Label {
            return Err(unsupported(self, category));
        }
        let doc: SnsDocument = document.decode()?;
        let mut lines = LineCollector::new(MASK_MARKER);
        for turn in doc.data.iter().flat_map(|d| &d.body) {
            lines.push(turn.utterance);
        }
        Ok(lines.into_lines())
    }
}
