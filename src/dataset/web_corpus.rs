//! Large-scale web data Korean corpus (AI Hub dataset 624).
//!
//! Label files hold named-entity annotations over article titles and bodies; source files
//! hold the raw article text. Both redact personal names as `(이름)`.

use serde::Deserialize;

use super::ExtractionStrategy;
use super::lines::LineCollector;
use crate::engine::tools::ArchiveNaming;
use crate::error::{DwkitError, Result};
use crate::pipeline::parser::StructuredDocument;
use crate::types::Category;

pub const NAME_MARKER: &str = "(이름)";

#[derive(Deserialize)]
struct LabelDocument<'a> {
    #[serde(borrow)]
    named_entity: Vec<NamedEntity<'a>>,
}

#[derive(Deserialize)]
struct NamedEntity<'a> {
    #[serde(borrow)]
    title: Vec<Sentence<'a>>,
    #[serde(borrow)]
    content: Vec<Sentence<'a>>,
}

#[derive(Deserialize)]
struct Sentence<'a> {
    sentence: &'a str,
}

#[derive(Deserialize)]
struct SourceDocument<'a> {
    #[serde(rename = "SJML", borrow)]
    sjml: SourceBody<'a>,
}

#[derive(Deserialize)]
struct SourceBody<'a> {
    #[serde(borrow)]
    text: Vec<TextBlock<'a>>,
}

#[derive(Deserialize)]
struct TextBlock<'a> {
    title: &'a str,
    content: &'a str,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct WebDataCorpus;

impl WebDataCorpus {
    fn extract_label(document: &StructuredDocument) -> Result<Vec<String>> {
        let doc: LabelDocument = document.decode()?;
        let mut lines = LineCollector::new(NAME_MARKER);
        for (i, entity) in doc.named_entity.iter().enumerate() {
            let title = entity
                .title
                .first()
                .ok_or_else(|| DwkitError::malformed(format!("named_entity[{i}].title is empty")))?;
            lines.push(title.sentence);
            for content in &entity.content {
                lines.push(content.sentence);
            }
        }
        Ok(lines.into_lines())
    }

    fn extract_source(document: &StructuredDocument) -> Result<Vec<String>> {
        let doc: SourceDocument = document.decode()?;
        let mut lines = LineCollector::new(NAME_MARKER);
        for block in &doc.sjml.text {
            lines.push(block.title);
            lines.push(block.content);
        }
        Ok(lines.into_lines())
    }
}

impl ExtractionStrategy for WebDataCorpus {
    fn name(&self) -> &'static str {
        "web-data-corpus"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Label, Category::Source]
    }

    fn archive_naming(&self, category: Category) -> ArchiveNaming {
        ArchiveNaming::split(category)
    }

    fn extract(&self, document: &StructuredDocument, category: Category) -> Result<Vec<String>> {
        match category {
            Category::Label => Self::extract_label(document),
            Category::Source => Self::extract_source(document),
        }
    }
}
