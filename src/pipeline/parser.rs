//! Document parser: raw bytes to an owned JSON tree.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{DwkitError, Result};
use crate::types::DocumentPath;

/// Decoded document. Opaque to the pipeline; strategies read it with [`StructuredDocument::decode`].
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredDocument {
    value: Value,
}

impl StructuredDocument {
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Deserialize into a schema type. Strings may borrow from the document.
    pub fn decode<'a, T: Deserialize<'a>>(&'a self) -> Result<T> {
        T::deserialize(&self.value).map_err(DwkitError::from)
    }
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode bytes. Fails with `MalformedDocument` on invalid JSON. A leading UTF-8 BOM is ignored.
pub fn parse_document(bytes: &[u8]) -> Result<StructuredDocument> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let value = serde_json::from_slice(bytes)?;
    Ok(StructuredDocument { value })
}

/// Read and decode one document from disk.
pub fn read_document(document: &DocumentPath) -> Result<StructuredDocument> {
    let bytes = std::fs::read(&document.path)
        .map_err(|e| DwkitError::io(format!("read {}", document.path.display()), e))?;
    parse_document(&bytes)
}
