//! Line filtering shared by every strategy.

/// Turn one raw field into an output line.
///
/// Returns `None` when the field carries the redaction marker or is blank. Embedded line
/// breaks collapse to a single space: one field is always one corpus line.
pub fn clean_line(raw: &str, marker: &str) -> Option<String> {
    if raw.contains(marker) || raw.trim().is_empty() {
        return None;
    }
    if !raw.contains(['\n', '\r']) {
        return Some(raw.to_string());
    }
    let joined = raw
        .split(['\n', '\r'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    Some(joined)
}

/// Accumulates cleaned lines for one document, in field order.
pub struct LineCollector {
    marker: &'static str,
    lines: Vec<String>,
}

impl LineCollector {
    pub fn new(marker: &'static str) -> Self {
        Self {
            marker,
            lines: Vec::new(),
        }
    }

    pub fn push(&mut self, field: &str) {
        if let Some(line) = clean_line(field, self.marker) {
            self.lines.push(line);
        }
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
