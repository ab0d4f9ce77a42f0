use rowan::TextRange;
use serde::{Deserialize, Serialize};

use crate::SourceDocument;

/// One discovered query literal, ready for reporting or highlighting.
///
/// `start..end` is the content-only span (delimiters excluded) in character
/// offsets, and `text` is always the document's characters in that span.
/// Columns count characters too. `endLine`/`endColumn` describe the
/// exclusive end offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
    pub source_line_text: String,
}

impl CandidateRecord {
    /// Builds a record from a byte range of `doc`.
    pub fn from_range(doc: &SourceDocument, range: TextRange) -> Self {
        let start = usize::from(range.start()).min(doc.len());
        let end = usize::from(range.end()).clamp(start, doc.len());
        let start_pos = doc.char_line_col(start);
        let end_pos = doc.char_line_col(end);

        Self {
            text: doc.slice(range).to_owned(),
            start: doc.char_offset(start),
            end: doc.char_offset(end),
            start_line: start_pos.line,
            start_column: start_pos.column,
            end_line: end_pos.line,
            end_column: end_pos.column,
            source_line_text: doc.line_text(start_pos.line).to_owned(),
        }
    }

    /// Identity used for deduplication.
    pub fn key(&self) -> (&str, usize, usize) {
        (&self.text, self.start, self.end)
    }
}
