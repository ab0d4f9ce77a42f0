use std::ops::Range;

use rowan::{TextRange, TextSize};

/// 1-based line, 0-based column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct LineCol {
    pub line: usize,
    pub column: usize,
}

impl LineCol {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Immutable source text plus a line-start index.
///
/// Lines are split on `\n`. The index always has an entry for the final
/// line, even when the text does not end with a terminator, so every offset
/// in `0..=len` maps to some line.
///
/// Offsets taken and returned are UTF-8 byte offsets, except for the `char_*`
/// accessors which count Unicode scalar values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    text: String,
    line_starts: Vec<usize>,
    /// Characters preceding each line start.
    line_char_starts: Vec<usize>,
    skipped_lines: Vec<usize>,
}

impl SourceDocument {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = index_lines(&text);
        let line_char_starts = index_line_chars(&text, &line_starts);
        Self {
            text,
            line_starts,
            line_char_starts,
            skipped_lines: Vec::new(),
        }
    }

    /// Decodes raw bytes line by line.
    ///
    /// A line that is not valid UTF-8 is replaced by an empty line; its
    /// terminator is kept so the numbering of later lines is unchanged.
    /// The numbers of the replaced lines are available via [`Self::skipped_lines`].
    pub fn from_bytes_lossy(bytes: &[u8]) -> Self {
        let mut text = String::with_capacity(bytes.len());
        let mut skipped_lines = Vec::new();

        for (idx, chunk) in bytes.split(|&b| b == b'\n').enumerate() {
            if idx > 0 {
                text.push('\n');
            }
            match std::str::from_utf8(chunk) {
                Ok(line) => text.push_str(line),
                Err(_) => skipped_lines.push(idx + 1),
            }
        }

        let line_starts = index_lines(&text);
        let line_char_starts = index_line_chars(&text, &line_starts);
        Self {
            text,
            line_starts,
            line_char_starts,
            skipped_lines,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Lines that were blanked because they could not be decoded.
    pub fn skipped_lines(&self) -> &[usize] {
        &self.skipped_lines
    }

    /// Offset of the first byte of each line.
    pub fn line_starts(&self) -> &[usize] {
        &self.line_starts
    }

    /// Maps a byte offset to its line and column.
    ///
    /// Offsets past the end clamp to the end of the document.
    pub fn offset_to_line_col(&self, pos: usize) -> LineCol {
        let pos = pos.min(self.text.len());
        let idx = self.line_index(pos);
        LineCol::new(idx + 1, pos - self.line_starts[idx])
    }

    /// Number of characters before the byte offset `pos`.
    ///
    /// An offset inside a multi-byte character counts from that character's
    /// first byte. Offsets past the end clamp to the character length.
    pub fn char_offset(&self, pos: usize) -> usize {
        let pos = self.floor_char_boundary(pos);
        let idx = self.line_index(pos);
        self.line_char_starts[idx] + self.chars_in_line(idx, pos)
    }

    /// Like [`Self::offset_to_line_col`], with the column counted in characters.
    pub fn char_line_col(&self, pos: usize) -> LineCol {
        let pos = self.floor_char_boundary(pos);
        let idx = self.line_index(pos);
        LineCol::new(idx + 1, self.chars_in_line(idx, pos))
    }

    /// Maps a line and column back to a byte offset.
    ///
    /// Lines outside `1..=line_count` clamp to the nearest valid line and
    /// columns clamp to the line's length.
    pub fn line_col_to_offset(&self, line: usize, column: usize) -> usize {
        let idx = self.clamp_line(line);
        let start = self.line_starts[idx];
        let width = self.line_end(idx) - start;
        start + column.min(width)
    }

    /// Byte range of a line, without its `\n` terminator.
    pub fn line_range(&self, line: usize) -> Range<usize> {
        let idx = self.clamp_line(line);
        self.line_starts[idx]..self.line_end(idx)
    }

    /// Text of a line without any trailing `\r\n` or `\n`.
    pub fn line_text(&self, line: usize) -> &str {
        let text = &self.text[self.line_range(line)];
        text.strip_suffix('\r').unwrap_or(text)
    }

    pub fn slice(&self, range: TextRange) -> &str {
        let start = usize::from(range.start()).min(self.text.len());
        let end = usize::from(range.end()).clamp(start, self.text.len());
        self.text.get(start..end).unwrap_or_default()
    }

    pub fn full_range(&self) -> TextRange {
        TextRange::up_to(TextSize::from(self.text.len() as u32))
    }

    /// Returns a copy cut at the last line boundary that fits in `max_bytes`.
    ///
    /// If even the first line is longer than the limit the result is empty.
    pub fn truncated(&self, max_bytes: usize) -> Self {
        if self.text.len() <= max_bytes {
            return self.clone();
        }
        let cut = self
            .line_starts
            .iter()
            .rev()
            .copied()
            .find(|&start| start <= max_bytes)
            .unwrap_or(0);
        let mut doc = Self::new(&self.text[..cut]);
        doc.skipped_lines = self
            .skipped_lines
            .iter()
            .copied()
            .filter(|&line| line <= doc.line_count())
            .collect();
        doc
    }

    fn line_index(&self, pos: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= pos) - 1
    }

    fn chars_in_line(&self, idx: usize, pos: usize) -> usize {
        self.text[self.line_starts[idx]..pos].chars().count()
    }

    fn floor_char_boundary(&self, pos: usize) -> usize {
        let mut pos = pos.min(self.text.len());
        while !self.text.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }

    fn clamp_line(&self, line: usize) -> usize {
        line.clamp(1, self.line_starts.len()) - 1
    }

    /// Offset of the `\n` ending line `idx`, or the document end for the last line.
    fn line_end(&self, idx: usize) -> usize {
        match self.line_starts.get(idx + 1) {
            Some(&next) => next - 1,
            None => self.text.len(),
        }
    }
}

fn index_lines(text: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

fn index_line_chars(text: &str, line_starts: &[usize]) -> Vec<usize> {
    let mut total = 0;
    let mut prev = 0;
    line_starts
        .iter()
        .map(|&start| {
            total += text[prev..start].chars().count();
            prev = start;
            total
        })
        .collect()
}
