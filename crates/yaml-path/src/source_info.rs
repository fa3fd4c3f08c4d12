//! Source positions for YAML nodes.

use line_index::{LineCol, TextSize, WideEncoding};
use serde::{Deserialize, Serialize};

/// A position in the parsed text.
///
/// All fields are 0-based. `offset` counts characters (not bytes) from the
/// start of the text, which is what `yaml-rust2` markers report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct SourcePosition {
    /// Character offset from the start of the text
    pub offset: usize,

    /// Line number (0-based)
    pub line: usize,

    /// Column number (0-based, in characters)
    pub col: usize,
}

impl SourcePosition {
    pub fn new(offset: usize, line: usize, col: usize) -> Self {
        Self { offset, line, col }
    }
}

/// Source span of a YAML node.
///
/// `start` is where the node begins (the first character of a scalar, the
/// opening bracket of a flow collection, the first key or dash of a block
/// collection). `end` is where the parser closed the node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceSpan {
    /// Optional filename or source identifier
    pub file: Option<String>,

    pub start: SourcePosition,

    pub end: SourcePosition,
}

impl SourceSpan {
    /// Create a span between two positions.
    pub fn new(start: SourcePosition, end: SourcePosition) -> Self {
        Self {
            file: None,
            start,
            end,
        }
    }

    /// A zero-length span at `pos`.
    pub fn point(pos: SourcePosition) -> Self {
        Self::new(pos, pos)
    }

    /// Set the filename for this span.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `line` falls between the first and last line of the span.
    pub fn covers_line(&self, line: usize) -> bool {
        self.start.line <= line && line <= self.end.line
    }
}

/// Maps character offsets to line/column pairs.
///
/// Markers coming out of `yaml-rust2` carry a character index while
/// `line_index` works on byte offsets, so the index keeps the byte offset of
/// every character next to it. Columns are counted in characters.
#[derive(Debug, Clone)]
pub struct LineIndex {
    lines: line_index::LineIndex,

    /// Byte offset of every character, followed by the text length
    char_bytes: Vec<u32>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut char_bytes: Vec<u32> = text.char_indices().map(|(i, _)| i as u32).collect();
        char_bytes.push(text.len() as u32);
        Self {
            lines: line_index::LineIndex::new(text),
            char_bytes,
        }
    }

    /// Number of characters in the text.
    fn len(&self) -> usize {
        self.char_bytes.len() - 1
    }

    /// Number of lines in the text (a trailing newline opens an empty line).
    pub fn line_count(&self) -> usize {
        self.lines.line_col(self.lines.len()).line as usize + 1
    }

    /// Position of the character at `offset`. Offsets past the end clamp to
    /// the end of the text.
    pub fn position(&self, offset: usize) -> SourcePosition {
        let offset = offset.min(self.len());
        let line_col = self.lines.line_col(TextSize::from(self.char_bytes[offset]));
        let col = self
            .lines
            .to_wide(WideEncoding::Utf32, line_col)
            .map_or(line_col.col, |wide| wide.col);
        SourcePosition::new(offset, line_col.line as usize, col as usize)
    }

    /// Character offset of the first character of `line`.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        let line = u32::try_from(line).ok()?;
        let byte = self.lines.offset(LineCol { line, col: 0 })?;
        self.char_bytes.binary_search(&u32::from(byte)).ok()
    }
}
