//! Error types for YAML parsing and path handling.

use crate::SourcePosition;
use thiserror::Error;

/// A YAML syntax error.
///
/// Carries the position of the offending token. No partial tree survives a
/// parse error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at line {} column {}", .position.line + 1, .position.col + 1)]
pub struct ParseError {
    /// Human-readable description of the problem
    pub message: String,

    /// Where the scanner or parser gave up
    pub position: SourcePosition,

    /// Optional filename or source identifier
    pub file: Option<String>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            message: message.into(),
            position,
            file: None,
        }
    }

    /// 0-based line of the error.
    pub fn line(&self) -> usize {
        self.position.line
    }

    /// 0-based column of the error.
    pub fn col(&self) -> usize {
        self.position.col
    }
}

/// Error returned when a path string does not follow the path grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("unexpected end of path")]
    UnexpectedEnd,

    #[error("unexpected character {found:?} at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("empty key at offset {offset}")]
    EmptyKey { offset: usize },

    #[error("invalid index {text:?} at offset {offset}")]
    InvalidIndex { text: String, offset: usize },
}
