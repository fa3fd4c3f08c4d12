/*
 * convert.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::writer::YamlWriter;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConversionError {
    /// JSON input that could not be parsed.
    #[error("invalid JSON at line {line} column {column}: {message}")]
    Json {
        message: String,

        /// 1-based, as reported by `serde_json`
        line: usize,

        /// 1-based, as reported by `serde_json`
        column: usize,

        /// Position of the document in a multi-document conversion
        document: Option<usize>,
    },

    /// The YAML emitter rejected the value.
    #[error("failed to write YAML: {0}")]
    Emit(#[from] serde_yaml::Error),
}

impl ConversionError {
    /// Index of the malformed document in a multi-document conversion.
    pub fn document(&self) -> Option<usize> {
        match self {
            ConversionError::Json { document, .. } => *document,
            ConversionError::Emit(_) => None,
        }
    }

    /// 1-based line and column of a JSON syntax error.
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            ConversionError::Json { line, column, .. } => Some((*line, *column)),
            ConversionError::Emit(_) => None,
        }
    }

    fn in_document(self, index: usize) -> Self {
        match self {
            ConversionError::Json {
                message,
                line,
                column,
                ..
            } => ConversionError::Json {
                message,
                line,
                column,
                document: Some(index),
            },
            other => other,
        }
    }
}

impl From<serde_json::Error> for ConversionError {
    fn from(err: serde_json::Error) -> Self {
        // serde_json's Display appends " at line X column Y"; keep the bare message.
        let full = err.to_string();
        let message = match full.rfind(" at line ") {
            Some(idx) => full[..idx].to_string(),
            None => full,
        };
        ConversionError::Json {
            message,
            line: err.line(),
            column: err.column(),
            document: None,
        }
    }
}

/// Convert a JSON document to block-style YAML.
///
/// Key order is preserved. Strings that hold JSON are expanded into nested
/// YAML, multi-line strings become `|-` blocks.
pub fn convert_json_to_yaml(json: &str) -> Result<String, ConversionError> {
    let value: Value = serde_json::from_str(json)?;
    let mut writer = YamlWriter::new();
    writer.write_document(value)?;
    Ok(writer.finish())
}

/// Convert several JSON documents into one YAML stream separated by `---`.
///
/// The first malformed document fails the whole conversion.
pub fn convert_json_documents_to_yaml(documents: &[&str]) -> Result<String, ConversionError> {
    let mut writer = YamlWriter::new();
    for (index, json) in documents.iter().enumerate() {
        let value: Value = serde_json::from_str(json)
            .map_err(|err| ConversionError::from(err).in_document(index))?;
        if index > 0 {
            writer.write_separator();
        }
        writer.write_document(value)?;
    }
    tracing::debug!(documents = documents.len(), "converted JSON documents");
    Ok(writer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_keeps_position() {
        let err = convert_json_to_yaml("{\n  \"a\": \n}").unwrap_err();
        let (line, column) = err.location().unwrap();
        assert_eq!(line, 3);
        assert!(column >= 1);
        assert!(!err.to_string().ends_with(&format!(" at line {} column {}", line, column)));
        assert_eq!(err.document(), None);
    }

    #[test]
    fn test_documents_error_names_document() {
        let err = convert_json_documents_to_yaml(&["{}", "[1,"]).unwrap_err();
        assert_eq!(err.document(), Some(1));
        assert!(matches!(err, ConversionError::Json { .. }));
    }

    #[test]
    fn test_empty_document_list() {
        assert_eq!(convert_json_documents_to_yaml(&[]).unwrap(), "");
    }
}
