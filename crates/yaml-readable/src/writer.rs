/*
 * writer.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Block-style YAML output for JSON values.
//!
//! String values go through [`classify`] first, so JSON hidden inside
//! strings comes out as nested YAML. The expanded value is then written by
//! `serde_yaml`, which chooses the quoting, writes multi-line text as `|-`
//! blocks and falls back to explicit `? ` keys for keys too long to be
//! implicit.

use crate::classify::{classify, ScalarClass};
use serde_json::Value;

/// Replace every string that holds JSON with the decoded structure.
///
/// Strings are trimmed on the way through. Decoded structures are expanded
/// again, so JSON nested inside JSON-in-a-string is unwrapped too.
pub fn expand_embedded(value: Value) -> Value {
    match value {
        Value::String(s) => match classify(&s) {
            ScalarClass::Plain(text) | ScalarClass::Literal(text) => Value::String(text),
            ScalarClass::Structure(decoded) => expand_embedded(decoded),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(expand_embedded).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, expand_embedded(value)))
                .collect(),
        ),
        other => other,
    }
}

/// Accumulates a YAML stream, one document at a time.
#[derive(Debug, Default)]
pub struct YamlWriter {
    out: String,
}

impl YamlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one document. Output always ends with a newline.
    pub fn write_document(&mut self, value: Value) -> Result<(), serde_yaml::Error> {
        let yaml = serde_yaml::to_string(&expand_embedded(value))?;
        self.out.push_str(&yaml);
        if !yaml.ends_with('\n') {
            self.out.push('\n');
        }
        Ok(())
    }

    /// Start a new document in the same stream.
    pub fn write_separator(&mut self) {
        self.out.push_str("---\n");
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Render a value as a block-style YAML document.
pub fn to_yaml_string(value: Value) -> Result<String, serde_yaml::Error> {
    let mut writer = YamlWriter::new();
    writer.write_document(value)?;
    Ok(writer.finish())
}
