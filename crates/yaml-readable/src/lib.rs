/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Readable YAML from JSON.
//!
//! [`convert_json_to_yaml`] parses a JSON document (keeping key order) and
//! writes it back as block-style YAML. String values that themselves contain
//! JSON are decoded and written as nested structure, and multi-line strings
//! become `|-` literal blocks. The YAML itself is emitted by `serde_yaml`:
//!
//! ```rust
//! use yaml_readable::convert_json_to_yaml;
//!
//! let yaml = convert_json_to_yaml(r#"{"data": "[1,2,3]"}"#).unwrap();
//! assert_eq!(yaml, "data:\n- 1\n- 2\n- 3\n");
//! ```

mod classify;
mod convert;
mod writer;

pub use classify::{classify, ScalarClass};
pub use convert::{convert_json_documents_to_yaml, convert_json_to_yaml, ConversionError};
pub use writer::{expand_embedded, to_yaml_string, YamlWriter};
