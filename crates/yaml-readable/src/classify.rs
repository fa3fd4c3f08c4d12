/*
 * classify.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Decide how a string scalar should be rendered.
//!
//! API payloads often carry JSON serialized into string fields. When such a
//! string is found it is decoded and rendered as YAML structure instead of an
//! opaque quoted blob. Decoding failures are not errors: they only move the
//! string on to the next rule.

use serde_json::Value;

/// Rendering chosen for a string scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarClass {
    /// Default scalar style, quoted only when needed.
    Plain(String),

    /// Block literal (`|-`).
    Literal(String),

    /// The string held JSON; render this structure in its place.
    Structure(Value),
}

/// Classify a string scalar. Surrounding whitespace is trimmed first.
///
/// Rules, first match wins:
/// 1. multi-line text is a literal block;
/// 2. `{...}` or `[...]` that parses as JSON becomes structure, otherwise a
///    literal block;
/// 3. `"{...}"` that decodes as a JSON string holding a JSON object becomes
///    structure, otherwise a literal block;
/// 4. `"..."` is unwrapped as a JSON string when possible and rendered as a
///    literal block either way;
/// 5. anything else is plain.
pub fn classify(s: &str) -> ScalarClass {
    let text = s.trim();

    if text.contains('\n') {
        return ScalarClass::Literal(text.to_string());
    }

    if (text.starts_with('{') && text.ends_with('}'))
        || (text.starts_with('[') && text.ends_with(']'))
    {
        return match serde_json::from_str::<Value>(text) {
            Ok(value) => ScalarClass::Structure(value),
            Err(_) => ScalarClass::Literal(text.to_string()),
        };
    }

    if text.starts_with("\"{") && text.ends_with("}\"") {
        return match decode_twice(text) {
            Some(value) => ScalarClass::Structure(value),
            None => ScalarClass::Literal(text.to_string()),
        };
    }

    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        return match serde_json::from_str::<String>(text) {
            Ok(unwrapped) => ScalarClass::Literal(unwrapped),
            Err(_) => ScalarClass::Literal(text.to_string()),
        };
    }

    ScalarClass::Plain(text.to_string())
}

fn decode_twice(text: &str) -> Option<Value> {
    let inner = serde_json::from_str::<String>(text).ok()?;
    serde_json::from_str::<Value>(&inner).ok()
}
