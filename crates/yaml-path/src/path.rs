//! Breadcrumbs and their string form.
//!
//! A path string is a sequence of segments:
//!
//! ```text
//! segment := identifier | '[' quoted-string ']' | '[' integer ']'
//! path    := segment (('.' identifier) | '[' ... ']')*
//! ```
//!
//! Keys made only of ASCII letters, digits and underscores are written bare
//! (`services.traefik`); every other key is bracketed and double-quoted
//! (`["some-network"]`), and sequence indices are bracketed (`ports[1]`).

use crate::PathError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use yaml_rust2::Yaml;

static UNQUOTED_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

/// One step from a container to one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A mapping key. Usually a string, but any YAML value can be a key.
    Key(Yaml),

    /// A sequence index
    Index(usize),
}

impl PathSegment {
    /// Convenience constructor for string keys.
    pub fn key(key: impl Into<String>) -> Self {
        PathSegment::Key(Yaml::String(key.into()))
    }
}

/// Ordered path from a document root to a located node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Breadcrumb(Vec<PathSegment>);

impl Breadcrumb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    /// Copy of this breadcrumb extended by `segment`.
    pub fn with(&self, segment: PathSegment) -> Self {
        let mut extended = self.clone();
        extended.push(segment);
        extended
    }

    /// Render as a path string. Empty breadcrumbs render as `""`.
    pub fn to_path_string(&self) -> String {
        format_path(&self.0)
    }
}

impl From<Vec<PathSegment>> for Breadcrumb {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for Breadcrumb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path_string())
    }
}

/// Render segments as a path string.
pub fn format_path(segments: &[PathSegment]) -> String {
    let mut path = String::new();
    for segment in segments {
        match segment {
            PathSegment::Index(index) => {
                path.push('[');
                path.push_str(&index.to_string());
                path.push(']');
            }
            PathSegment::Key(Yaml::String(key)) if UNQUOTED_KEY.is_match(key) => {
                if !path.is_empty() {
                    path.push('.');
                }
                path.push_str(key);
            }
            PathSegment::Key(key) => {
                path.push_str("[\"");
                path.push_str(&key_text(key).replace('"', "\\\""));
                path.push_str("\"]");
            }
        }
    }
    path
}

/// Text of a key as it appears between the brackets.
fn key_text(key: &Yaml) -> String {
    let mut out = String::new();
    write_flow(key, &mut out);
    out
}

/// Single-line rendering of a YAML value, used for non-string and complex keys.
fn write_flow(yaml: &Yaml, out: &mut String) {
    match yaml {
        Yaml::String(s) | Yaml::Real(s) => out.push_str(s),
        Yaml::Integer(i) => out.push_str(&i.to_string()),
        Yaml::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Yaml::Null | Yaml::BadValue => out.push_str("null"),
        Yaml::Alias(id) => {
            out.push('*');
            out.push_str(&id.to_string());
        }
        Yaml::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_flow(item, out);
            }
            out.push(']');
        }
        Yaml::Hash(hash) => {
            out.push('{');
            for (i, (k, v)) in hash.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_flow(k, out);
                out.push_str(": ");
                write_flow(v, out);
            }
            out.push('}');
        }
    }
}

/// Tokenize a path string back into segments.
///
/// Keys always come back as strings, so a path written for a non-string key
/// (`["1"]`) parses to the string key `"1"`.
///
/// # Errors
///
/// Returns a [`PathError`] describing the first position that does not fit
/// the path grammar.
pub fn parse_path(path: &str) -> Result<Breadcrumb, PathError> {
    let mut segments = Vec::new();
    let mut chars = path.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        match c {
            '[' => {
                chars.next();
                match chars.peek() {
                    Some(&(_, '"')) => {
                        chars.next();
                        let mut key = String::new();
                        loop {
                            match chars.next() {
                                // Only `\"` is an escape; other backslashes are literal.
                                Some((_, '\\')) => match chars.peek() {
                                    Some(&(_, '"')) => {
                                        chars.next();
                                        key.push('"');
                                    }
                                    _ => key.push('\\'),
                                },
                                Some((_, '"')) => break,
                                Some((_, c)) => key.push(c),
                                None => return Err(PathError::UnexpectedEnd),
                            }
                        }
                        expect(&mut chars, ']')?;
                        segments.push(PathSegment::key(key));
                    }
                    Some(&(start, _)) => {
                        let mut digits = String::new();
                        while let Some(&(_, d)) = chars.peek() {
                            if d == ']' {
                                break;
                            }
                            digits.push(d);
                            chars.next();
                        }
                        expect(&mut chars, ']')?;
                        let index = digits.parse::<usize>().map_err(|_| PathError::InvalidIndex {
                            text: digits.clone(),
                            offset: start,
                        })?;
                        segments.push(PathSegment::Index(index));
                    }
                    None => return Err(PathError::UnexpectedEnd),
                }
            }
            '.' if !segments.is_empty() => {
                chars.next();
                let start = chars.peek().map_or(path.len(), |&(i, _)| i);
                let key = take_identifier(&mut chars);
                if key.is_empty() {
                    return Err(PathError::EmptyKey { offset: start });
                }
                segments.push(PathSegment::key(key));
            }
            c if segments.is_empty() && is_identifier_char(c) => {
                segments.push(PathSegment::key(take_identifier(&mut chars)));
            }
            found => return Err(PathError::UnexpectedChar { found, offset }),
        }
    }

    Ok(Breadcrumb(segments))
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn take_identifier(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if !is_identifier_char(c) {
            break;
        }
        ident.push(c);
        chars.next();
    }
    ident
}

fn expect(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    expected: char,
) -> Result<(), PathError> {
    match chars.next() {
        Some((_, c)) if c == expected => Ok(()),
        Some((offset, found)) => Err(PathError::UnexpectedChar { found, offset }),
        None => Err(PathError::UnexpectedEnd),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crumbs(segments: Vec<PathSegment>) -> Breadcrumb {
        Breadcrumb::from(segments)
    }

    #[test]
    fn test_empty_breadcrumb_formats_empty() {
        assert_eq!(Breadcrumb::new().to_path_string(), "");
    }

    #[test]
    fn test_identifier_keys_are_dotted() {
        let path = crumbs(vec![
            PathSegment::key("services"),
            PathSegment::key("traefik"),
            PathSegment::key("ports"),
            PathSegment::Index(1),
        ]);
        assert_eq!(path.to_path_string(), "services.traefik.ports[1]");
    }

    #[test]
    fn test_other_keys_are_quoted() {
        let path = crumbs(vec![
            PathSegment::key("networks"),
            PathSegment::key("some-network"),
            PathSegment::key("aliases"),
            PathSegment::Index(0),
        ]);
        assert_eq!(path.to_string(), r#"networks["some-network"].aliases[0]"#);
    }

    #[test]
    fn test_first_segment_quoted_or_indexed() {
        assert_eq!(format_path(&[PathSegment::key("quoted.key"), PathSegment::Index(2)]), r#"["quoted.key"][2]"#);
        assert_eq!(format_path(&[PathSegment::Index(0), PathSegment::key("a")]), "[0].a");
    }

    #[test]
    fn test_quotes_are_escaped() {
        assert_eq!(format_path(&[PathSegment::key("keywithslash\"")]), r#"["keywithslash\""]"#);
    }

    #[test]
    fn test_non_string_keys_are_quoted() {
        let path = [
            PathSegment::Key(Yaml::Integer(1)),
            PathSegment::Key(Yaml::Boolean(true)),
            PathSegment::Key(Yaml::Null),
            PathSegment::Key(Yaml::Real("1.5".into())),
        ];
        assert_eq!(format_path(&path), r#"["1"]["true"]["null"]["1.5"]"#);
    }

    #[test]
    fn test_complex_keys_use_flow_text() {
        let mut hash = yaml_rust2::yaml::Hash::new();
        hash.insert(Yaml::String("a".into()), Yaml::String("b \"c\"".into()));
        let key = Yaml::Array(vec![Yaml::Integer(1), Yaml::Hash(hash)]);
        assert_eq!(format_path(&[PathSegment::Key(key)]), r#"["[1, {a: b \"c\"}]"]"#);
    }

    #[test]
    fn test_parse_round_trip() {
        let path = crumbs(vec![
            PathSegment::key("services"),
            PathSegment::key("some-network"),
            PathSegment::key("say \"hi\""),
            PathSegment::Index(12),
            PathSegment::key("x_1"),
        ]);
        assert_eq!(parse_path(&path.to_path_string()).unwrap(), path);
    }

    #[test]
    fn test_backslash_keys_round_trip() {
        let path = crumbs(vec![
            PathSegment::key(r"C:\Program Files"),
            PathSegment::key(r"a\nb"),
            PathSegment::key(r#"say \"hi\""#),
        ]);
        let text = path.to_path_string();
        assert_eq!(text, r#"["C:\Program Files"]["a\nb"]["say \\"hi\\""]"#);
        assert_eq!(parse_path(&text).unwrap(), path);
    }

    #[test]
    fn test_parse_leading_index_and_quoted() {
        let parsed = parse_path(r#"[1].scope["a.b"]"#).unwrap();
        assert_eq!(
            parsed.segments(),
            &[PathSegment::Index(1), PathSegment::key("scope"), PathSegment::key("a.b")]
        );
    }

    #[test]
    fn test_parse_empty_path() {
        assert!(parse_path("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_path(".a"), Err(PathError::UnexpectedChar { found: '.', offset: 0 }));
        assert_eq!(parse_path("a."), Err(PathError::EmptyKey { offset: 2 }));
        assert_eq!(parse_path("a[x]"), Err(PathError::InvalidIndex { text: "x".into(), offset: 2 }));
        assert_eq!(parse_path(r#"a["b"#), Err(PathError::UnexpectedEnd));
        assert_eq!(parse_path("a b"), Err(PathError::UnexpectedChar { found: ' ', offset: 1 }));
    }
}
