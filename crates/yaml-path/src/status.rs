//! Status text for a set of cursors.

use crate::cache::CachedParse;
use crate::{resolve_path, Settings};
use std::fmt;

/// What to show for one cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathReport {
    Path(String),

    /// The region holding the cursor does not parse. `line` is 0-based and
    /// relative to the buffer.
    ParseError { line: usize, message: String },
}

impl fmt::Display for PathReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathReport::Path(path) => f.write_str(path),
            PathReport::ParseError { line, message } => {
                write!(f, "-- YAML PARSE ERROR -- line {}: {}", line + 1, message)
            }
        }
    }
}

/// One report per cursor that resolves to something.
///
/// Cursors are `(line, col)` in buffer coordinates. Cursors whose path is
/// empty, or that sit above the region, produce nothing.
pub fn reports_for_cursors(parse: &CachedParse, cursors: &[(usize, usize)]) -> Vec<PathReport> {
    let mut reports = Vec::new();
    for &(line, col) in cursors {
        let Some(relative_line) = line.checked_sub(parse.first_line) else {
            continue;
        };
        match &parse.outcome {
            Err(err) => reports.push(PathReport::ParseError {
                line: err.line() + parse.first_line,
                message: err.message.clone(),
            }),
            Ok(documents) => {
                let path = resolve_path(documents, relative_line, col);
                if !path.is_empty() {
                    reports.push(PathReport::Path(path));
                }
            }
        }
    }
    reports
}

/// Joined status text, or `None` when there is nothing to show.
pub fn status_text(reports: &[PathReport], settings: &Settings) -> Option<String> {
    if reports.is_empty() {
        return None;
    }
    let joined = reports
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Some(format!("{}{}", settings.status_prefix, joined))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_for_several_cursors() {
        let parse = CachedParse::parse("a:\n  b: 1\nc: [x]\n", 0);
        let reports = reports_for_cursors(&parse, &[(1, 4), (2, 0), (7, 0)]);
        assert_eq!(
            reports,
            vec![PathReport::Path("a.b".into()), PathReport::Path("c".into())]
        );
        assert_eq!(
            status_text(&reports, &Settings::default()).as_deref(),
            Some("YAML Path: a.b, c")
        );
    }

    #[test]
    fn test_region_offset() {
        // Region starts on buffer line 10.
        let parse = CachedParse::parse("key: value\n", 10);
        assert_eq!(
            reports_for_cursors(&parse, &[(10, 2), (3, 0)]),
            vec![PathReport::Path("key".into())]
        );
    }

    #[test]
    fn test_parse_error_marker() {
        let parse = CachedParse::parse("ok: 1\nbad: [\n", 4);
        let reports = reports_for_cursors(&parse, &[(4, 0)]);
        assert_eq!(reports.len(), 1);
        let PathReport::ParseError { line, .. } = &reports[0] else {
            panic!("expected a parse error report");
        };
        assert!(*line >= 5);
        assert!(reports[0].to_string().starts_with("-- YAML PARSE ERROR -- line "));
    }

    #[test]
    fn test_nothing_to_show() {
        assert_eq!(status_text(&[], &Settings::default()), None);
    }
}
