/*
 * diagnostics.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Source-annotated error reports.

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use yaml_path::ParseError;
use yaml_readable::ConversionError;

/// Render a YAML parse error against the text it came from.
pub fn render_parse_error(err: &ParseError, name: &str, content: &str, color: bool) -> String {
    render(name, content, err.position.offset, &err.message, color)
}

/// Render a JSON conversion error against the text it came from.
///
/// Emitter failures have no source position and render as a single line.
pub fn render_conversion_error(
    err: &ConversionError,
    name: &str,
    content: &str,
    color: bool,
) -> String {
    match err {
        ConversionError::Json {
            message,
            line,
            column,
            ..
        } => render(name, content, char_offset(content, *line, *column), message, color),
        ConversionError::Emit(_) => format!("{}: {}\n", name, err),
    }
}

fn render(name: &str, content: &str, offset: usize, message: &str, color: bool) -> String {
    let len = content.chars().count();
    // Errors at end of input point at the last character.
    let start = offset.min(len.saturating_sub(1));
    let end = (start + 1).min(len);

    let report = Report::build(ReportKind::Error, name.to_string(), start)
        .with_config(Config::default().with_color(color))
        .with_message(message)
        .with_label(
            Label::new((name.to_string(), start..end))
                .with_message(message)
                .with_color(Color::Red),
        )
        .finish();

    let mut output = Vec::new();
    match report.write((name.to_string(), Source::from(content)), &mut output) {
        Ok(()) => String::from_utf8_lossy(&output).into_owned(),
        Err(_) => format!("{}: {}\n", name, message),
    }
}

/// Character offset of a 1-based line and byte column.
fn char_offset(content: &str, line: usize, column: usize) -> usize {
    let line_start: usize = content
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let byte = (line_start + column.saturating_sub(1)).min(content.len());
    content.char_indices().take_while(|(i, _)| *i < byte).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_offset() {
        assert_eq!(char_offset("ab\ncd\n", 1, 1), 0);
        assert_eq!(char_offset("ab\ncd\n", 2, 2), 4);
        assert_eq!(char_offset("é\nx", 2, 1), 2);
        assert_eq!(char_offset("ab", 9, 9), 2);
    }

    #[test]
    fn test_parse_error_report_mentions_file_and_message() {
        let content = "a: [1, 2\n";
        let err = yaml_path::parse(content).unwrap_err();
        let report = render_parse_error(&err, "broken.yaml", content, false);
        assert!(report.contains("broken.yaml"));
        assert!(report.contains(&err.message));
    }

    #[test]
    fn test_conversion_error_report() {
        let content = "{\"a\": }";
        let err = yaml_readable::convert_json_to_yaml(content).unwrap_err();
        let report = render_conversion_error(&err, "<stdin>", content, false);
        assert!(report.contains("<stdin>"));
        assert!(report.contains("expected value"));
    }
}
