//! YAML parser that builds position-annotated document streams.

use crate::source_info::LineIndex;
use crate::{MappingEntry, ParseError, SourcePosition, SourceSpan, YamlNode};
use std::borrow::Cow;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, ScanError, TScalarStyle};
use yaml_rust2::Yaml;

/// Parse every document of a YAML stream.
///
/// JSON (including trailing commas inside flow collections and `#` comments)
/// is accepted as the YAML subset it is. When the input starts with `{` or
/// `[`, `//` line comments are blanked out first so JSONC parses too. An empty document between `---`
/// markers yields a null node; an empty input yields no documents.
///
/// # Example
///
/// ```rust
/// use yaml_path::parse;
///
/// let docs = parse("a: 1\n---\n- x\n").unwrap();
/// assert_eq!(docs.len(), 2);
/// assert!(docs[0].is_mapping());
/// assert!(docs[1].is_sequence());
/// ```
///
/// # Errors
///
/// Returns a [`ParseError`] pointing at the offending token if any document
/// of the stream is malformed. No partial result is returned.
pub fn parse(content: &str) -> Result<Vec<YamlNode>, ParseError> {
    parse_impl(content, None)
}

/// Parse a YAML stream, recording `filename` on every span.
///
/// # Errors
///
/// Same as [`parse`]; the error also carries the filename.
pub fn parse_file(content: &str, filename: &str) -> Result<Vec<YamlNode>, ParseError> {
    parse_impl(content, Some(filename))
}

fn parse_impl(content: &str, filename: Option<&str>) -> Result<Vec<YamlNode>, ParseError> {
    let content = blank_line_comments(content);
    let mut parser = Parser::new_from_str(&content);
    let mut builder = YamlBuilder::new(&content, filename);

    if let Err(err) = parser.load(&mut builder, true) {
        let err = builder.scan_error(&err);
        tracing::debug!(line = err.line(), col = err.col(), message = %err.message, "YAML parse failed");
        return Err(err);
    }

    let documents = builder.finish();
    tracing::debug!(documents = documents.len(), "parsed YAML stream");
    Ok(documents)
}

/// Replace `//` comments in JSON-looking input with spaces.
///
/// A comment starts at the beginning of a line or after whitespace, outside
/// double-quoted strings and `#` comments, and runs to the end of the line.
/// Every blanked character becomes one space, so positions are unchanged.
fn blank_line_comments(content: &str) -> Cow<'_, str> {
    if !content.trim_start().starts_with(['{', '[']) || !content.contains("//") {
        return Cow::Borrowed(content);
    }

    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut prev = '\n';
    let mut in_string = false;

    while let Some(c) = chars.next() {
        let comment_start = !in_string && prev.is_whitespace();
        let slashes = comment_start && c == '/' && chars.peek() == Some(&'/');
        if slashes || (comment_start && c == '#') {
            out.push(if slashes { ' ' } else { c });
            while let Some(&next) = chars.peek() {
                if next == '\n' || next == '\r' {
                    break;
                }
                chars.next();
                out.push(if slashes { ' ' } else { next });
            }
            prev = ' ';
            continue;
        }

        out.push(c);
        if in_string {
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
        } else if c == '"' {
            in_string = true;
        }
        prev = c;
    }

    Cow::Owned(out)
}

/// Comment-free part of a line: a `#` at the start or after whitespace
/// begins a comment.
fn strip_comment(line: &str) -> &str {
    let mut prev = None;
    for (i, c) in line.char_indices() {
        if c == '#' && prev.map_or(true, |p: char| p.is_whitespace()) {
            return &line[..i];
        }
        prev = Some(c);
    }
    line
}

/// Receives marked events and assembles `YamlNode` trees, one per document.
struct YamlBuilder {
    /// Source characters, indexed by marker offset
    chars: Vec<char>,

    index: LineIndex,

    filename: Option<String>,

    /// Collections under construction, innermost last
    stack: Vec<BuildNode>,

    /// Completed document roots
    documents: Vec<YamlNode>,
}

enum BuildNode {
    Sequence {
        start: SourcePosition,
        items: Vec<YamlNode>,
    },

    Mapping {
        start: SourcePosition,
        entries: Vec<MappingEntry>,
        /// A key waiting for its value
        pending_key: Option<YamlNode>,
    },
}

impl YamlBuilder {
    fn new(source: &str, filename: Option<&str>) -> Self {
        Self {
            chars: source.chars().collect(),
            index: LineIndex::new(source),
            filename: filename.map(str::to_string),
            stack: Vec::new(),
            documents: Vec::new(),
        }
    }

    fn finish(self) -> Vec<YamlNode> {
        self.documents
    }

    fn scan_error(&self, err: &ScanError) -> ParseError {
        let mut parse_error = ParseError::new(err.info(), self.index.position(err.marker().index()));
        parse_error.file = self.filename.clone();
        parse_error
    }

    fn span(&self, start: usize, end: usize) -> SourceSpan {
        let span = SourceSpan::new(self.index.position(start), self.index.position(end));
        match &self.filename {
            Some(file) => span.with_file(file.clone()),
            None => span,
        }
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    /// Attach a finished node to its parent, or record it as a document root.
    fn push_complete(&mut self, node: YamlNode) {
        match self.stack.last_mut() {
            None => self.documents.push(node),
            Some(BuildNode::Sequence { items, .. }) => items.push(node),
            Some(BuildNode::Mapping {
                entries,
                pending_key,
                ..
            }) => match pending_key.take() {
                Some(key) => entries.push(MappingEntry::new(key, node)),
                None => *pending_key = Some(node),
            },
        }
    }

    /// End of the key a value is about to be paired with, if any.
    fn pending_key_end(&self) -> Option<SourcePosition> {
        match self.stack.last() {
            Some(BuildNode::Mapping {
                pending_key: Some(key),
                ..
            }) => Some(key.span.end),
            _ => None,
        }
    }

    fn on_scalar(&mut self, value: String, style: TScalarStyle, marker: &Marker) {
        let start = marker.index();

        // Missing values (`key:` followed by the next key) arrive as a plain
        // `~` whose marker points at the following token.
        let synthesized = matches!(style, TScalarStyle::Plain)
            && value == "~"
            && self.char_at(start) != Some('~');

        let span = match self.pending_key_end() {
            Some(key_end) if synthesized => SourceSpan::point(key_end),
            _ if synthesized => {
                let at = if matches!(self.stack.last(), Some(BuildNode::Sequence { .. })) {
                    self.dash_before(start).unwrap_or(start)
                } else {
                    start
                };
                self.span(at, at)
            }
            _ => self.span(start, self.scalar_end(start, &value)),
        };

        let yaml = match style {
            TScalarStyle::Plain => Yaml::from_str(&value),
            _ => Yaml::String(value),
        };
        self.push_complete(YamlNode::new_scalar(yaml, span));
    }

    /// Offset of the `-` of an empty sequence item, found by scanning back
    /// from `offset` over blank and comment-only text.
    fn dash_before(&self, offset: usize) -> Option<usize> {
        let mut line = self.index.position(offset).line;
        let mut end = offset;
        loop {
            let line_start = self.index.line_start(line)?;
            let text: String = self.chars[line_start..end.max(line_start)].iter().collect();
            let content = strip_comment(&text).trim_end();
            if let Some(before) = content.strip_suffix('-') {
                return Some(line_start + before.chars().count());
            }
            if !content.trim_start().is_empty() || line == 0 {
                return None;
            }
            line -= 1;
            end = line_start;
        }
    }

    /// Offset just past the source text of the scalar starting at `start`.
    fn scalar_end(&self, start: usize, value: &str) -> usize {
        match self.char_at(start) {
            Some('"') => self.quoted_end(start, '"'),
            Some('\'') => self.quoted_end(start, '\''),
            Some('|') | Some('>') if !value.is_empty() => self.block_scalar_end(start),
            _ => {
                // Plain scalars are treated as single-line.
                let line_end = self.line_end(start);
                (start + value.chars().count()).min(line_end)
            }
        }
    }

    fn quoted_end(&self, start: usize, quote: char) -> usize {
        let mut i = start + 1;
        while let Some(c) = self.char_at(i) {
            match c {
                '\\' if quote == '"' => i += 2,
                '\'' if quote == '\'' && self.char_at(i + 1) == Some('\'') => i += 2,
                c if c == quote => return i + 1,
                _ => i += 1,
            }
        }
        self.chars.len()
    }

    /// Literal and folded scalars: the content lines run while they are blank
    /// or at least as indented as the first content line.
    fn block_scalar_end(&self, start: usize) -> usize {
        let header_line = self.index.position(start).line;
        let mut end = self.line_end(start);
        let mut content_indent = None;

        for line in header_line + 1..self.index.line_count() {
            let Some(line_start) = self.index.line_start(line) else {
                break;
            };
            let line_end = self.line_end(line_start);
            let indent = (line_start..line_end)
                .take_while(|&i| self.char_at(i) == Some(' '))
                .count();
            if line_start + indent == line_end {
                continue; // blank
            }
            match content_indent {
                None => content_indent = Some(indent),
                Some(required) if indent < required => break,
                Some(_) => {}
            }
            end = line_end;
        }
        end
    }

    /// Offset of the newline ending the line that contains `offset`.
    fn line_end(&self, offset: usize) -> usize {
        (offset..self.chars.len())
            .find(|&i| self.chars[i] == '\n')
            .unwrap_or(self.chars.len())
    }

    /// Flow collections end past their closing bracket; block collections end
    /// with their last child.
    fn collection_end(&self, start: usize, marker: &Marker, last_child: Option<&SourceSpan>) -> usize {
        match (self.char_at(start), last_child) {
            (Some('[') | Some('{'), _) => marker.index() + 1,
            (_, Some(child)) => child.end.offset,
            (_, None) => start,
        }
    }
}

impl MarkedEventReceiver for YamlBuilder {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        match ev {
            Event::Nothing => {}

            Event::StreamStart => {}
            Event::StreamEnd => {}
            Event::DocumentStart => {}
            Event::DocumentEnd => {}

            Event::Scalar(value, style, _anchor_id, _tag) => {
                self.on_scalar(value, style, &marker);
            }

            Event::SequenceStart(_anchor_id, _tag) => {
                self.stack.push(BuildNode::Sequence {
                    start: self.index.position(marker.index()),
                    items: Vec::new(),
                });
            }

            Event::SequenceEnd => {
                let Some(BuildNode::Sequence { start, items }) = self.stack.pop() else {
                    tracing::warn!(offset = marker.index(), "sequence end without matching start");
                    return;
                };
                let end = self.collection_end(start.offset, &marker, items.last().map(|n| &n.span));
                let span = self.span(start.offset, end);
                self.push_complete(YamlNode::new_sequence(span, items));
            }

            Event::MappingStart(_anchor_id, _tag) => {
                self.stack.push(BuildNode::Mapping {
                    start: self.index.position(marker.index()),
                    entries: Vec::new(),
                    pending_key: None,
                });
            }

            Event::MappingEnd => {
                let Some(BuildNode::Mapping {
                    start,
                    mut entries,
                    pending_key,
                }) = self.stack.pop()
                else {
                    tracing::warn!(offset = marker.index(), "mapping end without matching start");
                    return;
                };
                if let Some(key) = pending_key {
                    let value = YamlNode::new_scalar(Yaml::Null, SourceSpan::point(key.span.end));
                    entries.push(MappingEntry::new(key, value));
                }
                let end = self.collection_end(
                    start.offset,
                    &marker,
                    entries.last().map(|e| &e.value.span),
                );
                let span = self.span(start.offset, end);
                self.push_complete(YamlNode::new_mapping(span, entries));
            }

            Event::Alias(anchor_id) => {
                let span = self.span(marker.index(), marker.index());
                self.push_complete(YamlNode::new_scalar(Yaml::Alias(anchor_id), span));
            }
        }
    }
}
