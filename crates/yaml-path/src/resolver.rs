//! Cursor position to breadcrumb resolution.
//!
//! The resolver walks from a document root towards the cursor. At each
//! container it picks the last child starting on or before the cursor line;
//! children are visited in document order and their start lines never
//! decrease, so the scan stops at the first child past the cursor.
//!
//! Only lines are compared. Several keys on the cursor line resolve to the
//! last of them, and flow collections on a single line are not split by
//! column.

use crate::path::{Breadcrumb, PathSegment};
use crate::{ParseError, YamlNode};

/// Find the path of the node under `(line, col)` in a document stream.
///
/// Documents are tried in order and the first non-empty breadcrumb wins; the
/// result is relative to its own document. An empty breadcrumb means nothing
/// matched: the cursor is before or after all content, or the document is a
/// bare scalar.
pub fn resolve(documents: &[YamlNode], line: usize, col: usize) -> Breadcrumb {
    for (index, document) in documents.iter().enumerate() {
        let found = resolve_container(document, line, col, &Breadcrumb::new());
        if let Some(breadcrumb) = found {
            tracing::trace!(document = index, path = %breadcrumb, "resolved cursor");
            return breadcrumb;
        }
    }
    Breadcrumb::new()
}

/// [`resolve`] followed by formatting; `""` when nothing matched.
pub fn resolve_path(documents: &[YamlNode], line: usize, col: usize) -> String {
    resolve(documents, line, col).to_path_string()
}

/// Parse `text` and resolve `(line, col)` in it.
///
/// # Errors
///
/// Returns the [`ParseError`] of the stream if the text is not valid YAML.
pub fn resolve_text(text: &str, line: usize, col: usize) -> Result<String, ParseError> {
    let documents = crate::parse(text)?;
    Ok(resolve_path(&documents, line, col))
}

/// Resolve inside a mapping or sequence. Leaves and null documents yield
/// `None`.
fn resolve_container(node: &YamlNode, line: usize, col: usize, stack: &Breadcrumb) -> Option<Breadcrumb> {
    if let Some(entries) = node.as_mapping() {
        let mut closest = None;
        for entry in entries {
            if entry.key_span().start.line > line {
                break;
            }
            closest = Some(entry);
        }
        let entry = closest?;
        let segment = PathSegment::Key(entry.key.yaml.clone());
        return resolve_child(entry.key_span().start.line, &entry.value, line, col, stack.with(segment));
    }

    if let Some(items) = node.as_sequence() {
        let mut closest = None;
        for (index, item) in items.iter().enumerate() {
            if item.span.start.line > line {
                break;
            }
            closest = Some((index, item));
        }
        let (index, item) = closest?;
        return resolve_child(item.span.start.line, item, line, col, stack.with(PathSegment::Index(index)));
    }

    None
}

/// Decide whether the chosen child (starting on `child_line`) holds the
/// cursor, descending into it when it is a container.
fn resolve_child(
    child_line: usize,
    value: &YamlNode,
    line: usize,
    col: usize,
    stack: Breadcrumb,
) -> Option<Breadcrumb> {
    tracing::trace!(path = %stack, child_line, line, "visiting");

    if child_line == line {
        return Some(stack);
    }
    if child_line > line {
        return None;
    }
    if value.is_mapping() || value.is_sequence() {
        return resolve_container(value, line, col, &stack);
    }
    // A leaf only matches while its own text reaches the cursor line, e.g. a
    // value on the line after its key or a multi-line block scalar.
    value.span.covers_line(line).then_some(stack)
}
