//! YAML nodes with source positions.

use crate::SourceSpan;
use yaml_rust2::Yaml;

/// A YAML value with source position information.
///
/// Wraps an owned `yaml-rust2::Yaml` value together with the span it was
/// parsed from and a parallel structure of source-tracked children. The
/// resolver walks the children; `yaml` is kept so keys can be used as path
/// segments and whole subtrees can be handed to code that does not care
/// about positions.
///
/// ## Example
///
/// ```rust
/// use yaml_path::parse;
///
/// let docs = parse("title: My Document").unwrap();
/// let title = docs[0].get_hash_value("title").unwrap();
/// assert_eq!(title.span.start.col, 7);
/// ```
#[derive(Debug, Clone)]
pub struct YamlNode {
    /// The complete yaml-rust2 value (owned).
    pub yaml: Yaml,

    /// Source span of this node.
    pub span: SourceSpan,

    children: Children,
}

/// Source-tracked children of a YAML node, mirroring `Yaml`.
#[derive(Debug, Clone)]
enum Children {
    /// Scalars, null and aliases
    None,

    Sequence(Vec<YamlNode>),

    Mapping(Vec<MappingEntry>),
}

/// A key-value pair in a mapping.
///
/// Entries are kept in document order, including duplicate keys that
/// `Yaml::Hash` would collapse.
#[derive(Debug, Clone)]
pub struct MappingEntry {
    pub key: YamlNode,

    pub value: YamlNode,
}

impl YamlNode {
    /// Create a leaf node.
    pub fn new_scalar(yaml: Yaml, span: SourceSpan) -> Self {
        Self {
            yaml,
            span,
            children: Children::None,
        }
    }

    /// Create a sequence node. The `Yaml::Array` is assembled from the items.
    pub fn new_sequence(span: SourceSpan, items: Vec<YamlNode>) -> Self {
        let yaml = Yaml::Array(items.iter().map(|n| n.yaml.clone()).collect());
        Self {
            yaml,
            span,
            children: Children::Sequence(items),
        }
    }

    /// Create a mapping node. The `Yaml::Hash` is assembled from the entries;
    /// a later duplicate key wins there, but every entry stays in `entries`.
    pub fn new_mapping(span: SourceSpan, entries: Vec<MappingEntry>) -> Self {
        let yaml = Yaml::Hash(
            entries
                .iter()
                .map(|e| (e.key.yaml.clone(), e.value.yaml.clone()))
                .collect(),
        );
        Self {
            yaml,
            span,
            children: Children::Mapping(entries),
        }
    }

    /// Check if this is a leaf (not a sequence or mapping).
    pub fn is_scalar(&self) -> bool {
        matches!(self.children, Children::None)
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self.children, Children::Sequence(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self.children, Children::Mapping(_))
    }

    /// True for the null node an empty document parses to.
    pub fn is_null(&self) -> bool {
        matches!(self.yaml, Yaml::Null)
    }

    pub fn as_sequence(&self) -> Option<&[YamlNode]> {
        match &self.children {
            Children::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&[MappingEntry]> {
        match &self.children {
            Children::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Get a value from a mapping by string key.
    ///
    /// Returns the first matching entry, or None if this is not a mapping.
    pub fn get_hash_value(&self, key: &str) -> Option<&YamlNode> {
        self.as_mapping()?
            .iter()
            .find(|entry| entry.key.yaml.as_str() == Some(key))
            .map(|entry| &entry.value)
    }

    /// Get a sequence element by index.
    pub fn get_sequence_item(&self, index: usize) -> Option<&YamlNode> {
        self.as_sequence()?.get(index)
    }

    /// Number of children (sequence length or mapping entry count).
    pub fn len(&self) -> usize {
        match &self.children {
            Children::None => 0,
            Children::Sequence(items) => items.len(),
            Children::Mapping(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MappingEntry {
    pub fn new(key: YamlNode, value: YamlNode) -> Self {
        Self { key, value }
    }

    /// Span of the key, which is where the resolver considers the entry to start.
    pub fn key_span(&self) -> &SourceSpan {
        &self.key.span
    }
}
