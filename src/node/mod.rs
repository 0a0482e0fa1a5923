//! Tagged syntax tree consumed by the assertion engine.
//!
//! A [`Node`] carries a type tag (e.g. `ForStatement`) and an ordered map of
//! named fields. Field values are scalars, nested nodes, lists, or untagged
//! records. Only tagged nodes take part in matching; records and scalars are
//! data that predicates may inspect through [`Node::path`].

mod walk;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use walk::{walk, walk_with_depth};

use indexmap::IndexMap;

use crate::error::{Result, TreeGuardError};

/// JSON key holding the node tag in ESTree-style trees.
pub const DEFAULT_TAG_KEY: &str = "type";

/// A field value inside a [`Node`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Node(Box<Node>),
    List(Vec<Value>),
    /// An object without a type tag. Never visited by the walker.
    Record(IndexMap<String, Value>),
}

impl Value {
    #[must_use]
    pub const fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Direct child nodes held by this value, in sequence order.
    ///
    /// Scalars, records and nested lists contribute nothing.
    fn child_nodes(&self) -> impl Iterator<Item = &Node> {
        let none: &[Self] = &[];
        let (single, many) = match self {
            Self::Node(node) => (Some(node.as_ref()), none),
            Self::List(items) => (None, items.as_slice()),
            _ => (None, none),
        };
        single
            .into_iter()
            .chain(many.iter().filter_map(Self::as_node))
    }

    fn get(&self, segment: &str) -> Option<&Self> {
        match self {
            Self::Node(node) => node.field(segment),
            Self::Record(fields) => fields.get(segment),
            Self::List(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    fn from_json(value: serde_json::Value, tag_key: &str) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => Self::List(
                items
                    .into_iter()
                    .map(|item| Self::from_json(item, tag_key))
                    .collect(),
            ),
            serde_json::Value::Object(map) => {
                let kind = map
                    .get(tag_key)
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_owned);
                let fields = map
                    .into_iter()
                    .filter(|(key, _)| kind.is_none() || key != tag_key)
                    .map(|(key, value)| (key, Self::from_json(value, tag_key)))
                    .collect();
                match kind {
                    Some(kind) => Self::Node(Box::new(Node { kind, fields })),
                    None => Self::Record(fields),
                }
            }
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Self::Node(Box::new(node))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<Vec<Node>> for Value {
    fn from(nodes: Vec<Node>) -> Self {
        Self::List(nodes.into_iter().map(Self::from).collect())
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items)
    }
}

/// A tagged tree vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: String,
    fields: IndexMap<String, Value>,
}

impl Node {
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: IndexMap::new(),
        }
    }

    /// Append a field. Declaration order is traversal order.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Direct child nodes in field-declaration order.
    pub fn children(&self) -> impl Iterator<Item = &Self> {
        self.fields.values().flat_map(Value::child_nodes)
    }

    /// Resolve a dotted path such as `declarations.0.id.name`.
    ///
    /// Numeric segments index into lists. Returns `None` when any segment is
    /// missing.
    #[must_use]
    pub fn path(&self, dotted: &str) -> Option<&Value> {
        let mut segments = dotted.split('.');
        let first = self.field(segments.next()?)?;
        segments.try_fold(first, |value, segment| value.get(segment))
    }

    /// Convert a JSON document into a tree.
    ///
    /// Objects carrying a string under `tag_key` become nodes; other objects
    /// become records.
    ///
    /// # Errors
    /// Returns `MissingTag` if the document root is not a tagged object.
    pub fn from_json(value: serde_json::Value, tag_key: &str) -> Result<Self> {
        match Value::from_json(value, tag_key) {
            Value::Node(node) => Ok(*node),
            _ => Err(TreeGuardError::MissingTag {
                tag_key: tag_key.to_string(),
            }),
        }
    }

    /// Parse JSON text into a tree.
    ///
    /// # Errors
    /// Returns an error if the text is not valid JSON or the root has no tag.
    pub fn from_json_str(text: &str, tag_key: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Self::from_json(value, tag_key)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
