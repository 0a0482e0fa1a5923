use indexmap::IndexMap;
use serde::Deserialize;

use crate::node::DEFAULT_TAG_KEY;

/// Current rule file format version.
pub const CONFIG_VERSION: &str = "1";

/// A rule file.
///
/// ```toml
/// version = "1"
///
/// [rules.WhileStatement]
/// message = "There should be no [while] loops"
/// forbid = true
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub version: Option<String>,

    /// JSON key that carries each node's tag.
    #[serde(default = "default_tag_key")]
    pub tag_key: String,

    /// Depth bound for the top-level query, measured from the tree root.
    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Glob patterns of tree files to skip when scanning directories.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Rules keyed by node tag, evaluated and reported in file order.
    #[serde(default)]
    pub rules: IndexMap<String, RuleSpec>,
}

fn default_tag_key() -> String {
    DEFAULT_TAG_KEY.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: Some(CONFIG_VERSION.to_string()),
            tag_key: default_tag_key(),
            max_depth: None,
            exclude: Vec::new(),
            rules: IndexMap::new(),
        }
    }
}

/// One rule: either an assertion (quantifier fields) or a combinator
/// (`and`, `or`, `not`). Mixing the two is rejected by validation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSpec {
    #[serde(default)]
    pub message: Option<String>,

    /// At least one matching node must exist.
    #[serde(default)]
    pub exists: bool,

    /// No matching node may exist.
    #[serde(default)]
    pub forbid: bool,

    /// Exact number of matching nodes.
    #[serde(default)]
    pub count: Option<usize>,

    #[serde(default)]
    pub min_count: Option<usize>,

    #[serde(default)]
    pub max_count: Option<usize>,

    /// Predicates every matching node must satisfy.
    #[serde(default)]
    pub for_all: Vec<PredicateSpec>,

    /// Predicates each satisfied by at least one matching node.
    #[serde(default)]
    pub for_some: Vec<PredicateSpec>,

    /// `None` when the key is absent. An empty list is kept so validation
    /// can reject it.
    #[serde(default)]
    pub and: Option<Vec<RuleSpec>>,

    #[serde(default)]
    pub or: Option<Vec<RuleSpec>>,

    #[serde(default)]
    pub not: Option<Box<RuleSpec>>,
}

impl RuleSpec {
    #[must_use]
    pub fn is_combinator(&self) -> bool {
        self.and.is_some() || self.or.is_some() || self.not.is_some()
    }

    #[must_use]
    pub fn has_assertion_fields(&self) -> bool {
        self.exists
            || self.forbid
            || self.count.is_some()
            || self.min_count.is_some()
            || self.max_count.is_some()
            || !self.for_all.is_empty()
            || !self.for_some.is_empty()
    }
}

/// A per-node predicate: a nested query, or a test on one field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PredicateSpec {
    #[serde(default)]
    pub query: Option<QuerySpec>,

    /// Dotted path to a field, e.g. `declarations.0.id.name`.
    #[serde(default)]
    pub field: Option<String>,

    /// Regex the field's string value must match.
    #[serde(default)]
    pub matches: Option<String>,

    /// Scalar the field must equal.
    #[serde(default)]
    pub equals: Option<Scalar>,
}

/// A nested query run on each matched node's subtree.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuerySpec {
    /// Depth bound measured from the matched node.
    #[serde(default)]
    pub max_depth: Option<usize>,

    pub rules: IndexMap<String, RuleSpec>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
