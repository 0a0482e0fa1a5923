use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::trace;

use crate::node::{Node, walk_with_depth};

use super::{Evaluate, NodePredicate, Outcome, all_passing};

/// One entry of a query report: the tag whose rule produced `outcome`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub kind: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl Finding {
    #[must_use]
    pub fn is_passing(&self) -> bool {
        self.outcome.is_passing()
    }
}

/// Rules keyed by node tag, applied to every node below a traversal root.
///
/// The root itself is never matched against its own tag, which lets a query
/// nested inside a predicate inspect only what the matched node contains:
///
/// ```
/// use tree_guard::assert::{Assertion, Query, forbid};
///
/// let no_nested_for = Query::new().rule(
///     "ForStatement",
///     Assertion::that("For loops may not be nested")
///         .for_all(Query::new().rule("ForStatement", forbid())),
/// );
/// # let _ = no_nested_for;
/// ```
#[derive(Default)]
pub struct Query {
    rules: IndexMap<String, Box<dyn Evaluate>>,
    max_depth: Option<usize>,
}

/// Message given to a rule that was added without one.
fn default_message_for(kind: &str) -> String {
    format!("Assertion for type {kind} failed.")
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the rule for `kind`, replacing any earlier rule for that tag.
    #[must_use]
    pub fn rule(self, kind: impl Into<String>, rule: impl Evaluate + 'static) -> Self {
        self.boxed_rule(kind, Box::new(rule))
    }

    #[must_use]
    pub fn boxed_rule(mut self, kind: impl Into<String>, mut rule: Box<dyn Evaluate>) -> Self {
        let kind = kind.into();
        rule.default_message(&default_message_for(&kind));
        self.rules.insert(kind, rule);
        self
    }

    /// Only match nodes at most `depth` levels below the traversal root.
    #[must_use]
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    #[must_use]
    pub const fn depth_limit(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Group the nodes below `tree` by tag. Every rule tag gets a group,
    /// empty when the tag does not occur.
    fn collect<'a>(&self, tree: &'a Node) -> IndexMap<&str, Vec<&'a Node>> {
        let mut groups: IndexMap<&str, Vec<&'a Node>> =
            self.rules.keys().map(|kind| (kind.as_str(), Vec::new())).collect();

        walk_with_depth(tree, self.max_depth, |node, depth| {
            if depth > 0
                && let Some(group) = groups.get_mut(node.kind())
            {
                group.push(node);
            }
        });
        groups
    }

    /// Evaluate every rule against `tree`, in rule order.
    ///
    /// A rule answering with a composite contributes its members one by one.
    #[must_use]
    pub fn findings(&self, tree: &Node) -> Vec<Finding> {
        let groups = self.collect(tree);
        let mut findings = Vec::with_capacity(self.rules.len());

        for (kind, rule) in &self.rules {
            let group = groups.get(kind.as_str()).map_or(&[] as &[&Node], Vec::as_slice);
            trace!(kind = %kind, matched = group.len(), "evaluating rule");

            match rule.evaluate(group) {
                Outcome::Composite { outcomes } => {
                    findings.extend(outcomes.into_iter().map(|outcome| Finding {
                        kind: kind.clone(),
                        outcome,
                    }));
                }
                outcome => findings.push(Finding {
                    kind: kind.clone(),
                    outcome,
                }),
            }
        }
        findings
    }

    /// Evaluate every rule against `tree` and return the flattened outcomes.
    #[must_use]
    pub fn run(&self, tree: &Node) -> Vec<Outcome> {
        self.findings(tree)
            .into_iter()
            .map(|finding| finding.outcome)
            .collect()
    }

    /// True if every rule holds for `tree`.
    #[must_use]
    pub fn passes(&self, tree: &Node) -> bool {
        all_passing(&self.run(tree))
    }
}

/// A nested query holds for a node when its report on that node's subtree
/// passes.
impl NodePredicate for Query {
    fn test(&self, node: &Node) -> bool {
        self.passes(node)
    }
}

/// Applied to a group, a query runs on each member and reports everything.
impl Evaluate for Query {
    fn evaluate(&self, group: &[&Node]) -> Outcome {
        Outcome::composite(group.iter().flat_map(|node| self.run(node)).collect())
    }

    fn message(&self) -> Cow<'_, str> {
        let messages: Vec<Cow<'_, str>> = self.rules.values().map(|rule| rule.message()).collect();
        Cow::Owned(messages.join(" AND "))
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("kinds", &self.rules.keys().collect::<Vec<_>>())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
