//! Composable structural assertions over tagged trees.
//!
//! A [`Query`] maps node tags to rules. Running it walks a tree once, groups
//! the nodes it meets by tag, and asks each tag's rule to evaluate its group.
//! Rules are [`Assertion`]s (quantified predicates over the group) or
//! combinations of rules built with [`and`], [`or`] and [`not`].

mod assertion;
mod combinator;
mod outcome;
mod query;

pub use assertion::{Assertion, DEFAULT_MESSAGE, forbid, require};
pub use combinator::{And, Not, Or, and, not, or};
pub use outcome::{Outcome, Verdict, all_passing, is_passing};
pub use query::{Finding, Query};

use std::borrow::Cow;

use crate::node::Node;

/// Anything that can judge a group of same-tag nodes.
///
/// Implementors hold no per-call state, so one rule can be evaluated from
/// many threads at once.
pub trait Evaluate: Send + Sync {
    fn evaluate(&self, group: &[&Node]) -> Outcome;

    /// Human-readable statement of what this rule requires.
    fn message(&self) -> Cow<'_, str>;

    /// Give rules declared without a message the one a [`Query`] derives
    /// from their tag. Called once, before the rule is shared.
    fn default_message(&mut self, _message: &str) {}
}

impl<T: Evaluate + ?Sized> Evaluate for Box<T> {
    fn evaluate(&self, group: &[&Node]) -> Outcome {
        (**self).evaluate(group)
    }

    fn message(&self) -> Cow<'_, str> {
        (**self).message()
    }

    fn default_message(&mut self, message: &str) {
        (**self).default_message(message);
    }
}

/// A per-node test used by `for_all` / `for_some`.
pub trait NodePredicate: Send + Sync {
    fn test(&self, node: &Node) -> bool;
}

impl<F, V> NodePredicate for F
where
    F: Fn(&Node) -> V + Send + Sync,
    V: Verdict,
{
    fn test(&self, node: &Node) -> bool {
        self(node).passed()
    }
}

/// A whole-group test used by `has`.
pub trait GroupPredicate: Send + Sync {
    fn test(&self, group: &[&Node]) -> bool;
}

impl<F, V> GroupPredicate for F
where
    F: Fn(&[&Node]) -> V + Send + Sync,
    V: Verdict,
{
    fn test(&self, group: &[&Node]) -> bool {
        self(group).passed()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
