use std::borrow::Cow;
use std::fmt;

use crate::node::Node;

use super::{Evaluate, GroupPredicate, NodePredicate, Outcome};

/// Message used by an assertion that never received one.
pub const DEFAULT_MESSAGE: &str = "Assertion failed.";

/// A quantified rule over a node group.
///
/// Predicates come in three kinds, checked in this order:
/// - group predicates (`has`) see the whole group at once;
/// - universal predicates (`for_all`) must hold for every node;
/// - existential predicates (`for_some`) must each hold for at least one node.
///
/// ```
/// use tree_guard::assert::Assertion;
/// use tree_guard::node::Node;
///
/// let rule = Assertion::that("Exactly two [var] declarations")
///     .has(|group: &[&Node]| group.len() == 2);
/// # let _ = rule;
/// ```
pub struct Assertion {
    message: Option<String>,
    group_checks: Vec<Box<dyn GroupPredicate>>,
    universal: Vec<Box<dyn NodePredicate>>,
    existential: Vec<Box<dyn NodePredicate>>,
}

impl Assertion {
    #[must_use]
    pub fn that(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::unnamed()
        }
    }

    /// An assertion whose message is supplied later by the enclosing query.
    #[must_use]
    pub fn unnamed() -> Self {
        Self {
            message: None,
            group_checks: Vec::new(),
            universal: Vec::new(),
            existential: Vec::new(),
        }
    }

    /// Require at least one node in the group.
    #[must_use]
    pub fn exists(self) -> Self {
        self.for_some(|_: &Node| true)
    }

    /// Require the group to be empty.
    #[must_use]
    pub fn does_not_exist(self) -> Self {
        self.has(|group: &[&Node]| group.is_empty())
    }

    #[must_use]
    pub fn for_all(mut self, predicate: impl NodePredicate + 'static) -> Self {
        self.universal.push(Box::new(predicate));
        self
    }

    #[must_use]
    pub fn for_some(mut self, predicate: impl NodePredicate + 'static) -> Self {
        self.existential.push(Box::new(predicate));
        self
    }

    #[must_use]
    pub fn has(mut self, predicate: impl GroupPredicate + 'static) -> Self {
        self.group_checks.push(Box::new(predicate));
        self
    }

    fn fail(&self) -> Outcome {
        Outcome::failure(self.message())
    }
}

impl Evaluate for Assertion {
    fn evaluate(&self, group: &[&Node]) -> Outcome {
        if !self.group_checks.iter().all(|check| check.test(group)) {
            return self.fail();
        }

        // Every node is scanned even once all existentials are satisfied, so
        // universal predicates see the whole group.
        let mut satisfied = vec![false; self.existential.len()];
        for node in group {
            if !self.universal.iter().all(|predicate| predicate.test(node)) {
                return self.fail();
            }
            for (seen, predicate) in satisfied.iter_mut().zip(&self.existential) {
                *seen = *seen || predicate.test(node);
            }
        }

        if satisfied.into_iter().all(|seen| seen) {
            Outcome::Success
        } else {
            self.fail()
        }
    }

    fn message(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.message.as_deref().unwrap_or(DEFAULT_MESSAGE))
    }

    fn default_message(&mut self, message: &str) {
        if self.message.is_none() {
            self.message = Some(message.to_string());
        }
    }
}

impl fmt::Debug for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assertion")
            .field("message", &self.message)
            .field("group_checks", &self.group_checks.len())
            .field("universal", &self.universal.len())
            .field("existential", &self.existential.len())
            .finish()
    }
}

/// Rule that passes when at least one node of its tag is present.
#[must_use]
pub fn require() -> Assertion {
    Assertion::unnamed().exists()
}

/// Rule that passes when no node of its tag is present.
#[must_use]
pub fn forbid() -> Assertion {
    Assertion::unnamed().does_not_exist()
}

#[cfg(test)]
#[path = "assertion_tests.rs"]
mod tests;
