use serde::Serialize;

/// Result of evaluating a rule against a node group.
///
/// Rule violations are values of this type, never errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failure { message: String },
    /// Several outcomes reported together, e.g. both sides of a failed `And`.
    Composite { outcomes: Vec<Outcome> },
}

impl Outcome {
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn composite(outcomes: Vec<Self>) -> Self {
        Self::Composite { outcomes }
    }

    /// A composite passes only if every member passes. Empty composites pass.
    #[must_use]
    pub fn is_passing(&self) -> bool {
        match self {
            Self::Success => true,
            Self::Failure { .. } => false,
            Self::Composite { outcomes } => outcomes.iter().all(Self::is_passing),
        }
    }

    /// Messages of every failure contained in this outcome, depth first.
    #[must_use]
    pub fn failure_messages(&self) -> Vec<&str> {
        match self {
            Self::Success => Vec::new(),
            Self::Failure { message } => vec![message.as_str()],
            Self::Composite { outcomes } => {
                outcomes.iter().flat_map(Self::failure_messages).collect()
            }
        }
    }

    /// Single-line description of why this outcome failed.
    ///
    /// Several failures inside a composite are joined with ` AND ` and
    /// parenthesized. Passing outcomes describe as an empty string.
    #[must_use]
    pub fn describe(&self) -> String {
        let messages = self.failure_messages();
        match messages.as_slice() {
            [] => String::new(),
            [single] => (*single).to_string(),
            many => format!("({})", many.join(" AND ")),
        }
    }
}

/// Reduce a single outcome to a pass/fail verdict.
#[must_use]
pub fn is_passing(outcome: &Outcome) -> bool {
    outcome.is_passing()
}

/// True if every outcome in a report passes. An empty report passes.
#[must_use]
pub fn all_passing(outcomes: &[Outcome]) -> bool {
    outcomes.iter().all(Outcome::is_passing)
}

/// Coercion of predicate results to a pass/fail verdict.
///
/// Predicates may answer with a plain `bool`, an [`Outcome`], or a list of
/// outcomes (the report of a nested query).
pub trait Verdict {
    fn passed(&self) -> bool;
}

impl Verdict for bool {
    fn passed(&self) -> bool {
        *self
    }
}

impl Verdict for Outcome {
    fn passed(&self) -> bool {
        self.is_passing()
    }
}

impl Verdict for Vec<Outcome> {
    fn passed(&self) -> bool {
        all_passing(self)
    }
}

impl Verdict for [Outcome] {
    fn passed(&self) -> bool {
        all_passing(self)
    }
}

impl<T: Verdict + ?Sized> Verdict for &T {
    fn passed(&self) -> bool {
        (**self).passed()
    }
}

impl<T: Verdict> Verdict for Option<T> {
    fn passed(&self) -> bool {
        self.as_ref().is_some_and(Verdict::passed)
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
