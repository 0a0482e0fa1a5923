//! Boolean composition of rules.

use std::borrow::Cow;

use crate::error::{Result, TreeGuardError};
use crate::node::Node;

use super::{Evaluate, Outcome};

type Operand = Box<dyn Evaluate>;

/// Both operands must pass. When both fail, both failures are reported.
pub struct And {
    left: Operand,
    right: Operand,
}

/// At least one operand must pass.
pub struct Or {
    left: Operand,
    right: Operand,
}

/// The operand must fail.
pub struct Not {
    inner: Operand,
}

/// Right-associate `operands` into nested pairs: `[a, b, c]` becomes
/// `join(a, join(b, c))`.
fn fold_operands<T, J>(operands: Vec<Operand>, name: &str, join: J) -> Result<T>
where
    T: Evaluate + 'static,
    J: Fn(Operand, Operand) -> T,
{
    let count = operands.len();
    let mut rest = operands.into_iter().rev();
    let (Some(right), Some(left)) = (rest.next(), rest.next()) else {
        return Err(TreeGuardError::Config(format!(
            "{name} requires at least two operands, got {count}"
        )));
    };

    let mut folded = join(left, right);
    for operand in rest {
        folded = join(operand, Box::new(folded));
    }
    Ok(folded)
}

impl And {
    #[must_use]
    pub fn new(left: impl Evaluate + 'static, right: impl Evaluate + 'static) -> Self {
        Self {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Conjunction of two or more rules.
    ///
    /// # Errors
    /// Returns an error if fewer than two operands are given.
    pub fn all(operands: Vec<Operand>) -> Result<Self> {
        fold_operands(operands, "And", |left, right| Self { left, right })
    }
}

impl Evaluate for And {
    fn evaluate(&self, group: &[&Node]) -> Outcome {
        let left = self.left.evaluate(group);
        let right = self.right.evaluate(group);
        match (left.is_passing(), right.is_passing()) {
            (true, true) => Outcome::Success,
            (false, true) => left,
            (true, false) => right,
            (false, false) => Outcome::composite(vec![left, right]),
        }
    }

    fn message(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{} AND {}", self.left.message(), self.right.message()))
    }

    fn default_message(&mut self, message: &str) {
        self.left.default_message(message);
        self.right.default_message(message);
    }
}

impl Or {
    #[must_use]
    pub fn new(left: impl Evaluate + 'static, right: impl Evaluate + 'static) -> Self {
        Self {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Disjunction of two or more rules.
    ///
    /// # Errors
    /// Returns an error if fewer than two operands are given.
    pub fn any(operands: Vec<Operand>) -> Result<Self> {
        fold_operands(operands, "Or", |left, right| Self { left, right })
    }
}

impl Evaluate for Or {
    fn evaluate(&self, group: &[&Node]) -> Outcome {
        let left = self.left.evaluate(group);
        let right = self.right.evaluate(group);
        if left.is_passing() || right.is_passing() {
            return Outcome::Success;
        }
        Outcome::failure(format!("{} OR {}", left.describe(), right.describe()))
    }

    fn message(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{} OR {}", self.left.message(), self.right.message()))
    }

    fn default_message(&mut self, message: &str) {
        self.left.default_message(message);
        self.right.default_message(message);
    }
}

impl Not {
    #[must_use]
    pub fn new(inner: impl Evaluate + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }

    #[must_use]
    pub fn boxed(inner: Operand) -> Self {
        Self { inner }
    }
}

impl Evaluate for Not {
    fn evaluate(&self, group: &[&Node]) -> Outcome {
        if self.inner.evaluate(group).is_passing() {
            Outcome::failure(self.message())
        } else {
            Outcome::Success
        }
    }

    fn message(&self) -> Cow<'_, str> {
        Cow::Owned(format!("NOT {}", self.inner.message()))
    }

    fn default_message(&mut self, message: &str) {
        self.inner.default_message(message);
    }
}

#[must_use]
pub fn and(left: impl Evaluate + 'static, right: impl Evaluate + 'static) -> And {
    And::new(left, right)
}

#[must_use]
pub fn or(left: impl Evaluate + 'static, right: impl Evaluate + 'static) -> Or {
    Or::new(left, right)
}

#[must_use]
pub fn not(inner: impl Evaluate + 'static) -> Not {
    Not::new(inner)
}

#[cfg(test)]
#[path = "combinator_tests.rs"]
mod tests;
