//! Turning a validated rule file into an executable [`Query`].

use indexmap::IndexMap;
use regex::Regex;
use tracing::debug;

use crate::assert::{And, Assertion, Evaluate, GroupPredicate, NodePredicate, Not, Or, Query};
use crate::config::{Config, PredicateSpec, QuerySpec, RuleSpec, Scalar};
use crate::error::{Result, TreeGuardError};
use crate::node::{Node, Value};

/// Build the top-level query described by `config`.
///
/// # Errors
/// Returns an error if a combinator has too few operands, a predicate is
/// ill-formed, or a regex does not compile.
pub fn compile_query(config: &Config) -> Result<Query> {
    let query = compile_rules(&config.rules, config.max_depth, "rules")?;
    debug!(rules = config.rules.len(), max_depth = ?config.max_depth, "compiled rule file");
    Ok(query)
}

fn compile_rules(
    rules: &IndexMap<String, RuleSpec>,
    max_depth: Option<usize>,
    path: &str,
) -> Result<Query> {
    let mut query = Query::new();
    for (kind, spec) in rules {
        let rule = compile_rule(spec, &format!("{path}.{kind}"))?;
        query = query.boxed_rule(kind.clone(), rule);
    }
    Ok(match max_depth {
        Some(depth) => query.max_depth(depth),
        None => query,
    })
}

fn compile_rule(spec: &RuleSpec, path: &str) -> Result<Box<dyn Evaluate>> {
    if let Some(specs) = &spec.and {
        let operands = compile_operands(specs, path, "and")?;
        return Ok(Box::new(And::all(operands)?));
    }
    if let Some(specs) = &spec.or {
        let operands = compile_operands(specs, path, "or")?;
        return Ok(Box::new(Or::any(operands)?));
    }
    if let Some(inner) = &spec.not {
        let inner = compile_rule(inner, &format!("{path}.not"))?;
        return Ok(Box::new(Not::boxed(inner)));
    }
    Ok(Box::new(compile_assertion(spec, path)?))
}

fn compile_operands(specs: &[RuleSpec], path: &str, name: &str) -> Result<Vec<Box<dyn Evaluate>>> {
    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| compile_rule(spec, &format!("{path}.{name}[{i}]")))
        .collect()
}

fn compile_assertion(spec: &RuleSpec, path: &str) -> Result<Assertion> {
    let mut assertion = spec
        .message
        .as_ref()
        .map_or_else(Assertion::unnamed, Assertion::that);

    if spec.exists {
        assertion = assertion.exists();
    }
    if spec.forbid {
        assertion = assertion.does_not_exist();
    }

    let bounds = CountBounds {
        min: spec.count.or(spec.min_count),
        max: spec.count.or(spec.max_count),
    };
    if bounds.min.is_some() || bounds.max.is_some() {
        assertion = assertion.has(bounds);
    }

    for (i, predicate) in spec.for_all.iter().enumerate() {
        assertion = assertion.for_all(compile_predicate(predicate, &format!("{path}.for_all[{i}]"))?);
    }
    for (i, predicate) in spec.for_some.iter().enumerate() {
        assertion =
            assertion.for_some(compile_predicate(predicate, &format!("{path}.for_some[{i}]"))?);
    }
    Ok(assertion)
}

fn compile_predicate(spec: &PredicateSpec, path: &str) -> Result<PredicateRule> {
    match (&spec.query, &spec.field) {
        (Some(query), None) => Ok(PredicateRule::Nested(compile_nested(query, path)?)),
        (None, Some(field)) => Ok(PredicateRule::Field(compile_field(spec, field, path)?)),
        _ => Err(TreeGuardError::Config(format!(
            "{path}: a predicate needs exactly one of query or field"
        ))),
    }
}

fn compile_nested(spec: &QuerySpec, path: &str) -> Result<Query> {
    compile_rules(&spec.rules, spec.max_depth, &format!("{path}.query.rules"))
}

fn compile_field(spec: &PredicateSpec, field: &str, path: &str) -> Result<FieldMatch> {
    let check = match (&spec.matches, &spec.equals) {
        (Some(pattern), None) => {
            let regex = Regex::new(pattern).map_err(|source| TreeGuardError::InvalidRegex {
                field: path.to_string(),
                pattern: pattern.clone(),
                source,
            })?;
            FieldCheck::Matches(regex)
        }
        (None, Some(scalar)) => FieldCheck::Equals(scalar.clone()),
        _ => {
            return Err(TreeGuardError::Config(format!(
                "{path}: a field predicate needs exactly one of matches or equals"
            )));
        }
    };
    Ok(FieldMatch {
        path: field.to_string(),
        check,
    })
}

/// Inclusive bounds on the size of a node group.
struct CountBounds {
    min: Option<usize>,
    max: Option<usize>,
}

impl GroupPredicate for CountBounds {
    fn test(&self, group: &[&Node]) -> bool {
        self.min.is_none_or(|min| group.len() >= min) && self.max.is_none_or(|max| group.len() <= max)
    }
}

/// A per-node predicate declared in a rule file.
enum PredicateRule {
    Nested(Query),
    Field(FieldMatch),
}

impl NodePredicate for PredicateRule {
    fn test(&self, node: &Node) -> bool {
        match self {
            Self::Nested(query) => query.test(node),
            Self::Field(field) => field.test(node),
        }
    }
}

struct FieldMatch {
    path: String,
    check: FieldCheck,
}

enum FieldCheck {
    Matches(Regex),
    Equals(Scalar),
}

impl FieldMatch {
    fn test(&self, node: &Node) -> bool {
        let Some(value) = node.path(&self.path) else {
            return false;
        };
        match &self.check {
            FieldCheck::Matches(regex) => value.as_str().is_some_and(|s| regex.is_match(s)),
            FieldCheck::Equals(scalar) => scalar_eq(scalar, value),
        }
    }
}

#[allow(clippy::cast_precision_loss, clippy::float_cmp)] // Tree numbers are f64 already
fn scalar_eq(scalar: &Scalar, value: &Value) -> bool {
    match (scalar, value) {
        (Scalar::Bool(expected), Value::Bool(actual)) => expected == actual,
        (Scalar::Integer(expected), Value::Number(actual)) => *expected as f64 == *actual,
        (Scalar::Float(expected), Value::Number(actual)) => expected == actual,
        (Scalar::String(expected), Value::String(actual)) => expected == actual,
        _ => false,
    }
}

#[cfg(test)]
#[path = "compile_tests.rs"]
mod tests;
