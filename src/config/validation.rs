//! Rule file semantic validation.
//!
//! Runs after parsing and before compilation, so a malformed rule file is
//! reported as a configuration error instead of misbehaving at check time.

use indexmap::IndexMap;
use regex::Regex;

use crate::config::{Config, PredicateSpec, QuerySpec, RuleSpec};
use crate::scanner::exclude_set;
use crate::{Result, TreeGuardError};

/// Validates semantic correctness of a rule file.
///
/// # Errors
/// Returns an error if the rule table is empty, a rule mixes assertion and
/// combinator fields, a combinator has too few operands, counts contradict
/// each other, a predicate is ambiguous, or a regex or glob is invalid.
pub fn validate_config_semantics(config: &Config) -> Result<()> {
    if config.tag_key.is_empty() {
        return Err(TreeGuardError::Config("tag_key must not be empty".to_string()));
    }
    if config.rules.is_empty() {
        return Err(TreeGuardError::Config(
            "rule file defines no rules; add at least one [rules.<Tag>] table".to_string(),
        ));
    }
    validate_exclude_patterns(&config.exclude)?;
    validate_rules(&config.rules, "rules")
}

fn validate_exclude_patterns(patterns: &[String]) -> Result<()> {
    exclude_set(patterns).map(drop)
}

fn validate_rules(rules: &IndexMap<String, RuleSpec>, path: &str) -> Result<()> {
    for (kind, rule) in rules {
        if kind.is_empty() {
            return Err(TreeGuardError::Config(format!(
                "{path} contains a rule with an empty tag"
            )));
        }
        validate_rule(rule, &format!("{path}.{kind}"))?;
    }
    Ok(())
}

fn validate_rule(rule: &RuleSpec, path: &str) -> Result<()> {
    if rule.is_combinator() {
        validate_combinator(rule, path)
    } else {
        validate_assertion(rule, path)
    }
}

fn validate_combinator(rule: &RuleSpec, path: &str) -> Result<()> {
    if rule.has_assertion_fields() || rule.message.is_some() {
        return Err(TreeGuardError::Config(format!(
            "{path}: a rule using and/or/not cannot also set message or assertion fields"
        )));
    }

    let kinds_used = [rule.and.is_some(), rule.or.is_some(), rule.not.is_some()]
        .into_iter()
        .filter(|used| *used)
        .count();
    if kinds_used > 1 {
        return Err(TreeGuardError::Config(format!(
            "{path}: use only one of and, or, not per rule; nest them instead"
        )));
    }

    for (name, operands) in [("and", rule.and.as_deref()), ("or", rule.or.as_deref())] {
        let Some(operands) = operands else {
            continue;
        };
        if operands.len() < 2 {
            return Err(TreeGuardError::Config(format!(
                "{path}.{name} requires at least two operands, got {}",
                operands.len()
            )));
        }
        for (i, operand) in operands.iter().enumerate() {
            validate_rule(operand, &format!("{path}.{name}[{i}]"))?;
        }
    }

    if let Some(inner) = &rule.not {
        validate_rule(inner, &format!("{path}.not"))?;
    }
    Ok(())
}

fn validate_assertion(rule: &RuleSpec, path: &str) -> Result<()> {
    if rule.exists && rule.forbid {
        return Err(TreeGuardError::Config(format!(
            "{path}: exists and forbid cannot both be set"
        )));
    }

    if rule.count.is_some() && (rule.min_count.is_some() || rule.max_count.is_some()) {
        return Err(TreeGuardError::Config(format!(
            "{path}: count cannot be combined with min_count or max_count"
        )));
    }

    if let (Some(min), Some(max)) = (rule.min_count, rule.max_count)
        && min > max
    {
        return Err(TreeGuardError::Config(format!(
            "{path}: min_count ({min}) must not exceed max_count ({max})"
        )));
    }

    for (i, predicate) in rule.for_all.iter().enumerate() {
        validate_predicate(predicate, &format!("{path}.for_all[{i}]"))?;
    }
    for (i, predicate) in rule.for_some.iter().enumerate() {
        validate_predicate(predicate, &format!("{path}.for_some[{i}]"))?;
    }
    Ok(())
}

fn validate_predicate(predicate: &PredicateSpec, path: &str) -> Result<()> {
    match (&predicate.query, &predicate.field) {
        (Some(query), None) => {
            if predicate.matches.is_some() || predicate.equals.is_some() {
                return Err(TreeGuardError::Config(format!(
                    "{path}: matches/equals need a field, not a query"
                )));
            }
            validate_query(query, &format!("{path}.query"))
        }
        (None, Some(field)) => validate_field_predicate(predicate, field, path),
        (Some(_), Some(_)) => Err(TreeGuardError::Config(format!(
            "{path}: set either query or field, not both"
        ))),
        (None, None) => Err(TreeGuardError::Config(format!(
            "{path}: a predicate needs a query or a field"
        ))),
    }
}

fn validate_field_predicate(predicate: &PredicateSpec, field: &str, path: &str) -> Result<()> {
    if field.is_empty() || field.split('.').any(str::is_empty) {
        return Err(TreeGuardError::Config(format!(
            "{path}: invalid field path '{field}'"
        )));
    }
    match (&predicate.matches, &predicate.equals) {
        (Some(pattern), None) => Regex::new(pattern)
            .map(|_| ())
            .map_err(|source| TreeGuardError::InvalidRegex {
                field: path.to_string(),
                pattern: pattern.clone(),
                source,
            }),
        (None, Some(_)) => Ok(()),
        _ => Err(TreeGuardError::Config(format!(
            "{path}: a field predicate needs exactly one of matches or equals"
        ))),
    }
}

fn validate_query(query: &QuerySpec, path: &str) -> Result<()> {
    if query.rules.is_empty() {
        return Err(TreeGuardError::Config(format!(
            "{path} defines no rules"
        )));
    }
    validate_rules(&query.rules, &format!("{path}.rules"))
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
