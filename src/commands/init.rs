use std::fs;

use crate::cli::InitArgs;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result, TreeGuardError};

#[must_use]
pub fn run_init(args: &InitArgs) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Writes a starter rule file.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub fn run_init_impl(args: &InitArgs) -> Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(TreeGuardError::Config(format!(
            "Rule file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(output_path, generate_config_template())?;

    println!("Created rule file: {}", output_path.display());
    Ok(())
}

/// Starter rules for ESTree-style JavaScript trees.
#[must_use]
pub fn generate_config_template() -> String {
    r#"# tree-guard rule file
#
# Each [rules.<NodeType>] table applies to every node of that type below the
# tree root. A rule is either an assertion or a combinator (and / or / not).
#
# Assertion fields:
#   exists = true          at least one node of this type must occur
#   forbid = true          no node of this type may occur
#   count / min_count / max_count
#   for_all  = [ ... ]     every node must satisfy each predicate
#   for_some = [ ... ]     some node must satisfy each predicate
#
# Predicates:
#   { query = { rules = { ... }, max_depth = N } }   nested rules, checked below each node
#   { field = "a.0.b", matches = "<regex>" }          string field must match
#   { field = "a.b", equals = <value> }               field must equal a value
#
# Text in [brackets] inside a message is shown as code in the report.

version = "1"

# JSON key that carries each node's type
tag_key = "type"

# Limit how deep below the root rules are matched (unlimited when unset)
# max_depth = 8

# Tree files to skip when scanning directories
# exclude = ["**/node_modules/**"]

[rules.ForStatement]
and = [
  { message = "There shouldn't be any nested [for] loops", for_all = [ { query = { rules = { ForStatement = { forbid = true } } } } ] },
  { message = "There should be an [if] statement inside of a [for] loop", exists = true, for_some = [ { query = { rules = { IfStatement = { exists = true } } } } ] },
]

[rules.VariableDeclaration]
and = [
  { message = "The program should contain at least two [var] declarations", min_count = 2 },
  { message = "All variables should begin with the letter b.", for_all = [ { field = "declarations.0.id.name", matches = "^[bB]" } ] },
]

[rules.WhileStatement]
message = "There should be no [while] loops"
forbid = true

[rules.WithStatement]
message = "[with] statements are not allowed"
forbid = true
"#
    .to_string()
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
