#![allow(dead_code)]

use std::fs;
use std::path::Path;

use serde_json::{Value, json};
use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the tree-guard binary.
#[macro_export]
macro_rules! tree_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("tree-guard"))
    };
}

/// Rules mirroring the starter template: no nested `for`, `for` needs an
/// `if`, at least two `b` variables, no `while`, no `with`.
pub const DEMO_RULES: &str = r#"
version = "1"

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
"#;

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `.tree-guard.toml` in the temp directory.
    pub fn create_config(&self, content: &str) {
        self.create_file(".tree-guard.toml", content);
    }

    /// Writes a JSON tree file.
    pub fn create_tree(&self, relative_path: &str, tree: &Value) {
        let content = serde_json::to_string_pretty(tree).expect("Failed to serialize tree");
        self.create_file(relative_path, &content);
    }
}

pub fn var(name: &str) -> Value {
    json!({
        "type": "VariableDeclaration",
        "kind": "var",
        "declarations": [{
            "type": "VariableDeclarator",
            "id": { "type": "Identifier", "name": name },
            "init": { "type": "Literal", "value": 1 }
        }]
    })
}

pub fn for_loop(body: Value) -> Value {
    json!({ "type": "ForStatement", "init": null, "test": null, "update": null, "body": body })
}

pub fn if_stmt() -> Value {
    json!({
        "type": "IfStatement",
        "test": { "type": "Identifier", "name": "x" },
        "consequent": { "type": "BlockStatement", "body": [] },
        "alternate": null
    })
}

pub fn block(body: Vec<Value>) -> Value {
    json!({ "type": "BlockStatement", "body": body })
}

pub fn while_loop() -> Value {
    json!({
        "type": "WhileStatement",
        "test": { "type": "Identifier", "name": "x" },
        "body": { "type": "BlockStatement", "body": [] }
    })
}

pub fn program(body: Vec<Value>) -> Value {
    json!({ "type": "Program", "sourceType": "script", "body": body })
}

/// `var b1 = 1; var b2 = 1; for (;;) { if (x) {} }`
pub fn passing_program() -> Value {
    program(vec![
        var("b1"),
        var("b2"),
        for_loop(block(vec![if_stmt()])),
    ])
}

/// `var a = 1; while (x) {}`
pub fn failing_program() -> Value {
    program(vec![var("a"), while_loop()])
}
