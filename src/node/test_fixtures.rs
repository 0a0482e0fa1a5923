//! ESTree-shaped sample programs shared by engine tests.

use serde_json::{Value, json};

use super::{DEFAULT_TAG_KEY, Node};

pub fn ident(name: &str) -> Value {
    json!({ "type": "Identifier", "name": name })
}

/// `var <name> = <value>;`
pub fn var(name: &str, value: i64) -> Value {
    json!({
        "type": "VariableDeclaration",
        "declarations": [{
            "type": "VariableDeclarator",
            "id": ident(name),
            "init": { "type": "Literal", "value": value, "raw": value.to_string() }
        }],
        "kind": "var"
    })
}

pub fn block(body: Vec<Value>) -> Value {
    json!({ "type": "BlockStatement", "body": body })
}

/// `for (;;) <body>`
pub fn for_loop(body: Value) -> Value {
    json!({
        "type": "ForStatement",
        "init": null,
        "test": null,
        "update": null,
        "body": body
    })
}

/// `if (x) <consequent>`
pub fn if_stmt(consequent: Value) -> Value {
    json!({
        "type": "IfStatement",
        "test": ident("x"),
        "consequent": consequent,
        "alternate": null
    })
}

/// `while (x) {}`
pub fn while_loop() -> Value {
    json!({ "type": "WhileStatement", "test": ident("x"), "body": block(vec![]) })
}

/// `f();`
pub fn call() -> Value {
    json!({
        "type": "ExpressionStatement",
        "expression": { "type": "CallExpression", "callee": ident("f"), "arguments": [] }
    })
}

pub fn program(body: Vec<Value>) -> Node {
    let doc = json!({ "type": "Program", "body": body, "sourceType": "script" });
    Node::from_json(doc, DEFAULT_TAG_KEY).unwrap()
}

pub fn empty() -> Node {
    program(vec![])
}

pub fn b_vars() -> Node {
    program(vec![var("b1", 1), var("b2", 2)])
}

pub fn no_var() -> Node {
    program(vec![call()])
}

pub fn two_vars() -> Node {
    program(vec![var("a", 1), var("c", 2)])
}

pub fn one_b_var() -> Node {
    program(vec![var("b1", 1)])
}

pub fn one_non_b_var() -> Node {
    program(vec![var("a", 1)])
}

pub fn one_third_b() -> Node {
    program(vec![var("a", 1), var("b", 2), var("c", 3)])
}

pub fn two_third_b() -> Node {
    program(vec![var("b1", 1), var("b2", 2), var("c", 3)])
}

pub fn for_if() -> Node {
    program(vec![for_loop(block(vec![if_stmt(block(vec![]))]))])
}

pub fn for_some_if() -> Node {
    program(vec![
        for_loop(block(vec![if_stmt(block(vec![]))])),
        for_loop(block(vec![call()])),
    ])
}

/// `for (;;) for (;;) {}`
pub fn for_nest() -> Node {
    program(vec![for_loop(for_loop(block(vec![])))])
}

/// `for (;;) if (x) for (;;) {}`
pub fn for_nest_indirect() -> Node {
    program(vec![for_loop(if_stmt(for_loop(block(vec![]))))])
}

pub fn while_program() -> Node {
    program(vec![while_loop()])
}

pub fn compound_pass() -> Node {
    program(vec![
        var("b1", 1),
        var("b2", 2),
        for_loop(block(vec![if_stmt(block(vec![]))])),
    ])
}

/// True when the first declarator's name starts with `b` (case-insensitive).
pub fn is_b_variable(node: &Node) -> bool {
    node.path("declarations.0.id.name")
        .and_then(super::Value::as_str)
        .and_then(|name| name.chars().next())
        .is_some_and(|c| c.eq_ignore_ascii_case(&'b'))
}
