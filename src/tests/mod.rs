//! Structural assertions against the parsed tree.
//!
//! These deliberately avoid snapshot testing: hand-written fixture snapshots
//! can't be generated or reviewed without running the crate's own test
//! suite, so each test instead asserts directly on the shape of the
//! resulting tree.

mod here_docs;
mod simple_commands;

use crate::{parse as parse_impl, Child, Node, NodeKind, ParserOptions};

pub(crate) fn parse(input: &str) -> Node {
    parse_impl(input, &ParserOptions::default())
        .unwrap_or_else(|e| panic!("parse failed for {input:?}: {e}"))
}

pub(crate) fn parse_with(input: &str, options: &ParserOptions) -> Node {
    parse_impl(input, options).unwrap_or_else(|e| panic!("parse failed for {input:?}: {e}"))
}

pub(crate) fn must_fail(input: &str) {
    assert!(
        parse_impl(input, &ParserOptions::default()).is_err(),
        "expected parse failure for {input:?}"
    );
}

pub(crate) fn nodes(node: &Node) -> Vec<&Node> {
    node.children
        .iter()
        .filter_map(|c| match c {
            Child::Node(n) => Some(n),
            _ => None,
        })
        .collect()
}

pub(crate) fn only_child(node: &Node) -> &Node {
    let children = nodes(node);
    assert_eq!(children.len(), 1, "expected exactly one child node, got {children:?}");
    children[0]
}

pub(crate) fn text(node: &Node) -> String {
    node.children
        .iter()
        .filter_map(|c| match c {
            Child::Text(s) => Some(s.clone()),
            _ => None,
        })
        .collect()
}

/// Unwraps the single top-level `CompleteCommand` produced by parsing `input`
/// and returns its first (and usually only) and/or item.
pub(crate) fn single_statement(input: &str) -> Node {
    let program = parse(input);
    assert_eq!(program.kind, NodeKind::Program);
    let complete_command = only_child(&program);
    assert_eq!(complete_command.kind, NodeKind::CompleteCommand);
    only_child(complete_command).clone()
}
