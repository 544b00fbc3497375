//! Tests for simple commands: names, arguments, and assignments.

use super::{nodes, only_child, parse, single_statement, text};
use crate::NodeKind;

#[test]
fn bare_command_name() {
    let cmd = single_statement("echo\n");
    assert_eq!(cmd.kind, NodeKind::SimpleCommand);
    let children = nodes(&cmd);
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].kind, NodeKind::CmdName);
    let word = only_child(children[0]);
    assert_eq!(word.kind, NodeKind::Word);
    assert_eq!(text(word), "echo");
}

#[test]
fn command_with_arguments() {
    let cmd = single_statement("echo hello world\n");
    let children = nodes(&cmd);
    assert_eq!(children.len(), 3);
    assert_eq!(children[0].kind, NodeKind::CmdName);
    assert_eq!(children[1].kind, NodeKind::CmdArgument);
    assert_eq!(children[2].kind, NodeKind::CmdArgument);
    assert_eq!(text(only_child(children[1])), "hello");
    assert_eq!(text(only_child(children[2])), "world");
}

#[test]
fn assignment_only_command_has_no_name() {
    let cmd = single_statement("a=1 b=2\n");
    assert_eq!(cmd.kind, NodeKind::SimpleCommand);
    let children = nodes(&cmd);
    assert_eq!(children.len(), 2);
    for child in &children {
        assert_eq!(child.kind, NodeKind::Assignment);
    }
}

#[test]
fn leading_assignment_then_command() {
    let cmd = single_statement("FOO=bar echo hi\n");
    let children = nodes(&cmd);
    assert_eq!(children[0].kind, NodeKind::Assignment);
    assert_eq!(children[1].kind, NodeKind::CmdName);
    assert_eq!(children[2].kind, NodeKind::CmdArgument);
}

#[test]
fn quoted_word_is_a_single_segment() {
    let cmd = single_statement("echo \"hello world\"\n");
    let children = nodes(&cmd);
    let arg_word = only_child(children[1]);
    assert_eq!(text(arg_word), "hello world");
}

#[test]
fn word_cannot_start_with_hash() {
    let program = parse("# just a comment\n");
    assert_eq!(program.kind, NodeKind::Program);
    assert!(nodes(&program).is_empty());
}

#[test]
fn reserved_word_boundary_distinguishes_ifoo_from_if() {
    let cmd = single_statement("ifoo\n");
    let children = nodes(&cmd);
    assert_eq!(children[0].kind, NodeKind::CmdName);
    assert_eq!(text(only_child(children[0])), "ifoo");
}

#[test]
fn reserved_word_is_allowed_as_an_argument() {
    let cmd = single_statement("echo if\n");
    let children = nodes(&cmd);
    assert_eq!(children[0].kind, NodeKind::CmdName);
    assert_eq!(children[1].kind, NodeKind::CmdArgument);
    assert_eq!(text(only_child(children[1])), "if");
}
