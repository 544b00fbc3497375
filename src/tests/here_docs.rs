//! Tests for here-document capture and the newline skip-hook.

use super::{nodes, single_statement, text};
use crate::{Child, NodeKind};

fn heredoc_body(cmd: &crate::Node) -> String {
    let redir = nodes(cmd)
        .into_iter()
        .find(|n| n.kind == NodeKind::IOHereDoc)
        .expect("expected an IOHereDoc child");
    redir
        .children
        .iter()
        .rev()
        .find_map(|c| match c {
            Child::Text(s) => Some(s.clone()),
            _ => None,
        })
        .expect("expected a body text child")
}

#[test]
fn basic_here_doc() {
    let cmd = single_statement("cat <<EOF\ncontent line 1\ncontent line 2\nEOF\n");
    assert_eq!(heredoc_body(&cmd), "content line 1\ncontent line 2\n");
}

#[test]
fn here_doc_without_trailing_newline() {
    let cmd = single_statement("cat <<EOF\nsomething\nEOF");
    assert_eq!(heredoc_body(&cmd), "something\n");
}

#[test]
fn here_doc_strips_leading_tabs() {
    let cmd = single_statement("cat <<-EOF\n\tcontent with tab\nEOF\n");
    assert_eq!(heredoc_body(&cmd), "content with tab\n");
}

#[test]
fn here_doc_with_quoted_delimiter() {
    let cmd = single_statement("cat <<'EOF'\nliteral $not_expanded\nEOF\n");
    assert_eq!(heredoc_body(&cmd), "literal $not_expanded\n");
}

#[test]
fn here_doc_empty_body() {
    let cmd = single_statement("cat <<EOF\nEOF\n");
    assert_eq!(heredoc_body(&cmd), "");
}

#[test]
fn here_doc_followed_by_pipe() {
    let stmt = single_statement("cat <<EOF | grep hello\nhello world\ngoodbye world\nEOF\n");
    assert_eq!(stmt.kind, NodeKind::PipeSequence);
    let stages = nodes(&stmt);
    assert_eq!(stages.len(), 2);
    assert_eq!(heredoc_body(stages[0]), "hello world\ngoodbye world\n");
}

#[test]
fn here_doc_with_explicit_fd() {
    let cmd = single_statement("command 3<<EOF\ncontent for fd 3\nEOF\n");
    let redir = nodes(&cmd)
        .into_iter()
        .find(|n| n.kind == NodeKind::IOHereDoc)
        .unwrap();
    match &redir.children[0] {
        Child::Integer(fd) => assert_eq!(*fd, 3),
        other => panic!("expected fd integer, got {other:?}"),
    }
}

#[test]
fn stacked_here_docs_on_one_line() {
    let cmd = single_statement("cat <<A <<B\nfirst\nA\nsecond\nB\n");
    let redirs: Vec<_> = nodes(&cmd)
        .into_iter()
        .filter(|n| n.kind == NodeKind::IOHereDoc)
        .collect();
    assert_eq!(redirs.len(), 2);
    let first_body = redirs[0]
        .children
        .iter()
        .rev()
        .find_map(|c| match c {
            Child::Text(s) => Some(s.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(first_body, "first\n");
}

#[test]
fn command_after_here_doc_on_next_line_parses_normally() {
    let program = super::parse("cat <<EOF\nbody\nEOF\necho after\n");
    let commands = nodes(&program);
    assert_eq!(commands.len(), 2);
    let second = nodes(commands[1])[0];
    assert_eq!(second.kind, NodeKind::SimpleCommand);
    let args = nodes(second);
    assert_eq!(text(super::only_child(args[1])), "after");
}
