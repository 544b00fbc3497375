//! The POSIX shell grammar: a single-stage PEG that recognizes shell syntax
//! directly on source text (no separate tokenizer) and emits generic
//! [`Node`](crate::ast::Node) trees.
//!
//! Here-document bodies are the one place the grammar carries mutable
//! state across rules: `io_here()` calls into [`HeredocTracker`] to record a
//! body's byte range as soon as its delimiter word reduces, and the
//! [`ShellInput`](crate::input::ShellInput) the grammar runs over consults
//! that same tracker whenever it crosses a newline, teleporting the cursor
//! past any body already claimed. Every newline in the grammar is matched
//! through the `newline()` rule (a character-class match) rather than a
//! string literal, since only character matches route through
//! `ShellInput::parse_elem` and its skip-hook logic.

use crate::ast::{Child, Node, NodeKind};
use crate::heredoc::HeredocTracker;
use crate::input::ShellInput;
use crate::options::ParserOptions;
use crate::position::LineIndex;

pub(crate) struct ParseCtx {
    pub(crate) options: ParserOptions,
    pub(crate) lines: LineIndex,
}

impl ParseCtx {
    pub(crate) fn new(source: &str, options: &ParserOptions) -> Self {
        Self {
            options: options.clone(),
            lines: LineIndex::new(source),
        }
    }
}

fn build(
    ctx: &ParseCtx,
    source: &str,
    kind: NodeKind,
    children: Vec<Child>,
    start: usize,
    end: usize,
    is_root: bool,
) -> Node {
    let mut node = Node::leaf(kind, children);

    if ctx.options.loc || ctx.options.loc2 {
        node.pos = Some(start + 1);
        node.endpos = Some(end + 1);
    }

    if ctx.options.loc2 {
        let s = ctx.lines.line_col(start);
        let e = ctx.lines.line_col(end);
        node.line = Some(s.line);
        node.col = Some(s.col);
        node.end_line = Some(e.line);
        node.end_col = Some(e.col);
    }

    if ctx.options.source && !is_root {
        node.source = Some(source[start..end].to_owned());
    }

    if ctx.options.trace {
        tracing::trace!(target: "parse", kind = ?node.kind, start, end, "reduced node");
    }

    node
}

fn strip_comments(node: &mut Node) {
    node.children
        .retain(|c| !matches!(c, Child::Node(n) if n.kind == NodeKind::Comment));
    for child in &mut node.children {
        if let Child::Node(n) = child {
            strip_comments(n);
        }
    }
}

/// Parses `source` per `options` into the root [`Node`] of its syntax tree.
pub fn parse(source: &str, options: &ParserOptions) -> Result<Node, crate::error::ParseError> {
    let heredocs = HeredocTracker::new();
    let input = ShellInput::new(source, &heredocs);
    let ctx = ParseCtx::new(source, options);

    tracing::debug!(target: "parse", len = source.len(), "starting parse");

    match shell::program(&input, source, &heredocs, &ctx) {
        Ok(mut node) => {
            if !options.comments {
                strip_comments(&mut node);
            }
            Ok(node)
        }
        Err(err) => Err(crate::error::convert_peg_parse_error(&err, source)),
    }
}

fn delim_text(word: &Node) -> String {
    word.children
        .iter()
        .map(|c| match c {
            Child::Text(s) => s.as_str(),
            _ => "",
        })
        .collect()
}

peg::parser! {
    grammar shell<'input>(source: &'input str, heredocs: &HeredocTracker, ctx: &ParseCtx) for ShellInput<'input> {

        // ---- terminals -------------------------------------------------

        rule digit() = ['0'..='9']
        rule blank() = quiet!{[' ' | '\t']}
        rule blanks() = blank()*
        rule newline() -> () = ['\n'] {}

        rule eof() = quiet!{![_]}

        rule at_word_boundary() -> () =
            &( [' ' | '\t' | '\n' | '&' | '>' | '<' | '(' | '|' | ')' | ';'] / ![_] )

        rule operator_start_char() = ['&' | '>' | '<' | '(' | '|' | ')' | ';']

        // ---- operators ---------------------------------------------------

        rule op_and_and() = "&&"
        rule op_or_or() = "||"
        rule op_semi_semi() = ";;"
        rule op_amp() = "&" !['&']
        rule op_semi() = ";" ![';']
        rule op_pipe() = "|" !['|']
        rule op_lparen() = "("
        rule op_rparen() = ")"

        // ---- reserved words ------------------------------------------

        rule reserved_word_literal() -> () =
            ("done" / "do" / "elif" / "else" / "esac" / "case" / "fi" / "for"
             / "if" / "in" / "then" / "until" / "while" / "!" / "{" / "}") {}

        rule not_reserved_word() -> () =
            !(reserved_word_literal() at_word_boundary())

        rule kw_if() -> () = "if" &at_word_boundary() {}
        rule kw_then() -> () = "then" &at_word_boundary() {}
        rule kw_else() -> () = "else" &at_word_boundary() {}
        rule kw_elif() -> () = "elif" &at_word_boundary() {}
        rule kw_fi() -> () = "fi" &at_word_boundary() {}
        rule kw_do() -> () = "do" &at_word_boundary() {}
        rule kw_done() -> () = "done" &at_word_boundary() {}
        rule kw_case() -> () = "case" &at_word_boundary() {}
        rule kw_esac() -> () = "esac" &at_word_boundary() {}
        rule kw_for() -> () = "for" &at_word_boundary() {}
        rule kw_while() -> () = "while" &at_word_boundary() {}
        rule kw_until() -> () = "until" &at_word_boundary() {}
        rule kw_in() -> () = "in" &at_word_boundary() {}
        rule kw_bang() -> () = "!" &at_word_boundary() {}
        rule kw_lbrace() -> () = "{" &at_word_boundary() {}
        rule kw_rbrace() -> () = "}" &at_word_boundary() {}

        // ---- quoting and words -----------------------------------------

        rule escaped_char() -> String =
            "\\" newline() { String::new() } /
            "\\" c:$([_]) { c.to_owned() }

        rule single_quoted() -> String =
            "'" s:$((!"'" [_])*) "'" { s.to_owned() }

        rule double_quoted() -> String =
            "\"" pieces:double_quoted_piece()* "\"" { pieces.concat() }

        rule double_quoted_piece() -> String =
            escaped_char() /
            s:$((!['"' | '\\'] [_])+) { s.to_owned() }

        rule unquoted_plain_char() =
            !(blank() / newline() / ['\'' | '"' | '\\'] / operator_start_char()) [_]

        rule unquoted_segment() -> String =
            pieces:(escaped_char() / s:$(unquoted_plain_char()) { s.to_owned() })+ {
                pieces.concat()
            }

        rule word_segment() -> String =
            double_quoted() / single_quoted() / unquoted_segment()

        rule word() -> Node =
            start:position!() !"#" segments:word_segment()+ end:position!() {
                build(ctx, source, NodeKind::Word, segments.into_iter().map(Child::Text).collect(), start, end, false)
            }

        rule non_reserved_word() -> Node =
            not_reserved_word() w:word() { w }

        rule non_reserved_name() -> Node =
            not_reserved_word() n:name() { n }

        rule name_text() -> &'input str =
            $(['a'..='z' | 'A'..='Z' | '_'] ['a'..='z' | 'A'..='Z' | '0'..='9' | '_']*)

        rule name() -> Node =
            start:position!() s:name_text() end:position!() {
                build(ctx, source, NodeKind::Name, vec![Child::Text(s.to_owned())], start, end, false)
            }

        // ---- assignments -------------------------------------------------

        rule assignment() -> Node =
            start:position!() n:name() "=" w:word()? end:position!() {
                let mut children = vec![Child::Node(n)];
                if let Some(word) = w {
                    children.push(Child::Node(word));
                }
                build(ctx, source, NodeKind::Assignment, children, start, end, false)
            }

        // ---- io numbers and redirections ---------------------------------

        rule io_number() -> i64 =
            s:$(digit()+) &['<' | '>'] {?
                s.parse::<i64>().map_err(|_| "io_number out of range")
            }

        rule io_file_op() -> &'input str =
            $(">&" / ">>" / ">|" / "<&" / "<>" / ">" !['>'] / "<" !['<'])

        rule io_redirect_file() -> Node =
            start:position!() n:io_number()? blanks() op:io_file_op() blanks() target:word() end:position!() {
                let mut children = vec![];
                if let Some(n) = n {
                    children.push(Child::Integer(n));
                }
                children.push(Child::Text(op.to_owned()));
                children.push(Child::Node(target));
                build(ctx, source, NodeKind::IORedirectFile, children, start, end, false)
            }

        rule heredoc_op() -> bool =
            "<<-" { true } /
            "<<" { false }

        rule io_here() -> Node =
            start:position!()
            n:io_number()? blanks()
            strip_tabs:heredoc_op() blanks()
            delim:word()
            after:position!()
            body:capture_heredoc(delim_text(&delim), strip_tabs, after)
            end:position!() {
                let mut children = vec![];
                if let Some(n) = n {
                    children.push(Child::Integer(n));
                }
                children.push(Child::Text(if strip_tabs { "<<-".to_owned() } else { "<<".to_owned() }));
                children.push(Child::Node(delim));
                children.push(Child::Text(body));
                build(ctx, source, NodeKind::IOHereDoc, children, start, end, false)
            }

        rule capture_heredoc(delim: String, strip_tabs: bool, after: usize) -> String =
            position!() {
                heredocs.capture(source, after, &delim, strip_tabs).body
            }

        rule io_redirect() -> Node =
            io_here() / io_redirect_file()

        // ---- comments and separators ----------------------------------

        rule comment() -> Node =
            start:position!() "#" body:$((!newline() [_])*) end:position!() {
                build(ctx, source, NodeKind::Comment, vec![Child::Text(body.to_owned())], start, end, false)
            }

        rule newline_list_item() -> () =
            blanks() comment()? newline() {}

        rule newline_list() -> () =
            newline_list_item()+ {}

        rule linebreak() -> () =
            newline_list()? {}

        // Top-level-only variant that surfaces comments found between
        // complete commands, so they can be spliced into Program's children.
        rule top_newline_list_item() -> Option<Node> =
            blanks() c:comment()? newline() { c }

        rule top_newline_list() -> Vec<Node> =
            items:top_newline_list_item()+ { items.into_iter().flatten().collect() }

        rule separator_op() -> () =
            op_amp() / op_semi()

        rule sequential_sep() -> () =
            blanks() op_semi() blanks() linebreak() {} /
            newline_list() {}

        // ---- pipelines and and/or lists ------------------------------

        rule pipe_sequence() -> Node =
            start:position!() first:command() rest:(blanks() op_pipe() blanks() linebreak() c:command() { c })* end:position!() {
                if rest.is_empty() {
                    first
                } else {
                    let mut children = vec![Child::Node(first)];
                    children.extend(rest.into_iter().map(Child::Node));
                    build(ctx, source, NodeKind::PipeSequence, children, start, end, false)
                }
            }

        rule pipeline() -> Node =
            start:position!() kw_bang() blanks() p:pipe_sequence() end:position!() {
                build(ctx, source, NodeKind::Not, vec![Child::Node(p)], start, end, false)
            } /
            pipe_sequence()

        rule and_or() -> Node =
            start:position!() blanks() left:pipeline() tail:and_or_tail()? end:position!() {
                match tail {
                    Some((is_and, right)) => {
                        let kind = if is_and { NodeKind::AndList } else { NodeKind::OrList };
                        build(ctx, source, kind, vec![Child::Node(left), Child::Node(right)], start, end, false)
                    }
                    None => left,
                }
            }

        rule and_or_tail() -> (bool, Node) =
            blanks() is_and:and_or_op() blanks() linebreak() right:and_or() { (is_and, right) }

        rule and_or_op() -> bool =
            op_and_and() { true } /
            op_or_or() { false }

        // ---- complete commands / program -------------------------------

        rule complete_command() -> Node =
            start:position!()
            first:and_or()
            rest:(blanks() separator_op() blanks() linebreak() a:and_or() { a })*
            blanks() trailing_sep:separator_op()?
            end:position!() {
                let _ = trailing_sep;
                let mut children = vec![Child::Node(first)];
                children.extend(rest.into_iter().map(Child::Node));
                build(ctx, source, NodeKind::CompleteCommand, children, start, end, false)
            }

        rule complete_commands() -> Vec<Node> =
            first:complete_command()
            rest:(c:top_newline_list() cmd:complete_command() { (c, cmd) })* {
                let mut out = vec![first];
                for (comments, cmd) in rest {
                    out.extend(comments);
                    out.push(cmd);
                }
                out
            }

        pub rule program() -> Node =
            start:position!() linebreak() cmds:complete_commands()? linebreak() end:position!() eof() {
                let children = cmds.unwrap_or_default().into_iter().map(Child::Node).collect();
                build(ctx, source, NodeKind::Program, children, start, end, true)
            }

        // ---- commands ---------------------------------------------------

        rule command() -> Node =
            function_definition() /
            start:position!() cc:compound_command() redirs:(blanks() r:io_redirect() { r })* end:position!() {
                if redirs.is_empty() {
                    cc
                } else {
                    let kind = cc.kind;
                    let mut children = cc.children;
                    children.extend(redirs.into_iter().map(Child::Node));
                    build(ctx, source, kind, children, start, end, false)
                }
            } /
            simple_command()

        rule compound_command() -> Node =
            brace_group() / subshell() / for_clause() / case_clause() / if_clause() / while_clause() / until_clause()

        // ---- function definitions ----------------------------------------

        rule function_definition() -> Node =
            start:position!() n:non_reserved_name() blanks() "(" blanks() ")" blanks() linebreak() body:compound_command() end:position!() {
                build(ctx, source, NodeKind::FunctionDefinition, vec![Child::Node(n), Child::Node(body)], start, end, false)
            }

        // ---- grouping constructs ------------------------------------------

        rule compound_list() -> Node =
            start:position!()
            linebreak()
            first:and_or()
            rest:(blanks() separator_op() blanks() linebreak() a:and_or() { a })*
            blanks() trailing_sep:separator_op()?
            linebreak()
            end:position!() {
                let _ = trailing_sep;
                let mut children = vec![Child::Node(first)];
                children.extend(rest.into_iter().map(Child::Node));
                build(ctx, source, NodeKind::CompleteCommand, children, start, end, false)
            }

        rule brace_group() -> Node =
            start:position!() kw_lbrace() blanks() body:compound_list() blanks() kw_rbrace() end:position!() {
                build(ctx, source, NodeKind::BraceGroup, vec![Child::Node(body)], start, end, false)
            }

        rule subshell() -> Node =
            start:position!() op_lparen() blanks() body:compound_list() blanks() op_rparen() end:position!() {
                build(ctx, source, NodeKind::Subshell, vec![Child::Node(body)], start, end, false)
            }

        rule do_group() -> Node =
            blanks() kw_do() body:compound_list() blanks() kw_done() { body }

        // ---- for clause ---------------------------------------------------

        rule for_clause() -> Node =
            start:position!() kw_for() blanks() n:name() words:for_in_words()? blanks() sequential_sep() body:do_group() end:position!() {
                let mut children = vec![Child::Node(n)];
                children.extend(words.unwrap_or_default().into_iter().map(Child::Node));
                children.push(Child::Node(body));
                build(ctx, source, NodeKind::ForClause, children, start, end, false)
            }

        rule for_in_words() -> Vec<Node> =
            blanks() kw_in() words:(blanks() w:word() { w })* { words }

        // ---- case clause ---------------------------------------------------

        rule case_clause() -> Node =
            start:position!()
            kw_case() blanks() subject:word() blanks() kw_in() linebreak()
            items:case_item()*
            blanks() kw_esac() end:position!() {
                let mut children = vec![Child::Node(subject)];
                children.extend(items.into_iter().map(Child::Node));
                build(ctx, source, NodeKind::CaseClause, children, start, end, false)
            }

        rule case_item() -> Node =
            start:position!()
            blanks() !kw_esac() op_lparen()? blanks()
            pattern:pattern() blanks() op_rparen() linebreak()
            body:compound_list()?
            terminator() linebreak()
            end:position!() {
                let mut children = vec![Child::Node(pattern)];
                if let Some(body) = body {
                    children.push(Child::Node(body));
                }
                build(ctx, source, NodeKind::CaseItem, children, start, end, false)
            }

        rule terminator() -> () =
            blanks() op_semi_semi() {} /
            &(blanks() kw_esac()) {}

        rule pattern() -> Node =
            start:position!() first:pattern_word() rest:(blanks() op_pipe() blanks() w:pattern_word() { w })* end:position!() {
                let mut children = vec![Child::Node(first)];
                children.extend(rest.into_iter().map(Child::Node));
                build(ctx, source, NodeKind::Pattern, children, start, end, false)
            }

        rule pattern_word() -> Node =
            start:position!() !"#" segments:pattern_segment()+ end:position!() {
                build(ctx, source, NodeKind::Word, segments.into_iter().map(Child::Text).collect(), start, end, false)
            }

        rule pattern_segment() -> String =
            double_quoted() / single_quoted() / pattern_unquoted_segment()

        rule pattern_unquoted_segment() -> String =
            pieces:(escaped_char() / s:$(pattern_unquoted_char()) { s.to_owned() })+ {
                pieces.concat()
            }

        rule pattern_unquoted_char() =
            !(blank() / newline() / ['\'' | '"' | '\\'] / operator_start_char()) [_]

        // ---- if / while / until --------------------------------------------

        rule if_clause() -> Node =
            start:position!()
            kw_if() cond:compound_list() blanks() kw_then() then_body:compound_list()
            branches:elif_part()*
            else_branch:else_part()?
            blanks() kw_fi()
            end:position!() {
                let mut children = vec![Child::Node(cond), Child::Node(then_body)];
                for (c, b) in branches {
                    children.push(Child::Node(c));
                    children.push(Child::Node(b));
                }
                if let Some(e) = else_branch {
                    children.push(Child::Node(e));
                }
                build(ctx, source, NodeKind::IfClause, children, start, end, false)
            }

        rule elif_part() -> (Node, Node) =
            blanks() kw_elif() cond:compound_list() blanks() kw_then() body:compound_list() { (cond, body) }

        rule else_part() -> Node =
            blanks() kw_else() body:compound_list() { body }

        rule while_clause() -> Node =
            start:position!() kw_while() cond:compound_list() body:do_group() end:position!() {
                build(ctx, source, NodeKind::WhileClause, vec![Child::Node(cond), Child::Node(body)], start, end, false)
            }

        rule until_clause() -> Node =
            start:position!() kw_until() cond:compound_list() body:do_group() end:position!() {
                build(ctx, source, NodeKind::UntilClause, vec![Child::Node(cond), Child::Node(body)], start, end, false)
            }

        // ---- simple commands ------------------------------------------------

        rule cmd_prefix_item() -> Node =
            assignment() / io_redirect()

        rule cmd_suffix_item() -> Node =
            io_redirect() / cmd_argument()

        rule cmd_argument() -> Node =
            start:position!() w:word() end:position!() {
                build(ctx, source, NodeKind::CmdArgument, vec![Child::Node(w)], start, end, false)
            }

        rule cmd_name() -> Node =
            start:position!() w:non_reserved_word() end:position!() {
                build(ctx, source, NodeKind::CmdName, vec![Child::Node(w)], start, end, false)
            }

        rule simple_command() -> Node =
            start:position!()
            blanks()
            prefix:(p:cmd_prefix_item() blanks() { p })*
            rest:simple_command_rest()?
            end:position!() {?
                if prefix.is_empty() && rest.is_none() {
                    Err("empty simple command")
                } else {
                    let mut children: Vec<Child> = prefix.into_iter().map(Child::Node).collect();
                    if let Some((name, suffix)) = rest {
                        children.push(Child::Node(name));
                        children.extend(suffix.into_iter().map(Child::Node));
                    }
                    Ok(build(ctx, source, NodeKind::SimpleCommand, children, start, end, false))
                }
            }

        rule simple_command_rest() -> (Node, Vec<Node>) =
            name:cmd_name() suffix:(blanks() s:cmd_suffix_item() { s })* { (name, suffix) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> Node {
        parse(source, &ParserOptions::default()).expect("expected successful parse")
    }

    #[test]
    fn parses_simple_command() {
        let root = parse_ok("echo hello\n");
        assert_eq!(root.kind, NodeKind::Program);
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn rejects_dangling_and() {
        assert!(parse("&& a\n", &ParserOptions::default()).is_err());
    }

    #[test]
    fn rejects_if_without_condition() {
        assert!(parse("if then fi\n", &ParserOptions::default()).is_err());
    }
}
