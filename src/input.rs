//! A custom `peg` input type over `&str` that transparently skips already
//! captured here-document bodies whenever the grammar crosses a newline.
//!
//! A plain `for str` grammar can't do this: matching a body's text again as
//! ordinary command syntax would either fail outright or reparse it as
//! shell commands. Instead, `ShellInput::parse_elem` special-cases the
//! newline character: when matching a `'\n'` would otherwise land the
//! cursor at the start of a recorded heredoc range, it advances straight to
//! the end of that range instead.

use crate::heredoc::HeredocTracker;

pub(crate) struct ShellInput<'input> {
    pub(crate) source: &'input str,
    pub(crate) heredocs: &'input HeredocTracker,
}

impl<'input> ShellInput<'input> {
    pub(crate) fn new(source: &'input str, heredocs: &'input HeredocTracker) -> Self {
        Self { source, heredocs }
    }
}

impl peg::Parse for ShellInput<'_> {
    type PositionRepr = usize;

    #[inline]
    fn start(&self) -> usize {
        0
    }

    #[inline]
    fn is_eof(&self, p: usize) -> bool {
        p >= self.source.len()
    }

    #[inline]
    fn position_repr(&self, p: usize) -> Self::PositionRepr {
        p
    }
}

impl<'input> peg::ParseElem<'input> for ShellInput<'input> {
    type Element = char;

    fn parse_elem(&'input self, pos: usize) -> peg::RuleResult<Self::Element> {
        match self.source[pos..].chars().next() {
            Some(c) => {
                let next = pos + c.len_utf8();
                let next = if c == '\n' {
                    self.heredocs.skip_through(next)
                } else {
                    next
                };
                peg::RuleResult::Matched(next, c)
            }
            None => peg::RuleResult::Failed,
        }
    }
}

impl<'input> peg::ParseSlice<'input> for ShellInput<'input> {
    type Slice = &'input str;

    fn parse_slice(&'input self, start: usize, end: usize) -> Self::Slice {
        &self.source[start..end]
    }
}

impl peg::ParseLiteral for ShellInput<'_> {
    fn parse_string_literal(&self, pos: usize, literal: &str) -> peg::RuleResult<()> {
        if self.source[pos..].starts_with(literal) {
            peg::RuleResult::Matched(pos + literal.len(), ())
        } else {
            peg::RuleResult::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_elem_advances_by_one_char() {
        let tracker = HeredocTracker::new();
        let input = ShellInput::new("ab", &tracker);
        match peg::ParseElem::parse_elem(&input, 0) {
            peg::RuleResult::Matched(next, c) => {
                assert_eq!(next, 1);
                assert_eq!(c, 'a');
            }
            peg::RuleResult::Failed => panic!("expected match"),
        }
    }

    #[test]
    fn newline_skips_recorded_heredoc_body() {
        let tracker = HeredocTracker::new();
        let source = "cat <<EOF\nbody line\nEOF\nrest\n";
        let after_delim = source.find("EOF").unwrap() + 3;
        let capture = tracker.capture(source, after_delim, "EOF", false);

        let input = ShellInput::new(source, &tracker);
        let newline_pos = capture.range.first - 1;
        assert_eq!(&source[newline_pos..capture.range.first], "\n");

        match peg::ParseElem::parse_elem(&input, newline_pos) {
            peg::RuleResult::Matched(next, c) => {
                assert_eq!(c, '\n');
                assert_eq!(next, capture.range.last);
            }
            peg::RuleResult::Failed => panic!("expected match"),
        }
    }
}
