//! Here-document body capture, and the range bookkeeping that lets the
//! grammar skip over already-captured bodies when it crosses a newline.

use std::cell::RefCell;

/// A captured here-document body's byte range in the source text, expressed
/// as `[first, last)`. `first` is the first byte of the body; `last` is the
/// position immediately after the newline that terminates the delimiter
/// line (or end-of-input, if the delimiter line has no trailing newline).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct HeredocRange {
    pub first: usize,
    pub last: usize,
}

/// The outcome of capturing one here-document body: the cleaned body text,
/// plus the raw range it occupies in the source.
pub(crate) struct HeredocCapture {
    pub range: HeredocRange,
    pub body: String,
}

/// Tracks here-document body ranges recorded while parsing a single input.
///
/// Ranges are kept latest-first. The grammar consults this both to capture
/// a new body (advancing past any ranges already claimed on the same
/// physical line) and to skip the parser's cursor past a body whenever a
/// newline would otherwise walk into it.
#[derive(Default)]
pub(crate) struct HeredocTracker {
    ranges: RefCell<Vec<HeredocRange>>,
}

impl HeredocTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Advances `pos` past any already-recorded range that contains it.
    /// Applied before searching for a new heredoc's body, so that multiple
    /// heredoc redirections stacked on one command line don't claim
    /// overlapping text.
    fn adjust_start(&self, mut pos: usize) -> usize {
        loop {
            let ranges = self.ranges.borrow();
            let hit = ranges.iter().find(|r| pos >= r.first && pos < r.last).copied();
            drop(ranges);
            match hit {
                Some(r) => pos = r.last,
                None => return pos,
            }
        }
    }

    /// Advances `pos` past any recorded range it falls inside. Used by the
    /// input cursor when it matches a newline that would otherwise enter a
    /// captured heredoc body.
    pub(crate) fn skip_through(&self, mut pos: usize) -> usize {
        loop {
            let ranges = self.ranges.borrow();
            let hit = ranges.iter().find(|r| pos >= r.first && pos < r.last).copied();
            drop(ranges);
            match hit {
                Some(r) => pos = r.last,
                None => return pos,
            }
        }
    }

    fn push(&self, range: HeredocRange) {
        self.ranges.borrow_mut().insert(0, range);
    }

    /// Captures a here-document body starting the search at `after_pos`
    /// (the position right after the delimiter word was matched). Does not
    /// advance the caller's parse cursor; only records state for later
    /// skip-hook consultation.
    pub(crate) fn capture(
        &self,
        source: &str,
        after_pos: usize,
        delim: &str,
        strip_leading_tabs: bool,
    ) -> HeredocCapture {
        let next_newline = source[after_pos..].find('\n').map(|i| after_pos + i + 1);
        let search_start = self.adjust_start(next_newline.unwrap_or(source.len()));

        let mut cursor = search_start;
        let (body_end, last) = loop {
            if cursor >= source.len() {
                break (source.len(), source.len());
            }

            let line_end = source[cursor..]
                .find('\n')
                .map_or(source.len(), |i| cursor + i);
            let has_newline = line_end < source.len();
            let line = &source[cursor..line_end];

            let candidate = if strip_leading_tabs {
                line.trim_start_matches('\t')
            } else {
                line
            };

            if candidate == delim {
                let last = if has_newline { line_end + 1 } else { line_end };
                break (cursor, last);
            }

            if !has_newline {
                break (source.len(), source.len());
            }
            cursor = line_end + 1;
        };

        let raw_body = &source[search_start..body_end];
        let body = if strip_leading_tabs {
            raw_body
                .split('\n')
                .map(|line| line.trim_start_matches('\t'))
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            raw_body.to_owned()
        };

        let range = HeredocRange {
            first: search_start,
            last,
        };
        self.push(range);

        HeredocCapture { range, body }
    }
}
