//! Byte-offset to line/column translation for source positions.

/// A 1-based line/column pair, as reported on [`Node`](crate::ast::Node) when
/// the `loc2` option is enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineCol {
    /// The 1-based line number.
    pub line: usize,
    /// The 1-based column number (in bytes, not grapheme clusters).
    pub col: usize,
}

/// A precomputed table of line-start byte offsets, used to translate a byte
/// offset into a 1-based line/column pair without rescanning the source for
/// every node.
pub(crate) struct LineIndex {
    // Byte offset of the first character of each line; `starts[0]` is always 0.
    starts: Vec<usize>,
}

impl LineIndex {
    pub(crate) fn new(source: &str) -> Self {
        let mut starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                starts.push(i + 1);
            }
        }
        Self { starts }
    }

    /// Translates a 0-based byte offset into a 1-based line/column pair.
    pub(crate) fn line_col(&self, byte_pos: usize) -> LineCol {
        let line_idx = match self.starts.binary_search(&byte_pos) {
            Ok(exact) => exact,
            Err(insert_at) => insert_at - 1,
        };
        let col = byte_pos - self.starts[line_idx] + 1;
        LineCol {
            line: line_idx + 1,
            col,
        }
    }
}

/// Translates a 0-based byte offset into a 1-based line/column pair,
/// rescanning `source` from scratch. Used on the (cold) parse-error path,
/// where building a full [`LineIndex`] once is unnecessary.
pub(crate) fn line_col(source: &str, byte_pos: usize) -> LineCol {
    LineIndex::new(source).line_col(byte_pos)
}
