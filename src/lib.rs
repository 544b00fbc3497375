//! Parses POSIX shell syntax into a generic, schema-fixed syntax tree.

#![deny(missing_docs)]

pub mod ast;
pub mod options;

mod error;
mod grammar;
mod heredoc;
mod input;
mod position;

#[cfg(test)]
mod tests;

pub use ast::{Child, Node, NodeKind};
pub use error::ParseError;
pub use grammar::parse;
pub use options::ParserOptions;
pub use position::LineCol;

/// Parses `source` per `options`, memoizing on the exact `(options, source)`
/// pair. Useful when the same script text is re-parsed repeatedly (for
/// instance across an editor's debounce window) under otherwise identical
/// parser options.
#[cached::proc_macro::cached(size = 64, result = true)]
pub fn cached_parse(options: ParserOptions, source: String) -> Result<Node, ParseError> {
    parse(&source, &options)
}
