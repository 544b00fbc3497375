//! Errors produced while parsing a shell program.

use crate::position::LineCol;

/// An error that occurred while parsing a shell program.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    /// A parsing error occurred near the given byte position.
    #[error("parse error near byte {position}")]
    ParsingNear {
        /// The approximate byte offset of the failure.
        position: usize,
        /// The approximate line/column of the failure.
        location: LineCol,
    },

    /// A parsing error occurred at the end of the input.
    #[error("parse error at end of input")]
    ParsingAtEndOfInput,
}

impl ParseError {
    /// The approximate byte offset of the failure, if known.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::ParsingNear { position, .. } => Some(*position),
            Self::ParsingAtEndOfInput => None,
        }
    }
}

pub(crate) fn convert_peg_parse_error(
    err: &peg::error::ParseError<usize>,
    source: &str,
) -> ParseError {
    if err.location < source.len() {
        let location = crate::position::line_col(source, err.location);
        ParseError::ParsingNear {
            position: err.location,
            location,
        }
    } else {
        ParseError::ParsingAtEndOfInput
    }
}

#[allow(clippy::cast_sign_loss)]
#[allow(unused)]
pub mod miette {
    use super::ParseError;
    use miette::SourceOffset;

    impl ParseError {
        /// Converts the error into one `miette` can pretty-print against the
        /// original source text.
        pub fn to_pretty_error(self, input: impl Into<String>) -> PrettyError {
            let input = input.into();
            let location = match self {
                Self::ParsingNear { location, .. } => {
                    Some(SourceOffset::from_location(&input, location.line, location.col))
                }
                Self::ParsingAtEndOfInput => {
                    Some(SourceOffset::from_location(&input, usize::MAX, usize::MAX))
                }
            };

            PrettyError {
                cause: self,
                input,
                location,
            }
        }
    }

    /// A [`ParseError`] bundled with the source text, ready for `miette` to
    /// render with a source snippet and caret.
    #[derive(thiserror::Error, Debug, miette::Diagnostic)]
    #[error("cannot parse the input script")]
    pub struct PrettyError {
        cause: ParseError,
        #[source_code]
        input: String,
        #[label("{cause}")]
        location: Option<SourceOffset>,
    }
}
