//! Parse error types.
//!
//! A parse error is always local to one parameter: callers catch it, leave
//! the parameter untouched, and move on. Errors still carry a kind and a
//! span so they can be logged or surfaced by validation.

use std::fmt;

use evt_ir::{ReturnType, Span};

/// What went wrong while parsing an expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input ended where more was required.
    UnexpectedEnd {
        /// Description of what was expected.
        expected: &'static str,
    },

    /// A character that cannot start or continue what was expected.
    UnexpectedChar {
        found: char,
        /// Description of what was expected.
        expected: &'static str,
    },

    /// A complete expression was followed by more text.
    TrailingInput,

    /// A string literal without its closing quote.
    UnterminatedString,

    /// A `(` without its matching `)`.
    UnclosedGroup,

    /// An identifier that is not followed by an argument list.
    ExpectedArguments { name: String },

    /// No function of this name and call shape returns the expected type.
    UnknownFunction { name: String, returns: ReturnType },

    /// A required argument was not written.
    MissingArgument { function: String, index: usize },

    /// More arguments were written than the function declares.
    TooManyArguments {
        function: String,
        expected: usize,
        found: usize,
    },

    /// The visitor rejected a nested argument expression.
    SubExpression { function: String, index: usize },
}

/// A parse error with the byte range it concerns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    #[cold]
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }

    /// Expected something at `offset`, found `found` (or EOF).
    #[cold]
    pub fn unexpected(found: Option<char>, expected: &'static str, offset: usize) -> Self {
        let kind = match found {
            Some(found) => ParseErrorKind::UnexpectedChar { found, expected },
            None => ParseErrorKind::UnexpectedEnd { expected },
        };
        let width = found.map_or(0, char::len_utf8);
        ParseError::new(kind, Span::from_range(offset..offset + width))
    }

    /// Complete expression followed by extra text starting at `offset`.
    #[cold]
    pub fn trailing_input(offset: usize, len: usize) -> Self {
        ParseError::new(ParseErrorKind::TrailingInput, Span::from_range(offset..len))
    }

    #[cold]
    pub fn unterminated_string(start: usize, end: usize) -> Self {
        ParseError::new(
            ParseErrorKind::UnterminatedString,
            Span::from_range(start..end),
        )
    }

    #[cold]
    pub fn unclosed_group(open: usize) -> Self {
        ParseError::new(ParseErrorKind::UnclosedGroup, Span::from_range(open..open + 1))
    }

    /// Rebase this error, reported against an argument's text, onto the
    /// text of the expression that contains the argument.
    #[must_use]
    pub fn shifted(self, offset: u32) -> Self {
        ParseError {
            kind: self.kind,
            span: self.span.shifted(offset),
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEnd { expected } => {
                write!(f, "unexpected end of expression, expected {expected}")
            }
            Self::UnexpectedChar { found, expected } => {
                write!(f, "unexpected `{found}`, expected {expected}")
            }
            Self::TrailingInput => f.write_str("unexpected text after the end of the expression"),
            Self::UnterminatedString => f.write_str("unterminated string literal"),
            Self::UnclosedGroup => f.write_str("unclosed `(`"),
            Self::ExpectedArguments { name } => {
                write!(f, "expected `(` after `{name}`")
            }
            Self::UnknownFunction { name, returns } => {
                let what = match returns {
                    ReturnType::Number => "number",
                    ReturnType::String => "string",
                };
                write!(f, "unknown {what} function `{name}`")
            }
            Self::MissingArgument { function, index } => {
                write!(f, "missing argument {index} of `{function}`")
            }
            Self::TooManyArguments {
                function,
                expected,
                found,
            } => write!(
                f,
                "`{function}` takes at most {expected} arguments, found {found}"
            ),
            Self::SubExpression { function, index } => {
                write!(f, "invalid argument {index} of `{function}`")
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.span)
    }
}

impl std::error::Error for ParseError {}
