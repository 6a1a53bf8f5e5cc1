//! # Core Parser Definitions
//!
//! The parser interface and error type shared by the combinators and the
//! field parsers. Positions are indexes into the token slice of one line.

use thiserror::Error;

use crate::model::DiagnosticKind;

/// Parser trait defines the core parsing interface.
///
/// All parsers take an input slice and a position, and return either the
/// new position with the parsed value, or a [`ParseError`].
pub trait Parser<I, O> {
    fn parse(&self, input: &[I], pos: usize) -> ParserResult<O>;
}

/// On success, the new position and the parsed value.
pub type ParserResult<O> = Result<(usize, O), ParseError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The line ended before the field
    #[error("line ends before {expected}{}", fmt_context(.context))]
    UnexpectedEol {
        expected: String,
        position: usize,
        context: Option<String>,
    },
    /// A token of the wrong shape
    #[error("expected {expected}{}, found '{found}'", fmt_context(.context))]
    Unexpected {
        expected: String,
        found: String,
        position: usize,
        context: Option<String>,
    },
    /// A well formed value outside its domain
    #[error("{message}{}", fmt_context(.context))]
    OutOfRange {
        message: String,
        position: usize,
        context: Option<String>,
    },
    /// Text that fits no lexical class
    #[error("unrecognised text '{lexeme}'")]
    Lexical { lexeme: String, position: usize },
    /// No alternative matched
    #[error("no alternative matched{}", fmt_context(.context))]
    NoAlternative {
        position: usize,
        context: Option<String>,
    },
    /// Explicit failure
    #[error("{message}")]
    Failure { message: String, position: usize },
}

fn fmt_context(context: &Option<String>) -> String {
    context
        .as_ref()
        .map(|c| format!(" for {}", c))
        .unwrap_or_default()
}

impl ParseError {
    /// Attaches the name of the field being parsed. The innermost context
    /// wins, so wrapping an already named error keeps the precise name.
    pub fn with_context(self, ctx: &str) -> Self {
        let name = |context: Option<String>| context.or_else(|| Some(ctx.to_string()));
        match self {
            ParseError::UnexpectedEol {
                expected,
                position,
                context,
            } => ParseError::UnexpectedEol {
                expected,
                position,
                context: name(context),
            },
            ParseError::Unexpected {
                expected,
                found,
                position,
                context,
            } => ParseError::Unexpected {
                expected,
                found,
                position,
                context: name(context),
            },
            ParseError::OutOfRange {
                message,
                position,
                context,
            } => ParseError::OutOfRange {
                message,
                position,
                context: name(context),
            },
            ParseError::NoAlternative { position, context } => ParseError::NoAlternative {
                position,
                context: name(context),
            },
            other @ (ParseError::Lexical { .. } | ParseError::Failure { .. }) => other,
        }
    }

    pub fn get_position(&self) -> usize {
        match self {
            ParseError::UnexpectedEol { position, .. } => *position,
            ParseError::Unexpected { position, .. } => *position,
            ParseError::OutOfRange { position, .. } => *position,
            ParseError::Lexical { position, .. } => *position,
            ParseError::NoAlternative { position, .. } => *position,
            ParseError::Failure { position, .. } => *position,
        }
    }

    /// Diagnostic class this error is reported under.
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            ParseError::Lexical { .. } => DiagnosticKind::LexicalAnomaly,
            ParseError::OutOfRange { .. } => DiagnosticKind::RangeViolation,
            ParseError::UnexpectedEol { .. }
            | ParseError::Unexpected { .. }
            | ParseError::NoAlternative { .. }
            | ParseError::Failure { .. } => DiagnosticKind::GrammarMismatch,
        }
    }
}
