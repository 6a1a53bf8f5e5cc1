//! # Whitespace and Line Breaks
//!
//! Blanks inside a line only separate tokens and are never emitted. Line
//! breaks are significant: the grammar is line structured, so every `\n` or
//! `\r\n` becomes a [`Token::Newline`].

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    combinator::map,
    error::context,
};

use super::token::{LexResult, Token};

/// Consumes blanks up to (but not including) the next line feed.
///
/// A stray `\r` that is not part of a `\r\n` pair counts as a blank.
#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_whitespace(input: &str) -> LexResult<&str> {
    context(
        "whitespace",
        take_while1(|c: char| c.is_whitespace() && c != '\n'),
    )(input)
}

#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_newline(input: &str) -> LexResult<Token> {
    context(
        "newline",
        map(alt((tag("\r\n"), tag("\n"))), |_| Token::Newline),
    )(input)
}
