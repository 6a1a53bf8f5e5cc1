//! # Delimiter Token Handling
//!
//! The CRU format only knows five punctuation marks. Each of them separates
//! fields inside a single physical line:
//!
//! * `,` between session fields
//! * `/` between a room and its capacity
//! * `-` between the start and end of a time range
//! * `:` inside a time literal that did not lex as a whole
//! * `+` at the start of a course header

use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator::{map, value},
    error::context,
};
use strum_macros::{AsRefStr, Display, EnumString};

use super::token::{LexResult, Token};

/// Punctuation recognised by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr)]
pub enum Delimiter {
    #[strum(serialize = ",")]
    Comma,
    #[strum(serialize = "/")]
    Slash,
    #[strum(serialize = "-")]
    Dash,
    #[strum(serialize = ":")]
    Colon,
    #[strum(serialize = "+")]
    Plus,
}

impl Delimiter {
    pub fn is_delimiter_char(c: char) -> bool {
        matches!(c, ',' | '/' | '-' | ':' | '+')
    }
}

/// Parses a delimiter token from the input string.
///
/// ```
/// # use cru_core::tokenizer::symbol::{Delimiter, parse_delimiter};
/// # use cru_core::tokenizer::token::Token;
/// let (rest, token) = parse_delimiter("/30").unwrap();
/// assert_eq!(token, Token::Delimiter(Delimiter::Slash));
/// assert_eq!(rest, "30");
/// ```
#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_delimiter(input: &str) -> LexResult<Token> {
    context(
        "delimiter",
        map(
            alt((
                value(Delimiter::Comma, tag(",")),
                value(Delimiter::Slash, tag("/")),
                value(Delimiter::Dash, tag("-")),
                value(Delimiter::Colon, tag(":")),
                value(Delimiter::Plus, tag("+")),
            )),
            Token::Delimiter,
        ),
    )(input)
}
