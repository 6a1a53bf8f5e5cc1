//! # Time and Integer Literals
//!
//! Time literals are recognised before plain integers so that `10:00` is a
//! single token rather than `10`, `:` and `00`. The lexer only checks the
//! shape; whether the hour and minute make sense is decided by the analyzer.

use std::fmt;

use nom::{
    bytes::complete::take_while_m_n,
    character::complete::char,
    combinator::{map_res, recognize},
    error::context,
    sequence::tuple,
};

use super::token::{LexResult, Token};

/// Raw `H:MM` literal as written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeLiteral {
    pub hour: u8,
    pub minute: u8,
}

impl fmt::Display for TimeLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour, self.minute)
    }
}

fn is_ascii_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Parses `H:MM` or `HH:MM`. The minute part always has two digits.
#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_time_literal(input: &str) -> LexResult<Token> {
    context(
        "time literal",
        map_res(
            recognize(tuple((
                take_while_m_n(1, 2, is_ascii_digit),
                char(':'),
                take_while_m_n(2, 2, is_ascii_digit),
            ))),
            |text: &str| -> Result<Token, std::num::ParseIntError> {
                let (hour, minute) = text.split_once(':').unwrap_or((text, "0"));
                Ok(Token::Time(TimeLiteral {
                    hour: hour.parse()?,
                    minute: minute.parse()?,
                }))
            },
        ),
    )(input)
}

/// Converts an all-digit word into an integer token. A value that does not
/// fit a `u32` keeps its digits in [`Token::LargeNumber`].
pub fn integer_token(digits: &str) -> Token {
    digits
        .parse::<u32>()
        .map_or_else(|_| Token::LargeNumber(digits.to_string()), Token::Number)
}
