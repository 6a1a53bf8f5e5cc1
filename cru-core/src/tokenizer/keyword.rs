//! # Words and Day-Code Keywords
//!
//! A word is a run of letters, digits, `_` and `.`. After recognition the word
//! is classified, the same way a keyword table is consulted after scanning an
//! identifier:
//!
//! * all digits: integer ([`Token::Number`], or [`Token::LargeNumber`] past
//!   `u32::MAX`)
//! * one of the fixed day codes `L`, `MA`, `ME`, `J`, `V`: [`Token::DayCode`]
//! * anything else: [`Token::Identifier`]

use std::str::FromStr;

use nom::{bytes::complete::take_while1, combinator::map, error::context};

use super::{
    literal::integer_token,
    token::{LexResult, Token},
};
use crate::model::Day;

pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_word(input: &str) -> LexResult<Token> {
    context("word", map(take_while1(is_word_char), classify_word))(input)
}

/// Classifies an already scanned word.
pub fn classify_word(word: &str) -> Token {
    if word.chars().all(|c| c.is_ascii_digit()) {
        return integer_token(word);
    }
    if let Ok(day) = Day::from_str(word) {
        return Token::DayCode(day);
    }
    Token::Identifier(word.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_codes() {
        let test_cases = [
            ("L", Day::Monday),
            ("MA", Day::Tuesday),
            ("ME", Day::Wednesday),
            ("J", Day::Thursday),
            ("V", Day::Friday),
        ];
        for (input, expected) in test_cases {
            let (rest, token) = parse_word(input).unwrap();
            assert_eq!(token, Token::DayCode(expected));
            assert_eq!(rest, "");
        }
    }

    #[test]
    fn test_identifier() {
        let (rest, token) = parse_word("A101/30").unwrap();
        assert_eq!(token, Token::Identifier("A101".to_string()));
        assert_eq!(rest, "/30");

        let (_, token) = parse_word("Algorithms_101.b").unwrap();
        assert_eq!(token, Token::Identifier("Algorithms_101.b".to_string()));
    }

    #[test]
    fn test_day_code_is_case_sensitive() {
        let (_, token) = parse_word("ma").unwrap();
        assert_eq!(token, Token::Identifier("ma".to_string()));
    }

    #[test]
    fn test_numbers() {
        let (rest, token) = parse_word("30,0").unwrap();
        assert_eq!(token, Token::Number(30));
        assert_eq!(rest, ",0");
    }

    #[test]
    fn test_overflowing_number_stays_a_number() {
        let (_, token) = parse_word("123456789012345").unwrap();
        assert_eq!(token, Token::LargeNumber("123456789012345".to_string()));
        assert_eq!(token.kind_name(), "number");
    }

    #[test]
    fn test_word_starting_with_digit() {
        let (_, token) = parse_word("1A").unwrap();
        assert_eq!(token, Token::Identifier("1A".to_string()));
    }
}
