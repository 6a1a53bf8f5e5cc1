use std::fmt;

use nom::{
    IResult, branch::alt, bytes::complete::take_while1, combinator::map, error::VerboseError,
};

use super::{
    keyword::parse_word,
    literal::{TimeLiteral, parse_time_literal},
    symbol::{Delimiter, parse_delimiter},
    whitespace::{parse_newline, parse_whitespace},
};
use crate::{model::Day, trace::TraceObserver};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Words
    Identifier(String),
    Number(u32),
    // All digits, too large for `Number`
    LargeNumber(String),
    DayCode(Day),
    // Literals
    Time(TimeLiteral),
    // Symbols
    Delimiter(Delimiter),
    // Structure
    Newline,
    Eof,
    // Text that fits no lexical class
    Unknown(String),
}

impl Token {
    /// Short human readable name of the token class, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Identifier(_) => "identifier",
            Token::Number(_) | Token::LargeNumber(_) => "number",
            Token::DayCode(_) => "day code",
            Token::Time(_) => "time",
            Token::Delimiter(_) => "delimiter",
            Token::Newline => "end of line",
            Token::Eof => "end of input",
            Token::Unknown(_) => "unknown text",
        }
    }

    pub fn is_newline(&self) -> bool {
        matches!(self, Token::Newline)
    }

    pub fn is_eof(&self) -> bool {
        matches!(self, Token::Eof)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Token::Unknown(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(word) | Token::LargeNumber(word) | Token::Unknown(word) => {
                write!(f, "{}", word)
            }
            Token::Number(n) => write!(f, "{}", n),
            Token::DayCode(day) => write!(f, "{}", day),
            Token::Time(time) => write!(f, "{}", time),
            Token::Delimiter(delimiter) => write!(f, "{}", delimiter),
            Token::Newline | Token::Eof => write!(f, "{}", self.kind_name()),
        }
    }
}

/// A token together with its exact source text and position.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSpan {
    pub token: Token,
    pub lexeme: String,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

/// Displays the source text, which is what diagnostics quote.
impl fmt::Display for TokenSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lexeme.is_empty() {
            write!(f, "{}", self.token.kind_name())
        } else {
            write!(f, "{}", self.lexeme)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tokenizer {
    current_position: usize,
    current_line: usize,
    current_column: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            current_position: 0,
            current_line: 1,   // 1-based
            current_column: 1, // 1-based
        }
    }

    /// Tokenizes the whole input. Never fails: text that fits no lexical
    /// class is emitted as [`Token::Unknown`]. The stream always ends with
    /// exactly one [`Token::Eof`]. Positions restart at line 1 on every call.
    pub fn tokenize(&mut self, input: &str) -> Vec<TokenSpan> {
        self.tokenize_observed(input, None)
    }

    /// Same as [`Tokenizer::tokenize`], handing every token to `observer` as
    /// soon as it is produced.
    pub fn tokenize_with_observer(
        &mut self,
        input: &str,
        observer: &mut dyn TraceObserver,
    ) -> Vec<TokenSpan> {
        self.tokenize_observed(input, Some(observer))
    }

    #[tracing::instrument(level = "debug", skip(self, input, observer), fields(len = input.len()))]
    fn tokenize_observed(
        &mut self,
        input: &str,
        mut observer: Option<&mut dyn TraceObserver>,
    ) -> Vec<TokenSpan> {
        *self = Self::new();
        let mut tokens = Vec::new();
        let mut remaining = input;

        while !remaining.is_empty() {
            if let Ok((new_remaining, blank)) = parse_whitespace(remaining) {
                self.update_position(blank);
                remaining = new_remaining;
                continue;
            }

            let start_position = self.current_position;
            let start_line = self.current_line;
            let start_column = self.current_column;

            let (new_remaining, token) = match alt((
                parse_newline,
                parse_time_literal,
                parse_delimiter,
                parse_word,
                parse_unknown,
            ))(remaining)
            {
                Ok(result) => result,
                Err(e) => {
                    // Every character belongs to some class above, this is
                    // only reachable if a class parser is broken.
                    tracing::warn!(error = ?e, line = start_line, "no lexical class matched");
                    let width = remaining.chars().next().map_or(1, char::len_utf8);
                    (
                        &remaining[width..],
                        Token::Unknown(remaining[..width].to_string()),
                    )
                }
            };

            let consumed = &remaining[..(remaining.len() - new_remaining.len())];
            self.update_position(consumed);

            let span = TokenSpan {
                token,
                lexeme: consumed.to_string(),
                start: start_position,
                end: self.current_position,
                line: start_line,
                column: start_column,
            };
            if let Some(observer) = observer.as_deref_mut() {
                observer.on_token(&span);
            }
            tokens.push(span);

            remaining = new_remaining;
        }

        let eof = TokenSpan {
            token: Token::Eof,
            lexeme: String::new(),
            start: self.current_position,
            end: self.current_position,
            line: self.current_line,
            column: self.current_column,
        };
        if let Some(observer) = observer.as_deref_mut() {
            observer.on_token(&eof);
        }
        tokens.push(eof);

        tracing::debug!(count = tokens.len(), "tokenized input");
        tokens
    }

    fn update_position(&mut self, text: &str) {
        for c in text.chars() {
            self.current_position += c.len_utf8();
            if c == '\n' {
                self.current_line += 1;
                self.current_column = 1;
            } else {
                self.current_column += 1;
            }
        }
    }
}

/// Catch-all for text that fits no lexical class. Takes the whole run up to
/// the next blank or delimiter so one stray character does not split a field
/// into several unknown tokens.
#[tracing::instrument(level = "trace", skip(input))]
fn parse_unknown(input: &str) -> LexResult<Token> {
    map(
        take_while1(|c: char| !c.is_whitespace() && !Delimiter::is_delimiter_char(c)),
        |text: &str| Token::Unknown(text.to_string()),
    )(input)
}

pub type LexResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;
