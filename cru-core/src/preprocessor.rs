//! # Line Preprocessor
//!
//! Sits between the tokenizer and the analyzer. The `.cru` grammar has one
//! production per physical line, so the token stream is regrouped into
//! [`SourceLine`]s: the tokens of each non-blank line, together with the
//! verbatim source text the diagnostics quote.
//!
//! ```text
//! Source Text → Tokenizer → LinePreprocessor → Analyzer → ParseResult
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use cru_core::preprocessor::{LinePreprocessor, Preprocessor};
//! use cru_core::tokenizer::token::Tokenizer;
//!
//! let source = "+AP03\n\n1,D1,MA,10:00-12:00,P202/24,1\n";
//! let tokens = Tokenizer::new().tokenize(source);
//! let lines = LinePreprocessor::new(source).process(tokens);
//!
//! assert_eq!(lines.len(), 2);
//! assert!(lines[0].is_header());
//! assert_eq!(lines[1].number, 3);
//! ```

use crate::tokenizer::{
    symbol::Delimiter,
    token::{Token, TokenSpan},
};

/// A trait for preprocessing different types of input
pub trait Preprocessor<T, U = T> {
    /// Process the input of type T and return the processed result
    fn process(&self, input: T) -> U;
}

/// Tokens of one non-blank physical line.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceLine {
    /// 1-based line number.
    pub number: usize,
    /// Line text without its line break.
    pub text: String,
    /// Never empty, and never contains `Newline` or `Eof`.
    pub tokens: Vec<TokenSpan>,
}

impl SourceLine {
    /// A line starting with `+` always opens a course block.
    pub fn is_header(&self) -> bool {
        self.tokens
            .first()
            .is_some_and(|span| span.token == Token::Delimiter(Delimiter::Plus))
    }

    /// Column just past the last token, where "line ends before ..." is
    /// reported.
    pub fn end_column(&self) -> usize {
        self.tokens
            .last()
            .map_or(1, |span| span.column + span.lexeme.chars().count())
    }
}

/// Groups a token stream by line. Blank lines are dropped.
pub struct LinePreprocessor<'a> {
    source: &'a str,
}

impl<'a> LinePreprocessor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }
}

impl Preprocessor<Vec<TokenSpan>, Vec<SourceLine>> for LinePreprocessor<'_> {
    #[tracing::instrument(level = "debug", skip(self, input), fields(tokens = input.len()))]
    fn process(&self, input: Vec<TokenSpan>) -> Vec<SourceLine> {
        let texts: Vec<&str> = self.source.lines().collect();
        let mut lines: Vec<SourceLine> = Vec::new();

        for span in input {
            if span.token.is_newline() || span.token.is_eof() {
                continue;
            }
            match lines.last_mut() {
                Some(line) if line.number == span.line => line.tokens.push(span),
                _ => lines.push(SourceLine {
                    number: span.line,
                    text: texts
                        .get(span.line - 1)
                        .map(|text| text.to_string())
                        .unwrap_or_default(),
                    tokens: vec![span],
                }),
            }
        }

        tracing::debug!(lines = lines.len(), "grouped tokens by line");
        lines
    }
}
