//! # Tokenizer Component
//!
//! The tokenizer performs lexical analysis of `.cru` timetable text,
//! transforming raw text into a token stream for the analyzer.
//!
//! ## Design Principles
//!
//! * **Position Information**: every token keeps its exact lexeme, its byte
//!   range and its line/column, so diagnostics can point at a field.
//! * **Line Structure**: blanks are dropped but line breaks are emitted as
//!   [`Token::Newline`](token::Token::Newline), and the stream is closed by a
//!   single [`Token::Eof`](token::Token::Eof).
//! * **Never Fails**: text fitting no lexical class becomes a
//!   [`Token::Unknown`](token::Token::Unknown) that the analyzer reports.
//!
//! ## Component Structure
//!
//! * [`token`]: token types and the [`Tokenizer`](token::Tokenizer)
//! * [`keyword`]: words, integers and day-code keywords
//! * [`literal`]: time literals
//! * [`symbol`]: delimiters
//! * [`whitespace`]: blanks and line breaks
//!
//! ## Usage Example
//!
//! ```rust
//! use cru_core::tokenizer::token::{Token, Tokenizer};
//!
//! let tokens = Tokenizer::new().tokenize("+AP03\n1,D1,MA,10:00-12:00,P202/24,1");
//! assert!(matches!(tokens.last().map(|t| &t.token), Some(Token::Eof)));
//! ```

pub mod keyword;
pub mod literal;
pub mod symbol;
pub mod token;
pub mod whitespace;
