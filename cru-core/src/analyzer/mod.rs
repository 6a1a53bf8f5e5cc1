//! # Grammar Analyzer
//!
//! Validates the token stream of a `.cru` file against the timetable grammar
//! and builds the [`ParseResult`](crate::model::ParseResult).
//!
//! ## Architecture
//!
//! 1. **Core Parser Interface**: the [`Parser`] trait and [`ParseError`]
//! 2. **Combinators**: small token-level parsers that compose
//! 3. **Field Parsers**: day, time range, room/capacity, week, ...
//! 4. **Line Driver**: one production per physical line, with
//!    resynchronisation at the next line after any mismatch
//!
//! ```text
//! Source Text → Tokenizer → LinePreprocessor → Analyzer → ParseResult
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use cru_core::analyzer::prelude::*;
//! use cru_core::analyzer::Parser;
//! use cru_core::analyzer::parsers::common::parse_day;
//! use cru_core::model::Day;
//! use cru_core::tokenizer::token::Tokenizer;
//!
//! let tokens = Tokenizer::new().tokenize("MA");
//! assert_eq!(parse_day().parse(&tokens, 0).map(|(_, day)| day), Ok(Day::Tuesday));
//! ```

pub mod combinators;
pub mod core;
pub mod document;
pub mod parsers;
pub mod prelude;

pub use core::ParseError;
pub use core::Parser;
pub use core::ParserResult;
pub use document::analyze;
