//! # cru-core: CRU Timetable Parser
//!
//! Parses `.cru` timetable-description files: course blocks made of a
//! header line followed by one session line per scheduled occurrence.
//!
//! ```text
//! +Algorithms101
//! idx1,CM,L,8:00-10:00,A101/30,0
//! ```
//!
//! Parsing is error tolerant. A malformed line is recorded as a
//! [`Diagnostic`] and parsing resumes at the next line, so a single call
//! reports every problem of a file.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Source Text → Tokenizer → LinePreprocessor → Analyzer → ParseResult
//! ```
//!
//! ### Stage 1: Tokenization
//!
//! The [`tokenizer`] module splits raw text into typed tokens with their
//! exact lexeme and position. It never fails: unrecognised text becomes an
//! `Unknown` token.
//!
//! ### Stage 2: Line Grouping
//!
//! The [`preprocessor`] module regroups tokens by physical line and drops
//! blank lines.
//!
//! ### Stage 3: Analysis
//!
//! The [`analyzer`] module matches every line against the course-header or
//! session-line production and builds the [`ParseResult`].
//!
//! ## Supporting Modules
//!
//! * [`model`]: sessions, courses, diagnostics
//! * [`trace`]: observers for token and grammar tracing
//! * [`formatter`]: canonical `.cru` output
//! * [`query`]: search and filters over sessions
//! * [`config`]: parse options
//!
//! ## Usage Example
//!
//! ```rust
//! use cru_core::{Day, ParseOptions, parse};
//!
//! let result = parse(
//!     "+Algorithms101\nidx1,CM,L,8:00-10:00,A101/30,0\n",
//!     &ParseOptions::default(),
//! );
//! assert!(result.is_valid());
//! assert_eq!(result.sessions[0].day, Day::Monday);
//! assert_eq!(result.sessions[0].capacity, 30);
//! ```

pub mod analyzer;
pub mod config;
pub mod error;
pub mod formatter;
pub mod model;
pub mod preprocessor;
pub mod query;
pub mod tokenizer;
pub mod trace;

// Re-exports
pub use config::ParseOptions;
pub use error::*;
pub use formatter::Formatter;
pub use model::*;
pub use trace::{NoopObserver, RecordingObserver, TraceObserver, TracingObserver};

use preprocessor::{LinePreprocessor, Preprocessor};
use tokenizer::token::{TokenSpan, Tokenizer};
use trace::Gated;

/// Tokenizes `text` without analyzing it.
pub fn tokenize(text: &str) -> Vec<TokenSpan> {
    Tokenizer::new().tokenize(text)
}

/// Parses `text`. Enabled trace channels are forwarded to `tracing` at debug
/// level.
pub fn parse(text: &str, options: &ParseOptions) -> ParseResult {
    parse_with_observer(text, options, &mut TracingObserver)
}

/// Parses `text`, handing the enabled trace channels to `observer`.
#[tracing::instrument(level = "debug", skip(text, observer), fields(len = text.len()))]
pub fn parse_with_observer(
    text: &str,
    options: &ParseOptions,
    observer: &mut dyn TraceObserver,
) -> ParseResult {
    let mut gated = Gated {
        inner: observer,
        tokens: options.trace_tokens,
        rules: options.trace_grammar,
    };
    let tokens = Tokenizer::new().tokenize_with_observer(text, &mut gated);
    let lines = LinePreprocessor::new(text).process(tokens);
    analyzer::analyze(&lines, options.day_window, &mut gated)
}
