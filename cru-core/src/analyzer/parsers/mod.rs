//! Field and line parsers for the `.cru` grammar.
//!
//! Each parser works on the tokens of one physical line. The line driver in
//! [`crate::analyzer::document`] decides which production a line is matched
//! against.

pub mod common;
pub mod header;
pub mod session;

pub use header::parse_course_header;
pub use session::{SessionFields, parse_session_line};
