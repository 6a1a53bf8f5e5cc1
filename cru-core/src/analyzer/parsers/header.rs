use super::super::{core::*, prelude::*};
use super::common::{parse_code, parse_plus};
use crate::tokenizer::token::TokenSpan;

/// `+Name [section]`
pub fn parse_course_header() -> impl Parser<TokenSpan, (String, Option<String>)> {
    with_context(
        map(
            tuple3(
                preceded(parse_plus(), parse_code("course name")),
                optional(parse_code("section")),
                end_of_input(),
            ),
            |(name, section, ())| (name, section),
        ),
        "course header",
    )
}
