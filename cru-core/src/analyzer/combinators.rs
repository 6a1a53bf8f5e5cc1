//! # Parser Combinators
//!
//! Building blocks for the field parsers. Each combinator works on a slice
//! of tokens and a position, and composes with the others through the
//! [`Parser`] trait.
//!
//! ## Combinator Types
//!
//! * **Basic**: `Satisfy`, `EndOfInput`
//! * **Sequential**: `Preceded`, `Tuple2`, `Tuple3`
//! * **Alternative**: `Choice`
//! * **Transformation**: `Map`, `MapRes`, `AsUnit`
//! * **Optionality**: `Optional`
//! * **Error context**: `WithContext`

use super::core::ParseError;
use super::core::ParserResult;
use super::core::Parser;
use std::fmt;
use std::marker::PhantomData;

/// Satisfy: Consumes one token if the predicate maps it to a value
///
/// `expected` names what the predicate accepts, for error messages.
#[derive(Clone)]
pub struct Satisfy<I, O, F> {
    expected: String,
    f: F,
    _phantom: PhantomData<(I, O)>,
}

impl<I, O, F> Satisfy<I, O, F> {
    pub fn new(expected: impl Into<String>, f: F) -> Self {
        Self {
            expected: expected.into(),
            f,
            _phantom: PhantomData,
        }
    }
}

impl<I, O, F> Parser<I, O> for Satisfy<I, O, F>
where
    I: fmt::Display,
    F: Fn(&I) -> Option<O>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParserResult<O> {
        match input.get(pos) {
            Some(token) => (self.f)(token)
                .map(|result| (pos + 1, result))
                .ok_or_else(|| ParseError::Unexpected {
                    expected: self.expected.clone(),
                    found: token.to_string(),
                    position: pos,
                    context: None,
                }),
            None => Err(ParseError::UnexpectedEol {
                expected: self.expected.clone(),
                position: pos,
                context: None,
            }),
        }
    }
}

/// EndOfInput: Succeeds only when every token has been consumed
#[derive(Clone)]
pub struct EndOfInput<I> {
    _phantom: PhantomData<I>,
}

impl<I> EndOfInput<I> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<I> Default for EndOfInput<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: fmt::Display> Parser<I, ()> for EndOfInput<I> {
    fn parse(&self, input: &[I], pos: usize) -> ParserResult<()> {
        match input.get(pos) {
            None => Ok((pos, ())),
            Some(found) => Err(ParseError::Unexpected {
                expected: "end of line".to_string(),
                found: found.to_string(),
                position: pos,
                context: None,
            }),
        }
    }
}

/// Choice: Tries multiple parsers and succeeds with the first successful one
///
/// When every alternative fails, the error of the alternative that got the
/// furthest is returned, since it is the most specific one.
pub struct Choice<I, O> {
    parsers: Vec<Box<dyn Parser<I, O>>>,
}

impl<I, O> Choice<I, O> {
    pub fn new(parsers: Vec<Box<dyn Parser<I, O>>>) -> Self {
        Self { parsers }
    }
}

impl<I, O> Parser<I, O> for Choice<I, O> {
    fn parse(&self, input: &[I], pos: usize) -> ParserResult<O> {
        let mut furthest: Option<ParseError> = None;
        for parser in &self.parsers {
            match parser.parse(input, pos) {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if furthest
                        .as_ref()
                        .is_none_or(|best| e.get_position() > best.get_position())
                    {
                        furthest = Some(e);
                    }
                }
            }
        }
        Err(furthest.unwrap_or(ParseError::NoAlternative {
            position: pos,
            context: None,
        }))
    }
}

#[derive(Clone)]
pub struct Preceded<P1, P2, I, O> {
    parser1: P1,
    parser2: P2,
    _phantom: PhantomData<(I, O)>,
}

impl<P1, P2, I, O> Preceded<P1, P2, I, O> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        Self {
            parser1,
            parser2,
            _phantom: PhantomData,
        }
    }
}

impl<P1, P2, I, O> Parser<I, O> for Preceded<P1, P2, I, O>
where
    P1: Parser<I, ()>,
    P2: Parser<I, O>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParserResult<O> {
        let (pos, _) = self.parser1.parse(input, pos)?;
        let (pos, result) = self.parser2.parse(input, pos)?;
        Ok((pos, result))
    }
}

/// Map: Transforms the output of a parser using a function
#[derive(Clone)]
pub struct Map<P, F, A, B> {
    parser: P,
    f: F,
    _phantom: PhantomData<(A, B)>,
}

impl<P, F, A, B> Map<P, F, A, B> {
    pub fn new(parser: P, f: F) -> Self {
        Self {
            parser,
            f,
            _phantom: PhantomData,
        }
    }
}

impl<I, A, B, P, F> Parser<I, B> for Map<P, F, A, B>
where
    P: Parser<I, A>,
    F: Fn(A) -> B,
{
    fn parse(&self, input: &[I], pos: usize) -> ParserResult<B> {
        self.parser
            .parse(input, pos)
            .map(|(pos, value)| (pos, (self.f)(value)))
    }
}

/// MapRes: Transforms the output with a fallible function
///
/// A failing transformation means the value was well formed but outside its
/// domain; it is reported as [`ParseError::OutOfRange`] at the position where
/// the inner parser started.
#[derive(Clone)]
pub struct MapRes<P, F, A, B> {
    parser: P,
    f: F,
    _phantom: PhantomData<(A, B)>,
}

impl<P, F, A, B> MapRes<P, F, A, B> {
    pub fn new(parser: P, f: F) -> Self {
        Self {
            parser,
            f,
            _phantom: PhantomData,
        }
    }
}

impl<I, A, B, P, F> Parser<I, B> for MapRes<P, F, A, B>
where
    P: Parser<I, A>,
    F: Fn(A) -> Result<B, String>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParserResult<B> {
        let (new_pos, value) = self.parser.parse(input, pos)?;
        (self.f)(value)
            .map(|mapped| (new_pos, mapped))
            .map_err(|message| ParseError::OutOfRange {
                message,
                position: pos,
                context: None,
            })
    }
}

#[derive(Clone)]
pub struct AsUnit<P, O> {
    parser: P,
    _phantom: PhantomData<O>,
}

impl<P, O> AsUnit<P, O> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            _phantom: PhantomData,
        }
    }
}

impl<I, P, O> Parser<I, ()> for AsUnit<P, O>
where
    P: Parser<I, O>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParserResult<()> {
        self.parser.parse(input, pos).map(|(pos, _)| (pos, ()))
    }
}

#[derive(Clone)]
pub struct Optional<P, I, O> {
    parser: P,
    _phantom: PhantomData<(I, O)>,
}

impl<P, I, O> Optional<P, I, O> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            _phantom: PhantomData,
        }
    }
}

impl<I, O, P> Parser<I, Option<O>> for Optional<P, I, O>
where
    P: Parser<I, O>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParserResult<Option<O>> {
        match self.parser.parse(input, pos) {
            Ok((new_pos, value)) => Ok((new_pos, Some(value))),
            Err(e) => {
                tracing::trace!(
                    target: "parser::optional",
                    error = %e,
                    position = pos,
                    "Optional parser suppressed an error"
                );
                Ok((pos, None))
            }
        }
    }
}

#[derive(Clone)]
pub struct Tuple2<P1, P2, I, O1, O2> {
    parser1: P1,
    parser2: P2,
    _phantom: PhantomData<(I, O1, O2)>,
}

impl<P1, P2, I, O1, O2> Tuple2<P1, P2, I, O1, O2> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        Self {
            parser1,
            parser2,
            _phantom: PhantomData,
        }
    }
}

impl<P1, P2, I, O1, O2> Parser<I, (O1, O2)> for Tuple2<P1, P2, I, O1, O2>
where
    P1: Parser<I, O1>,
    P2: Parser<I, O2>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParserResult<(O1, O2)> {
        let (pos, result1) = self.parser1.parse(input, pos)?;
        let (pos, result2) = self.parser2.parse(input, pos)?;
        Ok((pos, (result1, result2)))
    }
}

#[derive(Clone)]
pub struct Tuple3<P1, P2, P3, I, O1, O2, O3> {
    parser1: P1,
    parser2: P2,
    parser3: P3,
    _phantom: PhantomData<(I, O1, O2, O3)>,
}

impl<P1, P2, P3, I, O1, O2, O3> Tuple3<P1, P2, P3, I, O1, O2, O3> {
    pub fn new(parser1: P1, parser2: P2, parser3: P3) -> Self {
        Self {
            parser1,
            parser2,
            parser3,
            _phantom: PhantomData,
        }
    }
}

impl<P1, P2, P3, I, O1, O2, O3> Parser<I, (O1, O2, O3)> for Tuple3<P1, P2, P3, I, O1, O2, O3>
where
    P1: Parser<I, O1>,
    P2: Parser<I, O2>,
    P3: Parser<I, O3>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParserResult<(O1, O2, O3)> {
        let (pos, result1) = self.parser1.parse(input, pos)?;
        let (pos, result2) = self.parser2.parse(input, pos)?;
        let (pos, result3) = self.parser3.parse(input, pos)?;
        Ok((pos, (result1, result2, result3)))
    }
}

/// WithContext: Names the field an inner failure belongs to
#[derive(Clone)]
pub struct WithContext<P> {
    parser: P,
    context: &'static str,
}

impl<P> WithContext<P> {
    pub fn new(parser: P, context: &'static str) -> Self {
        Self { parser, context }
    }
}

impl<I, O, P> Parser<I, O> for WithContext<P>
where
    P: Parser<I, O>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParserResult<O> {
        self.parser
            .parse(input, pos)
            .map_err(|e| e.with_context(self.context))
    }
}
