//! # Line Driver
//!
//! Recursive descent over [`SourceLine`]s:
//!
//! ```text
//! Document    → orphan lines, CourseBlock*
//! CourseBlock → CourseHeader SessionLine*
//! ```
//!
//! Every line is matched against exactly one production. A mismatch records
//! one [`Diagnostic`] and the driver resumes at the next line, so every
//! non-blank line ends up as a course, a session, or a diagnostic.

use super::core::{ParseError, Parser};
use super::parsers::{SessionFields, parse_course_header, parse_session_line};
use crate::model::{
    Course, DayWindow, Diagnostic, ParseResult, Position, Session, Severity,
};
use crate::preprocessor::SourceLine;
use crate::tokenizer::token::TokenSpan;
use crate::trace::{Rule, RuleOutcome, RuleTrace, TraceObserver};

/// Analyzes pre-grouped lines into a fresh [`ParseResult`]. Never fails;
/// every problem ends up in `diagnostics`.
#[tracing::instrument(level = "debug", skip(lines, observer), fields(lines = lines.len()))]
pub fn analyze(
    lines: &[SourceLine],
    window: DayWindow,
    observer: &mut dyn TraceObserver,
) -> ParseResult {
    let result = Analyzer::new(window, observer).parse_document(lines);
    tracing::debug!(
        sessions = result.sessions.len(),
        courses = result.courses.len(),
        errors = result.error_count(),
        "analyzed document"
    );
    result
}

/// Course the session lines of a block are attached to.
#[derive(Debug, Clone, PartialEq)]
enum Owner {
    Course(String),
    /// Lines before the first header.
    None,
    /// The block header on this line did not parse.
    InvalidHeader(usize),
}

struct Analyzer<'a> {
    window: DayWindow,
    observer: &'a mut dyn TraceObserver,
    result: ParseResult,
}

impl<'a> Analyzer<'a> {
    fn new(window: DayWindow, observer: &'a mut dyn TraceObserver) -> Self {
        Self {
            window,
            observer,
            result: ParseResult::default(),
        }
    }

    fn parse_document(mut self, lines: &[SourceLine]) -> ParseResult {
        let first_header = lines
            .iter()
            .position(SourceLine::is_header)
            .unwrap_or(lines.len());
        let (orphans, mut rest) = lines.split_at(first_header);
        self.parse_block_body(orphans, &Owner::None);

        while let Some((header, tail)) = rest.split_first() {
            let body_len = tail
                .iter()
                .position(SourceLine::is_header)
                .unwrap_or(tail.len());
            let (body, next) = tail.split_at(body_len);
            self.parse_course_block(header, body);
            rest = next;
        }

        self.result
    }

    fn parse_course_block(&mut self, header: &SourceLine, body: &[SourceLine]) {
        let owner = self.parse_course_header(header);
        self.parse_block_body(body, &owner);
    }

    fn parse_block_body(&mut self, lines: &[SourceLine], owner: &Owner) {
        for line in lines {
            self.parse_session_line(line, owner);
        }
    }

    fn parse_course_header(&mut self, line: &SourceLine) -> Owner {
        match self.run(line, &parse_course_header()) {
            Ok((name, section)) => {
                self.trace(Rule::CourseHeader, line, RuleOutcome::Matched);
                self.result.courses.push(Course {
                    name: name.clone(),
                    section,
                    line: line.number,
                });
                Owner::Course(name)
            }
            Err(error) => {
                self.trace(Rule::CourseHeader, line, RuleOutcome::Failed);
                self.report(line, error);
                Owner::InvalidHeader(line.number)
            }
        }
    }

    fn parse_session_line(&mut self, line: &SourceLine, owner: &Owner) {
        let fields = self
            .run(line, &parse_session_line(self.window))
            .and_then(|fields| match owner {
                Owner::Course(course) => Ok((course.clone(), fields)),
                Owner::None => Err(ParseError::Failure {
                    message: "session line outside of a course block".to_string(),
                    position: 0,
                }),
                Owner::InvalidHeader(header) => Err(ParseError::Failure {
                    message: format!(
                        "session line belongs to the malformed course header on line {}",
                        header
                    ),
                    position: 0,
                }),
            });

        match fields {
            Ok((course, fields)) => {
                self.trace(Rule::SessionLine, line, RuleOutcome::Matched);
                self.result.sessions.push(build_session(course, fields, line));
            }
            Err(error) => {
                self.trace(Rule::SessionLine, line, RuleOutcome::Failed);
                self.report(line, error);
            }
        }
    }

    /// Runs a line parser over the whole line. Unknown text is rejected
    /// before the grammar is tried.
    fn run<O>(&self, line: &SourceLine, parser: &impl Parser<TokenSpan, O>) -> Result<O, ParseError> {
        if let Some((position, span)) = line
            .tokens
            .iter()
            .enumerate()
            .find(|(_, span)| span.token.is_unknown())
        {
            return Err(ParseError::Lexical {
                lexeme: span.lexeme.clone(),
                position,
            });
        }
        parser.parse(&line.tokens, 0).map(|(_, value)| value)
    }

    fn trace(&mut self, rule: Rule, line: &SourceLine, outcome: RuleOutcome) {
        self.observer.on_rule(&RuleTrace {
            rule,
            line: line.number,
            outcome,
        });
    }

    fn report(&mut self, line: &SourceLine, error: ParseError) {
        let column = line
            .tokens
            .get(error.get_position())
            .map_or_else(|| line.end_column(), |span| span.column);
        let diagnostic = Diagnostic {
            severity: Severity::Error,
            kind: error.kind(),
            position: Position {
                line: line.number,
                column,
            },
            message: error.to_string(),
            source_line: line.text.clone(),
        };
        tracing::debug!(%diagnostic, "recorded diagnostic");
        self.result.diagnostics.push(diagnostic);
    }
}

fn build_session(course: String, fields: SessionFields, line: &SourceLine) -> Session {
    Session {
        course,
        index: fields.index,
        kind: fields.kind,
        capacity: fields.capacity,
        day: fields.day,
        start: fields.start,
        end: fields.end,
        room: fields.room,
        week: fields.week,
        line: line.number,
        raw: line.text.clone(),
    }
}
