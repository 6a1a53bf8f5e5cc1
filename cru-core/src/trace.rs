//! # Trace Observers
//!
//! Verbose tracing of the tokenizer ("show tokenize") and of the grammar
//! decisions ("show symbols") goes through an injected [`TraceObserver`].
//! Observers only watch: whatever they do, the parse result is the same.

use std::fmt;

use serde::Serialize;

use crate::tokenizer::token::TokenSpan;

/// Grammar productions that make one decision per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rule {
    CourseHeader,
    SessionLine,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::CourseHeader => write!(f, "course-header"),
            Rule::SessionLine => write!(f, "session-line"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RuleOutcome {
    Matched,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleTrace {
    pub rule: Rule,
    pub line: usize,
    pub outcome: RuleOutcome,
}

pub trait TraceObserver {
    fn on_token(&mut self, _token: &TokenSpan) {}

    fn on_rule(&mut self, _trace: &RuleTrace) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl TraceObserver for NoopObserver {}

/// Forwards trace points to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl TraceObserver for TracingObserver {
    fn on_token(&mut self, token: &TokenSpan) {
        tracing::debug!(
            target: "cru::tokenize",
            line = token.line,
            column = token.column,
            kind = token.token.kind_name(),
            lexeme = %token.lexeme,
            "token"
        );
    }

    fn on_rule(&mut self, trace: &RuleTrace) {
        tracing::debug!(
            target: "cru::symbols",
            rule = %trace.rule,
            line = trace.line,
            outcome = ?trace.outcome,
            "rule"
        );
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    Token(TokenSpan),
    Rule(RuleTrace),
}

/// Keeps every trace point in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub events: Vec<TraceEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &TokenSpan> {
        self.events.iter().filter_map(|event| match event {
            TraceEvent::Token(token) => Some(token),
            TraceEvent::Rule(_) => None,
        })
    }

    pub fn rules(&self) -> impl Iterator<Item = &RuleTrace> {
        self.events.iter().filter_map(|event| match event {
            TraceEvent::Rule(rule) => Some(rule),
            TraceEvent::Token(_) => None,
        })
    }
}

impl TraceObserver for RecordingObserver {
    fn on_token(&mut self, token: &TokenSpan) {
        self.events.push(TraceEvent::Token(token.clone()));
    }

    fn on_rule(&mut self, trace: &RuleTrace) {
        self.events.push(TraceEvent::Rule(trace.clone()));
    }
}

/// Forwards only the channels that are switched on.
pub(crate) struct Gated<'a> {
    pub inner: &'a mut dyn TraceObserver,
    pub tokens: bool,
    pub rules: bool,
}

impl TraceObserver for Gated<'_> {
    fn on_token(&mut self, token: &TokenSpan) {
        if self.tokens {
            self.inner.on_token(token);
        }
    }

    fn on_rule(&mut self, trace: &RuleTrace) {
        if self.rules {
            self.inner.on_rule(trace);
        }
    }
}
