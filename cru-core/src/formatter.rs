//! Writes a [`ParseResult`] back out as canonical `.cru` text.

use std::fmt::Write;

use crate::model::{Course, ParseResult, Session};

#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Blank line between course blocks.
    pub block_spacing: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            block_spacing: true,
        }
    }
}

enum Entry<'a> {
    Header(&'a Course),
    Session(&'a Session),
}

#[derive(Debug, Clone, Default)]
pub struct Formatter {
    config: FormatterConfig,
}

impl Formatter {
    pub fn new(config: FormatterConfig) -> Self {
        Self { config }
    }

    /// Headers and sessions are interleaved by their source line, so every
    /// session lands in the block of the header it was parsed under.
    pub fn format(&self, result: &ParseResult) -> String {
        let mut entries: Vec<(usize, Entry)> = result
            .courses
            .iter()
            .map(|course| (course.line, Entry::Header(course)))
            .chain(
                result
                    .sessions
                    .iter()
                    .map(|session| (session.line, Entry::Session(session))),
            )
            .collect();
        entries.sort_by_key(|(line, entry)| (*line, matches!(entry, Entry::Session(_))));

        let mut output = String::new();
        for (position, (_, entry)) in entries.iter().enumerate() {
            match entry {
                Entry::Header(course) => {
                    if self.config.block_spacing && position > 0 {
                        output.push('\n');
                    }
                    let _ = writeln!(output, "{}", course);
                }
                Entry::Session(session) => {
                    let _ = writeln!(output, "{}", session);
                }
            }
        }
        output
    }
}
