//! Shapes printed by the `cru` commands.

use cru_core::{Diagnostic, Session};
use serde::Serialize;

/// Session fields shown by `search`.
#[derive(Debug, Serialize)]
pub struct SessionView<'a> {
    pub course: &'a str,
    pub index: &'a str,
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub capacity: u32,
    pub time: String,
    pub day: String,
    pub week: u8,
    pub room: &'a str,
}

impl<'a> From<&'a Session> for SessionView<'a> {
    fn from(session: &'a Session) -> Self {
        Self {
            course: &session.course,
            index: &session.index,
            kind: &session.kind,
            capacity: session.capacity,
            time: session.time_range(),
            day: session.day.to_string(),
            week: session.week.value(),
            room: &session.room,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RoomsView<'a> {
    pub course: &'a str,
    pub rooms: Vec<String>,
}

pub fn output_json<T: Serialize>(data: &T, pretty: bool) -> Result<(), serde_json::Error> {
    let output = if pretty {
        serde_json::to_string_pretty(data)
    } else {
        serde_json::to_string(data)
    }?;

    println!("{}", output);
    Ok(())
}

/// `file:line:column: error: message` followed by the offending line.
pub fn render_diagnostic(file: &str, diagnostic: &Diagnostic) -> String {
    format!(
        "{}:{}: {}: {}\n    {}",
        file, diagnostic.position, diagnostic.severity, diagnostic.message, diagnostic.source_line
    )
}
