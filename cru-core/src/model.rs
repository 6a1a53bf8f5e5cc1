//! # Result Model
//!
//! Typed records produced by the analyzer. Everything here is plain data:
//! a [`ParseResult`] is created fresh for every parse call and handed to the
//! caller, who owns it from then on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use thiserror::Error;

/// Teaching day. The format only knows the five weekdays, written with their
/// French initials.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumString,
    Display,
    AsRefStr,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum Day {
    #[strum(serialize = "L")]
    #[serde(rename = "L")]
    Monday,
    #[strum(serialize = "MA")]
    #[serde(rename = "MA")]
    Tuesday,
    #[strum(serialize = "ME")]
    #[serde(rename = "ME")]
    Wednesday,
    #[strum(serialize = "J")]
    #[serde(rename = "J")]
    Thursday,
    #[strum(serialize = "V")]
    #[serde(rename = "V")]
    Friday,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("malformed time '{0}', expected H or H:MM")]
    Malformed(String),
    #[error("time {hour}:{minute:02} does not exist")]
    OutOfDay { hour: u32, minute: u32 },
}

/// Hour and minute of a day, ordered chronologically.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, SerializeDisplay, DeserializeFromStr,
)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Result<Self, TimeError> {
        if hour > 23 || minute > 59 {
            return Err(TimeError::OutOfDay { hour, minute });
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TimeError::Malformed(s.to_string());
        let (hour, minute) = match s.split_once(':') {
            Some((hour, minute)) if minute.len() == 2 => (hour, minute),
            Some(_) => return Err(malformed()),
            None => (s, "00"),
        };
        let hour = hour.parse::<u32>().map_err(|_| malformed())?;
        let minute = minute.parse::<u32>().map_err(|_| malformed())?;
        Self::new(hour, minute)
    }
}

/// Inclusive window of the campus day; sessions must start and end inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    #[serde(default = "default_opens")]
    pub opens: TimeOfDay,
    #[serde(default = "default_closes")]
    pub closes: TimeOfDay,
}

fn default_opens() -> TimeOfDay {
    TimeOfDay { hour: 8, minute: 0 }
}

fn default_closes() -> TimeOfDay {
    TimeOfDay {
        hour: 20,
        minute: 0,
    }
}

impl Default for DayWindow {
    fn default() -> Self {
        Self {
            opens: default_opens(),
            closes: default_closes(),
        }
    }
}

impl DayWindow {
    pub fn contains(&self, time: TimeOfDay) -> bool {
        self.opens <= time && time <= self.closes
    }
}

impl fmt::Display for DayWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.opens, self.closes)
    }
}

/// Which week of the rotation a session occurs in, `0..=9`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct WeekMarker(u8);

impl WeekMarker {
    pub const MAX: u8 = 9;

    pub fn new(value: u32) -> Option<Self> {
        (value <= u32::from(Self::MAX)).then_some(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for WeekMarker {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(u32::from(value)).ok_or_else(|| format!("week marker {} is not in 0..=9", value))
    }
}

impl From<WeekMarker> for u8 {
    fn from(week: WeekMarker) -> Self {
        week.0
    }
}

impl fmt::Display for WeekMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Course introduced by a header line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub section: Option<String>,
    /// 1-based source line of the header.
    pub line: usize,
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.section {
            Some(section) => write!(f, "+{} {}", self.name, section),
            None => write!(f, "+{}", self.name),
        }
    }
}

/// One scheduled occurrence of a course. A session always ends after it
/// starts, deserialization included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SessionRecord")]
pub struct Session {
    /// Name of the owning course.
    pub course: String,
    pub index: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub capacity: u32,
    pub day: Day,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub room: String,
    pub week: WeekMarker,
    /// 1-based source line.
    pub line: usize,
    /// Source line, verbatim.
    pub raw: String,
}

impl Session {
    pub fn time_range(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }
}

#[derive(Deserialize)]
struct SessionRecord {
    course: String,
    index: String,
    #[serde(rename = "type")]
    kind: String,
    capacity: u32,
    day: Day,
    start: TimeOfDay,
    end: TimeOfDay,
    room: String,
    week: WeekMarker,
    line: usize,
    raw: String,
}

impl TryFrom<SessionRecord> for Session {
    type Error = String;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        if record.start >= record.end {
            return Err(format!(
                "session ends at {}, not after its start {}",
                record.end, record.start
            ));
        }
        Ok(Self {
            course: record.course,
            index: record.index,
            kind: record.kind,
            capacity: record.capacity,
            day: record.day,
            start: record.start,
            end: record.end,
            room: record.room,
            week: record.week,
            line: record.line,
            raw: record.raw,
        })
    }
}

/// Canonical source form of the session line.
impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}-{},{}/{},{}",
            self.index,
            self.kind,
            self.day,
            self.start,
            self.end,
            self.room,
            self.capacity,
            self.week
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Severity {
    #[strum(serialize = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum DiagnosticKind {
    /// Text that fits no lexical class.
    LexicalAnomaly,
    /// The tokens of a line do not have the shape of its production.
    GrammarMismatch,
    /// A well formed field outside its domain.
    RangeViolation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A recorded, non-fatal parse error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub position: Position,
    pub message: String,
    pub source_line: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {} ({}): {}",
            self.severity, self.position, self.kind, self.message
        )
    }
}

/// Everything one parse call produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub sessions: Vec<Session>,
    pub courses: Vec<Course>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseResult {
    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn course(&self, name: &str) -> Option<&Course> {
        self.courses.iter().find(|course| course.name == name)
    }

    pub fn sessions_for<'a>(&'a self, course: &'a str) -> impl Iterator<Item = &'a Session> + 'a {
        self.sessions
            .iter()
            .filter(move |session| session.course == course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn test_day_codes() {
        let codes: Vec<String> = Day::iter().map(|day| day.to_string()).collect();
        assert_eq!(codes, vec!["L", "MA", "ME", "J", "V"]);
        assert_eq!("ME".parse::<Day>().unwrap(), Day::Wednesday);
        assert!("ZZ".parse::<Day>().is_err());
        assert!("S".parse::<Day>().is_err());
    }

    #[test]
    fn test_time_of_day() {
        assert_eq!("8:00".parse::<TimeOfDay>().unwrap(), TimeOfDay::new(8, 0).unwrap());
        assert_eq!("14".parse::<TimeOfDay>().unwrap(), TimeOfDay::new(14, 0).unwrap());
        assert_eq!(TimeOfDay::new(9, 5).unwrap().to_string(), "9:05");
        assert!(matches!(
            "24:00".parse::<TimeOfDay>(),
            Err(TimeError::OutOfDay { hour: 24, .. })
        ));
        assert!(matches!(
            "8:0".parse::<TimeOfDay>(),
            Err(TimeError::Malformed(_))
        ));
        assert!(TimeOfDay::new(8, 0).unwrap() < TimeOfDay::new(8, 30).unwrap());
    }

    #[test]
    fn test_day_window_bounds() {
        let window = DayWindow::default();
        assert!(window.contains(TimeOfDay::new(8, 0).unwrap()));
        assert!(window.contains(TimeOfDay::new(20, 0).unwrap()));
        assert!(!window.contains(TimeOfDay::new(20, 1).unwrap()));
        assert!(!window.contains(TimeOfDay::new(7, 59).unwrap()));
    }

    #[test]
    fn test_week_marker() {
        assert_eq!(WeekMarker::new(9).map(|w| w.value()), Some(9));
        assert_eq!(WeekMarker::new(10), None);
        assert!(serde_json::from_str::<WeekMarker>("12").is_err());
        assert_eq!(serde_json::from_str::<WeekMarker>("3").unwrap().value(), 3);
    }

    #[test]
    fn test_session_display_and_json() {
        let session = Session {
            course: "Algorithms101".to_string(),
            index: "idx1".to_string(),
            kind: "CM".to_string(),
            capacity: 30,
            day: Day::Monday,
            start: TimeOfDay::new(8, 0).unwrap(),
            end: TimeOfDay::new(10, 0).unwrap(),
            room: "A101".to_string(),
            week: WeekMarker::new(0).unwrap(),
            line: 2,
            raw: "idx1,CM,L,8:00-10:00,A101/30,0".to_string(),
        };
        assert_eq!(session.to_string(), session.raw);
        assert_eq!(session.time_range(), "8:00-10:00");

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["day"], "L");
        assert_eq!(json["start"], "8:00");
        assert_eq!(json["type"], "CM");
        assert_eq!(json["week"], 0);

        let back: Session = serde_json::from_value(json).unwrap();
        assert_eq!(back, session);
    }

    #[test]
    fn test_session_json_rejects_inverted_range() {
        let json = serde_json::json!({
            "course": "AP03",
            "index": "1",
            "type": "D1",
            "capacity": 24,
            "day": "MA",
            "start": "12:00",
            "end": "10:00",
            "room": "P202",
            "week": 1,
            "line": 2,
            "raw": "1,D1,MA,12:00-10:00,P202/24,1",
        });
        let err = serde_json::from_value::<Session>(json).unwrap_err();
        assert!(err.to_string().contains("not after its start 12:00"));
    }
}
