//! Typed filters over parsed sessions, used by the `search` and `rooms`
//! commands.

use crate::model::{Day, Session};

/// Case-insensitive search of `needle` in every field of a session and in
/// its raw line.
pub fn search<'a>(sessions: &'a [Session], needle: &str) -> Vec<&'a Session> {
    sessions
        .iter()
        .filter(|session| matches_needle(session, needle))
        .collect()
}

/// The predicate behind [`search`], for callers combining it with others.
pub fn matches_needle(session: &Session, needle: &str) -> bool {
    haystack(session)
        .to_lowercase()
        .contains(&needle.to_lowercase())
}

fn haystack(session: &Session) -> String {
    [
        session.course.clone(),
        session.raw.clone(),
        session.index.clone(),
        session.kind.clone(),
        session.capacity.to_string(),
        session.time_range(),
        session.day.to_string(),
        session.week.to_string(),
        session.room.clone(),
    ]
    .join(" ")
}

pub fn by_day(sessions: &[Session], day: Day) -> Vec<&Session> {
    sessions.iter().filter(|session| session.day == day).collect()
}

/// Distinct rooms of a course, in order of first appearance.
pub fn rooms_for_course(sessions: &[Session], course: &str) -> Vec<String> {
    let mut rooms: Vec<String> = Vec::new();
    for session in sessions.iter().filter(|session| session.course == course) {
        if !rooms.contains(&session.room) {
            rooms.push(session.room.clone());
        }
    }
    rooms
}
