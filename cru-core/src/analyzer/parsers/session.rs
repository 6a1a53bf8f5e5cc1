use super::super::{core::*, prelude::*};
use super::common::*;
use crate::model::{Day, DayWindow, TimeOfDay, WeekMarker};
use crate::tokenizer::token::TokenSpan;

/// Fields of one session line, before it is attached to a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFields {
    pub index: String,
    pub kind: String,
    pub day: Day,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub room: String,
    pub capacity: u32,
    pub week: WeekMarker,
}

/// `index,type,day,start-end,room/capacity,week`
pub fn parse_session_line(window: DayWindow) -> impl Parser<TokenSpan, SessionFields> {
    with_context(
        map(
            tuple3(
                tuple3(
                    with_context(parse_code("index"), "index"),
                    preceded(
                        parse_comma(),
                        with_context(parse_code("session type"), "type"),
                    ),
                    preceded(parse_comma(), with_context(parse_day(), "day")),
                ),
                tuple2(
                    preceded(
                        parse_comma(),
                        with_context(parse_time_range(window), "time range"),
                    ),
                    preceded(parse_comma(), parse_room_capacity()),
                ),
                tuple2(
                    preceded(parse_comma(), with_context(parse_week(), "week")),
                    end_of_input(),
                ),
            ),
            |((index, kind, day), ((start, end), (room, capacity)), (week, ()))| SessionFields {
                index,
                kind,
                day,
                start,
                end,
                room,
                capacity,
                week,
            },
        ),
        "session line",
    )
}
