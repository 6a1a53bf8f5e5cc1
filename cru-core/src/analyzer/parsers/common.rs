use strum::IntoEnumIterator;

use super::super::{core::*, prelude::*};
use crate::model::{Day, DayWindow, TimeOfDay, WeekMarker};
use crate::tokenizer::{
    symbol::Delimiter,
    token::{Token, TokenSpan},
};

// Delimiters
pub fn parse_delimiter(delimiter: Delimiter) -> impl Parser<TokenSpan, ()> {
    as_unit(satisfy(format!("'{}'", delimiter), move |span: &TokenSpan| {
        match span.token {
            Token::Delimiter(found) if found == delimiter => Some(found),
            _ => None,
        }
    }))
}

pub fn parse_comma() -> impl Parser<TokenSpan, ()> {
    with_context(parse_delimiter(Delimiter::Comma), "field separator")
}

pub fn parse_slash() -> impl Parser<TokenSpan, ()> {
    parse_delimiter(Delimiter::Slash)
}

pub fn parse_dash() -> impl Parser<TokenSpan, ()> {
    parse_delimiter(Delimiter::Dash)
}

pub fn parse_plus() -> impl Parser<TokenSpan, ()> {
    parse_delimiter(Delimiter::Plus)
}

/// A free-form code (index, session type, room, course name). Any word
/// token is accepted and its source text is kept verbatim, so `007` stays
/// `007`.
pub fn parse_code(expected: &'static str) -> impl Parser<TokenSpan, String> {
    satisfy(expected, |span: &TokenSpan| match span.token {
        Token::Identifier(_) | Token::DayCode(_) | Token::Number(_) | Token::LargeNumber(_) => {
            Some(span.lexeme.clone())
        }
        _ => None,
    })
}

fn day_codes() -> String {
    Day::iter()
        .map(|day| day.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A word that is not a day code is a value outside the day domain; any
/// other token is a shape mismatch.
pub fn parse_day() -> impl Parser<TokenSpan, Day> {
    map_res(
        satisfy("day code", |span: &TokenSpan| match &span.token {
            Token::DayCode(day) => Some(Ok(*day)),
            Token::Identifier(word) => Some(Err(word.clone())),
            _ => None,
        }),
        |day: Result<Day, String>| {
            day.map_err(|word| {
                format!(
                    "unknown day code '{}', expected one of {}",
                    word,
                    day_codes()
                )
            })
        },
    )
}

// An integer token; digits past `u32::MAX` come back as `Err(lexeme)`.
fn integer(span: &TokenSpan) -> Option<Result<u32, String>> {
    match &span.token {
        Token::Number(value) => Some(Ok(*value)),
        Token::LargeNumber(digits) => Some(Err(digits.clone())),
        _ => None,
    }
}

// `H:MM`, or a bare hour.
fn parse_clock() -> impl Parser<TokenSpan, Result<(u32, u32), String>> {
    let alternatives: Vec<Box<dyn Parser<TokenSpan, Result<(u32, u32), String>>>> = vec![
        Box::new(satisfy("time", |span: &TokenSpan| match &span.token {
            Token::Time(time) => Some(Ok((u32::from(time.hour), u32::from(time.minute)))),
            _ => None,
        })),
        Box::new(satisfy("time", |span: &TokenSpan| {
            integer(span).map(|hour| hour.map(|hour| (hour, 0)))
        })),
    ];
    choice(alternatives)
}

pub fn parse_time(window: DayWindow) -> impl Parser<TokenSpan, TimeOfDay> {
    map_res(parse_clock(), move |clock: Result<(u32, u32), String>| {
        let (hour, minute) = clock.map_err(|hour| format!("hour {} does not exist", hour))?;
        let time = TimeOfDay::new(hour, minute).map_err(|e| e.to_string())?;
        if window.contains(time) {
            Ok(time)
        } else {
            Err(format!(
                "time {} is outside the campus day {}",
                time, window
            ))
        }
    })
}

pub fn parse_time_range(window: DayWindow) -> impl Parser<TokenSpan, (TimeOfDay, TimeOfDay)> {
    map_res(
        tuple3(
            with_context(parse_time(window), "start time"),
            parse_dash(),
            with_context(parse_time(window), "end time"),
        ),
        |(start, (), end): (TimeOfDay, (), TimeOfDay)| {
            if start < end {
                Ok((start, end))
            } else {
                Err(format!(
                    "end time {} is not after start time {}",
                    end, start
                ))
            }
        },
    )
}

pub fn parse_capacity() -> impl Parser<TokenSpan, u32> {
    map_res(satisfy("number", integer), |capacity: Result<u32, String>| {
        capacity.map_err(|digits| format!("capacity {} is too large", digits))
    })
}

pub fn parse_room_capacity() -> impl Parser<TokenSpan, (String, u32)> {
    with_context(
        map(
            tuple3(
                with_context(parse_code("room code"), "room"),
                parse_slash(),
                with_context(parse_capacity(), "capacity"),
            ),
            |(room, (), capacity)| (room, capacity),
        ),
        "room and capacity",
    )
}

pub fn parse_week() -> impl Parser<TokenSpan, WeekMarker> {
    map_res(satisfy("week digit", integer), |week: Result<u32, String>| {
        let out_of_range = |week: &dyn std::fmt::Display| {
            format!("week {} is not in 0..={}", week, WeekMarker::MAX)
        };
        match week {
            Ok(value) => WeekMarker::new(value).ok_or_else(|| out_of_range(&value)),
            Err(digits) => Err(out_of_range(&digits)),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::token::Tokenizer;

    fn spans(line: &str) -> Vec<TokenSpan> {
        Tokenizer::new()
            .tokenize(line)
            .into_iter()
            .filter(|span| !span.token.is_eof())
            .collect()
    }

    fn time(hour: u32, minute: u32) -> TimeOfDay {
        TimeOfDay::new(hour, minute).unwrap()
    }

    #[test]
    fn test_parse_code_keeps_lexeme() {
        let input = spans("007");
        assert_eq!(parse_code("room code").parse(&input, 0), Ok((1, "007".to_string())));

        let input = spans(",");
        let err = parse_code("room code").parse(&input, 0).unwrap_err();
        assert_eq!(err.to_string(), "expected room code, found ','");
    }

    #[test]
    fn test_parse_day() {
        assert_eq!(parse_day().parse(&spans("ME"), 0), Ok((1, Day::Wednesday)));

        let err = parse_day().parse(&spans("ZZ"), 0).unwrap_err();
        assert!(matches!(err, ParseError::OutOfRange { position: 0, .. }));
        assert_eq!(
            err.to_string(),
            "unknown day code 'ZZ', expected one of L, MA, ME, J, V"
        );

        let err = parse_day().parse(&spans("8:00"), 0).unwrap_err();
        assert!(matches!(err, ParseError::Unexpected { .. }));
    }

    #[test]
    fn test_parse_time_window() {
        let window = DayWindow::default();
        assert_eq!(parse_time(window).parse(&spans("20:00"), 0), Ok((1, time(20, 0))));
        assert_eq!(parse_time(window).parse(&spans("9"), 0), Ok((1, time(9, 0))));

        let err = parse_time(window).parse(&spans("20:01"), 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "time 20:01 is outside the campus day 8:00-20:00"
        );

        let err = parse_time(window).parse(&spans("25:00"), 0).unwrap_err();
        assert!(matches!(err, ParseError::OutOfRange { .. }));
    }

    #[test]
    fn test_parse_time_range() {
        let window = DayWindow::default();
        let input = spans("8:00-10:30");
        assert_eq!(
            parse_time_range(window).parse(&input, 0),
            Ok((3, (time(8, 0), time(10, 30))))
        );

        let err = parse_time_range(window)
            .parse(&spans("10:00-10:00"), 0)
            .unwrap_err();
        assert!(matches!(err, ParseError::OutOfRange { position: 0, .. }));

        let err = parse_time_range(window)
            .parse(&spans("10:00,12:00"), 0)
            .unwrap_err();
        assert!(matches!(err, ParseError::Unexpected { position: 1, .. }));

        let err = parse_time_range(window)
            .parse(&spans("10:00-21:00"), 0)
            .unwrap_err();
        assert_eq!(err.get_position(), 2);
    }

    #[test]
    fn test_parse_room_capacity() {
        let input = spans("A101/30");
        assert_eq!(
            parse_room_capacity().parse(&input, 0),
            Ok((3, ("A101".to_string(), 30)))
        );

        let err = parse_room_capacity().parse(&spans("A101/x"), 0).unwrap_err();
        assert_eq!(err.to_string(), "expected number for capacity, found 'x'");

        let err = parse_room_capacity().parse(&spans("A101,30"), 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected '/' for room and capacity, found ','"
        );
    }

    #[test]
    fn test_parse_week() {
        assert_eq!(
            parse_week().parse(&spans("9"), 0).map(|(_, w)| w.value()),
            Ok(9)
        );
        let err = parse_week().parse(&spans("10"), 0).unwrap_err();
        assert_eq!(err.to_string(), "week 10 is not in 0..=9");

        let err = parse_week().parse(&spans("99999999999"), 0).unwrap_err();
        assert!(matches!(err, ParseError::OutOfRange { position: 0, .. }));
        assert_eq!(err.to_string(), "week 99999999999 is not in 0..=9");
    }

    #[test]
    fn test_large_numbers_are_out_of_range() {
        let err = parse_capacity().parse(&spans("4294967296"), 0).unwrap_err();
        assert!(matches!(err, ParseError::OutOfRange { position: 0, .. }));
        assert_eq!(err.to_string(), "capacity 4294967296 is too large");

        let err = parse_time(DayWindow::default())
            .parse(&spans("99999999999"), 0)
            .unwrap_err();
        assert!(matches!(err, ParseError::OutOfRange { .. }));

        let input = spans("12345678901");
        assert_eq!(
            parse_code("index").parse(&input, 0),
            Ok((1, "12345678901".to_string()))
        );
    }
}
