//! Date input parsing.
//!
//! Inputs arrive as formatted strings, structured chrono values or lazy
//! producers. Every path ends in a [`CalendarDate`] pinned to a day boundary.

use std::fmt;
use std::sync::Arc;

use chrono::format::{Parsed, StrftimeItems, parse_and_remainder};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_FORMAT, ISO_FORMAT, ISO_TIME_SEPARATOR, LITERAL_CLOSE, LITERAL_OPEN, TWO_DIGIT_YEAR_PIVOT,
};
use crate::prelude::*;
use crate::{Boundary, CalendarDate, DateRange, PickerError};

/// A moment-style date pattern such as `DD/MM/YYYY`.
///
/// The pattern is compiled once into a chrono strftime string. Supported
/// tokens are `YYYY YY MMMM MMM MM M DD D dddd ddd HH H hh h mm m ss s SSS A a`;
/// text inside `[...]` and any other character is matched literally.
///
/// Only the calendar day is kept. Time tokens must match the input but may
/// appear in any combination (`HH` alone, `hh A`). Two-digit years above 68
/// fall in the 1900s, the rest in the 2000s. A pattern without a day token
/// (`MMMM YYYY`) resolves to the first of the month.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{pattern}")]
#[serde(from = "String", into = "String")]
pub struct DateFormat {
    pattern:  String,
    strftime: String,
    has_time: bool,
}

impl DateFormat {
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let (strftime, has_time) = compile(&pattern);
        Self {
            pattern,
            strftime,
            has_time,
        }
    }

    /// `YYYY-MM-DD`, used for predefined range bounds
    pub fn iso() -> Self {
        Self::new(ISO_FORMAT)
    }

    /// The original moment-style pattern
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The compiled chrono pattern
    pub fn strftime(&self) -> &str {
        &self.strftime
    }

    /// Parses a string to its calendar day.
    ///
    /// Date-only patterns tolerate a trailing time component separated by
    /// `T` or whitespace; it is dropped.
    pub fn parse_day(&self, input: &str) -> Result<NaiveDate, PickerError> {
        let trimmed = input.trim();
        let invalid = || PickerError::invalid_date(input, &self.pattern);
        if trimmed.is_empty() {
            return Err(invalid());
        }

        let mut parsed = Parsed::new();
        let rest = parse_and_remainder(&mut parsed, trimmed, StrftimeItems::new(&self.strftime))
            .map_err(|_| invalid())?;
        let tail_ok = rest.is_empty()
            || (!self.has_time && (rest.starts_with(ISO_TIME_SEPARATOR) || rest.starts_with(char::is_whitespace)));
        if !tail_ok {
            return Err(invalid());
        }

        resolve_day(&mut parsed).ok_or_else(invalid)
    }
}

/// Fills the fields a moment-style pattern may leave out, then builds the day.
fn resolve_day(parsed: &mut Parsed) -> Option<NaiveDate> {
    if parsed.year().is_none() && parsed.year_div_100().is_none() {
        if let Some(yy) = parsed.year_mod_100() {
            let century = if yy > TWO_DIGIT_YEAR_PIVOT { 19 } else { 20 };
            parsed.set_year_div_100(century).ok()?;
        }
    }
    if parsed.day().is_none() && parsed.month().is_some() {
        parsed.set_day(1).ok()?;
    }
    parsed.to_naive_date().ok()
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::new(DEFAULT_FORMAT)
    }
}

impl From<String> for DateFormat {
    fn from(pattern: String) -> Self {
        Self::new(pattern)
    }
}

impl From<&str> for DateFormat {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}

impl From<DateFormat> for String {
    fn from(format: DateFormat) -> Self {
        format.pattern
    }
}

/// Translates a moment-style pattern into chrono's strftime syntax.
/// Returns the compiled pattern and whether it carries time-of-day fields.
fn compile(pattern: &str) -> (String, bool) {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut has_time = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == LITERAL_OPEN {
            let close = chars[i + 1..].iter().position(|&ch| ch == LITERAL_CLOSE);
            if let Some(offset) = close {
                chars[i + 1..i + 1 + offset].iter().for_each(|&ch| push_literal(&mut out, ch));
                i += offset + 2;
                continue;
            }
        }

        let run = chars[i..].iter().take_while(|&&ch| ch == c).count();
        let token = match (c, run) {
            ('Y', 4) => Some(("%Y", false)),
            ('Y', 2) => Some(("%y", false)),
            ('M', 4) => Some(("%B", false)),
            ('M', 3) => Some(("%b", false)),
            ('M', 1 | 2) => Some(("%m", false)),
            ('D', 1 | 2) => Some(("%d", false)),
            ('d', 4) => Some(("%A", false)),
            ('d', 3) => Some(("%a", false)),
            ('H', 1 | 2) => Some(("%H", true)),
            ('h', 1 | 2) => Some(("%I", true)),
            ('m', 1 | 2) => Some(("%M", true)),
            ('s', 1 | 2) => Some(("%S", true)),
            ('S', 3) => Some(("%3f", true)),
            ('A' | 'a', 1) => Some(("%p", true)),
            _ => None,
        };

        match token {
            Some((directive, is_time)) => {
                out.push_str(directive);
                has_time |= is_time;
            },
            None => chars[i..i + run].iter().for_each(|&ch| push_literal(&mut out, ch)),
        }
        i += run;
    }

    (out, has_time)
}

fn push_literal(out: &mut String, ch: char) {
    if ch == '%' {
        out.push_str("%%");
    } else {
        out.push(ch);
    }
}

/// Zero-argument producer for lazily evaluated dates such as "today".
pub type DateProducer = Arc<dyn Fn() -> DateInput + Send + Sync>;

/// Any value the picker accepts where a date is expected.
#[derive(Clone, From)]
pub enum DateInput {
    /// A string formatted per the active `DateFormat`
    Text(String),
    /// An already-normalized instant
    Instant(CalendarDate),
    /// A calendar day
    Day(NaiveDate),
    /// A date-time; its time-of-day is discarded
    DateTime(NaiveDateTime),
    /// Evaluated on every parse
    Lazy(DateProducer),
}

impl DateInput {
    /// Wraps a closure as a lazily evaluated input
    pub fn lazy<F>(producer: F) -> Self
    where
        F: Fn() -> Self + Send + Sync + 'static,
    {
        Self::Lazy(Arc::new(producer))
    }

    /// The local calendar day at the time of parsing
    pub fn today() -> Self {
        Self::lazy(|| Self::Day(Local::now().date_naive()))
    }
}

impl Default for DateInput {
    fn default() -> Self {
        Self::today()
    }
}

impl fmt::Debug for DateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Self::Instant(d) => f.debug_tuple("Instant").field(d).finish(),
            Self::Day(d) => f.debug_tuple("Day").field(d).finish(),
            Self::DateTime(dt) => f.debug_tuple("DateTime").field(dt).finish(),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl<'de> Deserialize<'de> for DateInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::Text)
    }
}

/// Parses `input` under `format` and pins the result to `boundary`.
///
/// Already-normalized `CalendarDate` values pass through unchanged when they
/// sit on the requested boundary. Producers are invoked and their output is
/// parsed in turn.
///
/// # Errors
/// Returns `PickerError::InvalidDate` when a string does not match `format`.
pub fn parse(input: &DateInput, format: &DateFormat, boundary: Boundary) -> Result<CalendarDate, PickerError> {
    match input {
        DateInput::Text(s) => match format.parse_day(s) {
            Ok(day) => Ok(CalendarDate::new(day, boundary)),
            Err(err) => {
                tracing::debug!(input = %s, format = %format, "rejected date input");
                Err(err)
            },
        },
        DateInput::Instant(date) => Ok(date.at(boundary)),
        DateInput::Day(day) => Ok(CalendarDate::new(*day, boundary)),
        DateInput::DateTime(dt) => Ok(CalendarDate::new(dt.date(), boundary)),
        DateInput::Lazy(producer) => parse(&producer(), format, boundary),
    }
}

/// Parses with ISO `YYYY-MM-DD`, the mode used for predefined range bounds.
///
/// # Errors
/// Returns `PickerError::InvalidDate` when a string is not an ISO date.
pub fn parse_iso(input: &DateInput, boundary: Boundary) -> Result<CalendarDate, PickerError> {
    parse(input, &DateFormat::iso(), boundary)
}

/// Parses a pair of inputs into a normalized whole-day range.
///
/// `start` is read at `StartOf` and `end` at `EndOf`. When the inputs are
/// reversed they are swapped and re-pinned, so the result always starts at
/// the beginning of its first day and ends at the end of its last day.
///
/// # Errors
/// Returns `PickerError::InvalidDate` when either side does not parse.
pub fn parse_range(start: &DateInput, end: &DateInput, format: &DateFormat) -> Result<DateRange, PickerError> {
    let start = parse(start, format, Boundary::StartOf)?;
    let end = parse(end, format, Boundary::EndOf)?;
    Ok(DateRange::ordered(start, end).whole_days())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{day, end, start};

    #[test]
    fn test_compile_patterns() {
        struct TestCase {
            pattern:  &'static str,
            strftime: &'static str,
            has_time: bool,
        }

        let cases = [
            TestCase {
                pattern:  "DD/MM/YYYY",
                strftime: "%d/%m/%Y",
                has_time: false,
            },
            TestCase {
                pattern:  "YYYY-MM-DD",
                strftime: "%Y-%m-%d",
                has_time: false,
            },
            TestCase {
                pattern:  "D MMM YY",
                strftime: "%d %b %y",
                has_time: false,
            },
            TestCase {
                pattern:  "dddd, MMMM D YYYY",
                strftime: "%A, %B %d %Y",
                has_time: false,
            },
            TestCase {
                pattern:  "YYYY-MM-DD HH:mm:ss",
                strftime: "%Y-%m-%d %H:%M:%S",
                has_time: true,
            },
            TestCase {
                pattern:  "[Day] DD [of] MM, YYYY",
                strftime: "Day %d of %m, %Y",
                has_time: false,
            },
            TestCase {
                pattern:  "DD%MM",
                strftime: "%d%%%m",
                has_time: false,
            },
        ];

        for case in &cases {
            let format = DateFormat::new(case.pattern);
            assert_eq!(format.strftime(), case.strftime, "pattern {}", case.pattern);
            assert_eq!(format.has_time, case.has_time, "pattern {}", case.pattern);
            assert_eq!(format.to_string(), case.pattern);
        }
    }

    #[test]
    fn test_default_format() {
        assert_eq!(DateFormat::default().pattern(), "DD/MM/YYYY");
    }

    #[test]
    fn test_parse_text_with_boundaries() {
        let format = DateFormat::default();
        let input = DateInput::from("05/01/2024");

        let lower = parse(&input, &format, Boundary::StartOf).expect("valid day-first date");
        let upper = parse(&input, &format, Boundary::EndOf).expect("valid day-first date");

        assert_eq!(lower, start(2024, 1, 5));
        assert_eq!(upper, end(2024, 1, 5));
    }

    #[test]
    fn test_parse_single_digit_fields() {
        let format = DateFormat::new("D/M/YYYY");
        let parsed = parse(&"5/1/2024".into(), &format, Boundary::StartOf).expect("single digits");
        assert_eq!(parsed, start(2024, 1, 5));
    }

    #[test]
    fn test_parse_drops_time_of_day() {
        struct TestCase {
            pattern: &'static str,
            input:   &'static str,
        }

        let cases = [
            TestCase {
                pattern: "YYYY-MM-DD HH:mm",
                input:   "2024-01-05 17:45",
            },
            TestCase {
                pattern: "DD/MM/YYYY HH",
                input:   "05/01/2024 13",
            },
            TestCase {
                pattern: "DD/MM/YYYY hh A",
                input:   "05/01/2024 01 PM",
            },
            TestCase {
                pattern: "DD/MM/YYYY h",
                input:   "05/01/2024 7",
            },
        ];

        for case in &cases {
            let format = DateFormat::new(case.pattern);
            let parsed = parse(&case.input.into(), &format, Boundary::StartOf);
            assert_eq!(parsed, Ok(start(2024, 1, 5)), "pattern {}", case.pattern);
        }

        let format = DateFormat::new("YYYY-MM-DD HH:mm");
        assert!(format.parse_day("2024-01-05 17:45 extra").is_err());

        let noisy = day(2024, 1, 5).and_hms_opt(13, 14, 15).expect("valid time");
        let parsed = parse(&noisy.into(), &format, Boundary::EndOf).expect("structured date-time");
        assert_eq!(parsed, end(2024, 1, 5));
    }

    #[test]
    fn test_parse_two_digit_years() {
        let format = DateFormat::new("DD/MM/YY");
        assert_eq!(format.parse_day("05/01/68"), Ok(day(2068, 1, 5)));
        assert_eq!(format.parse_day("05/01/69"), Ok(day(1969, 1, 5)));
        assert_eq!(format.parse_day("05/01/24"), Ok(day(2024, 1, 5)));
        assert_eq!(format.parse_day("05/01/99"), Ok(day(1999, 1, 5)));
    }

    #[test]
    fn test_parse_missing_day_is_first_of_month() {
        let format = DateFormat::new("MMMM YYYY");
        assert_eq!(format.parse_day("February 2024"), Ok(day(2024, 2, 1)));
        assert!(DateFormat::new("YYYY").parse_day("2024").is_err());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let format = DateFormat::default();
        for date in [start(2024, 3, 10), end(2024, 3, 10)] {
            let boundary = date.boundary().expect("parser output sits on a boundary");
            let again = parse(&date.into(), &format, boundary).expect("instant input");
            assert_eq!(again, date);
        }
    }

    #[test]
    fn test_parse_lazy_input() {
        let input = DateInput::lazy(|| DateInput::from("2024-02-29"));
        let parsed = parse_iso(&input, Boundary::EndOf).expect("producer output is ISO");
        assert_eq!(parsed, end(2024, 2, 29));

        let nested = DateInput::lazy(|| DateInput::lazy(|| DateInput::Day(day(2024, 7, 4))));
        let parsed = parse_iso(&nested, Boundary::StartOf).expect("nested producer");
        assert_eq!(parsed, start(2024, 7, 4));
    }

    #[test]
    fn test_parse_today() {
        let parsed = parse(&DateInput::today(), &DateFormat::default(), Boundary::StartOf).expect("today");
        assert_eq!(parsed.boundary(), Some(Boundary::StartOf));
    }

    #[test]
    fn test_parse_iso_trailing_time() {
        let parsed = parse_iso(&"2024-01-10T08:30:00".into(), Boundary::StartOf).expect("ISO with time");
        assert_eq!(parsed, start(2024, 1, 10));
    }

    #[test]
    fn test_parse_invalid_inputs() {
        let format = DateFormat::default();
        for bad in ["", "   ", "2024-01-05", "32/01/2024", "29/02/2023", "05/01/2024junk", "not a date"] {
            let result = parse(&bad.into(), &format, Boundary::StartOf);
            assert!(
                matches!(result, Err(PickerError::InvalidDate { ref format, .. }) if format == "DD/MM/YYYY"),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_invalid_date_message() {
        let err = parse(&"13/13/2024".into(), &DateFormat::default(), Boundary::StartOf)
            .expect_err("month 13 is invalid");
        assert_eq!(err.to_string(), r#"Invalid date "13/13/2024": expected format DD/MM/YYYY"#);
    }

    #[test]
    fn test_parse_range_swaps_and_repins() {
        let format = DateFormat::iso();
        let r = parse_range(&"2024-03-10".into(), &"2024-01-05".into(), &format).expect("valid bounds");
        assert_eq!(r.start(), start(2024, 1, 5));
        assert_eq!(r.end(), end(2024, 3, 10));
    }

    #[test]
    fn test_parse_range_same_day() {
        let r = parse_range(&"10/01/2024".into(), &"10/01/2024".into(), &DateFormat::default()).expect("same day");
        assert_eq!(r.dates(), (start(2024, 1, 10), end(2024, 1, 10)));
    }

    #[test]
    fn test_parse_range_propagates_errors() {
        let result = parse_range(&"10/01/2024".into(), &"garbage".into(), &DateFormat::default());
        assert!(matches!(result, Err(PickerError::InvalidDate { ref input, .. }) if input == "garbage"));
    }

    #[test]
    fn test_format_serde() {
        let format: DateFormat = serde_json::from_str(r#""MM/DD/YYYY""#).expect("format from string");
        assert_eq!(format.strftime(), "%m/%d/%Y");
        assert_eq!(serde_json::to_string(&format).expect("format to string"), r#""MM/DD/YYYY""#);
    }
}
