//! Shorthands for building dates in tests.

use chrono::NaiveDate;

use crate::{CalendarDate, DateRange};

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar day")
}

/// Start of the given day
pub fn start(year: i32, month: u32, d: u32) -> CalendarDate {
    CalendarDate::start_of(year, month, d).expect("valid calendar day")
}

/// End of the given day
pub fn end(year: i32, month: u32, d: u32) -> CalendarDate {
    CalendarDate::end_of(year, month, d).expect("valid calendar day")
}

/// Whole-day range from the start of `from` to the end of `to`, not reordered
pub fn range(from: (i32, u32, u32), to: (i32, u32, u32)) -> DateRange {
    DateRange::new(start(from.0, from.1, from.2), end(to.0, to.1, to.2))
}
