use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Boundary, CalendarDate, MONTHS_PER_YEAR, PickerError, RANGE_SEPARATOR, prelude::*};

/// A pair of calendar instants (inclusive).
///
/// Construction does not reorder; [`DateRange::normalize`] does. Every range
/// the picker stores or emits has been normalized, so `start <= end` holds
/// on all observed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct DateRange {
    start: CalendarDate,
    end:   CalendarDate,
}

impl DateRange {
    /// Creates a range as given, without ordering the bounds
    pub const fn new(start: CalendarDate, end: CalendarDate) -> Self {
        Self { start, end }
    }

    /// Creates a range and normalizes it
    pub fn ordered(start: CalendarDate, end: CalendarDate) -> Self {
        Self::new(start, end).normalize()
    }

    /// A range covering exactly one instant, as left by a first click
    pub const fn single(date: CalendarDate) -> Self {
        Self::new(date, date)
    }

    /// Swaps the bounds when start is strictly after end.
    pub fn normalize(self) -> Self {
        if self.start > self.end {
            tracing::trace!(start = %self.start, end = %self.end, "swapping reversed range");
            Self {
                start: self.end,
                end:   self.start,
            }
        } else {
            self
        }
    }

    /// Widens the bounds to whole days: start at 00:00:00.000, end at
    /// 23:59:59.999. Ordering is preserved for a normalized range.
    pub fn whole_days(self) -> Self {
        Self {
            start: self.start.at(Boundary::StartOf),
            end:   self.end.at(Boundary::EndOf),
        }
    }

    /// Returns the start date of the range
    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    /// Returns the end date of the range
    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    /// Returns both start and end dates as a tuple
    pub const fn dates(&self) -> (CalendarDate, CalendarDate) {
        (self.start, self.end)
    }

    pub(crate) const fn with_end(self, end: CalendarDate) -> Self {
        Self { start: self.start, end }
    }

    /// Checks whether a date falls on a day covered by the range
    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.start.date() <= date.date() && date.date() <= self.end.date()
    }

    /// True when both bounds fall on the same calendar day
    pub fn is_single_day(&self) -> bool {
        self.start.same_day(self.end)
    }

    /// Calendar months between the start month and the end month.
    /// Negative for a reversed, not yet normalized range.
    pub fn month_span(&self) -> i32 {
        let years = self.end.year() - self.start.year();
        let months = self.end.month().cast_signed() - self.start.month().cast_signed();
        years * MONTHS_PER_YEAR + months
    }
}

impl From<(CalendarDate, CalendarDate)> for DateRange {
    fn from((start, end): (CalendarDate, CalendarDate)) -> Self {
        Self::new(start, end)
    }
}

impl FromStr for DateRange {
    type Err = PickerError;

    /// Parses `start/end` instants; the result is normalized.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let Some((start, end)) = trimmed.split_once(RANGE_SEPARATOR) else {
            return Err(PickerError::invalid_date(s, format!("start{RANGE_SEPARATOR}end")));
        };
        Ok(Self::ordered(start.parse()?, end.parse()?))
    }
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
