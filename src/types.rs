use crate::consts::{
    INSTANT_DISPLAY_FORMAT, INSTANT_PARSE_FORMAT, ISO_FORMAT, LAST_HOUR, LAST_MILLI, LAST_MINUTE,
    LAST_SECOND,
};
use crate::prelude::*;
use crate::PickerError;
use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which edge of its day a parsed date is snapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Boundary {
    /// 00:00:00.000
    StartOf,
    /// 23:59:59.999
    EndOf,
}

impl Boundary {
    /// Time of day this boundary snaps to
    pub fn time(self) -> NaiveTime {
        match self {
            Self::StartOf => NaiveTime::MIN,
            Self::EndOf => {
                NaiveTime::from_hms_milli_opt(LAST_HOUR, LAST_MINUTE, LAST_SECOND, LAST_MILLI)
                    .unwrap_or(NaiveTime::MIN)
            }
        }
    }
}

/// A day-granularity instant: a calendar day pinned to one of its boundaries.
///
/// Values produced by the parser always sit on 00:00:00.000 or
/// 23:59:59.999, so two dates parsed from the same day with the same
/// boundary compare equal regardless of the time-of-day in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}", "_0.format(INSTANT_DISPLAY_FORMAT)")]
pub struct CalendarDate(NaiveDateTime);

impl CalendarDate {
    /// Pins a calendar day to the given boundary
    pub fn new(date: NaiveDate, boundary: Boundary) -> Self {
        Self(date.and_time(boundary.time()))
    }

    /// Start of the given day, `None` for an impossible date
    pub fn start_of(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(|d| Self::new(d, Boundary::StartOf))
    }

    /// End of the given day, `None` for an impossible date
    pub fn end_of(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(|d| Self::new(d, Boundary::EndOf))
    }

    /// Re-pins the same day to another boundary
    pub fn at(self, boundary: Boundary) -> Self {
        Self::new(self.date(), boundary)
    }

    /// The boundary this instant sits on, if any
    pub fn boundary(self) -> Option<Boundary> {
        let time = self.0.time();
        [Boundary::StartOf, Boundary::EndOf]
            .into_iter()
            .find(|b| b.time() == time)
    }

    /// Calendar day of this instant
    pub fn date(self) -> NaiveDate {
        self.0.date()
    }

    /// Underlying date-time
    pub const fn naive(self) -> NaiveDateTime {
        self.0
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Month number (1-12)
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// Day of month (1-31)
    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// True when both instants fall on the same calendar day
    pub fn same_day(self, other: Self) -> bool {
        self.date() == other.date()
    }

    /// Shifts by a signed number of months, keeping time-of-day.
    ///
    /// The day of month is clamped to the last valid day of the target
    /// month: 2024-01-31 + 1 month is 2024-02-29, 2023-01-31 + 1 month is
    /// 2023-02-28.
    ///
    /// # Errors
    /// Returns `PickerError::DateOutOfRange` when the result is not
    /// representable.
    pub fn add_months(self, months: i32) -> Result<Self, PickerError> {
        let delta = Months::new(months.unsigned_abs());
        let shifted = if months >= 0 {
            self.0.checked_add_months(delta)
        } else {
            self.0.checked_sub_months(delta)
        };
        shifted
            .map(Self)
            .ok_or(PickerError::DateOutOfRange { date: self, months })
    }
}

impl From<CalendarDate> for NaiveDateTime {
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

impl FromStr for CalendarDate {
    type Err = PickerError;

    /// Accepts a full instant (`2024-01-05T23:59:59.999`) or a bare ISO day,
    /// which is read as the start of that day.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(instant) = NaiveDateTime::parse_from_str(trimmed, INSTANT_PARSE_FORMAT) {
            return Ok(Self(instant));
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(|d| Self::new(d, Boundary::StartOf))
            .map_err(|_| PickerError::invalid_date(s, ISO_FORMAT))
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
