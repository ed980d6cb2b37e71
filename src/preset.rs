//! Named shortcut ranges ("Today", "Last 7 days", ...).
//!
//! Bounds are kept raw so lazy inputs follow the clock, and are parsed as
//! ISO dates (`YYYY-MM-DD`) whatever format the picker uses for its own
//! inputs. Every entry is validated once on insertion; a lazy bound that
//! later produces garbage is still reported as a configuration error when
//! the entry is matched or selected.

use serde::Deserialize;

use crate::parse::parse_range;
use crate::{DateFormat, DateInput, DateRange, PickerError};

/// Unparsed bounds of a predefined range.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBounds {
    #[serde(alias = "startDate")]
    pub start_date: DateInput,
    #[serde(alias = "endDate")]
    pub end_date:   DateInput,
}

impl RawBounds {
    pub fn new(start_date: impl Into<DateInput>, end_date: impl Into<DateInput>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date:   end_date.into(),
        }
    }

    fn parse(&self) -> Result<DateRange, PickerError> {
        parse_range(&self.start_date, &self.end_date, &DateFormat::iso())
    }
}

/// One named entry as it appears in configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedRange {
    pub name:   String,
    #[serde(flatten)]
    pub bounds: RawBounds,
}

/// Ordered set of predefined ranges, keyed by unique name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Vec<NamedRange>")]
pub struct NamedRangeSet {
    entries: Vec<NamedRange>,
}

impl NamedRangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a range, replacing an existing entry of the same name in
    /// place so the display order is kept.
    ///
    /// # Errors
    /// Returns `PickerError::Configuration` when either bound does not parse.
    pub fn insert(&mut self, name: impl Into<String>, bounds: RawBounds) -> Result<(), PickerError> {
        let name = name.into();
        bounds.parse().map_err(|err| PickerError::configuration(&name, err))?;

        if let Some(existing) = self.entries.iter_mut().find(|e| e.name == name) {
            tracing::debug!(name = %name, "replacing predefined range");
            existing.bounds = bounds;
        } else {
            self.entries.push(NamedRange { name, bounds });
        }
        Ok(())
    }

    /// Chaining form of [`NamedRangeSet::insert`].
    ///
    /// # Errors
    /// Returns `PickerError::Configuration` when either bound does not parse.
    pub fn with(
        mut self,
        name: impl Into<String>,
        start_date: impl Into<DateInput>,
        end_date: impl Into<DateInput>,
    ) -> Result<Self, PickerError> {
        self.insert(name, RawBounds::new(start_date, end_date))?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&RawBounds> {
        self.entries.iter().find(|e| e.name == name).map(|e| &e.bounds)
    }

    /// Parses the named entry into a normalized whole-day range.
    ///
    /// # Errors
    /// `UnknownRange` for an unregistered name, `Configuration` when the
    /// bounds do not parse.
    pub fn bounds(&self, name: &str) -> Result<DateRange, PickerError> {
        let raw = self
            .get(name)
            .ok_or_else(|| PickerError::UnknownRange(name.to_owned()))?;
        Self::parse_entry(name, raw)
    }

    /// True when `current` equals the named range instant for instant.
    ///
    /// # Errors
    /// See [`NamedRangeSet::bounds`].
    pub fn is_active(&self, name: &str, current: &DateRange) -> Result<bool, PickerError> {
        Ok(self.bounds(name)? == *current)
    }

    /// Every entry matching `current`, in registration order. Entries with
    /// equal bounds are all reported.
    ///
    /// # Errors
    /// `Configuration` for the first entry whose bounds do not parse.
    pub fn active_names(&self, current: &DateRange) -> Result<Vec<&str>, PickerError> {
        let mut active = Vec::new();
        for entry in &self.entries {
            if Self::parse_entry(&entry.name, &entry.bounds)? == *current {
                active.push(entry.name.as_str());
            }
        }
        Ok(active)
    }

    /// The normalized range to inject when the named shortcut is picked.
    ///
    /// # Errors
    /// See [`NamedRangeSet::bounds`].
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn select_by_name(&self, name: &str) -> Result<DateRange, PickerError> {
        self.bounds(name)
    }

    fn parse_entry(name: &str, raw: &RawBounds) -> Result<DateRange, PickerError> {
        raw.parse().map_err(|err| {
            tracing::warn!(name, error = %err, "predefined range failed to parse");
            PickerError::configuration(name, err)
        })
    }
}

impl TryFrom<Vec<NamedRange>> for NamedRangeSet {
    type Error = PickerError;

    fn try_from(entries: Vec<NamedRange>) -> Result<Self, Self::Error> {
        let mut set = Self::new();
        for entry in entries {
            set.insert(entry.name, entry.bounds)?;
        }
        Ok(set)
    }
}
