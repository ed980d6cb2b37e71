//! The picker session: one selector, one optional link anchor and the
//! predefined ranges, plus change notification.

use std::fmt;

use serde::Serialize;

use crate::link::LinkedCalendarOffset;
use crate::parse::{parse, parse_range};
use crate::prelude::*;
use crate::selector::RangeSelector;
use crate::{
    Boundary, CalendarDate, DateFormat, DateInput, DateRange, NamedRangeSet, PickerConfig, PickerError,
};

/// What triggered a committed change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum ChangeSource {
    /// A click on a calendar day
    #[display(fmt = "calendar")]
    Calendar,
    /// A predefined range picked by name
    #[display(fmt = "preset {_0:?}")]
    Preset(String),
    /// A range set by the host application
    #[display(fmt = "programmatic")]
    Programmatic,
}

/// Notification produced by a committed transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeEvent {
    /// Initial range, emitted once
    Init(DateRange),
    /// A committed change
    Change { range: DateRange, source: ChangeSource },
}

impl RangeEvent {
    pub const fn range(&self) -> DateRange {
        match self {
            Self::Init(range) | Self::Change { range, .. } => *range,
        }
    }
}

/// Receives picker notifications synchronously, after state is updated.
pub trait RangeListener: Send + Sync {
    fn on_init(&mut self, _range: &DateRange) {}

    fn on_change(&mut self, _range: &DateRange, _source: &ChangeSource) {}
}

impl<F> RangeListener for F
where
    F: FnMut(&RangeEvent) + Send + Sync,
{
    fn on_init(&mut self, range: &DateRange) {
        self(&RangeEvent::Init(*range));
    }

    fn on_change(&mut self, range: &DateRange, source: &ChangeSource) {
        self(&RangeEvent::Change {
            range:  *range,
            source: source.clone(),
        });
    }
}

/// A date-range picker session.
pub struct DateRangePicker {
    config:    PickerConfig,
    selector:  RangeSelector,
    link:      Option<LinkedCalendarOffset>,
    ranges:    NamedRangeSet,
    inputs:    (DateInput, DateInput),
    listeners: Vec<Box<dyn RangeListener>>,
}

impl fmt::Debug for DateRangePicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateRangePicker")
            .field("config", &self.config)
            .field("selector", &self.selector)
            .field("link", &self.link)
            .field("ranges", &self.ranges.len())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl DateRangePicker {
    pub fn builder() -> PickerBuilder {
        PickerBuilder::default()
    }

    /// Creates a picker without listeners or predefined ranges.
    ///
    /// # Errors
    /// Returns `PickerError::InvalidDate` when either input does not match
    /// `config.format`.
    pub fn new(
        config: PickerConfig,
        start_date: impl Into<DateInput>,
        end_date: impl Into<DateInput>,
    ) -> Result<Self, PickerError> {
        Self::builder()
            .config(config)
            .start_date(start_date)
            .end_date(end_date)
            .build()
    }

    pub const fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub const fn ranges(&self) -> &NamedRangeSet {
        &self.ranges
    }

    /// The range as displayed, including a pending first click
    pub const fn range(&self) -> DateRange {
        self.selector.range()
    }

    /// The last committed range
    pub const fn committed(&self) -> DateRange {
        self.selector.committed()
    }

    /// True between the first and second click of a selection
    pub fn is_selecting(&self) -> bool {
        self.selector.is_selecting()
    }

    /// Month anchor of the companion calendar, when linking is enabled
    pub fn link_anchor(&self) -> Option<CalendarDate> {
        self.link.map(|link| link.anchor())
    }

    pub fn subscribe(&mut self, listener: impl RangeListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Handles a calendar click. Returns the change when the click commits.
    ///
    /// # Errors
    /// Returns `PickerError::InvalidDate` when the input does not parse.
    pub fn select_date(&mut self, date: impl Into<DateInput>) -> Result<Option<RangeEvent>, PickerError> {
        let date = parse(&date.into(), &self.config.format, Boundary::StartOf)?;
        Ok(self
            .selector
            .select_date(date)
            .map(|range| self.emit_change(range, ChangeSource::Calendar)))
    }

    /// Applies the named predefined range, discarding any pending click.
    ///
    /// # Errors
    /// `UnknownRange` or `Configuration` from the predefined range set.
    pub fn select_preset(&mut self, name: &str) -> Result<RangeEvent, PickerError> {
        let range = self.ranges.select_by_name(name)?;
        let range = self.selector.inject_range(range);
        Ok(self.emit_change(range, ChangeSource::Preset(name.to_owned())))
    }

    /// Replaces the range from host-supplied inputs.
    ///
    /// # Errors
    /// Returns `PickerError::InvalidDate` when either input does not parse.
    pub fn set_range(
        &mut self,
        start_date: impl Into<DateInput>,
        end_date: impl Into<DateInput>,
    ) -> Result<RangeEvent, PickerError> {
        let start_date = start_date.into();
        let end_date = end_date.into();
        let range = parse_range(&start_date, &end_date, &self.config.format)?;
        self.inputs = (start_date, end_date);
        let range = self.selector.inject_range(range);
        Ok(self.emit_change(range, ChangeSource::Programmatic))
    }

    /// Re-reads host inputs after the host changed them.
    ///
    /// A missing side keeps its previous input; a new `format` applies to
    /// the new inputs and to every later parse. The range is replaced only
    /// when the parsed inputs differ from the previous ones.
    ///
    /// # Errors
    /// Returns `PickerError::InvalidDate` when old or new inputs do not
    /// parse. Nothing is changed in that case.
    pub fn update_inputs(
        &mut self,
        start_date: Option<DateInput>,
        end_date: Option<DateInput>,
        format: Option<DateFormat>,
    ) -> Result<Option<RangeEvent>, PickerError> {
        let format = format.unwrap_or_else(|| self.config.format.clone());
        if start_date.is_none() && end_date.is_none() {
            self.config.format = format;
            return Ok(None);
        }

        let (old_start, old_end) = &self.inputs;
        let previous = parse_range(old_start, old_end, &self.config.format)?;
        let start_date = start_date.unwrap_or_else(|| old_start.clone());
        let end_date = end_date.unwrap_or_else(|| old_end.clone());
        let next = parse_range(&start_date, &end_date, &format)?;

        self.config.format = format;
        self.inputs = (start_date, end_date);
        if next == previous {
            tracing::trace!(range = %next, "inputs unchanged");
            return Ok(None);
        }
        let range = self.selector.inject_range(next);
        Ok(Some(self.emit_change(range, ChangeSource::Programmatic)))
    }

    /// Drops a pending first click; the range stays as displayed.
    pub fn cancel_selection(&mut self) {
        self.selector.reset();
    }

    /// Moves the companion calendar by `direction` months.
    ///
    /// # Errors
    /// `LinkingDisabled` when the picker was built without linked calendars,
    /// `DateOutOfRange` when the anchor would leave the calendar.
    pub fn advance_link(&mut self, direction: i32) -> Result<CalendarDate, PickerError> {
        self.link
            .as_mut()
            .ok_or(PickerError::LinkingDisabled)?
            .advance(direction)
    }

    /// Whether the named predefined range matches the current range.
    ///
    /// Matching is instant for instant. Predefined ranges span whole days
    /// while clicks land at the start of a day, so a range made of two clicks
    /// never matches a predefined range over the same days.
    ///
    /// # Errors
    /// `UnknownRange` or `Configuration` from the predefined range set.
    pub fn is_preset_active(&self, name: &str) -> Result<bool, PickerError> {
        self.ranges.is_active(name, &self.range())
    }

    /// Names of every predefined range matching the current range.
    ///
    /// # Errors
    /// `Configuration` when a predefined range does not parse.
    pub fn active_presets(&self) -> Result<Vec<&str>, PickerError> {
        self.ranges.active_names(&self.range())
    }

    fn emit_change(&mut self, range: DateRange, source: ChangeSource) -> RangeEvent {
        tracing::debug!(%range, %source, listeners = self.listeners.len(), "range changed");
        for listener in &mut self.listeners {
            listener.on_change(&range, &source);
        }
        RangeEvent::Change { range, source }
    }
}

/// Builder for [`DateRangePicker`]. Missing dates default to today.
#[derive(Default)]
pub struct PickerBuilder {
    config:     PickerConfig,
    start_date: Option<DateInput>,
    end_date:   Option<DateInput>,
    ranges:     NamedRangeSet,
    listeners:  Vec<Box<dyn RangeListener>>,
}

impl PickerBuilder {
    pub fn config(mut self, config: PickerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn start_date(mut self, date: impl Into<DateInput>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    pub fn end_date(mut self, date: impl Into<DateInput>) -> Self {
        self.end_date = Some(date.into());
        self
    }

    pub fn ranges(mut self, ranges: NamedRangeSet) -> Self {
        self.ranges = ranges;
        self
    }

    pub fn listener(mut self, listener: impl RangeListener + 'static) -> Self {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Parses the initial range and notifies listeners with `on_init`.
    ///
    /// # Errors
    /// Returns `PickerError::InvalidDate` when either date does not match
    /// the configured format.
    #[tracing::instrument(level = "debug", skip(self), fields(format = %self.config.format))]
    pub fn build(self) -> Result<DateRangePicker, PickerError> {
        let start_date = self.start_date.unwrap_or_default();
        let end_date = self.end_date.unwrap_or_default();
        let initial = parse_range(&start_date, &end_date, &self.config.format)?;

        let link = self
            .config
            .linked_calendars
            .then(|| LinkedCalendarOffset::new(initial.end()));

        let mut picker = DateRangePicker {
            selector: RangeSelector::new(initial, self.config.two_step_change),
            config: self.config,
            link,
            ranges: self.ranges,
            inputs: (start_date, end_date),
            listeners: self.listeners,
        };

        tracing::debug!(range = %initial, linked = picker.link.is_some(), "picker initialized");
        for listener in &mut picker.listeners {
            listener.on_init(&initial);
        }
        Ok(picker)
    }
}
