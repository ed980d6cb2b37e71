//! Two-step click selection.

use crate::{CalendarDate, DateRange};

/// Where the selector is in the click protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum SelectionStep {
    #[default]
    AwaitingStart,
    AwaitingEnd,
}

/// State machine turning single clicks and injected ranges into committed
/// ranges.
///
/// `select_date` and `inject_range` return `Some(range)` when the transition
/// commits and `None` when the commit is suppressed. The working range is
/// updated either way, so a presentation layer can highlight a pending start.
#[derive(Debug, Clone)]
pub struct RangeSelector {
    step:            SelectionStep,
    working:         DateRange,
    committed:       DateRange,
    two_step_change: bool,
}

impl RangeSelector {
    pub fn new(initial: DateRange, two_step_change: bool) -> Self {
        let initial = initial.normalize();
        Self {
            step: SelectionStep::AwaitingStart,
            working: initial,
            committed: initial,
            two_step_change,
        }
    }

    /// The range as currently displayed, including a pending first click
    pub const fn range(&self) -> DateRange {
        self.working
    }

    /// The last range that was committed
    pub const fn committed(&self) -> DateRange {
        self.committed
    }

    /// True between the first and second click
    pub fn is_selecting(&self) -> bool {
        self.step == SelectionStep::AwaitingEnd
    }

    pub const fn two_step_change(&self) -> bool {
        self.two_step_change
    }

    /// Replaces the whole range. Resets the click protocol and always commits.
    pub fn inject_range(&mut self, range: DateRange) -> DateRange {
        if self.is_selecting() {
            tracing::debug!(pending = %self.working, "discarding pending selection");
        }
        self.step = SelectionStep::AwaitingStart;
        self.commit(range)
    }

    /// Applies one calendar click.
    pub fn select_date(&mut self, date: CalendarDate) -> Option<DateRange> {
        match self.step {
            SelectionStep::AwaitingStart => {
                self.step = SelectionStep::AwaitingEnd;
                if self.two_step_change {
                    self.working = DateRange::single(date);
                    tracing::trace!(start = %date, "selection started; commit deferred");
                    None
                } else {
                    Some(self.commit(DateRange::single(date)))
                }
            },
            SelectionStep::AwaitingEnd => {
                self.step = SelectionStep::AwaitingStart;
                Some(self.commit(self.working.with_end(date)))
            },
        }
    }

    /// Abandons a pending first click without touching the working range.
    pub fn reset(&mut self) {
        self.step = SelectionStep::AwaitingStart;
    }

    fn commit(&mut self, range: DateRange) -> DateRange {
        let range = range.normalize();
        self.working = range;
        self.committed = range;
        tracing::debug!(%range, "range committed");
        range
    }
}
