use crate::{CalendarDate, PickerError};

/// Month anchor for a companion calendar.
///
/// Moves only through [`LinkedCalendarOffset::advance`]; changes to the
/// selected range never touch it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkedCalendarOffset {
    anchor: CalendarDate,
}

impl LinkedCalendarOffset {
    pub const fn new(anchor: CalendarDate) -> Self {
        Self { anchor }
    }

    pub const fn anchor(&self) -> CalendarDate {
        self.anchor
    }

    /// Shifts the anchor by `direction` months (negative goes back).
    /// Month ends clamp as in [`CalendarDate::add_months`].
    ///
    /// # Errors
    /// Returns `PickerError::DateOutOfRange` when the shifted anchor is not
    /// representable; the anchor is left unchanged.
    pub fn advance(&mut self, direction: i32) -> Result<CalendarDate, PickerError> {
        self.anchor = self.anchor.add_months(direction)?;
        tracing::debug!(direction, anchor = %self.anchor, "linked calendar moved");
        Ok(self.anchor)
    }
}
