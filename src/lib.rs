//! Selection engine for calendar date-range pickers.
//!
//! A [`DateRangePicker`] turns calendar clicks, predefined shortcuts and
//! host updates into ordered [`DateRange`] values and tells listeners about
//! every committed change. Rendering is left to the caller.
//!
//! ```
//! use range_picker::{DateRangePicker, NamedRangeSet, PickerConfig, PickerError};
//!
//! # fn main() -> Result<(), PickerError> {
//! let ranges = NamedRangeSet::new().with("New year", "2024-01-01", "2024-01-01")?;
//! let mut picker = DateRangePicker::builder()
//!     .config(PickerConfig::default().with_two_step_change(true))
//!     .start_date("01/01/2024")
//!     .end_date("31/01/2024")
//!     .ranges(ranges)
//!     .build()?;
//!
//! assert!(picker.select_date("20/01/2024")?.is_none());
//! let change = picker.select_date("05/01/2024")?.expect("second click commits");
//! assert_eq!(change.range().start().day(), 5);
//!
//! picker.select_preset("New year")?;
//! assert_eq!(picker.active_presets()?, ["New year"]);
//! # Ok(())
//! # }
//! ```

mod config;
mod consts;
mod error;
mod link;
mod parse;
mod picker;
mod preset;
mod prelude;
mod range;
mod selector;
mod types;

#[cfg(test)]
mod test_utils;

pub use config::PickerConfig;
pub use consts::*;
pub use error::PickerError;
pub use link::LinkedCalendarOffset;
pub use parse::{DateFormat, DateInput, DateProducer, parse, parse_iso, parse_range};
pub use picker::{ChangeSource, DateRangePicker, PickerBuilder, RangeEvent, RangeListener};
pub use preset::{NamedRange, NamedRangeSet, RawBounds};
pub use range::DateRange;
pub use selector::RangeSelector;
pub use types::{Boundary, CalendarDate};
