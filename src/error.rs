use crate::CalendarDate;

/// Error type for picker operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PickerError {
    /// Input could not be parsed under the configured format.
    #[error("Invalid date {input:?}: expected format {format}")]
    InvalidDate { input: String, format: String },

    /// A predefined range has malformed bounds.
    #[error("Predefined range {name:?} has malformed bounds: {source}")]
    Configuration {
        name:   String,
        #[source]
        source: Box<PickerError>,
    },

    /// No predefined range is registered under this name.
    #[error("Unknown predefined range: {0:?}")]
    UnknownRange(String),

    /// Month arithmetic left the representable calendar.
    #[error("Shifting {date} by {months} months leaves the supported calendar")]
    DateOutOfRange { date: CalendarDate, months: i32 },

    /// Link navigation was requested on a picker without linked calendars.
    #[error("Linked calendars are not enabled for this picker")]
    LinkingDisabled,
}

impl PickerError {
    pub(crate) fn invalid_date(input: impl Into<String>, format: impl Into<String>) -> Self {
        Self::InvalidDate {
            input:  input.into(),
            format: format.into(),
        }
    }

    pub(crate) fn configuration(name: &str, source: Self) -> Self {
        Self::Configuration {
            name:   name.to_owned(),
            source: Box::new(source),
        }
    }
}
