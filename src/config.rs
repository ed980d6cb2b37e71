use serde::{Deserialize, Serialize};

use crate::DateFormat;

/// Picker configuration.
///
/// Every field has a default, so a partial document deserializes:
///
/// | field              | default        |
/// |--------------------|----------------|
/// | `format`           | `"DD/MM/YYYY"` |
/// | `linked_calendars` | `false`        |
/// | `two_step_change`  | `false`        |
/// | `only_classes`     | `false`        |
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Pattern for string date inputs
    pub format:           DateFormat,
    /// Track a month anchor for a companion calendar
    pub linked_calendars: bool,
    /// Hold back the change notification until the second click
    pub two_step_change:  bool,
    /// Presentation hint: style through class names only. No effect on
    /// selection.
    pub only_classes:     bool,
}

impl PickerConfig {
    pub fn with_format(mut self, format: impl Into<DateFormat>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_linked_calendars(mut self, linked: bool) -> Self {
        self.linked_calendars = linked;
        self
    }

    pub fn with_two_step_change(mut self, two_step: bool) -> Self {
        self.two_step_change = two_step;
        self
    }

    pub fn with_only_classes(mut self, only_classes: bool) -> Self {
        self.only_classes = only_classes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PickerConfig::default();
        assert_eq!(config.format.pattern(), "DD/MM/YYYY");
        assert!(!config.linked_calendars);
        assert!(!config.two_step_change);
        assert!(!config.only_classes);
    }

    #[test]
    fn test_partial_document() {
        let config: PickerConfig =
            serde_json::from_str(r#"{"two_step_change": true}"#).expect("partial config");
        assert_eq!(config, PickerConfig::default().with_two_step_change(true));

        let config: PickerConfig = serde_json::from_str(r#"{"format": "YYYY-MM-DD", "linked_calendars": true}"#)
            .expect("format and linking");
        assert_eq!(config.format.strftime(), "%Y-%m-%d");
        assert!(config.linked_calendars);
    }

    #[test]
    fn test_round_trip() {
        let config = PickerConfig::default()
            .with_format("MM/DD/YYYY")
            .with_linked_calendars(true)
            .with_only_classes(true);
        let json = serde_json::to_string(&config).expect("serialize config");
        let back: PickerConfig = serde_json::from_str(&json).expect("deserialize config");
        assert_eq!(back, config);
    }
}
