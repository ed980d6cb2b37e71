/// Default input pattern for picker dates (day first, moment-style tokens)
pub const DEFAULT_FORMAT: &str = "DD/MM/YYYY";

/// Pattern used for predefined range bounds and for serialized dates
pub const ISO_FORMAT: &str = "YYYY-MM-DD";

/// Separator between a date and a trailing time component in ISO input
pub const ISO_TIME_SEPARATOR: char = 'T';

/// strftime pattern used to display and serialize a `CalendarDate`
pub const INSTANT_DISPLAY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// strftime pattern accepted for a full ISO instant
pub const INSTANT_PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Range separator (ISO 8601 interval notation)
pub const RANGE_SEPARATOR: char = '/';

/// Last representable hour of a day
pub const LAST_HOUR: u32 = 23;
/// Last representable minute of an hour
pub const LAST_MINUTE: u32 = 59;
/// Last representable second of a minute
pub const LAST_SECOND: u32 = 59;
/// Last millisecond of a second; `EndOf` dates are ceiled to this precision
pub const LAST_MILLI: u32 = 999;

/// Months in a calendar year
pub const MONTHS_PER_YEAR: i32 = 12;

/// Two-digit years above this fall in the 1900s, the rest in the 2000s
pub const TWO_DIGIT_YEAR_PIVOT: i32 = 68;

/// Opening delimiter of an escaped literal in a format pattern
pub const LITERAL_OPEN: char = '[';
/// Closing delimiter of an escaped literal in a format pattern
pub const LITERAL_CLOSE: char = ']';
