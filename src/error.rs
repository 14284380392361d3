use crate::prelude::*;

/// Errors raised while reading a date from text.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// Error type shared by every calendar conversion.
///
/// Invalid input is an expected outcome: constructors and `from_jdn`
/// decoders report it here and never coerce to a neighbouring valid date.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum CalendarError {
    /// Year outside the range the calendar supports.
    #[error("Invalid year: {year} (must be {min}-{max})")]
    InvalidYear { year: i64, min: i64, max: i64 },

    /// Month number that does not exist in the given year.
    #[error("Invalid month {month} for year {year}")]
    InvalidMonth { year: i64, month: u8 },

    /// Day exceeding the month's length (or a dropped reform day).
    #[error("Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: i64, month: u8, day: u8 },

    /// A lunar date flagged as leap in a month that is not the year's leap month.
    #[error("Year {year} has no leap month {month}")]
    InvalidLeapMonth { year: i64, month: u8 },

    /// Time of day outside 00:00:00..=23:59:59.
    #[error("Invalid time {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u8, minute: u8, second: u8 },

    /// Timezone name unknown to the tz database.
    #[error("Unsupported timezone: {0}")]
    UnsupportedTimezone(String),

    /// Year lookup for a day number outside the supported span.
    #[error("Julian day number {0} is outside the supported range")]
    SearchDivergence(i64),

    /// Value that is neither a Julian date nor a modified Julian date.
    #[error("Invalid Julian day: {0}")]
    InvalidJulianDay(f64),

    /// Error parsing a textual date.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl CalendarError {
    pub(crate) fn year_out_of_range(year: impl Into<i64>, min: impl Into<i64>, max: impl Into<i64>) -> Self {
        Self::InvalidYear {
            year: year.into(),
            min: min.into(),
            max: max.into(),
        }
    }
}
