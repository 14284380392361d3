use crate::clock::Clock;
use crate::consts::DATE_SEPARATOR;
use crate::error::{CalendarError, ParseError};
use crate::jdn::Jdn;
use crate::types::Weekday;
use chrono::{DateTime, TimeZone};

/// A calendar whose dates map one-to-one onto Julian Day Numbers.
///
/// Every conversion between two calendars goes through [`Calendar::to_jdn`]
/// on the source and [`Calendar::from_jdn`] on the target.
pub trait Calendar: Sized + Copy {
    /// Day number of this date. Infallible because the date was validated on
    /// construction.
    fn to_jdn(&self) -> Jdn;

    /// Date falling on the given day number.
    ///
    /// # Errors
    /// Returns an error if the day lies outside the calendar's supported years.
    fn from_jdn(jdn: Jdn) -> Result<Self, CalendarError>;

    /// Whether this date's year is a leap year (or, for lunisolar
    /// calendars, carries a leap month).
    fn is_leap_year(&self) -> bool;

    fn weekday(&self) -> Weekday {
        self.to_jdn().weekday()
    }

    /// Same day expressed in another calendar.
    ///
    /// # Errors
    /// Returns an error if the target calendar cannot represent the day.
    fn convert<B: Calendar>(&self) -> Result<B, CalendarError> {
        B::from_jdn(self.to_jdn())
    }

    /// Date of the civil day `datetime` falls on, in its own timezone.
    ///
    /// # Errors
    /// Returns an error if the calendar cannot represent the day.
    fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Result<Self, CalendarError> {
        Self::from_jdn(Jdn::from_naive_date(datetime.date_naive()))
    }

    /// Current UTC date according to `clock`.
    ///
    /// # Errors
    /// Returns an error if the calendar cannot represent today.
    fn today(clock: &impl Clock) -> Result<Self, CalendarError> {
        Self::from_datetime(&clock.now())
    }

    /// Current date in `zone` according to `clock`.
    ///
    /// # Errors
    /// Returns an error if the calendar cannot represent today.
    fn today_in<Tz: TimeZone>(clock: &impl Clock, zone: &Tz) -> Result<Self, CalendarError> {
        Self::from_datetime(&clock.now().with_timezone(zone))
    }

    /// Signed number of days from `self` to `other`.
    fn days_until<B: Calendar>(&self, other: &B) -> i64 {
        other.to_jdn() - self.to_jdn()
    }
}

/// Converts `date` into calendar `B` through its Julian Day Number.
///
/// # Errors
/// Returns an error if `B` cannot represent the day.
pub fn convert<A: Calendar, B: Calendar>(date: &A) -> Result<B, CalendarError> {
    B::from_jdn(date.to_jdn())
}

/// Splits `YYYY-MM-DD` into numeric components without range checks.
pub(crate) fn parse_ymd(s: &str) -> Result<(i64, u8, u8), ParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(ParseError::InvalidFormat(format!(
            "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {trimmed}"
        )));
    };

    let year = year
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidFormat((*year).to_owned()))?;
    let month = month
        .parse::<u8>()
        .map_err(|_| ParseError::InvalidFormat((*month).to_owned()))?;
    let day = day
        .parse::<u8>()
        .map_err(|_| ParseError::InvalidFormat((*day).to_owned()))?;

    Ok((year, month, day))
}
