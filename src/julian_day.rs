//! Fractional Julian dates.
//!
//! A [`JulianDay`] is the day number plus the fraction of a day elapsed
//! since the preceding noon, so midnight falls on `.5`. Precision is a
//! rendering choice: the stored value is never rounded.

use crate::calendar::Calendar;
use crate::consts::{
    DEFAULT_JD_PRECISION, MAX_YEAR, MIN_CIVIL_YEAR, MJD_OFFSET, SECONDS_PER_DAY, SECONDS_PER_HOUR,
    SECONDS_PER_MINUTE,
};
use crate::error::CalendarError;
use crate::jdn::Jdn;
use crate::julian::{self, Reckoning};
use crate::prelude::*;
use crate::zone;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

const HOURS_PER_DAY: u8 = 24;
const MINUTES_PER_HOUR: u8 = 60;
const SECONDS_PER_MINUTE_U8: u8 = 60;

/// Whole-digit spans used to recognise a bare number.
const JD_WHOLE_RANGE: std::ops::Range<f64> = 1_000_000.0..10_000_000.0;
const MJD_WHOLE_RANGE: std::ops::Range<f64> = 10_000.0..100_000.0;

/// A civil date with a time of day, labelled by some [`Reckoning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(
    fmt = "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
    "year",
    "month",
    "day",
    "hour",
    "minute",
    "second"
)]
pub struct CivilDateTime {
    pub year: i64,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl CivilDateTime {
    pub const fn new(year: i64, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub const fn midnight(year: i64, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    const fn seconds_since_midnight(&self) -> i64 {
        self.hour as i64 * SECONDS_PER_HOUR
            + self.minute as i64 * SECONDS_PER_MINUTE
            + self.second as i64
    }

    fn validate_time(&self) -> Result<(), CalendarError> {
        if self.hour >= HOURS_PER_DAY
            || self.minute >= MINUTES_PER_HOUR
            || self.second >= SECONDS_PER_MINUTE_U8
        {
            return Err(CalendarError::InvalidTime {
                hour: self.hour,
                minute: self.minute,
                second: self.second,
            });
        }
        Ok(())
    }

    fn to_naive(self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(
            i32::try_from(self.year).ok()?,
            u32::from(self.month),
            u32::from(self.day),
        )?
        .and_hms_opt(
            u32::from(self.hour),
            u32::from(self.minute),
            u32::from(self.second),
        )
    }
}

/// Julian date: days since noon of Julian -4712-01-01, with fraction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct JulianDay(f64);

impl JulianDay {
    /// Wraps a Julian date.
    ///
    /// # Errors
    /// Returns `InvalidJulianDay` for a non-finite value or one outside the
    /// civil years `MIN_CIVIL_YEAR..=MAX_YEAR`.
    pub fn new(jd: f64) -> Result<Self, CalendarError> {
        let first = julian::civil_to_jdn(MIN_CIVIL_YEAR, 1, 1);
        let past_last = crate::gregorian::civil_to_jdn(i64::from(MAX_YEAR) + 1, 1, 1);
        #[allow(clippy::cast_precision_loss)]
        let span = (first as f64 - 0.5)..(past_last as f64 - 0.5);
        if !jd.is_finite() || !span.contains(&jd) {
            return Err(CalendarError::InvalidJulianDay(jd));
        }
        Ok(Self(jd))
    }

    /// # Errors
    /// Same as [`JulianDay::new`] after adding the MJD offset.
    pub fn from_mjd(mjd: f64) -> Result<Self, CalendarError> {
        Self::new(mjd + MJD_OFFSET)
    }

    /// Reads a bare number as a Julian date when its whole part has seven
    /// digits, or as a modified Julian date when it has five.
    ///
    /// # Errors
    /// Returns `InvalidJulianDay` for any other magnitude.
    pub fn detect(value: f64) -> Result<Self, CalendarError> {
        let whole = value.trunc();
        if JD_WHOLE_RANGE.contains(&whole) {
            Self::new(value)
        } else if MJD_WHOLE_RANGE.contains(&whole) {
            Self::from_mjd(value)
        } else {
            Err(CalendarError::InvalidJulianDay(value))
        }
    }

    /// Start (midnight) of a civil day.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_jdn(jdn: Jdn) -> Self {
        Self(jdn.get() as f64 - 0.5)
    }

    /// Start of `date`'s day.
    pub fn from_date<C: Calendar>(date: &C) -> Self {
        Self::from_jdn(date.to_jdn())
    }

    /// # Errors
    /// Returns an error if the civil label does not exist under `reckoning`
    /// or the time of day is out of range.
    pub fn from_civil(civil: CivilDateTime, reckoning: Reckoning) -> Result<Self, CalendarError> {
        civil.validate_time()?;
        let jdn = reckoning.to_jdn(civil.year, civil.month, civil.day)?;
        #[allow(clippy::cast_precision_loss)]
        let fraction = civil.seconds_since_midnight() as f64 / SECONDS_PER_DAY as f64;
        Ok(Self(Self::from_jdn(jdn).0 + fraction))
    }

    /// Wall clock of `datetime` read as proleptic Gregorian.
    ///
    /// chrono dates are proleptic Gregorian for every year, so days before
    /// 1582-10-15 keep their Gregorian labels here: chrono's 0001-01-01 is
    /// 1721425.5, not the historical 1721423.5. Use
    /// [`JulianDay::from_civil`] with [`Reckoning::Historical`] to read a
    /// wall clock under the Julian-then-Gregorian labels.
    ///
    /// # Errors
    /// Returns `InvalidJulianDay` if the wall clock lies beyond year 9999.
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Result<Self, CalendarError> {
        let wall_clock = datetime.naive_local();
        let jdn = Jdn::from_naive_date(wall_clock.date());
        let time = wall_clock.time();
        let seconds = f64::from(time.num_seconds_from_midnight())
            + f64::from(time.nanosecond()) / 1_000_000_000.0;
        #[allow(clippy::cast_precision_loss)]
        let jd = Self::from_jdn(jdn).0 + seconds / SECONDS_PER_DAY as f64;
        Self::new(jd)
    }

    pub const fn jd(self) -> f64 {
        self.0
    }

    pub fn mjd(self) -> f64 {
        self.0 - MJD_OFFSET
    }

    /// Civil day this instant falls in.
    #[allow(clippy::cast_possible_truncation)]
    pub fn jdn(self) -> Jdn {
        Jdn::new((self.0 + 0.5).floor() as i64)
    }

    /// Julian date rounded to `precision` decimal places.
    pub fn rounded(self, precision: u8) -> f64 {
        round_to(self.0, precision)
    }

    /// Modified Julian date rounded to `precision` decimal places.
    pub fn rounded_mjd(self, precision: u8) -> f64 {
        round_to(self.mjd(), precision)
    }

    /// Date of this instant's civil day in any calendar.
    ///
    /// # Errors
    /// Returns an error if the calendar cannot represent the day.
    pub fn to_date<C: Calendar>(self) -> Result<C, CalendarError> {
        C::from_jdn(self.jdn())
    }

    /// Civil label and time of day, rounded to the nearest second.
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_civil(self, reckoning: Reckoning) -> CivilDateTime {
        let total = ((self.0 + 0.5) * SECONDS_PER_DAY as f64).round() as i64;
        let jdn = Jdn::new(total.div_euclid(SECONDS_PER_DAY));
        let seconds = total.rem_euclid(SECONDS_PER_DAY);
        let (year, month, day) = reckoning.label_in_span(jdn);
        CivilDateTime {
            year,
            month,
            day,
            hour: (seconds / SECONDS_PER_HOUR) as u8,
            minute: (seconds % SECONDS_PER_HOUR / SECONDS_PER_MINUTE) as u8,
            second: (seconds % SECONDS_PER_MINUTE) as u8,
        }
    }

    /// The UTC instant whose proleptic Gregorian wall clock this is.
    ///
    /// Like [`JulianDay::from_datetime`], this never switches to Julian
    /// labels: Julian day 0 comes out as -4713-11-24 12:00:00. Use
    /// [`JulianDay::to_civil`] with [`Reckoning::Historical`] for
    /// -4712-01-01 12:00:00.
    ///
    /// # Errors
    /// Returns `InvalidJulianDay` if chrono cannot represent the wall clock.
    pub fn to_datetime(self) -> Result<DateTime<Utc>, CalendarError> {
        self.to_civil(Reckoning::ProlepticGregorian)
            .to_naive()
            .map(|naive| naive.and_utc())
            .ok_or(CalendarError::InvalidJulianDay(self.0))
    }

    /// The proleptic Gregorian wall clock placed in the named zone (UTC if
    /// `None`). The zone does not shift the wall clock.
    ///
    /// # Errors
    /// Returns `UnsupportedTimezone` for an unknown zone name.
    pub fn to_zoned(self, zone: Option<&str>) -> Result<DateTime<Tz>, CalendarError> {
        let tz = zone::resolve(zone)?;
        let wall_clock = self
            .to_civil(Reckoning::ProlepticGregorian)
            .to_naive()
            .ok_or(CalendarError::InvalidJulianDay(self.0))?;
        zone::attach(wall_clock, tz)
    }
}

fn round_to(value: f64, precision: u8) -> f64 {
    let scale = 10_f64.powi(i32::from(precision));
    (value * scale).round() / scale
}

impl fmt::Display for JulianDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(DEFAULT_JD_PRECISION);
        write!(f, "{:.*}", precision, self.0)
    }
}

impl TryFrom<f64> for JulianDay {
    type Error = CalendarError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<JulianDay> for f64 {
    fn from(jd: JulianDay) -> Self {
        jd.0
    }
}
