use crate::calendar::{Calendar, parse_ymd};
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_MONTH, MAX_YEAR, MIN_DAY, MIN_YEAR,
};
use crate::error::CalendarError;
use crate::jdn::Jdn;
use crate::julian::JulianDate;
use crate::prelude::*;
use crate::types::Year;
use crate::zone;
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use std::str::FromStr;

/// A date in the proleptic Gregorian calendar, years 1..=9999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month", "day")]
pub struct GregorianDate {
    year: Year,
    month: u8,
    day: u8,
}

pub const fn is_leap_year(year: i64) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Length of `month` in `year`, or 0 for a month outside 1..=12.
pub const fn days_in_month(year: i64, month: u8) -> u8 {
    match month {
        FEBRUARY if is_leap_year(year) => FEBRUARY_DAYS_LEAP,
        1..=MAX_MONTH => DAYS_IN_MONTH[month as usize],
        _ => 0,
    }
}

/// JDN of 0001-01-01
const FIRST_JDN: i64 = civil_to_jdn(1, 1, 1);
/// JDN of 10000-01-01
const PAST_LAST_JDN: i64 = civil_to_jdn(MAX_YEAR as i64 + 1, 1, 1);

/// Span of day numbers the closed-form year formulas handle without
/// overflow, from Julian day 0 onwards.
const FORMULA_MIN_JDN: i64 = 0;
const FORMULA_MAX_JDN: i64 = 1_000_000_000_000;

/// Pins `jdn` into the span the civil formulas accept. Used only to name a
/// year in an error for a day that is already out of range.
pub(crate) const fn formula_safe(jdn: i64) -> i64 {
    if jdn < FORMULA_MIN_JDN {
        FORMULA_MIN_JDN
    } else if jdn > FORMULA_MAX_JDN {
        FORMULA_MAX_JDN
    } else {
        jdn
    }
}

/// Gregorian year of a day number, saturating far outside the formulas' span.
pub(crate) const fn year_of(jdn: i64) -> i64 {
    jdn_to_civil(formula_safe(jdn)).0
}

/// Fliegel and Van Flandern, valid for years after -4800. Relies on `/`
/// truncating toward zero.
pub(crate) const fn civil_to_jdn(year: i64, month: u8, day: u8) -> i64 {
    let (m, d) = (month as i64, day as i64);
    let a = (m - 14) / 12;
    (1461 * (year + 4800 + a)) / 4 + (367 * (m - 2 - 12 * a)) / 12
        - (3 * ((year + 4900 + a) / 100)) / 4
        + d
        - 32075
}

pub(crate) const fn jdn_to_civil(jdn: i64) -> (i64, u8, u8) {
    let f = jdn + 1401 + (((4 * jdn + 274_277) / 146_097) * 3) / 4 - 38;
    let e = 4 * f + 3;
    let g = (e % 1461) / 4;
    let h = 5 * g + 2;
    let day = (h % 153) / 5 + 1;
    let month = (h / 153 + 2) % 12 + 1;
    let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
    (year, month as u8, day as u8)
}

/// Checks month and day against the Gregorian tables, any year.
pub(crate) fn validate(year: i64, month: u8, day: u8) -> Result<(), CalendarError> {
    if month == 0 || month > MAX_MONTH {
        return Err(CalendarError::InvalidMonth { year, month });
    }
    if !(MIN_DAY..=days_in_month(year, month)).contains(&day) {
        return Err(CalendarError::InvalidDay { year, month, day });
    }
    Ok(())
}

impl GregorianDate {
    /// Creates a validated Gregorian date.
    ///
    /// # Errors
    /// Returns `InvalidYear`, `InvalidMonth` or `InvalidDay` for a triple that
    /// does not exist.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, CalendarError> {
        let year = Year::new(year)?;
        validate(year.wide(), month, day)?;
        Ok(Self { year, month, day })
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    pub const fn days_in_month(&self) -> u8 {
        days_in_month(self.year.wide(), self.month)
    }

    /// 1-based ordinal day within the year.
    pub const fn day_of_year(&self) -> u16 {
        let mut total = self.day as u16;
        let mut month = 1;
        while month < self.month {
            total += days_in_month(self.year.wide(), month) as u16;
            month += 1;
        }
        total
    }

    /// Same day in the proleptic Julian calendar.
    ///
    /// # Errors
    /// Returns `InvalidYear` if the Julian label falls before year 1.
    pub fn to_julian(&self) -> Result<JulianDate, CalendarError> {
        self.convert()
    }

    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year.get()),
            u32::from(self.month),
            u32::from(self.day),
        )
    }

    /// # Errors
    /// Returns `InvalidYear` if the chrono date lies outside years 1..=9999.
    pub fn from_naive_date(date: NaiveDate) -> Result<Self, CalendarError> {
        Self::from_jdn(Jdn::from_naive_date(date))
    }

    /// Midnight at the start of this date in the named zone (UTC if `None`).
    ///
    /// # Errors
    /// Returns `UnsupportedTimezone` for a zone name the tz database lacks.
    pub fn to_zoned(&self, zone: Option<&str>) -> Result<DateTime<Tz>, CalendarError> {
        let tz = zone::resolve(zone)?;
        let midnight = self
            .to_naive_date()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or(CalendarError::SearchDivergence(self.to_jdn().get()))?;
        zone::attach(midnight, tz)
    }
}

impl Calendar for GregorianDate {
    fn to_jdn(&self) -> Jdn {
        Jdn::new(civil_to_jdn(self.year.wide(), self.month, self.day))
    }

    fn from_jdn(jdn: Jdn) -> Result<Self, CalendarError> {
        let jdn = jdn.get();
        if !(FIRST_JDN..PAST_LAST_JDN).contains(&jdn) {
            return Err(CalendarError::year_out_of_range(year_of(jdn), MIN_YEAR, MAX_YEAR));
        }
        let (year, month, day) = jdn_to_civil(jdn);
        Ok(Self {
            year: Year::try_from(year)?,
            month,
            day,
        })
    }

    fn is_leap_year(&self) -> bool {
        is_leap_year(self.year.wide())
    }
}

impl FromStr for GregorianDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month, day) = parse_ymd(s)?;
        Self::new(Year::try_from(year)?.get(), month, day)
    }
}

impl serde::Serialize for GregorianDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for GregorianDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
