use crate::calendar::{Calendar, parse_ymd};
use crate::consts::{
    DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_REFORM_JDN, LEAP_YEAR_CYCLE, MAX_MONTH,
    MAX_YEAR, MIN_CIVIL_YEAR, MIN_DAY, MIN_YEAR, OCTOBER, REFORM_GAP_DAYS, REFORM_YEAR,
};
use crate::error::CalendarError;
use crate::gregorian::{self, GregorianDate};
use crate::jdn::Jdn;
use crate::prelude::*;
use crate::types::Year;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A date in the proleptic Julian calendar, years 1..=9999.
///
/// Every fourth year is a leap year with no century exception, and the
/// calendar runs on past 1582 as if the reform never happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month", "day")]
pub struct JulianDate {
    year: Year,
    month: u8,
    day: u8,
}

/// Which civil calendar labels a day.
///
/// The day number is the same in every mode; only the `(year, month, day)`
/// label differs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reckoning {
    /// Gregorian rules for every year.
    ProlepticGregorian,
    /// Julian rules for every year.
    ProlepticJulian,
    /// Julian labels through 1582-10-04, Gregorian labels from 1582-10-15.
    /// The ten labels in between do not exist.
    #[default]
    Historical,
}

pub const fn is_leap_year(year: i64) -> bool {
    year.rem_euclid(LEAP_YEAR_CYCLE) == 0
}

/// Length of `month` in `year`, or 0 for a month outside 1..=12.
pub const fn days_in_month(year: i64, month: u8) -> u8 {
    match month {
        FEBRUARY if is_leap_year(year) => FEBRUARY_DAYS_LEAP,
        1..=MAX_MONTH => DAYS_IN_MONTH[month as usize],
        _ => 0,
    }
}

/// JDN of Julian 0001-01-01
const FIRST_JDN: i64 = civil_to_jdn(1, 1, 1);
/// JDN of Julian 10000-01-01
const PAST_LAST_JDN: i64 = civil_to_jdn(MAX_YEAR as i64 + 1, 1, 1);

/// First day any reckoning labels: Julian `MIN_CIVIL_YEAR`-01-01
const FIRST_CIVIL_JDN: i64 = civil_to_jdn(MIN_CIVIL_YEAR, 1, 1);
/// Gregorian 10000-01-01, past the last day any reckoning labels
const PAST_LAST_CIVIL_JDN: i64 = gregorian::civil_to_jdn(MAX_YEAR as i64 + 1, 1, 1);

/// Valid for years after -4800.
pub(crate) const fn civil_to_jdn(year: i64, month: u8, day: u8) -> i64 {
    let m = month as i64;
    let a = (14 - m) / 12;
    let y = year + 4800 - a;
    let m = m + 12 * a - 3;
    day as i64 + (153 * m + 2) / 5 + 365 * y + y / 4 - 32083
}

pub(crate) const fn jdn_to_civil(jdn: i64) -> (i64, u8, u8) {
    let c = jdn + 32082;
    let d = (4 * c + 3) / 1461;
    let e = c - (1461 * d) / 4;
    let m = (5 * e + 2) / 153;
    let day = e - (153 * m + 2) / 5 + 1;
    let month = m + 3 - 12 * (m / 10);
    let year = d - 4800 + m / 10;
    (year, month as u8, day as u8)
}

fn validate(year: i64, month: u8, day: u8) -> Result<(), CalendarError> {
    if month == 0 || month > MAX_MONTH {
        return Err(CalendarError::InvalidMonth { year, month });
    }
    if !(MIN_DAY..=days_in_month(year, month)).contains(&day) {
        return Err(CalendarError::InvalidDay { year, month, day });
    }
    Ok(())
}

impl Reckoning {
    /// Day number of a civil label under this reckoning.
    ///
    /// # Errors
    /// Returns `InvalidYear` outside `MIN_CIVIL_YEAR..=MAX_YEAR`, `InvalidMonth`
    /// or `InvalidDay` for a label the reckoning does not contain, including
    /// the dropped days of October 1582 in `Historical` mode.
    pub fn to_jdn(self, year: i64, month: u8, day: u8) -> Result<Jdn, CalendarError> {
        if !(MIN_CIVIL_YEAR..=i64::from(MAX_YEAR)).contains(&year) {
            return Err(CalendarError::year_out_of_range(year, MIN_CIVIL_YEAR, MAX_YEAR));
        }

        let julian_labels = match self {
            Self::ProlepticGregorian => false,
            Self::ProlepticJulian => true,
            Self::Historical => {
                let (first_dropped, last_dropped) = REFORM_GAP_DAYS;
                let label = (year, month, day);
                let dropped = (REFORM_YEAR, OCTOBER, first_dropped)
                    ..=(REFORM_YEAR, OCTOBER, last_dropped);
                if dropped.contains(&label) {
                    return Err(CalendarError::InvalidDay { year, month, day });
                }
                label < *dropped.start()
            }
        };

        if julian_labels {
            validate(year, month, day)?;
            Ok(Jdn::new(civil_to_jdn(year, month, day)))
        } else {
            gregorian::validate(year, month, day)?;
            Ok(Jdn::new(gregorian::civil_to_jdn(year, month, day)))
        }
    }

    /// Civil label of a day number under this reckoning, for days from Julian
    /// `MIN_CIVIL_YEAR`-01-01 up to Gregorian 9999-12-31.
    ///
    /// # Errors
    /// Returns `InvalidYear` for a day outside that span.
    pub fn label(self, jdn: Jdn) -> Result<(i64, u8, u8), CalendarError> {
        let day = jdn.get();
        if day < FIRST_CIVIL_JDN {
            let year = self.label_in_span(Jdn::new(gregorian::formula_safe(day))).0;
            return Err(CalendarError::year_out_of_range(
                year.min(MIN_CIVIL_YEAR - 1),
                MIN_CIVIL_YEAR,
                MAX_YEAR,
            ));
        }
        if day >= PAST_LAST_CIVIL_JDN {
            let year = self.label_in_span(Jdn::new(gregorian::formula_safe(day))).0;
            return Err(CalendarError::year_out_of_range(
                year.max(i64::from(MAX_YEAR) + 1),
                MIN_CIVIL_YEAR,
                MAX_YEAR,
            ));
        }
        Ok(self.label_in_span(jdn))
    }

    /// Label without the span check; `jdn` must lie where the formulas hold.
    pub(crate) const fn label_in_span(self, jdn: Jdn) -> (i64, u8, u8) {
        let julian_labels = match self {
            Self::ProlepticGregorian => false,
            Self::ProlepticJulian => true,
            Self::Historical => jdn.get() < GREGORIAN_REFORM_JDN,
        };
        if julian_labels {
            jdn_to_civil(jdn.get())
        } else {
            gregorian::jdn_to_civil(jdn.get())
        }
    }
}

impl JulianDate {
    /// Creates a validated proleptic Julian date.
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

    /// Whether the Gregorian reform had already replaced this label.
    pub const fn is_after_reform(&self) -> bool {
        civil_to_jdn(self.year.wide(), self.month, self.day) >= GREGORIAN_REFORM_JDN
    }

    /// # Errors
    /// Returns `InvalidYear` if the Gregorian label falls past year 9999.
    pub fn to_gregorian(&self) -> Result<GregorianDate, CalendarError> {
        self.convert()
    }
}

impl Calendar for JulianDate {
    fn to_jdn(&self) -> Jdn {
        Jdn::new(civil_to_jdn(self.year.wide(), self.month, self.day))
    }

    fn from_jdn(jdn: Jdn) -> Result<Self, CalendarError> {
        let jdn = jdn.get();
        if !(FIRST_JDN..PAST_LAST_JDN).contains(&jdn) {
            let (year, _, _) = jdn_to_civil(gregorian::formula_safe(jdn));
            let year = if jdn < FIRST_JDN {
                year.min(i64::from(MIN_YEAR) - 1)
            } else {
                year.max(i64::from(MAX_YEAR) + 1)
            };
            return Err(CalendarError::year_out_of_range(year, MIN_YEAR, MAX_YEAR));
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

impl FromStr for JulianDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month, day) = parse_ymd(s)?;
        Self::new(Year::try_from(year)?.get(), month, day)
    }
}

impl serde::Serialize for JulianDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for JulianDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
