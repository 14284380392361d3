//! Persian (Solar Hijri) calendar.
//!
//! Leap years follow Borkowski's break table rather than a fixed 33-year
//! cycle, so the year holding a given day is found by binary search over the
//! first days of the years.

use crate::calendar::{Calendar, parse_ymd};
use crate::consts::{MAX_YEAR, MIN_DAY, MIN_YEAR};
use crate::error::CalendarError;
use crate::gregorian;
use crate::jdn::Jdn;
use crate::prelude::*;
use crate::types::Year;
use std::str::FromStr;

pub const FARVARDIN: u8 = 1;
pub const MEHR: u8 = 7;
pub const ESFAND: u8 = 12;

/// JDN of 1 Farvardin 1 AP (Julian 622-03-19)
pub const PERSIAN_EPOCH_JDN: i64 = 1_948_321;

/// Years at which the leap pattern restarts. The final entry extends the
/// last segment past year 9999.
const BREAKS: [i64; 21] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178, 10_001,
];

/// Offset between Persian and Gregorian year numbers at Nowruz
const GREGORIAN_YEAR_OFFSET: i64 = 621;
const CYCLE_YEARS: i64 = 33;
const LEAPS_PER_CYCLE: i64 = 8;
/// Days in Farvardin through Shahrivar
const FIRST_HALF_DAYS: i64 = 186;
const LONG_MONTH: i64 = 31;
const SHORT_MONTH: i64 = 30;

/// Position in the leap pattern and the Gregorian date of Nowruz.
struct YearInfo {
    /// Years since the last leap year; 0 means `year` itself is leap.
    since_leap: i64,
    gregorian_year: i64,
    march_day: u8,
}

/// Walks the break table for `year`.
const fn year_info(year: i64) -> YearInfo {
    let gregorian_year = year + GREGORIAN_YEAR_OFFSET;
    let mut leap_persian = -14;
    let mut previous = BREAKS[0];
    let mut jump = 0;

    let mut i = 1;
    while i < BREAKS.len() {
        let current = BREAKS[i];
        jump = current - previous;
        if year < current {
            break;
        }
        leap_persian += jump / CYCLE_YEARS * LEAPS_PER_CYCLE + (jump % CYCLE_YEARS) / 4;
        previous = current;
        i += 1;
    }

    let mut n = year - previous;
    leap_persian += n / CYCLE_YEARS * LEAPS_PER_CYCLE + ((n % CYCLE_YEARS) + 3) / 4;
    if jump % CYCLE_YEARS == 4 && jump - n == 4 {
        leap_persian += 1;
    }

    let leap_gregorian = gregorian_year / 4 - ((gregorian_year / 100 + 1) * 3) / 4 - 150;
    let march_day = 20 + leap_persian - leap_gregorian;

    if jump - n < 6 {
        n = n - jump + (jump + 4) / CYCLE_YEARS * CYCLE_YEARS;
    }
    let mut since_leap = ((n + 1) % CYCLE_YEARS - 1) % 4;
    if since_leap == -1 {
        since_leap = 4;
    }

    YearInfo {
        since_leap,
        gregorian_year,
        march_day: march_day as u8,
    }
}

pub const fn is_leap_year(year: i64) -> bool {
    year_info(year).since_leap == 0
}

/// JDN of 1 Farvardin of `year`.
pub const fn year_start(year: i64) -> Jdn {
    let info = year_info(year);
    Jdn::new(gregorian::civil_to_jdn(info.gregorian_year, 3, info.march_day))
}

/// Days from the epoch to 1 Farvardin of `year`; increasing in `year`.
pub const fn cumulative_days(year: i64) -> i64 {
    year_start(year).get() - PERSIAN_EPOCH_JDN
}

pub const fn days_in_year(year: i64) -> i64 {
    cumulative_days(year + 1) - cumulative_days(year)
}

pub const fn days_in_month(year: i64, month: u8) -> u8 {
    match month {
        1..=6 => 31,
        7..=11 => 30,
        ESFAND => {
            if is_leap_year(year) {
                30
            } else {
                29
            }
        }
        _ => 0,
    }
}

/// Year whose day range contains `jdn`.
///
/// # Errors
/// Returns `SearchDivergence` if `jdn` lies before year 1 or after year 9999.
pub fn year_containing(jdn: Jdn) -> Result<u16, CalendarError> {
    let offset = jdn
        .get()
        .checked_sub(PERSIAN_EPOCH_JDN)
        .ok_or(CalendarError::SearchDivergence(jdn.get()))?;
    let mut low = i64::from(MIN_YEAR);
    let mut high = i64::from(MAX_YEAR);
    if offset < cumulative_days(low) || offset >= cumulative_days(high + 1) {
        return Err(CalendarError::SearchDivergence(jdn.get()));
    }

    while low < high {
        let mid = (low + high + 1) / 2;
        if cumulative_days(mid) <= offset {
            low = mid;
        } else {
            high = mid - 1;
        }
    }

    u16::try_from(low).map_err(|_| CalendarError::SearchDivergence(jdn.get()))
}

/// A date in the Persian calendar, years 1..=9999 AP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month", "day")]
pub struct PersianDate {
    year: Year,
    month: u8,
    day: u8,
}

impl PersianDate {
    /// Creates a validated Persian date.
    ///
    /// # Errors
    /// Returns `InvalidYear`, `InvalidMonth` or `InvalidDay` for a triple that
    /// does not exist.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, CalendarError> {
        let year = Year::new(year)?;
        let wide = year.wide();
        if !(FARVARDIN..=ESFAND).contains(&month) {
            return Err(CalendarError::InvalidMonth { year: wide, month });
        }
        if !(MIN_DAY..=days_in_month(wide, month)).contains(&day) {
            return Err(CalendarError::InvalidDay {
                year: wide,
                month,
                day,
            });
        }
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

    /// 1-based day within the year.
    pub const fn day_of_year(&self) -> i64 {
        let month = self.month as i64;
        let before = if self.month <= MEHR {
            LONG_MONTH * (month - 1)
        } else {
            SHORT_MONTH * (month - 1) + 6
        };
        before + self.day as i64
    }
}

impl Calendar for PersianDate {
    fn to_jdn(&self) -> Jdn {
        year_start(self.year.wide()) + (self.day_of_year() - 1)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_jdn(jdn: Jdn) -> Result<Self, CalendarError> {
        let year = year_containing(jdn)?;
        let day_of_year = jdn - year_start(i64::from(year));

        let (month, day) = if day_of_year < FIRST_HALF_DAYS {
            (day_of_year / LONG_MONTH + 1, day_of_year % LONG_MONTH + 1)
        } else {
            let rest = day_of_year - FIRST_HALF_DAYS;
            (rest / SHORT_MONTH + 7, rest % SHORT_MONTH + 1)
        };

        Ok(Self {
            year: Year::new(year)?,
            month: month as u8,
            day: day as u8,
        })
    }

    fn is_leap_year(&self) -> bool {
        is_leap_year(self.year.wide())
    }
}

impl FromStr for PersianDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month, day) = parse_ymd(s)?;
        Self::new(Year::try_from(year)?.get(), month, day)
    }
}

impl serde::Serialize for PersianDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for PersianDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
