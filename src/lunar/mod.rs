//! Chinese lunisolar calendar, table driven for lunar years 1900 through 2100.
//!
//! A year has twelve numbered months of 29 or 30 days. Some years insert a
//! leap month after one of them, carrying the same number. A date therefore
//! needs a leap flag next to its month to be unambiguous.

mod table;

use crate::calendar::{Calendar, parse_ymd};
use crate::consts::MIN_DAY;
use crate::error::CalendarError;
use crate::gregorian;
use crate::jdn::Jdn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use table::{FIRST_NEW_YEAR_JDN, FIRST_YEAR, LAST_YEAR};

const FIRST_MONTH: u8 = 1;
const LAST_MONTH: u8 = 12;
const SEXAGENARY_CYCLE: i64 = 60;
/// Shifts a year so that 1984 (甲子) lands on cycle number 1
const SEXAGENARY_SHIFT: i64 = 2696;

/// One lunar year of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LunarYear {
    year: u16,
    info: u32,
}

impl LunarYear {
    /// Looks up `year` in the table.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidYear` outside 1900..=2100.
    pub fn new(year: u16) -> Result<Self, CalendarError> {
        if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
            return Err(CalendarError::year_out_of_range(year, FIRST_YEAR, LAST_YEAR));
        }
        Ok(Self {
            year,
            info: table::YEAR_INFO[usize::from(year - FIRST_YEAR)],
        })
    }

    /// Year holding the day `offset` days after lunar 1900-01-01, with the
    /// offset of its first day.
    fn containing(offset: i64) -> Option<(Self, i64)> {
        let end = table::YEAR_OFFSETS[table::YEAR_OFFSETS.len() - 1];
        if !(0..end).contains(&offset) {
            return None;
        }
        let index = table::YEAR_OFFSETS.partition_point(|&start| start <= offset) - 1;
        let year = FIRST_YEAR + u16::try_from(index).ok()?;
        Some((Self::new(year).ok()?, table::YEAR_OFFSETS[index]))
    }

    pub const fn year(&self) -> u16 {
        self.year
    }

    /// The month repeated as a leap month this year, if any.
    pub const fn leap_month(&self) -> Option<u8> {
        match table::leap_month(self.info) {
            0 => None,
            month => Some(month),
        }
    }

    /// Length of regular `month`, 0 for a month outside 1..=12.
    pub const fn days_in_month(&self, month: u8) -> u8 {
        if month < FIRST_MONTH || month > LAST_MONTH {
            return 0;
        }
        table::days_in_month(self.info, month)
    }

    /// Length of the leap month, 0 when the year has none.
    pub const fn days_in_leap_month(&self) -> u8 {
        table::days_in_leap_month(self.info)
    }

    pub const fn days_in_year(&self) -> u16 {
        table::days_in_year(self.info)
    }

    /// JDN of the first day of the year.
    pub fn first_jdn(&self) -> Jdn {
        let index = usize::from(self.year - FIRST_YEAR);
        Jdn::new(FIRST_NEW_YEAR_JDN + table::YEAR_OFFSETS[index])
    }

    /// Days in the year before the first day of `month`, or of its leap
    /// twin when `leap` is set.
    ///
    /// # Errors
    /// Returns `InvalidMonth` outside 1..=12 and `InvalidLeapMonth` if `leap`
    /// is set but `month` is not this year's leap month.
    pub fn offset_in_year(&self, month: u8, leap: bool) -> Result<u16, CalendarError> {
        let year = i64::from(self.year);
        if !(FIRST_MONTH..=LAST_MONTH).contains(&month) {
            return Err(CalendarError::InvalidMonth { year, month });
        }
        if leap && self.leap_month() != Some(month) {
            return Err(CalendarError::InvalidLeapMonth { year, month });
        }
        Ok(self.days_before(month, leap))
    }

    /// `offset_in_year` for a month already checked against the year.
    fn days_before(&self, month: u8, leap: bool) -> u16 {
        let leap_month = table::leap_month(self.info);
        let mut offset: u16 = (FIRST_MONTH..month)
            .map(|m| u16::from(self.days_in_month(m)))
            .sum();
        if leap_month != 0 && leap_month < month {
            offset += u16::from(self.days_in_leap_month());
        }
        if leap {
            offset += u16::from(self.days_in_month(month));
        }
        offset
    }

    /// Month, leap flag and day of the `day_offset`-th day of the year.
    fn locate(&self, mut day_offset: i64) -> Option<(u8, bool, u8)> {
        let leap_month = self.leap_month();
        for month in FIRST_MONTH..=LAST_MONTH {
            let length = i64::from(self.days_in_month(month));
            if day_offset < length {
                return Some((month, false, u8::try_from(day_offset + 1).ok()?));
            }
            day_offset -= length;

            if leap_month == Some(month) {
                let length = i64::from(self.days_in_leap_month());
                if day_offset < length {
                    return Some((month, true, u8::try_from(day_offset + 1).ok()?));
                }
                day_offset -= length;
            }
        }
        None
    }
}

/// A date in the Chinese lunar calendar.
///
/// Fields are ordered so the derived `Ord` is chronological: a leap month
/// follows the regular month of the same number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "LunarFields", into = "LunarFields")]
pub struct LunarDate {
    year: u16,
    month: u8,
    leap_month: bool,
    day: u8,
}

impl LunarDate {
    /// Creates a validated lunar date.
    ///
    /// # Errors
    /// - `InvalidYear` outside 1900..=2100
    /// - `InvalidMonth` outside 1..=12
    /// - `InvalidLeapMonth` if `leap_month` is set but `month` is not this
    ///   year's leap month
    /// - `InvalidDay` beyond the length of the month
    pub fn new(year: u16, month: u8, day: u8, leap_month: bool) -> Result<Self, CalendarError> {
        let lunar_year = LunarYear::new(year)?;
        let wide = i64::from(year);
        if !(FIRST_MONTH..=LAST_MONTH).contains(&month) {
            return Err(CalendarError::InvalidMonth { year: wide, month });
        }

        let length = if leap_month {
            if lunar_year.leap_month() != Some(month) {
                return Err(CalendarError::InvalidLeapMonth { year: wide, month });
            }
            lunar_year.days_in_leap_month()
        } else {
            lunar_year.days_in_month(month)
        };

        if !(MIN_DAY..=length).contains(&day) {
            return Err(CalendarError::InvalidDay {
                year: wide,
                month,
                day,
            });
        }

        Ok(Self {
            year,
            month,
            leap_month,
            day,
        })
    }

    pub const fn year(&self) -> u16 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Whether the date lies in the year's leap month.
    pub const fn is_leap_month(&self) -> bool {
        self.leap_month
    }

    /// Table entry for the date's year.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidYear` only for a year outside the table,
    /// which a constructed date never holds.
    pub fn lunar_year(&self) -> Result<LunarYear, CalendarError> {
        LunarYear::new(self.year)
    }

    pub fn days_in_month(&self) -> u8 {
        match LunarYear::new(self.year) {
            Ok(year) if self.leap_month => year.days_in_leap_month(),
            Ok(year) => year.days_in_month(self.month),
            Err(_) => 0,
        }
    }

    /// Position of the year in the sixty-year cycle, 1 (甲子) through 60 (癸亥).
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn sexagenary_year(&self) -> u8 {
        ((self.year as i64 + SEXAGENARY_SHIFT).rem_euclid(SEXAGENARY_CYCLE) + 1) as u8
    }
}

impl Calendar for LunarDate {
    fn to_jdn(&self) -> Jdn {
        let index = usize::from(self.year - FIRST_YEAR);
        let info = table::YEAR_INFO[index];
        let year = LunarYear {
            year: self.year,
            info,
        };
        year.first_jdn()
            + i64::from(year.days_before(self.month, self.leap_month))
            + i64::from(self.day - 1)
    }

    fn from_jdn(jdn: Jdn) -> Result<Self, CalendarError> {
        let offset = jdn.get().saturating_sub(FIRST_NEW_YEAR_JDN);
        let Some((year, start)) = LunarYear::containing(offset) else {
            let gregorian_year = gregorian::year_of(jdn.get());
            let year = if offset < 0 {
                gregorian_year.min(i64::from(FIRST_YEAR) - 1)
            } else {
                gregorian_year.max(i64::from(LAST_YEAR) + 1)
            };
            return Err(CalendarError::year_out_of_range(year, FIRST_YEAR, LAST_YEAR));
        };

        let (month, leap_month, day) = year
            .locate(offset - start)
            .ok_or(CalendarError::SearchDivergence(jdn.get()))?;

        Ok(Self {
            year: year.year(),
            month,
            leap_month,
            day,
        })
    }

    fn is_leap_year(&self) -> bool {
        LunarYear::new(self.year).is_ok_and(|year| year.leap_month().is_some())
    }
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Parses `YYYY-MM-DD` as a date in a regular month.
impl FromStr for LunarDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month, day) = parse_ymd(s)?;
        let year = u16::try_from(year)
            .map_err(|_| CalendarError::year_out_of_range(year, FIRST_YEAR, LAST_YEAR))?;
        Self::new(year, month, day, false)
    }
}

#[derive(Serialize, Deserialize)]
struct LunarFields {
    year: u16,
    month: u8,
    day: u8,
    #[serde(default)]
    leap_month: bool,
}

impl TryFrom<LunarFields> for LunarDate {
    type Error = CalendarError;

    fn try_from(fields: LunarFields) -> Result<Self, Self::Error> {
        Self::new(fields.year, fields.month, fields.day, fields.leap_month)
    }
}

impl From<LunarDate> for LunarFields {
    fn from(date: LunarDate) -> Self {
        Self {
            year: date.year,
            month: date.month,
            day: date.day,
            leap_month: date.leap_month,
        }
    }
}
