use crate::prelude::*;
use crate::types::Weekday;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// JDN of 0001-01-01 (proleptic Gregorian) minus one, the offset between
/// chrono's day count from the common era and the Julian Day Number.
const CE_OFFSET: i64 = 1_721_425;

/// Julian Day Number: the civil day count shared by every calendar.
///
/// The day numbered `n` is the one whose noon is Julian date `n`, so
/// JDN 2451545 is 2000-01-01. Ordering of two `Jdn` values is chronological
/// regardless of which calendar produced them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Jdn(i64);

impl Jdn {
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Day of the week of this civil day.
    pub const fn weekday(self) -> Weekday {
        Weekday::from_monday_index(self.0)
    }

    /// Day number of a chrono date, read as proleptic Gregorian.
    pub fn from_naive_date(date: NaiveDate) -> Self {
        Self(i64::from(date.num_days_from_ce()) + CE_OFFSET)
    }

    /// Proleptic Gregorian chrono date, if chrono can represent it.
    pub fn to_naive_date(self) -> Option<NaiveDate> {
        let days = i32::try_from(self.0 - CE_OFFSET).ok()?;
        NaiveDate::from_num_days_from_ce_opt(days)
    }
}

impl Add<i64> for Jdn {
    type Output = Self;

    fn add(self, days: i64) -> Self {
        Self(self.0 + days)
    }
}

impl AddAssign<i64> for Jdn {
    fn add_assign(&mut self, days: i64) {
        self.0 += days;
    }
}

impl Sub<i64> for Jdn {
    type Output = Self;

    fn sub(self, days: i64) -> Self {
        Self(self.0 - days)
    }
}

impl SubAssign<i64> for Jdn {
    fn sub_assign(&mut self, days: i64) {
        self.0 -= days;
    }
}

impl Sub for Jdn {
    type Output = i64;

    fn sub(self, other: Self) -> i64 {
        self.0 - other.0
    }
}
