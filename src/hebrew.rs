//! Hebrew (lunisolar) calendar.
//!
//! Months are numbered from Nisan as in the biblical count, while the year
//! number changes on 1 Tishrei (month 7). A year's first day follows from
//! the molad of Tishrei and the four postponement rules (dehiyyot).

use crate::calendar::{Calendar, parse_ymd};
use crate::consts::{MAX_YEAR, MIN_DAY, MIN_YEAR};
use crate::error::CalendarError;
use crate::jdn::Jdn;
use crate::types::Year;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub const NISAN: u8 = 1;
pub const IYAR: u8 = 2;
pub const SIVAN: u8 = 3;
pub const TAMMUZ: u8 = 4;
pub const AV: u8 = 5;
pub const ELUL: u8 = 6;
pub const TISHREI: u8 = 7;
pub const HESHVAN: u8 = 8;
pub const KISLEV: u8 = 9;
pub const TEVET: u8 = 10;
pub const SHEVAT: u8 = 11;
/// Adar in a common year, Adar I in a leap year
pub const ADAR: u8 = 12;
/// Only in leap years
pub const ADAR_II: u8 = 13;

pub const PARTS_PER_HOUR: i64 = 1080;
pub const PARTS_PER_DAY: i64 = 24 * PARTS_PER_HOUR;
/// Mean synodic month: 29 days, 12 hours, 793 parts
pub const PARTS_PER_MONTH: i64 = 29 * PARTS_PER_DAY + 12 * PARTS_PER_HOUR + 793;
/// Molad of Tishrei of year 1 (BaHaRaD): day 1, 5 hours, 204 parts
const MOLAD_BAHARAD: i64 = PARTS_PER_DAY + 5 * PARTS_PER_HOUR + 204;
/// JDN of the Sunday that molad days are counted from
const MOLAD_EPOCH_JDN: i64 = 347_997;

/// Noon: 18 hours after the 6 pm start of the day
const MOLAD_ZAKEN_PARTS: i64 = 18 * PARTS_PER_HOUR;
/// 9 hours, 204 parts
const GATARAD_PARTS: i64 = 9 * PARTS_PER_HOUR + 204;
/// 15 hours, 589 parts
const BETUTAKPAT_PARTS: i64 = 15 * PARTS_PER_HOUR + 589;

/// Molad weekdays, counted from Sunday = 0
const MONDAY: i64 = 1;
const TUESDAY: i64 = 2;
const SUNDAY: i64 = 0;
const WEDNESDAY: i64 = 3;
const FRIDAY: i64 = 5;

const METONIC_CYCLE: i64 = 19;
const MONTHS_PER_CYCLE: i64 = 235;

/// Mean year length as a fraction, used for the first guess in `from_jdn`
const MEAN_YEAR_NUMERATOR: i64 = 98_496;
const MEAN_YEAR_DENOMINATOR: i64 = 35_975_351;

pub const fn is_leap_year(year: i64) -> bool {
    (7 * year + 1).rem_euclid(METONIC_CYCLE) < 7
}

pub const fn months_in_year(year: i64) -> u8 {
    if is_leap_year(year) { ADAR_II } else { ADAR }
}

/// Lunar months from the epoch molad to Tishrei of `year`.
pub const fn months_elapsed(year: i64) -> i64 {
    (MONTHS_PER_CYCLE * year - (MONTHS_PER_CYCLE - 1)).div_euclid(METONIC_CYCLE)
}

/// Mean conjunction, as whole days since the epoch Sunday plus parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Molad {
    pub day: i64,
    pub parts: i64,
}

impl Molad {
    /// Molad of Tishrei that opens `year`.
    pub const fn of_year(year: i64) -> Self {
        let total = MOLAD_BAHARAD + months_elapsed(year) * PARTS_PER_MONTH;
        Self {
            day: total.div_euclid(PARTS_PER_DAY),
            parts: total.rem_euclid(PARTS_PER_DAY),
        }
    }

    /// Day of the week, Sunday = 0.
    pub const fn weekday(&self) -> i64 {
        self.day.rem_euclid(7)
    }

    pub const fn hours(&self) -> i64 {
        self.parts / PARTS_PER_HOUR
    }
}

impl fmt::Display for Molad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "day {} {}h {}p",
            self.day,
            self.hours(),
            self.parts % PARTS_PER_HOUR
        )
    }
}

/// Postponement rules that moved a year's first day off its molad day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dehiyyot {
    /// Molad at or after noon.
    pub molad_zaken: bool,
    /// Tuesday molad at or after 9h 204p in a common year.
    pub gatarad: bool,
    /// Monday molad at or after 15h 589p right after a leap year.
    pub betutakpat: bool,
    /// The candidate day was a Sunday, Wednesday or Friday.
    pub lo_adu_rosh: bool,
}

impl Dehiyyot {
    /// Days added to the molad day.
    pub const fn postponement(&self) -> i64 {
        let first = self.molad_zaken || self.gatarad || self.betutakpat;
        first as i64 + self.lo_adu_rosh as i64
    }
}

/// First day of a year with the computation that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearStart {
    pub year: i64,
    pub jdn: Jdn,
    pub molad: Molad,
    pub dehiyyot: Dehiyyot,
}

impl YearStart {
    /// Applies the molad and the four dehiyyot in order. Unbounded in year.
    pub const fn compute(year: i64) -> Self {
        let molad = Molad::of_year(year);
        let weekday = molad.weekday();

        let molad_zaken = molad.parts >= MOLAD_ZAKEN_PARTS;
        let gatarad = !molad_zaken
            && weekday == TUESDAY
            && molad.parts >= GATARAD_PARTS
            && !is_leap_year(year);
        let betutakpat = !molad_zaken
            && !gatarad
            && weekday == MONDAY
            && molad.parts >= BETUTAKPAT_PARTS
            && is_leap_year(year - 1);

        let mut day = molad.day;
        if molad_zaken || gatarad || betutakpat {
            day += 1;
        }
        let lo_adu_rosh = matches!(day.rem_euclid(7), SUNDAY | WEDNESDAY | FRIDAY);
        if lo_adu_rosh {
            day += 1;
        }

        Self {
            year,
            jdn: Jdn::new(MOLAD_EPOCH_JDN + day),
            molad,
            dehiyyot: Dehiyyot {
                molad_zaken,
                gatarad,
                betutakpat,
                lo_adu_rosh,
            },
        }
    }
}

/// Classification of a year by the lengths of Heshvan and Kislev.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YearKind {
    /// Heshvan and Kislev both 29 days (353 or 383 days)
    Deficient,
    /// Heshvan 29, Kislev 30 (354 or 384 days)
    Regular,
    /// Heshvan and Kislev both 30 days (355 or 385 days)
    Complete,
}

const fn new_year(year: i64) -> i64 {
    YearStart::compute(year).jdn.get()
}

pub const fn days_in_year(year: i64) -> i64 {
    new_year(year + 1) - new_year(year)
}

pub const fn year_kind(year: i64) -> YearKind {
    match days_in_year(year) % 10 {
        3 => YearKind::Deficient,
        5 => YearKind::Complete,
        _ => YearKind::Regular,
    }
}

/// Length of `month` in `year`, or 0 for a month the year lacks.
pub const fn days_in_month(year: i64, month: u8) -> u8 {
    match month {
        IYAR | TAMMUZ | ELUL | TEVET | ADAR_II if month <= months_in_year(year) => 29,
        ADAR => {
            if is_leap_year(year) {
                30
            } else {
                29
            }
        }
        HESHVAN => match year_kind(year) {
            YearKind::Complete => 30,
            _ => 29,
        },
        KISLEV => match year_kind(year) {
            YearKind::Deficient => 29,
            _ => 30,
        },
        NISAN | SIVAN | AV | TISHREI | SHEVAT => 30,
        _ => 0,
    }
}

/// Months of `year` in the order they occur, Tishrei first.
fn civil_order(year: i64) -> impl Iterator<Item = u8> {
    (TISHREI..=months_in_year(year)).chain(NISAN..TISHREI)
}

/// Days from 1 Tishrei to the first of `month`.
fn days_before_month(year: i64, month: u8) -> i64 {
    civil_order(year)
        .take_while(|&m| m != month)
        .map(|m| i64::from(days_in_month(year, m)))
        .sum()
}

/// Year whose mean length puts `jdn` in it; off by at most one near a new
/// year. Saturates for day numbers far outside the calendar.
const fn estimate_year(jdn: i64) -> i64 {
    jdn.saturating_sub(MOLAD_EPOCH_JDN)
        .saturating_mul(MEAN_YEAR_NUMERATOR)
        / MEAN_YEAR_DENOMINATOR
        + 1
}

/// A date in the Hebrew calendar, years 1..=9999 AM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HebrewDate {
    year: Year,
    month: u8,
    day: u8,
}

impl HebrewDate {
    /// Creates a validated Hebrew date.
    ///
    /// # Errors
    /// Returns `InvalidYear` outside 1..=9999, `InvalidMonth` for month 13 in
    /// a common year, `InvalidDay` past the month's length in that year.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, CalendarError> {
        let year = Year::new(year)?;
        let wide = year.wide();
        if month == 0 || month > months_in_year(wide) {
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

    /// First day of `year` together with its molad and the rules applied.
    ///
    /// # Errors
    /// Returns `InvalidYear` outside 1..=9999.
    pub fn year_start(year: u16) -> Result<YearStart, CalendarError> {
        Ok(YearStart::compute(Year::new(year)?.wide()))
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

    pub const fn days_in_year(&self) -> i64 {
        days_in_year(self.year.wide())
    }

    pub const fn year_kind(&self) -> YearKind {
        year_kind(self.year.wide())
    }

    /// 1-based day within the year, counted from 1 Tishrei.
    pub fn day_of_year(&self) -> i64 {
        days_before_month(self.year.wide(), self.month) + i64::from(self.day)
    }
}

impl Calendar for HebrewDate {
    fn to_jdn(&self) -> Jdn {
        Jdn::new(new_year(self.year.wide())) + (self.day_of_year() - 1)
    }

    fn from_jdn(jdn: Jdn) -> Result<Self, CalendarError> {
        let target = jdn.get();
        let first = new_year(i64::from(MIN_YEAR));
        let past_last = new_year(i64::from(MAX_YEAR) + 1);

        if target < first {
            return Err(CalendarError::year_out_of_range(
                estimate_year(target).min(i64::from(MIN_YEAR) - 1),
                MIN_YEAR,
                MAX_YEAR,
            ));
        }
        if target >= past_last {
            return Err(CalendarError::year_out_of_range(
                estimate_year(target).max(i64::from(MAX_YEAR) + 1),
                MIN_YEAR,
                MAX_YEAR,
            ));
        }

        let mut year = estimate_year(target);
        while new_year(year + 1) <= target {
            year += 1;
        }
        while new_year(year) > target {
            year -= 1;
        }

        let mut offset = target - new_year(year);
        for month in civil_order(year) {
            let length = i64::from(days_in_month(year, month));
            if offset < length {
                let day = u8::try_from(offset + 1)
                    .map_err(|_| CalendarError::SearchDivergence(target))?;
                return Ok(Self {
                    year: Year::try_from(year)?,
                    month,
                    day,
                });
            }
            offset -= length;
        }

        // The year table disagreed with the month lengths
        Err(CalendarError::SearchDivergence(target))
    }

    fn is_leap_year(&self) -> bool {
        is_leap_year(self.year.wide())
    }
}

impl PartialOrd for HebrewDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HebrewDate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Month numbers do not follow the order of the year
        self.to_jdn().cmp(&other.to_jdn())
    }
}

impl fmt::Display for HebrewDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year.get(), self.month, self.day)
    }
}

impl FromStr for HebrewDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month, day) = parse_ymd(s)?;
        Self::new(Year::try_from(year)?.get(), month, day)
    }
}

impl Serialize for HebrewDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for HebrewDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GregorianDate;
    use crate::types::Weekday;

    fn gregorian(y: u16, m: u8, d: u8) -> GregorianDate {
        GregorianDate::new(y, m, d).unwrap()
    }

    #[test]
    fn test_is_leap_year() {
        struct TestCase {
            year: i64,
            expected: bool,
        }

        let cases = [
            TestCase { year: 5784, expected: true },
            TestCase { year: 5785, expected: false },
            TestCase { year: 5786, expected: false },
            TestCase { year: 5787, expected: true },
            TestCase { year: 5788, expected: false },
            TestCase { year: 5790, expected: true },
        ];

        for case in cases {
            assert_eq!(
                is_leap_year(case.year),
                case.expected,
                "Year {} leap status",
                case.year
            );
        }

        // Seven leap years in every 19-year cycle, at positions 3, 6, 8, 11, 14, 17, 19
        let leaps: Vec<i64> = (1..=19).filter(|&y| is_leap_year(y)).collect();
        assert_eq!(leaps, vec![3, 6, 8, 11, 14, 17, 19]);
    }

    #[test]
    fn test_gregorian_round_trip_known_dates() {
        struct TestCase {
            hebrew: (u16, u8, u8),
            gregorian: (u16, u8, u8),
        }

        let cases = [
            TestCase { hebrew: (5784, 10, 20), gregorian: (2024, 1, 1) },
            TestCase { hebrew: (5784, 5, 1), gregorian: (2024, 8, 5) },
            TestCase { hebrew: (5784, 7, 1), gregorian: (2023, 9, 16) },
            TestCase { hebrew: (5780, 1, 1), gregorian: (2020, 3, 26) },
            TestCase { hebrew: (5780, 10, 7), gregorian: (2020, 1, 4) },
            TestCase { hebrew: (5784, 13, 1), gregorian: (2024, 3, 11) },
            TestCase { hebrew: (3761, 10, 18), gregorian: (1, 1, 1) },
            TestCase { hebrew: (5786, 7, 11), gregorian: (2025, 10, 3) },
        ];

        for case in cases {
            let (hy, hm, hd) = case.hebrew;
            let (gy, gm, gd) = case.gregorian;
            let hebrew = HebrewDate::new(hy, hm, hd).unwrap();
            let expected = gregorian(gy, gm, gd);

            let converted: GregorianDate = hebrew.convert().unwrap();
            assert_eq!(converted, expected, "{hebrew} to Gregorian");
            let back: HebrewDate = expected.convert().unwrap();
            assert_eq!(back, hebrew, "{expected} to Hebrew");
        }
    }

    #[test]
    fn test_weekdays() {
        assert_eq!(HebrewDate::new(5780, 1, 1).unwrap().weekday(), Weekday::Thursday);
        assert_eq!(HebrewDate::new(5780, 10, 7).unwrap().weekday(), Weekday::Saturday);
    }

    #[test]
    fn test_new_invalid() {
        assert!(matches!(
            HebrewDate::new(5785, 13, 1),
            Err(CalendarError::InvalidMonth { year: 5785, month: 13 })
        ));
        assert!(matches!(
            HebrewDate::new(5780, 12, 30),
            Err(CalendarError::InvalidDay { year: 5780, month: 12, day: 30 })
        ));
        assert!(matches!(
            HebrewDate::new(5780, 14, 1),
            Err(CalendarError::InvalidMonth { .. })
        ));
        assert!(matches!(
            HebrewDate::new(5780, 0, 1),
            Err(CalendarError::InvalidMonth { .. })
        ));
        assert!(matches!(
            HebrewDate::new(0, 1, 1),
            Err(CalendarError::InvalidYear { year: 0, .. })
        ));
        assert!(matches!(
            HebrewDate::new(10000, 1, 1),
            Err(CalendarError::InvalidYear { .. })
        ));
        assert!(HebrewDate::new(5780, 1, 31).is_err());
        assert!(HebrewDate::new(5780, 1, 0).is_err());
    }

    #[test]
    fn test_month_lengths() {
        for month in [IYAR, TAMMUZ, ELUL, TEVET] {
            assert_eq!(days_in_month(5780, month), 29, "month {month}");
            assert!(HebrewDate::new(5780, month, 30).is_err());
        }
        assert_eq!(days_in_month(5784, ADAR_II), 29);
        assert_eq!(days_in_month(5785, ADAR_II), 0);
        assert!(HebrewDate::new(5784, ADAR, 30).is_ok());
        assert!(HebrewDate::new(1, 1, 1).is_ok());
        assert!(HebrewDate::new(9999, 1, 1).is_ok());
    }

    #[test]
    fn test_year_lengths() {
        let mut lengths: Vec<i64> = (1..=2000).map(days_in_year).collect();
        lengths.sort_unstable();
        lengths.dedup();
        assert_eq!(lengths, vec![353, 354, 355, 383, 384, 385]);

        for year in 5700..5800 {
            let total: i64 = civil_order(year)
                .map(|m| i64::from(days_in_month(year, m)))
                .sum();
            assert_eq!(total, days_in_year(year), "Year {year}");
            let leap = is_leap_year(year);
            assert_eq!(days_in_year(year) > 380, leap, "Year {year}");
        }
    }

    #[test]
    fn test_year_kind() {
        for year in 5700..5800 {
            let kind = year_kind(year);
            let (heshvan, kislev) = (days_in_month(year, HESHVAN), days_in_month(year, KISLEV));
            match kind {
                YearKind::Deficient => assert_eq!((heshvan, kislev), (29, 29)),
                YearKind::Regular => assert_eq!((heshvan, kislev), (29, 30)),
                YearKind::Complete => assert_eq!((heshvan, kislev), (30, 30)),
            }
        }
    }

    #[test]
    fn test_dehiyyot_regression() {
        let start = HebrewDate::year_start(5765).unwrap();
        assert_eq!(start.jdn, Jdn::new(2_453_265));
        assert_eq!(start.molad.weekday(), TUESDAY);
        assert_eq!(start.molad.parts, 20_807);
        assert!(start.dehiyyot.molad_zaken);
        assert!(start.dehiyyot.lo_adu_rosh);
        assert_eq!(start.dehiyyot.postponement(), 2);
        assert_eq!(
            GregorianDate::from_jdn(start.jdn).unwrap(),
            gregorian(2004, 9, 16)
        );

        let expected = [
            (5766, 2_453_648),
            (5767, 2_454_002),
            (5768, 2_454_357),
            (5769, 2_454_740),
            (5770, 2_455_094),
        ];
        for (year, jdn) in expected {
            assert_eq!(
                HebrewDate::year_start(year).unwrap().jdn,
                Jdn::new(jdn),
                "Rosh Hashanah {year}"
            );
        }
    }

    #[test]
    fn test_new_year_never_on_adu() {
        for year in 1..=3000 {
            let weekday = YearStart::compute(year).jdn.weekday();
            assert!(
                !matches!(
                    weekday,
                    Weekday::Sunday | Weekday::Wednesday | Weekday::Friday
                ),
                "Year {year} starts on {weekday}"
            );
        }
    }

    #[test]
    fn test_epoch() {
        let start = HebrewDate::year_start(1).unwrap();
        assert_eq!(start.jdn, Jdn::new(347_998));
        assert_eq!(start.jdn.weekday(), Weekday::Monday);
        assert_eq!(start.dehiyyot, Dehiyyot::default());
        assert_eq!(start.molad.to_string(), "day 1 5h 204p");
    }

    #[test]
    fn test_from_jdn_out_of_range() {
        assert!(matches!(
            HebrewDate::from_jdn(Jdn::new(347_997)),
            Err(CalendarError::InvalidYear { .. })
        ));
        let last = HebrewDate::new(9999, ELUL, days_in_month(9999, ELUL)).unwrap();
        assert_eq!(HebrewDate::from_jdn(last.to_jdn()).unwrap(), last);
        assert!(matches!(
            HebrewDate::from_jdn(last.to_jdn() + 1),
            Err(CalendarError::InvalidYear { .. })
        ));
        assert!(HebrewDate::from_jdn(Jdn::new(i64::from(i32::MAX))).is_err());
    }

    #[test]
    fn test_from_jdn_extreme_values() {
        struct TestCase {
            jdn: i64,
            below: bool,
        }

        let cases = [
            TestCase { jdn: i64::MIN, below: true },
            TestCase { jdn: -1, below: true },
            TestCase { jdn: 347_997, below: true },
            TestCase { jdn: 100_000_000_000_000, below: false },
            TestCase { jdn: i64::MAX, below: false },
        ];

        for case in cases {
            let result = HebrewDate::from_jdn(Jdn::new(case.jdn));
            let Err(CalendarError::InvalidYear { year, min: 1, max: 9999 }) = result else {
                panic!("JDN {} gave {result:?}", case.jdn);
            };
            if case.below {
                assert!(year < 1, "JDN {} reported year {year}", case.jdn);
            } else {
                assert!(year > 9999, "JDN {} reported year {year}", case.jdn);
            }
        }
    }

    #[test]
    fn test_round_trip_and_monotonic_across_years() {
        let first = HebrewDate::new(5783, TISHREI, 1).unwrap().to_jdn();
        let last = HebrewDate::new(5786, ELUL, 29).unwrap().to_jdn();
        let mut previous: Option<HebrewDate> = None;
        let mut jdn = first;
        while jdn <= last {
            let date = HebrewDate::from_jdn(jdn).unwrap();
            assert_eq!(date.to_jdn(), jdn);
            if let Some(prev) = previous {
                assert!(prev < date, "{prev} before {date}");
            }
            previous = Some(date);
            jdn += 1;
        }
    }

    #[test]
    fn test_ordering_follows_civil_year() {
        let tishrei = HebrewDate::new(5784, TISHREI, 1).unwrap();
        let nisan = HebrewDate::new(5784, NISAN, 1).unwrap();
        assert!(tishrei < nisan);
        assert_eq!(tishrei.day_of_year(), 1);
        assert_eq!(
            HebrewDate::new(5784, ELUL, 29).unwrap().day_of_year(),
            days_in_year(5784)
        );
    }

    #[test]
    fn test_parse_and_serde() {
        let date: HebrewDate = "5784-10-20".parse().unwrap();
        assert_eq!(date, HebrewDate::new(5784, TEVET, 20).unwrap());
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"5784-10-20\"");
        assert_eq!(serde_json::from_str::<HebrewDate>(&json).unwrap(), date);
        assert!("5785-13-01".parse::<HebrewDate>().is_err());
    }
}
