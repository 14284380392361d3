//! Date conversion between the proleptic Gregorian, Julian, Hebrew, Persian
//! and Chinese lunar calendars.
//!
//! Every calendar maps its dates onto the Julian Day Number ([`Jdn`]) and
//! back, so any two calendars convert through that single pivot:
//!
//! ```
//! use multical::{Calendar, GregorianDate, HebrewDate};
//!
//! let gregorian = GregorianDate::new(2024, 1, 1).unwrap();
//! let hebrew: HebrewDate = gregorian.convert().unwrap();
//! assert_eq!(hebrew.to_string(), "5784-10-20");
//! ```

mod calendar;
mod clock;
mod consts;
mod error;
pub mod gregorian;
pub mod hebrew;
mod jdn;
pub mod julian;
mod julian_day;
pub mod lunar;
pub mod persian;
mod prelude;
mod types;
pub mod zone;

pub use calendar::{Calendar, convert};
pub use clock::{Clock, FixedClock, SystemClock};
pub use consts::*;
pub use error::{CalendarError, ParseError};
pub use gregorian::GregorianDate;
pub use hebrew::HebrewDate;
pub use jdn::Jdn;
pub use julian::{JulianDate, Reckoning};
pub use julian_day::{CivilDateTime, JulianDay};
pub use lunar::{LunarDate, LunarYear};
pub use persian::PersianDate;
pub use types::{Weekday, Year};

#[cfg(test)]
mod tests {
    use super::*;

    /// Same day in every calendar that can represent it.
    struct Day {
        gregorian: GregorianDate,
        julian: JulianDate,
        hebrew: HebrewDate,
        persian: PersianDate,
        lunar: LunarDate,
    }

    fn day(jdn: Jdn) -> Day {
        Day {
            gregorian: GregorianDate::from_jdn(jdn).unwrap(),
            julian: JulianDate::from_jdn(jdn).unwrap(),
            hebrew: HebrewDate::from_jdn(jdn).unwrap(),
            persian: PersianDate::from_jdn(jdn).unwrap(),
            lunar: LunarDate::from_jdn(jdn).unwrap(),
        }
    }

    #[test]
    fn test_round_trip_through_every_calendar() {
        let start = GregorianDate::new(1999, 12, 1).unwrap().to_jdn();
        for offset in 0..800 {
            let jdn = start + offset * 3;
            let day = day(jdn);
            assert_eq!(day.gregorian.to_jdn(), jdn);
            assert_eq!(day.julian.to_jdn(), jdn);
            assert_eq!(day.hebrew.to_jdn(), jdn);
            assert_eq!(day.persian.to_jdn(), jdn);
            assert_eq!(day.lunar.to_jdn(), jdn);

            let hebrew: HebrewDate = day.lunar.convert().unwrap();
            assert_eq!(hebrew, day.hebrew);
            let lunar: LunarDate = convert(&day.persian).unwrap();
            assert_eq!(lunar, day.lunar);
        }
    }

    #[test]
    fn test_ordering_agrees_across_calendars() {
        let start = GregorianDate::new(2019, 9, 1).unwrap().to_jdn();
        let days: Vec<Day> = (0..500).map(|offset| day(start + offset)).collect();

        for pair in days.windows(2) {
            let [earlier, later] = pair else { unreachable!() };
            assert!(earlier.gregorian < later.gregorian);
            assert!(earlier.julian < later.julian);
            assert!(earlier.hebrew < later.hebrew, "{} {}", earlier.hebrew, later.hebrew);
            assert!(earlier.persian < later.persian);
            assert!(earlier.lunar < later.lunar, "{} {}", earlier.lunar, later.lunar);
        }
    }

    #[test]
    fn test_extreme_day_numbers_are_errors() {
        for value in [i64::MIN, i64::MIN / 2, -1, 0, 100_000_000_000_000, i64::MAX] {
            let jdn = Jdn::new(value);
            assert!(GregorianDate::from_jdn(jdn).is_err(), "Gregorian {value}");
            assert!(JulianDate::from_jdn(jdn).is_err(), "Julian {value}");
            assert!(HebrewDate::from_jdn(jdn).is_err(), "Hebrew {value}");
            assert!(PersianDate::from_jdn(jdn).is_err(), "Persian {value}");
            assert!(LunarDate::from_jdn(jdn).is_err(), "Lunar {value}");
        }
        for value in [i64::MIN, i64::MAX] {
            assert!(Reckoning::Historical.label(Jdn::new(value)).is_err());
            assert!(Reckoning::ProlepticGregorian.label(Jdn::new(value)).is_err());
        }
    }

    #[test]
    fn test_reform_boundary_is_adjacent() {
        let last_julian = JulianDate::new(1582, 10, 4).unwrap();
        let first_gregorian = GregorianDate::new(1582, 10, 15).unwrap();
        assert_eq!(last_julian.to_jdn(), Jdn::new(LAST_JULIAN_JDN));
        assert_eq!(first_gregorian.to_jdn(), Jdn::new(GREGORIAN_REFORM_JDN));
        assert_eq!(last_julian.days_until(&first_gregorian), 1);
        assert_eq!(last_julian.weekday(), Weekday::Thursday);
        assert_eq!(first_gregorian.weekday(), Weekday::Friday);
    }

    #[test]
    fn test_julian_day_feeds_every_calendar() {
        let jd = JulianDay::new(2_460_333.051_562_5).unwrap();
        assert_eq!(jd.to_date::<GregorianDate>().unwrap().to_string(), "2024-01-23");
        assert_eq!(jd.to_date::<HebrewDate>().unwrap().to_string(), "5784-11-13");
        assert_eq!(jd.to_date::<PersianDate>().unwrap().to_string(), "1402-11-03");
        assert_eq!(jd.to_date::<LunarDate>().unwrap().to_string(), "2023-12-13");
    }
}
