//! Time sources for "today" lookups.
//!
//! Calendars never read the system clock themselves: callers pass a
//! [`Clock`], and tests pin the instant with [`FixedClock`].

use chrono::{DateTime, TimeZone, Utc};

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the operating system clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub const fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Pins the clock to the given wall clock in any timezone.
    pub fn at<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self(instant.with_timezone(&Utc))
    }

    /// Pins the clock to a Unix timestamp in seconds.
    pub fn from_timestamp(seconds: i64) -> Option<Self> {
        DateTime::from_timestamp(seconds, 0).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        // 2024-01-23 13:14:15 UTC
        let clock = FixedClock::from_timestamp(1_706_015_655).unwrap();
        assert_eq!(clock.now().to_rfc3339(), "2024-01-23T13:14:15+00:00");
        assert_eq!(clock.now(), clock.now());

        let by_ref: &dyn Clock = &clock;
        assert_eq!(by_ref.now(), clock.now());
    }

    #[test]
    fn test_fixed_clock_at_zone() {
        let shanghai = chrono_tz::Asia::Shanghai
            .with_ymd_and_hms(2024, 1, 1, 7, 0, 0)
            .unwrap();
        let clock = FixedClock::at(&shanghai);
        assert_eq!(clock.now().to_rfc3339(), "2023-12-31T23:00:00+00:00");
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        assert!(clock.now() >= first);
    }
}
