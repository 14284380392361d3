/// Minimum valid year (inclusive) for every calendar except the lunar table
pub const MIN_YEAR: u16 = 1;

/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum month number in the Gregorian, Julian and Persian calendars
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for October
pub const OCTOBER: u8 = 10;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i64 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i64 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i64 = 400;

/// Earliest civil year accepted by the fractional Julian day layer.
/// Julian day 0 falls in -4712 (Julian) / -4713 (Gregorian).
pub const MIN_CIVIL_YEAR: i64 = -4713;

/// JDN of Julian 1582-10-04, the last day of the Julian reckoning
pub const LAST_JULIAN_JDN: i64 = 2_299_160;
/// JDN of Gregorian 1582-10-15, the first day of the Gregorian reckoning
pub const GREGORIAN_REFORM_JDN: i64 = 2_299_161;
/// First and last dropped day labels of October 1582
pub const REFORM_GAP_DAYS: (u8, u8) = (5, 14);
/// Year of the Gregorian reform
pub const REFORM_YEAR: i64 = 1582;

/// Difference between a Julian date and a modified Julian date
pub const MJD_OFFSET: f64 = 2_400_000.5;
/// Decimal places used when a Julian date is displayed without a precision
pub const DEFAULT_JD_PRECISION: usize = 6;

pub const SECONDS_PER_DAY: i64 = 86_400;
pub const SECONDS_PER_HOUR: i64 = 3_600;
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
