//! Year records for the Chinese calendar, 1900 through 2100.
//!
//! Each record packs one lunar year:
//! - bits 0-3: leap month number, 0 when the year has none
//! - bits 4-15: one flag per month, month 1 in bit 15, set for 30 days
//! - bit 16: set when the leap month has 30 days

pub const FIRST_YEAR: u16 = 1900;
pub const LAST_YEAR: u16 = 2100;

/// JDN of the first day of lunar 1900 (Gregorian 1900-01-31)
pub const FIRST_NEW_YEAR_JDN: i64 = 2_415_051;

const YEAR_COUNT: usize = (LAST_YEAR - FIRST_YEAR + 1) as usize;

const LEAP_MONTH_MASK: u32 = 0xf;
const LONG_LEAP_MONTH: u32 = 0x1_0000;
const LONG_MONTH_BASE: u32 = 0x1_0000;

#[rustfmt::skip]
pub const YEAR_INFO: [u32; YEAR_COUNT] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920
    0x06566, 0x0d4a0, 0x0ea50, 0x16a95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0, // 1990
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2050
    0x092e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090
    0x0d520,                                                                                   // 2100
];

/// Days from the first day of lunar 1900 to the first day of each year;
/// the extra final entry marks the end of the table.
pub static YEAR_OFFSETS: [i64; YEAR_COUNT + 1] = year_offsets();

pub const fn leap_month(info: u32) -> u8 {
    (info & LEAP_MONTH_MASK) as u8
}

pub const fn days_in_leap_month(info: u32) -> u8 {
    if leap_month(info) == 0 {
        0
    } else if info & LONG_LEAP_MONTH != 0 {
        30
    } else {
        29
    }
}

/// Length of regular `month` (1..=12).
pub const fn days_in_month(info: u32, month: u8) -> u8 {
    if info & (LONG_MONTH_BASE >> month) != 0 { 30 } else { 29 }
}

pub const fn days_in_year(info: u32) -> u16 {
    let mut total = days_in_leap_month(info) as u16;
    let mut month = 1;
    while month <= 12 {
        total += days_in_month(info, month) as u16;
        month += 1;
    }
    total
}

const fn year_offsets() -> [i64; YEAR_COUNT + 1] {
    let mut offsets = [0; YEAR_COUNT + 1];
    let mut i = 0;
    while i < YEAR_COUNT {
        offsets[i + 1] = offsets[i] + days_in_year(YEAR_INFO[i]) as i64;
        i += 1;
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_lengths_in_range() {
        for (index, &info) in YEAR_INFO.iter().enumerate() {
            let days = days_in_year(info);
            let year = usize::from(FIRST_YEAR) + index;
            if leap_month(info) == 0 {
                assert!((353..=355).contains(&days), "Year {year} has {days} days");
            } else {
                assert!((383..=385).contains(&days), "Year {year} has {days} days");
                assert!(leap_month(info) <= 12, "Year {year}");
            }
        }
    }

    #[test]
    fn test_offsets() {
        assert_eq!(YEAR_OFFSETS[0], 0);
        assert_eq!(YEAR_OFFSETS[1], i64::from(days_in_year(YEAR_INFO[0])));
        // Lunar 2101 starts on Gregorian 2101-01-29
        assert_eq!(FIRST_NEW_YEAR_JDN + YEAR_OFFSETS[YEAR_COUNT], 2_488_463);
    }

    #[test]
    fn test_decode_2023() {
        let info = YEAR_INFO[2023 - usize::from(FIRST_YEAR)];
        assert_eq!(leap_month(info), 2);
        assert_eq!(days_in_leap_month(info), 29);
        assert_eq!(days_in_month(info, 2), 30);
        assert_eq!(days_in_year(info), 384);
    }
}
