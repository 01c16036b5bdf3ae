/// Calendar arithmetic shared by the parser, the grids and the state machine.
/// Months are zero-based throughout (0 = January), weekdays count from Sunday.
use chrono::{Datelike, Local, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Years outside this window are clamped so every date stays representable
pub const MIN_YEAR: i32 = -200_000;
pub const MAX_YEAR: i32 = 200_000;

/// Number of cells in a days grid: 7 columns by 6 rows
pub const DAYS_GRID_CELLS: u32 = 7 * 6;

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let month = (month % 12) as usize;
    if month == 1 && is_leap_year(year) {
        29
    } else {
        DAYS_IN_MONTH[month]
    }
}

/// Offset of the first cell of a days grid: how many days of the previous
/// month precede day 1. A zero offset becomes a full week.
pub fn leading_offset(first_weekday: u32, week_start: u32) -> u32 {
    let n = (7 + first_weekday as i32 - (week_start % 7) as i32) % 7;
    if n > 0 { n as u32 } else { 7 }
}

/// Number of next-month days appended after the last day of the month.
/// The remainder is kept only when it already reaches 42 cells, otherwise a
/// further week is appended.
pub fn trailing_count(last_weekday: u32, week_start: u32, leading: u32, days: u32) -> u32 {
    let n = (7 - (last_weekday as i32 + 1 - (week_start % 7) as i32)).rem_euclid(7);
    if n >= DAYS_GRID_CELLS as i32 - (leading + days) as i32 {
        n as u32
    } else {
        n as u32 + 7
    }
}

/// A valid calendar date with a zero-based month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    /// Build a date, rejecting out-of-range components
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year)
            || month > 11
            || day == 0
            || day > days_in_month(year, month)
        {
            return None;
        }
        Some(Self { year, month, day })
    }

    /// Build a date from components that may overflow. Extra months roll into
    /// the year and extra days roll into the following months, so
    /// `(2023, 1, 31)` lands on March 3rd.
    pub fn normalized(year: i64, month: i64, day: i64) -> Self {
        let year = year
            .saturating_add(month.div_euclid(12))
            .clamp(MIN_YEAR as i64, MAX_YEAR as i64) as i32;
        let month = month.rem_euclid(12) as u32;
        let first = first_of_month(year, month);

        match TimeDelta::try_days(day.saturating_sub(1)).and_then(|d| first.checked_add_signed(d))
        {
            Some(date) if (MIN_YEAR..=MAX_YEAR).contains(&date.year()) => Self::from_naive(date),
            _ => Self {
                year,
                month,
                day: day.clamp(1, days_in_month(year, month) as i64) as u32,
            },
        }
    }

    /// Navigation helper: the day is capped at 28 so moving between months
    /// never overflows into the next one.
    pub fn with_clamped_day(year: i64, month: i64, day: u32) -> Self {
        Self::normalized(year, month, day.min(28) as i64)
    }

    pub fn today() -> Self {
        Self::from_naive(Local::now().date_naive())
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
            day: date.day(),
        }
    }

    pub fn to_naive(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, self.day).unwrap_or_default()
    }

    /// 0 for Sunday through 6 for Saturday
    pub fn weekday(&self) -> u32 {
        self.to_naive().weekday().num_days_from_sunday()
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Move by whole years/months keeping the day capped at 28
    pub fn shift(&self, years: i64, months: i64) -> Self {
        Self::with_clamped_day(
            self.year as i64 + years,
            self.month as i64 + months,
            self.day,
        )
    }
}

impl Default for CalendarDate {
    fn default() -> Self {
        Self::today()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month + 1, self.day)
    }
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap_or_default()
}

/// Weekday of the first day of the month
pub fn first_weekday(year: i32, month: u32) -> u32 {
    first_of_month(year, month).weekday().num_days_from_sunday()
}

/// Weekday of the last day of the month
pub fn last_weekday(year: i32, month: u32) -> u32 {
    (first_weekday(year, month) + days_in_month(year, month) - 1) % 7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2023, 1), 28);
        assert_eq!(days_in_month(2023, 0), 31);
        assert_eq!(days_in_month(2023, 10), 30);
    }

    #[test]
    fn test_weekdays() {
        // 2024-02-01 was a Thursday
        assert_eq!(first_weekday(2024, 1), 4);
        // 2024-02-29 was a Thursday too
        assert_eq!(last_weekday(2024, 1), 4);
        assert_eq!(CalendarDate::new(2024, 1, 15).unwrap().weekday(), 4);
    }

    #[test]
    fn test_leading_offset_wraps_to_full_week() {
        assert_eq!(leading_offset(4, 0), 4);
        assert_eq!(leading_offset(0, 0), 7);
        assert_eq!(leading_offset(0, 1), 6);
        assert_eq!(leading_offset(1, 1), 7);
    }

    #[test]
    fn test_trailing_count_pads_to_six_rows() {
        // February 2024, Sunday start: 4 leading + 29 days + 9 trailing
        assert_eq!(trailing_count(4, 0, 4, 29), 9);
        // February 2015 starts on a Sunday: a full leading week then 7 more
        assert_eq!(trailing_count(6, 0, 7, 28), 7);
    }

    #[test]
    fn test_normalized_rolls_over() {
        assert_eq!(
            CalendarDate::normalized(2023, 1, 31),
            CalendarDate::new(2023, 2, 3).unwrap()
        );
        assert_eq!(
            CalendarDate::normalized(2024, -1, 15),
            CalendarDate::new(2023, 11, 15).unwrap()
        );
        assert_eq!(
            CalendarDate::normalized(2024, 12, 0),
            CalendarDate::new(2024, 11, 31).unwrap()
        );
    }

    #[test]
    fn test_normalized_survives_huge_days() {
        let date = CalendarDate::normalized(2024, 0, i64::MAX);
        assert!(date.day >= 1 && date.day <= date.days_in_month());
    }

    #[test]
    fn test_normalized_clamps_huge_year_and_month() {
        let date = CalendarDate::normalized(i64::MAX, i64::MAX, 1);
        assert_eq!(date.year, MAX_YEAR);
        assert!(date.month < 12);

        let date = CalendarDate::normalized(i64::MIN, i64::MIN, 1);
        assert_eq!(date.year, MIN_YEAR);
        assert!(date.month < 12);
    }

    #[test]
    fn test_shift_caps_day() {
        let date = CalendarDate::new(2024, 0, 31).unwrap();
        assert_eq!(date.shift(0, 1), CalendarDate::new(2024, 1, 28).unwrap());
        assert_eq!(date.shift(0, -1), CalendarDate::new(2023, 11, 28).unwrap());
        assert_eq!(date.shift(-10, 0), CalendarDate::new(2014, 0, 28).unwrap());
    }

    #[test]
    fn test_new_rejects_invalid() {
        assert!(CalendarDate::new(2023, 1, 29).is_none());
        assert!(CalendarDate::new(2023, 12, 1).is_none());
        assert!(CalendarDate::new(2023, 0, 0).is_none());
    }
}
