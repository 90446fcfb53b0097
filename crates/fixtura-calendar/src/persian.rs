use std::fmt;

use crate::date::PersianDate;
use crate::error::{CalendarError, Result};

/// Positions inside the 33-year cycle that carry a leap day.
const LEAP_RESIDUES: [i64; 8] = [1, 5, 9, 13, 17, 22, 26, 30];
const CYCLE_YEARS: i64 = 33;
/// Days in one full 33-year cycle (eight leap years).
pub(crate) const CYCLE_DAYS: i64 = CYCLE_YEARS * 365 + 8;

/// Canonical month names, Farvardin first.
pub const MONTH_NAMES: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// Canonical weekday names, Saturday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "شنبه",
    "یکشنبه",
    "دوشنبه",
    "سه\u{200c}شنبه",
    "چهارشنبه",
    "پنجشنبه",
    "جمعه",
];

/// Returns true when `year` has 366 days.
pub fn is_leap_year(year: i32) -> bool {
    LEAP_RESIDUES.contains(&i64::from(year).rem_euclid(CYCLE_YEARS))
}

/// Number of days in `month` of `year`.
pub fn days_in_month(year: i32, month: u8) -> Result<u8> {
    match month {
        1..=6 => Ok(31),
        7..=11 => Ok(30),
        12 if is_leap_year(year) => Ok(30),
        12 => Ok(29),
        _ => Err(CalendarError::InvalidArgument(format!(
            "month {month} is outside 1..=12"
        ))),
    }
}

pub fn days_in_year(year: i32) -> u16 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Canonical name of `month`.
pub fn month_name(month: u8) -> Result<&'static str> {
    month
        .checked_sub(1)
        .and_then(|index| MONTH_NAMES.get(usize::from(index)))
        .copied()
        .ok_or_else(|| {
            CalendarError::InvalidArgument(format!("month {month} is outside 1..=12"))
        })
}

/// Canonical weekday name of `date`.
pub fn day_of_week_name(date: &PersianDate) -> &'static str {
    date.weekday().name()
}

/// Day of the week in Persian order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersianWeekday {
    Saturday,
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl PersianWeekday {
    const ALL: [PersianWeekday; 7] = [
        Self::Saturday,
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
    ];

    /// Zero-based position, Saturday being 0.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        WEEKDAY_NAMES[self.index()]
    }

    pub fn from_gregorian(weekday: chrono::Weekday) -> Self {
        // Monday is 0 in chrono and 2 in the Persian week.
        let index = (weekday.num_days_from_monday() as usize + 2) % 7;
        Self::ALL[index]
    }
}

impl fmt::Display for PersianWeekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Leap years in `1..=years`.
fn leap_years_through(years: i64) -> i64 {
    let rest = years.rem_euclid(CYCLE_YEARS);
    let partial = LEAP_RESIDUES
        .iter()
        .filter(|&&residue| residue <= rest)
        .count() as i64;
    years.div_euclid(CYCLE_YEARS) * 8 + partial
}

/// Days elapsed between 1/01/01 and the first day of `year`.
pub(crate) fn days_before_year(year: i32) -> i64 {
    let elapsed = i64::from(year) - 1;
    elapsed * 365 + leap_years_through(elapsed)
}

/// Days elapsed between the first day of the year and the first day of `month`.
pub(crate) fn days_before_month(month: u8) -> i64 {
    let elapsed = i64::from(month) - 1;
    if elapsed <= 6 {
        elapsed * 31
    } else {
        186 + (elapsed - 6) * 30
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_count_matches_year_by_year_scan() {
        let mut counted = 0;
        for year in 1..=200 {
            if is_leap_year(year) {
                counted += 1;
            }
            assert_eq!(leap_years_through(i64::from(year)), counted, "year {year}");
        }
    }

    #[test]
    fn month_offsets_sum_to_common_year() {
        let total: i64 = (1..=12)
            .map(|month| i64::from(days_in_month(1402, month).unwrap()))
            .sum();
        assert_eq!(total, 365);
        assert_eq!(days_before_month(12) + 29, 365);
        assert_eq!(days_before_month(7), 186);
    }

    #[test]
    fn year_offsets_follow_year_lengths() {
        for year in 1..400 {
            assert_eq!(
                days_before_year(year + 1) - days_before_year(year),
                i64::from(days_in_year(year))
            );
        }
        assert_eq!(days_before_year(34), CYCLE_DAYS);
    }

    #[test]
    fn chrono_weekdays_map_to_persian_order() {
        assert_eq!(
            PersianWeekday::from_gregorian(chrono::Weekday::Sat),
            PersianWeekday::Saturday
        );
        assert_eq!(
            PersianWeekday::from_gregorian(chrono::Weekday::Fri),
            PersianWeekday::Friday
        );
        assert_eq!(
            PersianWeekday::from_gregorian(chrono::Weekday::Mon),
            PersianWeekday::Monday
        );
    }
}
