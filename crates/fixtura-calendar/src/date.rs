use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CalendarError, Result};
use crate::persian::{
    CYCLE_DAYS, MONTH_NAMES, PersianWeekday, days_before_month, days_before_year, days_in_month,
};

/// Day index of 1400/01/01, a Sunday.
const SUNDAY_ANCHOR_INDEX: i64 = 510_975;

/// A validated Persian calendar date with time of day.
///
/// Values are immutable; every constructor checks the month table for the
/// given year. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PersianDate {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

impl PersianDate {
    /// Create a date at midnight.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self> {
        if year < 1 {
            return Err(CalendarError::InvalidArgument(format!(
                "year {year} must be >= 1"
            )));
        }
        let max_day = days_in_month(year, month)?;
        if day == 0 || day > max_day {
            return Err(CalendarError::InvalidArgument(format!(
                "day {day} is outside 1..={max_day} for {year}/{month:02}"
            )));
        }
        Ok(Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
        })
    }

    /// Same date with the given time of day.
    pub fn with_time(self, hour: u8, minute: u8, second: u8) -> Result<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(CalendarError::InvalidArgument(format!(
                "time {hour:02}:{minute:02}:{second:02} is out of range"
            )));
        }
        Ok(Self {
            hour,
            minute,
            second,
            ..self
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    /// The same calendar day at midnight.
    pub fn date(&self) -> Self {
        Self {
            hour: 0,
            minute: 0,
            second: 0,
            ..*self
        }
    }

    /// Days elapsed since 1/01/01 (index 0).
    pub fn day_index(&self) -> i64 {
        days_before_year(self.year) + days_before_month(self.month) + i64::from(self.day) - 1
    }

    /// Inverse of [`PersianDate::day_index`], at midnight.
    pub fn from_day_index(index: i64) -> Result<Self> {
        if index < 0 {
            return Err(CalendarError::InvalidArgument(format!(
                "day index {index} precedes 1/01/01"
            )));
        }
        let out_of_range =
            || CalendarError::InvalidArgument(format!("day index {index} is out of range"));
        let estimate = index
            .checked_mul(33)
            .ok_or_else(out_of_range)?
            .div_euclid(CYCLE_DAYS)
            + 1;
        let mut year = i32::try_from(estimate).map_err(|_| out_of_range())?;
        loop {
            let next = year.checked_add(1).ok_or_else(out_of_range)?;
            if days_before_year(next) > index {
                break;
            }
            year = next;
        }
        while year > 1 && days_before_year(year) > index {
            year -= 1;
        }

        let mut remaining = index - days_before_year(year);
        for month in 1..=12 {
            let length = i64::from(days_in_month(year, month)?);
            if remaining < length {
                // remaining < 31 here, so the cast cannot truncate.
                return Self::new(year, month, remaining as u8 + 1);
            }
            remaining -= length;
        }
        Err(CalendarError::InvalidArgument(format!(
            "day index {index} does not map to a date"
        )))
    }

    /// Shift by `days`, keeping the time of day.
    pub fn add_days(&self, days: i64) -> Result<Self> {
        let index = self.day_index().checked_add(days).ok_or_else(|| {
            CalendarError::InvalidArgument(format!("shifting {self} by {days} days overflows"))
        })?;
        Self::from_day_index(index)?.with_time(
            self.hour,
            self.minute,
            self.second,
        )
    }

    pub fn weekday(&self) -> PersianWeekday {
        let index = (self.day_index() - SUNDAY_ANCHOR_INDEX + 1).rem_euclid(7) as usize;
        PersianWeekday::from_index(index).unwrap_or(PersianWeekday::Saturday)
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[usize::from(self.month - 1)]
    }

    /// Render as `YYYY/MM/DD HH:MM:SS`.
    pub fn format_with_time(&self) -> String {
        format!(
            "{self} {:02}:{:02}:{:02}",
            self.hour, self.minute, self.second
        )
    }

    fn is_midnight(&self) -> bool {
        self.hour == 0 && self.minute == 0 && self.second == 0
    }
}

impl fmt::Display for PersianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for PersianDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        parse_date_time(s)
    }
}

impl Serialize for PersianDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.is_midnight() {
            serializer.collect_str(self)
        } else {
            serializer.serialize_str(&self.format_with_time())
        }
    }
}

impl<'de> Deserialize<'de> for PersianDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_date_time(&text).map_err(serde::de::Error::custom)
    }
}

/// Parse the fixed `YYYY/MM/DD` form.
pub fn parse_date(text: &str) -> Result<PersianDate> {
    let mut parts = text.split('/');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(CalendarError::Format(format!(
            "expected YYYY/MM/DD, got '{text}'"
        )));
    };
    PersianDate::new(
        parse_component(year, 4, text)?,
        parse_component(month, 2, text)?,
        parse_component(day, 2, text)?,
    )
}

/// Parse `YYYY/MM/DD` optionally followed by ` HH:MM:SS`.
pub fn parse_date_time(text: &str) -> Result<PersianDate> {
    let Some((date, time)) = text.split_once(' ') else {
        return parse_date(text);
    };
    let date = parse_date(date)?;
    let mut parts = time.split(':');
    let (Some(hour), Some(minute), Some(second), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(CalendarError::Format(format!(
            "expected HH:MM:SS, got '{time}'"
        )));
    };
    date.with_time(
        parse_component(hour, 2, text)?,
        parse_component(minute, 2, text)?,
        parse_component(second, 2, text)?,
    )
}

/// Every component has a fixed width: four digits for the year, two elsewhere.
fn parse_component<N: FromStr>(part: &str, digits: usize, text: &str) -> Result<N> {
    if part.len() != digits || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CalendarError::Format(format!(
            "malformed component '{part}' in '{text}'"
        )));
    }
    part.parse()
        .map_err(|_| CalendarError::Format(format!("malformed component '{part}' in '{text}'")))
}

/// Inclusive span of calendar days.
///
/// Deserialization goes through [`DateRange::new`], so a reversed range is
/// rejected there too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: PersianDate,
    end: PersianDate,
}

impl DateRange {
    /// Fails when `start` falls on a later day than `end`.
    pub fn new(start: PersianDate, end: PersianDate) -> Result<Self> {
        if start.date() > end.date() {
            return Err(CalendarError::InvalidArgument(format!(
                "range start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// From the first day of `min_year` to the last day of `max_year`.
    pub fn years(min_year: i32, max_year: i32) -> Result<Self> {
        if min_year > max_year {
            return Err(CalendarError::InvalidArgument(format!(
                "year range {min_year}..={max_year} is empty"
            )));
        }
        let last_day = days_in_month(max_year, 12)?;
        Self::new(
            PersianDate::new(min_year, 1, 1)?,
            PersianDate::new(max_year, 12, last_day)?,
        )
    }

    pub fn start(&self) -> PersianDate {
        self.start
    }

    pub fn end(&self) -> PersianDate {
        self.end
    }

    /// Number of calendar days covered, both ends included.
    pub fn day_count(&self) -> i64 {
        self.end.day_index() - self.start.day_index() + 1
    }

    /// Compares calendar days only, ignoring time of day.
    pub fn contains(&self, date: &PersianDate) -> bool {
        let day = date.date();
        self.start.date() <= day && day <= self.end.date()
    }
}

#[derive(Deserialize)]
struct RawDateRange {
    start: PersianDate,
    end: PersianDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = CalendarError;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        Self::new(raw.start, raw.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sunday_anchor_is_first_day_of_1400() {
        let date = PersianDate::new(1400, 1, 1).unwrap();
        assert_eq!(date.day_index(), SUNDAY_ANCHOR_INDEX);
        assert_eq!(date.weekday(), PersianWeekday::Sunday);
    }

    #[test]
    fn first_day_index_is_zero() {
        let date = PersianDate::from_day_index(0).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (1, 1, 1));
    }
}
