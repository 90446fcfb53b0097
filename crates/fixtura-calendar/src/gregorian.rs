use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::date::PersianDate;
use crate::error::{CalendarError, Result};

/// 1400/01/01 fell on 2021-03-21.
const ANCHOR: (i32, u32, u32) = (2021, 3, 21);

fn anchor() -> Result<(PersianDate, NaiveDate)> {
    let (year, month, day) = ANCHOR;
    let gregorian = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        CalendarError::InvalidArgument("gregorian anchor is not a valid date".to_string())
    })?;
    Ok((PersianDate::new(1400, 1, 1)?, gregorian))
}

/// Convert to the proleptic Gregorian calendar, dropping the time of day.
pub fn to_gregorian(date: &PersianDate) -> Result<NaiveDate> {
    let (persian_anchor, gregorian_anchor) = anchor()?;
    let offset = date.day_index() - persian_anchor.day_index();
    TimeDelta::try_days(offset)
        .and_then(|delta| gregorian_anchor.checked_add_signed(delta))
        .ok_or_else(|| {
            CalendarError::InvalidArgument(format!("{date} has no gregorian equivalent"))
        })
}

/// Convert from the proleptic Gregorian calendar.
pub fn from_gregorian(date: NaiveDate) -> Result<PersianDate> {
    let (persian_anchor, gregorian_anchor) = anchor()?;
    let offset = date.signed_duration_since(gregorian_anchor).num_days();
    PersianDate::from_day_index(persian_anchor.day_index() + offset)
}

impl PersianDate {
    pub fn to_gregorian(&self) -> Result<NaiveDate> {
        to_gregorian(self)
    }

    /// Gregorian date-time carrying this value's time of day.
    pub fn to_naive_date_time(&self) -> Result<NaiveDateTime> {
        let time = NaiveTime::from_hms_opt(
            u32::from(self.hour()),
            u32::from(self.minute()),
            u32::from(self.second()),
        )
        .ok_or_else(|| CalendarError::InvalidArgument(format!("{self} has an invalid time")))?;
        Ok(NaiveDateTime::new(to_gregorian(self)?, time))
    }

    pub fn from_gregorian(date: NaiveDate) -> Result<Self> {
        from_gregorian(date)
    }
}
