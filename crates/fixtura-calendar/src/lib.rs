//! Persian (Jalali) calendar engine for Fixtura.
//!
//! Pure arithmetic over the 33-year intercalation cycle: leap years,
//! month lengths, a linear day index, conversion to the proleptic
//! Gregorian calendar, canonical names, `YYYY/MM/DD` parsing and bounded
//! uniform sampling.

pub mod date;
pub mod error;
pub mod gregorian;
pub mod persian;
pub mod sample;

pub use date::{DateRange, PersianDate, parse_date, parse_date_time};
pub use error::{CalendarError, Result};
pub use gregorian::{from_gregorian, to_gregorian};
pub use persian::{
    MONTH_NAMES, PersianWeekday, WEEKDAY_NAMES, day_of_week_name, days_in_month, days_in_year,
    is_leap_year, month_name,
};
pub use sample::{random_date_in_range, random_date_time_in_range, random_year};
