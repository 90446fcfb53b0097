use rand::{Rng, RngCore};

use crate::date::{DateRange, PersianDate};
use crate::error::{CalendarError, Result};

/// Uniform pick over the calendar days of `range`, at midnight.
///
/// Sampling runs over the linear day index so every day is equally likely
/// and invalid month/day combinations can never be produced.
pub fn random_date_in_range(range: &DateRange, rng: &mut dyn RngCore) -> Result<PersianDate> {
    let start = range.start().day_index();
    let end = range.end().day_index();
    PersianDate::from_day_index(rng.random_range(start..=end))
}

/// Like [`random_date_in_range`] with a uniform time of day.
pub fn random_date_time_in_range(
    range: &DateRange,
    rng: &mut dyn RngCore,
) -> Result<PersianDate> {
    let date = random_date_in_range(range, rng)?;
    date.with_time(
        rng.random_range(0..=23),
        rng.random_range(0..=59),
        rng.random_range(0..=59),
    )
}

pub fn random_year(min: i32, max: i32, rng: &mut dyn RngCore) -> Result<i32> {
    if min > max {
        return Err(CalendarError::InvalidArgument(format!(
            "year min {min} must be <= max {max}"
        )));
    }
    Ok(rng.random_range(min..=max))
}
