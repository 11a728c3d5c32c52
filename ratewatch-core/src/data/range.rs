//! Date range resolution: an inclusive window of `num_days` ending yesterday.

use chrono::{Days, NaiveDate};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("day count must be at least 1 (got {0})")]
    EmptyRange(u32),

    #[error("a {num_days}-day window ending {end} falls outside the supported calendar")]
    OutOfCalendar { num_days: u32, end: NaiveDate },
}

/// Resolve the `num_days` window ending yesterday, relative to the local clock.
pub fn get_date_range(num_days: u32) -> Result<(NaiveDate, NaiveDate), RangeError> {
    date_range_ending(chrono::Local::now().date_naive(), num_days)
}

/// Resolve the `num_days` window ending the day before `today`.
///
/// Returns `(start, end)` with `end = today - 1` and
/// `start = end - (num_days - 1)`, both inclusive.
pub fn date_range_ending(
    today: NaiveDate,
    num_days: u32,
) -> Result<(NaiveDate, NaiveDate), RangeError> {
    if num_days < 1 {
        return Err(RangeError::EmptyRange(num_days));
    }
    let end = today
        .checked_sub_days(Days::new(1))
        .ok_or(RangeError::OutOfCalendar { num_days, end: today })?;
    let start = end
        .checked_sub_days(Days::new(u64::from(num_days - 1)))
        .ok_or(RangeError::OutOfCalendar { num_days, end })?;
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn seven_days_ending_yesterday() {
        let (start, end) = date_range_ending(d(2024, 5, 8), 7).unwrap();
        assert_eq!(end, d(2024, 5, 7));
        assert_eq!(start, d(2024, 5, 1));
    }

    #[test]
    fn single_day_is_just_yesterday() {
        let (start, end) = date_range_ending(d(2024, 3, 1), 1).unwrap();
        assert_eq!(start, d(2024, 2, 29));
        assert_eq!(end, d(2024, 2, 29));
    }

    #[test]
    fn zero_days_is_rejected() {
        assert_eq!(
            date_range_ending(d(2024, 5, 8), 0),
            Err(RangeError::EmptyRange(0))
        );
    }

    #[test]
    fn window_past_calendar_start_is_rejected() {
        let result = date_range_ending(NaiveDate::MIN.succ_opt().unwrap(), 5);
        assert!(matches!(result, Err(RangeError::OutOfCalendar { .. })));
    }

    #[test]
    fn local_clock_variant_ends_yesterday() {
        let today = chrono::Local::now().date_naive();
        let (start, end) = get_date_range(30).unwrap();
        // Tolerate a midnight rollover between the two clock reads
        assert!(end == today.pred_opt().unwrap() || end == today);
        assert_eq!((end - start).num_days(), 29);
    }
}
