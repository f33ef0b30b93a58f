//! Gregorian calendar predicates.
//!
//! Pure arithmetic over the proleptic Gregorian calendar. The predicates are
//! total: every integer triple is a valid argument and none of them panic,
//! including years outside the range `chrono` can represent.

use chrono::NaiveDate;

use crate::error::{RecurrenceError, Result};

/// Days in each month of a common year, January first.
const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Returns true if `year` is a Gregorian leap year.
///
/// A year is a leap year when it is divisible by 4 but not by 100, or when it
/// is divisible by 400. Negative (astronomical) years follow the same rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-based) of `year`, or `None` if the month does
/// not exist.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let index = usize::try_from(month.checked_sub(1)?).ok()?;
    let days = *DAYS_IN_MONTH.get(index)?;
    if month == 2 && is_leap_year(year) {
        Some(days + 1)
    } else {
        Some(days)
    }
}

/// Returns true if `(year, month, day)` names a real calendar date.
///
/// Equivalent to building the date and reading the components back unchanged:
/// nothing rolls over, so `(2023, 2, 29)`, `(2024, 2, 30)` and `(2024, 4, 31)`
/// are all rejected, as are month 0, month 13 and day 0.
pub fn is_valid_calendar_date(year: i32, month: u32, day: u32) -> bool {
    match days_in_month(year, month) {
        Some(last) => (1..=last).contains(&day),
        None => false,
    }
}

/// Parse a `"YYYY-MM-DD"` date string.
///
/// # Errors
/// Returns `RecurrenceError::InvalidDate` if the string is not a real date.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| RecurrenceError::InvalidDate(format!("{raw}: {e}")))
}
