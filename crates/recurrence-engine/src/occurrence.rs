//! Date of the n-th occurrence of a repeating rule.
//!
//! Occurrence dates are always computed from the anchor, never from the
//! previous occurrence, so a skipped month cannot drag later dates off the
//! anchor's day-of-month.

use chrono::{Datelike, Days, NaiveDate};

use crate::calendar::is_valid_calendar_date;
use crate::types::Cadence;

/// Compute the date of occurrence `index` of a rule anchored at `anchor`.
///
/// Index 0 is the anchor itself. Returns `None` when the target date does not
/// exist: a Monthly rule anchored on the 31st has no occurrence in April, and a
/// Yearly rule anchored on Feb 29 has none in common years. Such dates are
/// skipped, never clamped to the end of the month.
///
/// Also returns `None` for `Cadence::None` and when the result falls outside
/// the range `chrono` can represent.
pub fn next_occurrence_date(
    anchor: NaiveDate,
    cadence: Cadence,
    interval: u32,
    index: u32,
) -> Option<NaiveDate> {
    let steps = u64::from(interval) * u64::from(index);

    match cadence {
        Cadence::None => None,
        Cadence::Daily => anchor.checked_add_days(Days::new(steps)),
        Cadence::Weekly => anchor.checked_add_days(Days::new(steps.checked_mul(7)?)),
        Cadence::Monthly => {
            let months = i64::from(anchor.month0()) + i64::try_from(steps).ok()?;
            let year = i64::from(anchor.year()) + months / 12;
            let month = u32::try_from(months % 12).ok()? + 1;
            date_if_valid(i32::try_from(year).ok()?, month, anchor.day())
        }
        Cadence::Yearly => {
            let year = i64::from(anchor.year()) + i64::try_from(steps).ok()?;
            date_if_valid(i32::try_from(year).ok()?, anchor.month(), anchor.day())
        }
    }
}

fn date_if_valid(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if !is_valid_calendar_date(year, month, day) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}
