//! Edits over already-materialized occurrences.
//!
//! These never re-run expansion and never touch siblings implicitly: each
//! function returns a new value and leaves its input untouched.

use crate::types::{Occurrence, RecurrenceRule};

/// Detach one occurrence from its series.
///
/// The rule is reset to [`RecurrenceRule::none`] and the series id is cleared.
/// Every other field, including the occurrence id and date, is copied
/// unchanged. Applying it twice gives the same result as applying it once.
pub fn detach_from_series(occurrence: &Occurrence) -> Occurrence {
    let mut detached = occurrence.clone();
    detached.event.rule = RecurrenceRule::none();
    detached.series_id = None;
    detached
}

/// Remove the occurrence with id `target_id`, preserving the order of the rest.
///
/// A missing id is not an error; the result then equals the input.
pub fn remove_occurrence(occurrences: &[Occurrence], target_id: &str) -> Vec<Occurrence> {
    occurrences
        .iter()
        .filter(|o| o.id != target_id)
        .cloned()
        .collect()
}

/// Remove every occurrence that belongs to the series `series_id`.
///
/// Detached occurrences no longer carry a series id and are kept.
pub fn remove_series(occurrences: &[Occurrence], series_id: &str) -> Vec<Occurrence> {
    occurrences
        .iter()
        .filter(|o| o.series_id.as_deref() != Some(series_id))
        .cloned()
        .collect()
}
