//! Recurrence expansion -- turns one event definition into its concrete occurrences.
//!
//! The expander walks occurrence indices 1, 2, 3, ... from the anchor, asks
//! [`next_occurrence_date`] for each, skips indices whose date does not exist
//! and stops on the rule's termination condition. A hard cap on the number of
//! indices tried bounds every expansion; hitting it is reported as a
//! [`TruncatedExpansion`] instead of being passed off as a complete series.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ExpansionConfig;
use crate::error::{RecurrenceError, Result};
use crate::occurrence::next_occurrence_date;
use crate::types::{Cadence, EventDefinition, Occurrence, Termination};

/// Result of expanding one event definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expansion {
    /// Occurrences in strictly ascending date order, anchor first.
    pub occurrences: Vec<Occurrence>,
    /// Set when the attempt cap ended expansion before the rule terminated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncation: Option<TruncatedExpansion>,
}

impl Expansion {
    fn complete(occurrences: Vec<Occurrence>) -> Self {
        Self {
            occurrences,
            truncation: None,
        }
    }

    /// True when the rule's own termination condition ended expansion.
    pub fn is_complete(&self) -> bool {
        self.truncation.is_none()
    }
}

/// Warning that expansion stopped at the attempt cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TruncatedExpansion {
    /// Occurrences produced before the cap was hit.
    pub produced: usize,
    /// Occurrence indices tried.
    pub attempts: u32,
    pub reason: String,
}

/// Where a repeating rule stops.
#[derive(Debug, Clone, Copy)]
enum Stop {
    /// Inclusive last date.
    After(NaiveDate),
    /// Total occurrence count, anchor included.
    Count(usize),
}

/// Expand an event definition into its concrete occurrences.
///
/// A non-repeating definition yields exactly one occurrence with id `base_id`.
/// For a repeating one, the anchor occurrence keeps `base_id` and occurrence
/// index `i` gets the id `"{base_id}-{i}"`; every expanded occurrence records
/// `base_id` as its series id. Indices whose date does not exist are skipped
/// and do not count toward a `ByCount` limit.
///
/// # Errors
/// Returns `RecurrenceError::MissingHorizon` if the rule is unbounded and
/// `config.horizon` is `None`.
pub fn expand(
    base_id: &str,
    definition: &EventDefinition,
    config: &ExpansionConfig,
) -> Result<Expansion> {
    let rule = &definition.rule;
    if !rule.is_repeating() {
        return Ok(Expansion::complete(vec![Occurrence::single(
            base_id,
            definition.clone(),
        )]));
    }

    let stop = match rule.termination() {
        Termination::ByDate(end) => Stop::After(end),
        Termination::ByCount(count) => Stop::Count(count as usize),
        Termination::Unbounded => {
            Stop::After(config.horizon.ok_or(RecurrenceError::MissingHorizon)?)
        }
    };

    let anchor = definition.date;
    let mut occurrences = vec![series_member(
        base_id,
        base_id.to_string(),
        definition,
        anchor,
    )];
    if reached_count(stop, occurrences.len()) {
        return Ok(Expansion::complete(occurrences));
    }

    for index in 1..=config.max_attempts {
        let Some(date) = next_occurrence_date(anchor, rule.cadence(), rule.interval(), index) else {
            debug!(base_id, index, "occurrence date does not exist, skipping");
            continue;
        };

        if let Stop::After(end) = stop {
            if date > end {
                debug!(base_id, produced = occurrences.len(), "expansion reached end date");
                return Ok(Expansion::complete(occurrences));
            }
        }

        let id = format!("{base_id}-{index}");
        occurrences.push(series_member(base_id, id, definition, date));

        if reached_count(stop, occurrences.len()) {
            debug!(base_id, produced = occurrences.len(), "expansion reached count");
            return Ok(Expansion::complete(occurrences));
        }
    }

    // The cap may fire after the last date that fits; the series is then
    // complete if the next existing date is already past the end.
    if let Stop::After(end) = stop {
        let next = config.max_attempts.checked_add(1).and_then(|from| {
            first_existing_date(anchor, rule.cadence(), rule.interval(), from)
        });
        if next.is_none_or(|date| date > end) {
            debug!(base_id, produced = occurrences.len(), "expansion reached end date");
            return Ok(Expansion::complete(occurrences));
        }
    }

    let produced = occurrences.len();
    warn!(
        base_id,
        produced,
        max_attempts = config.max_attempts,
        "expansion truncated at attempt cap"
    );
    Ok(Expansion {
        occurrences,
        truncation: Some(TruncatedExpansion {
            produced,
            attempts: config.max_attempts,
            reason: format!(
                "attempt cap of {} reached before the rule terminated",
                config.max_attempts
            ),
        }),
    })
}

/// Index span of one 400-year Gregorian cycle in months. Any date that
/// exists once recurs within this many indices, so the search is bounded.
const GREGORIAN_CYCLE_MONTHS: u32 = 4800;

/// First existing occurrence date at index `from` or later.
fn first_existing_date(
    anchor: NaiveDate,
    cadence: Cadence,
    interval: u32,
    from: u32,
) -> Option<NaiveDate> {
    (from..=from.saturating_add(GREGORIAN_CYCLE_MONTHS))
        .find_map(|index| next_occurrence_date(anchor, cadence, interval, index))
}

fn reached_count(stop: Stop, produced: usize) -> bool {
    matches!(stop, Stop::Count(count) if produced >= count)
}

fn series_member(
    base_id: &str,
    id: String,
    definition: &EventDefinition,
    date: NaiveDate,
) -> Occurrence {
    let mut event = definition.clone();
    event.date = date;
    Occurrence {
        id,
        series_id: Some(base_id.to_string()),
        event,
    }
}
