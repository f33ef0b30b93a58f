//! Create, edit and delete flows over an [`OccurrenceStore`].
//!
//! This is the orchestration the host application runs around the pure core:
//! expand once per new event, then persist each occurrence in date order.

use serde::Serialize;
use tracing::{info, warn};

use crate::config::ExpansionConfig;
use crate::error::Result;
use crate::expander::{expand, TruncatedExpansion};
use crate::series::detach_from_series;
use crate::store::OccurrenceStore;
use crate::types::{EventDefinition, Occurrence};

/// How many expanded occurrences to hand to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistLimit {
    #[default]
    All,
    /// Persist only the first `n` occurrences in date order.
    AtMost(usize),
}

/// Outcome of [`create_event`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveReport {
    /// Occurrences passed to `create`, in the order they were created.
    pub created: Vec<Occurrence>,
    /// Carried over from the expansion when the attempt cap was hit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncation: Option<TruncatedExpansion>,
}

/// Expand a newly authored event and create each occurrence in the store.
///
/// Occurrences are created one at a time in ascending date order. The first
/// store failure aborts the remaining creates and is returned.
///
/// # Errors
/// Propagates expansion errors and the first store error.
pub fn create_event<S: OccurrenceStore + ?Sized>(
    store: &mut S,
    base_id: &str,
    definition: &EventDefinition,
    config: &ExpansionConfig,
    limit: PersistLimit,
) -> Result<SaveReport> {
    let expansion = expand(base_id, definition, config)?;
    if let Some(truncation) = &expansion.truncation {
        warn!(base_id, produced = truncation.produced, "persisting truncated series");
    }

    let mut occurrences = expansion.occurrences;
    if let PersistLimit::AtMost(n) = limit {
        occurrences.truncate(n);
    }

    for occurrence in &occurrences {
        store.create(occurrence.clone())?;
    }
    info!(base_id, created = occurrences.len(), "event created");

    Ok(SaveReport {
        created: occurrences,
        truncation: expansion.truncation,
    })
}

/// Save an edit to a single occurrence.
///
/// Editing one occurrence of a series turns it into a standalone event, so the
/// stored record is detached before it is written back. Returns what was stored.
///
/// # Errors
/// Propagates the store's update error, e.g. `NotFound` for an unknown id.
pub fn edit_occurrence<S: OccurrenceStore + ?Sized>(
    store: &mut S,
    edited: &Occurrence,
) -> Result<Occurrence> {
    let stored = detach_from_series(edited);
    store.update(&stored.id, stored.clone())?;
    info!(id = %stored.id, "occurrence updated");
    Ok(stored)
}

/// Delete a single occurrence by id. Siblings in the same series are kept.
///
/// # Errors
/// Propagates the store's delete error.
pub fn delete_occurrence<S: OccurrenceStore + ?Sized>(store: &mut S, id: &str) -> Result<()> {
    store.delete(id)?;
    info!(id, "occurrence deleted");
    Ok(())
}

/// Delete every stored member of a series. Returns how many were deleted.
///
/// # Errors
/// Propagates the store's list or delete errors.
pub fn delete_series<S: OccurrenceStore + ?Sized>(
    store: &mut S,
    series_id: &str,
) -> Result<usize> {
    let members: Vec<String> = store
        .list_all()?
        .into_iter()
        .filter(|o| o.series_id.as_deref() == Some(series_id))
        .map(|o| o.id)
        .collect();

    for id in &members {
        store.delete(id)?;
    }
    info!(series_id, deleted = members.len(), "series deleted");
    Ok(members.len())
}
