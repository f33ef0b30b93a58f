//! Storage seam for materialized occurrences.
//!
//! The engine does not persist anything itself. Hosts implement
//! [`OccurrenceStore`] over whatever backend they use; [`InMemoryStore`] is the
//! reference implementation used by the CLI and the tests.

use crate::error::{RecurrenceError, Result};
use crate::types::Occurrence;

/// Keyed collection of occurrences, addressed by occurrence id.
pub trait OccurrenceStore {
    /// All stored occurrences, in creation order.
    fn list_all(&self) -> Result<Vec<Occurrence>>;
    fn create(&mut self, occurrence: Occurrence) -> Result<()>;
    fn update(&mut self, id: &str, occurrence: Occurrence) -> Result<()>;
    fn delete(&mut self, id: &str) -> Result<()>;
}

/// In-memory store backed by a `Vec`. No persistence.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    occurrences: Vec<Occurrence>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing occurrences, keeping their order.
    pub fn from_occurrences(occurrences: Vec<Occurrence>) -> Self {
        Self { occurrences }
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.occurrences
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| RecurrenceError::NotFound(id.to_string()))
    }
}

impl OccurrenceStore for InMemoryStore {
    fn list_all(&self) -> Result<Vec<Occurrence>> {
        Ok(self.occurrences.clone())
    }

    fn create(&mut self, occurrence: Occurrence) -> Result<()> {
        if self.occurrences.iter().any(|o| o.id == occurrence.id) {
            return Err(RecurrenceError::Store(format!(
                "occurrence already exists: {}",
                occurrence.id
            )));
        }
        self.occurrences.push(occurrence);
        Ok(())
    }

    fn update(&mut self, id: &str, occurrence: Occurrence) -> Result<()> {
        if occurrence.id != id {
            return Err(RecurrenceError::Store(format!(
                "cannot store occurrence {} under id {id}",
                occurrence.id
            )));
        }
        let index = self.position(id)?;
        self.occurrences[index] = occurrence;
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let index = self.position(id)?;
        self.occurrences.remove(index);
        Ok(())
    }
}
