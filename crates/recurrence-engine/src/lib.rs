//! # recurrence-engine
//!
//! Deterministic expansion of recurring calendar events.
//!
//! Given an event with a daily, weekly, monthly or yearly cadence, the engine
//! produces the exact list of dated occurrences the cadence implies. Months and
//! years that lack the anchor's day (Jan 31 monthly has no April occurrence,
//! Feb 29 yearly has none in common years) are skipped, never shifted.
//!
//! ## Modules
//!
//! - [`calendar`] — Gregorian leap-year and date-validity predicates
//! - [`occurrence`] — date of the n-th occurrence of a rule
//! - [`expander`] — event definition → ordered occurrences, with termination
//! - [`series`] — detach or remove occurrences after materialization
//! - [`schedule`] — create/edit/delete flows over an [`OccurrenceStore`]
//! - [`store`] — storage seam and an in-memory implementation
//! - [`config`] — expansion horizon and attempt cap
//! - [`types`] — rules, event definitions, occurrences
//! - [`error`] — Error types

pub mod calendar;
pub mod config;
pub mod error;
pub mod expander;
pub mod occurrence;
pub mod schedule;
pub mod series;
pub mod store;
pub mod types;

pub use calendar::{is_leap_year, is_valid_calendar_date};
pub use config::ExpansionConfig;
pub use error::RecurrenceError;
pub use expander::{expand, Expansion, TruncatedExpansion};
pub use occurrence::next_occurrence_date;
pub use schedule::{create_event, PersistLimit, SaveReport};
pub use series::{detach_from_series, remove_occurrence, remove_series};
pub use store::{InMemoryStore, OccurrenceStore};
pub use types::{Cadence, EventDefinition, Occurrence, RecurrenceRule, Termination};
