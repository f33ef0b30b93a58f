//! Event, rule and occurrence types.
//!
//! The serde representation matches the JSON event records exchanged with the
//! storage collaborator: camelCase keys, `"YYYY-MM-DD"` dates, `"HH:MM"` times
//! and a nested `repeat` object for the recurrence rule.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::RecurrenceError;

/// Recurrence frequency class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    /// Not repeating. The event is its own single occurrence.
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// What stops expansion of a repeating rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Termination {
    /// Stop after the last occurrence on or before this date.
    ByDate(NaiveDate),
    /// Stop once this many occurrences (anchor included) exist.
    ByCount(u32),
    /// No explicit end; expansion stops at the configured horizon.
    #[default]
    Unbounded,
}

/// A validated recurrence rule.
///
/// Construction rejects a zero interval and a zero count, so every rule that
/// exists can be expanded. Deserialization goes through the same checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RepeatInfo", into = "RepeatInfo")]
pub struct RecurrenceRule {
    cadence: Cadence,
    interval: u32,
    termination: Termination,
}

impl RecurrenceRule {
    /// Build a rule, rejecting `interval == 0` and `ByCount(0)`.
    ///
    /// # Errors
    /// Returns `RecurrenceError::InvalidRule` for either malformed input.
    pub fn new(
        cadence: Cadence,
        interval: u32,
        termination: Termination,
    ) -> Result<Self, RecurrenceError> {
        if interval == 0 {
            return Err(RecurrenceError::InvalidRule(
                "interval must be at least 1".to_string(),
            ));
        }
        if termination == Termination::ByCount(0) {
            return Err(RecurrenceError::InvalidRule(
                "occurrence count must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            cadence,
            interval,
            termination,
        })
    }

    /// The non-repeating rule: no cadence, interval 1, no termination.
    pub fn none() -> Self {
        Self {
            cadence: Cadence::None,
            interval: 1,
            termination: Termination::Unbounded,
        }
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn is_repeating(&self) -> bool {
        self.cadence != Cadence::None
    }
}

impl Default for RecurrenceRule {
    fn default() -> Self {
        Self::none()
    }
}

/// Wire form of a recurrence rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepeatInfo {
    #[serde(rename = "type")]
    kind: Cadence,
    #[serde(default = "default_interval")]
    interval: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_condition: Option<EndCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_count: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum EndCondition {
    EndDate,
    EndCount,
    None,
}

fn default_interval() -> u32 {
    1
}

impl TryFrom<RepeatInfo> for RecurrenceRule {
    type Error = RecurrenceError;

    fn try_from(info: RepeatInfo) -> Result<Self, Self::Error> {
        let termination = match info.end_condition {
            Some(EndCondition::EndDate) => {
                let end = info.end_date.ok_or_else(|| {
                    RecurrenceError::InvalidRule(
                        "endCondition \"endDate\" requires endDate".to_string(),
                    )
                })?;
                Termination::ByDate(end)
            }
            Some(EndCondition::EndCount) => {
                let count = info.end_count.ok_or_else(|| {
                    RecurrenceError::InvalidRule(
                        "endCondition \"endCount\" requires endCount".to_string(),
                    )
                })?;
                Termination::ByCount(count)
            }
            Some(EndCondition::None) => Termination::Unbounded,
            // Older records carry only an endDate.
            None => info
                .end_date
                .map_or(Termination::Unbounded, Termination::ByDate),
        };
        Self::new(info.kind, info.interval, termination)
    }
}

impl From<RecurrenceRule> for RepeatInfo {
    fn from(rule: RecurrenceRule) -> Self {
        let (end_condition, end_date, end_count) = match rule.termination {
            Termination::ByDate(end) => (Some(EndCondition::EndDate), Some(end), None),
            Termination::ByCount(count) => (Some(EndCondition::EndCount), None, Some(count)),
            Termination::Unbounded if rule.is_repeating() => {
                (Some(EndCondition::None), None, None)
            }
            Termination::Unbounded => (None, None, None),
        };
        Self {
            kind: rule.cadence,
            interval: rule.interval,
            end_condition,
            end_date,
            end_count,
        }
    }
}

/// The user-authored template of an event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDefinition {
    pub title: String,
    /// Anchor date; for an occurrence, its resolved date.
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: String,
    /// Notification lead time in minutes.
    #[serde(rename = "notificationTime", default)]
    pub notification_minutes: u32,
    #[serde(rename = "repeat", default)]
    pub rule: RecurrenceRule,
}

impl EventDefinition {
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        rule: RecurrenceRule,
    ) -> Self {
        Self {
            title: title.into(),
            date,
            start_time,
            end_time,
            description: String::new(),
            location: String::new(),
            category: String::new(),
            notification_minutes: 0,
            rule,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_notification_minutes(mut self, minutes: u32) -> Self {
        self.notification_minutes = minutes;
        self
    }
}

/// One concrete, dated instance of an event.
///
/// Occurrences are standalone records. Membership in a series is recorded only
/// through `series_id`; nothing else links siblings together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_id: Option<String>,
    #[serde(flatten)]
    pub event: EventDefinition,
}

impl Occurrence {
    /// Wrap a definition as a standalone occurrence on its own anchor date.
    pub fn single(id: impl Into<String>, event: EventDefinition) -> Self {
        Self {
            id: id.into(),
            series_id: None,
            event,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.event.date
    }

    pub fn rule(&self) -> &RecurrenceRule {
        &self.event.rule
    }

    /// Whether a "recurring" indicator should be shown for this occurrence.
    pub fn is_recurring(&self) -> bool {
        self.event.rule.is_repeating()
    }
}

/// `"HH:MM"` time-of-day format used by event records.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
