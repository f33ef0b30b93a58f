//! Expansion settings supplied by the caller.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default cap on occurrence indices tried per expansion.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Settings that bound a single expansion.
///
/// Deserializes from a table such as:
///
/// ```toml
/// horizon = "2025-06-30"
/// max_attempts = 1000
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionConfig {
    /// Last date an unbounded rule may produce. Unbounded rules cannot be
    /// expanded without one.
    pub horizon: Option<NaiveDate>,
    /// Maximum number of occurrence indices to try before giving up.
    pub max_attempts: u32,
}

impl ExpansionConfig {
    pub fn with_horizon(horizon: NaiveDate) -> Self {
        Self {
            horizon: Some(horizon),
            ..Self::default()
        }
    }

    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            horizon: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}
