use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Options for turning a document into [`crate::RightsAuth`].
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use rights_auth::ParseConfig;
///
/// let config = ParseConfig::new()
///     .for_index(true)
///     .evaluated_at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
/// assert!(config.builds_index());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Build [`crate::IndexSummary`] alongside the rights.
    pub for_index: bool,

    /// Instant the embargo release date is compared against. Defaults to
    /// the time of parsing.
    pub evaluated_at: Option<DateTime<Utc>>,
}

impl ParseConfig {
    /// Configuration for plain rights evaluation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether index elements are built
    pub fn for_index(mut self, for_index: bool) -> Self {
        self.for_index = for_index;
        self
    }

    /// Pin the instant used for embargo evaluation
    pub fn evaluated_at(mut self, instant: DateTime<Utc>) -> Self {
        self.evaluated_at = Some(instant);
        self
    }

    /// Returns `true` if index elements will be built.
    pub fn builds_index(&self) -> bool {
        self.for_index
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.evaluated_at.unwrap_or_else(Utc::now)
    }
}
