//! Daily monitoring rows for a single node.
//!
//! One row is recorded per calendar day per node by the upstream
//! aggregation job. Rows are append-only: once written they are never
//! mutated, so a history slice handed to the classifier is immutable.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::ClassifyError;

/// Timestamp format used in the node stats files.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Marker used in stats files for "no data recorded".
pub const NO_DATA: &str = "-";

/// One day's monitoring snapshot for one node.
///
/// Absent fields are legitimate "no data" values, not errors; every
/// classification rule handles them with an explicit non-triggering
/// policy.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeHistoryRow {
    /// Timestamp of the daily check; one row expected per calendar day.
    pub date: DateTime<Utc>,
    /// Last successful contact with the node.
    pub last_contact: Option<DateTime<Utc>>,
    /// Last successful write/import on the node.
    pub last_write: Option<DateTime<Utc>>,
    /// Records imported that day.
    pub daily_imported: Option<u64>,
    /// Records updated that day.
    pub daily_updated: Option<u64>,
    /// Error rate that day, in percent [0, 100].
    pub daily_error_rate: Option<f64>,
}

impl NodeHistoryRow {
    /// Total import volume for the day, if both counts were recorded.
    ///
    /// Returns `None` when either count is absent so volume-sensitive
    /// rules can short-circuit instead of guessing.
    pub fn daily_volume(&self) -> Option<u64> {
        match (self.daily_imported, self.daily_updated) {
            (Some(imported), Some(updated)) => Some(imported + updated),
            _ => None,
        }
    }

    /// Check that all present values are inside their declared domains.
    ///
    /// Upstream data-quality problems surface here rather than being
    /// coerced into a plausible-looking status.
    pub fn validate(&self, node: &str) -> Result<(), ClassifyError> {
        if let Some(rate) = self.daily_error_rate {
            if !(0.0..=100.0).contains(&rate) || rate.is_nan() {
                return Err(ClassifyError::MalformedRow {
                    node: node.to_string(),
                    detail: format!(
                        "daily_error_rate {} on {} outside [0, 100]",
                        rate,
                        self.date.format(TIMESTAMP_FORMAT)
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Parse a stats-file timestamp (`%Y-%m-%d %H:%M:%S`, UTC).
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT).map(|naive| naive.and_utc())
}

/// Parse an optional stats-file field, treating `-` and empty as absent.
pub fn parse_optional<T: std::str::FromStr>(s: &str) -> Result<Option<T>, T::Err> {
    let s = s.trim();
    if s.is_empty() || s == NO_DATA {
        return Ok(None);
    }
    s.parse().map(Some)
}
