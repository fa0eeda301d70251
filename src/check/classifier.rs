//! Status classification cascade.
//!
//! Reduces a node's monitoring history to a single prioritized status.
//! The cascade is an explicit early-return sequence: several rules can
//! be true at once and the first match wins, so the order below is part
//! of the contract.

use chrono::{DateTime, Duration, Utc};

use crate::check::error_rate::{tier, Tier};
use crate::check::gap::has_gap;
use crate::check::trend::is_established;
use crate::config::NodeThresholdConfig;
use crate::data::{Color, NodeHistoryRow, Status};
use crate::error::ClassifyError;

/// Calendar days covered by the trailing history window.
pub const DEFAULT_WINDOW_DAYS: usize = 7;

/// Allowed relative deviation around the configured import volume.
pub const IMPORT_DEVIATION_WIDTH: f64 = 0.33;

/// Classifies node histories into dashboard statuses.
///
/// Pure and synchronous: every call only reads its arguments and the
/// injected `now`, so concurrent classification of distinct nodes needs
/// no coordination.
#[derive(Debug, Clone)]
pub struct StatusClassifier {
    window_days: usize,
}

impl Default for StatusClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_DAYS)
    }
}

impl StatusClassifier {
    /// Create a classifier with a custom trailing-window length.
    pub fn new(window_days: usize) -> Self {
        Self { window_days }
    }

    /// Classify a node's history into a `(status, color)` pair.
    ///
    /// `history` must be ordered oldest to newest; an empty slice fails
    /// with [`ClassifyError::NoHistory`]. Rules are evaluated in strict
    /// priority order:
    ///
    /// 1. OFFLINE — contact staleness
    /// 2. NO IMPORTS — write staleness
    /// 3. GAP IN MONITORING — broken daily cadence
    /// 4. TESTING — no established consecutive-import run
    /// 5. error-rate tiers
    /// 6. DEVIATING IMPORTS — volume outside the configured band
    /// 7. ONLINE
    pub fn classify(
        &self,
        node_id: &str,
        history: &[NodeHistoryRow],
        config: &NodeThresholdConfig,
        now: DateTime<Utc>,
    ) -> Result<(Status, Color), ClassifyError> {
        let window = self.trailing_window(history);
        let Some(latest) = window.last() else {
            return Err(ClassifyError::NoHistory {
                node: node_id.to_string(),
            });
        };
        for row in window {
            row.validate(node_id)?;
        }

        let status = if is_stale(latest.last_contact, config.offline_hours(), now) {
            Status::Offline
        } else if is_stale(latest.last_write, config.no_imports_hours(), now) {
            Status::NoImports
        } else if has_gap(window, now.date_naive()) {
            Status::GapInMonitoring
        } else if !is_established(window, config.consecutive_import_threshold()) {
            Status::Testing
        } else if let Some(tier) = latest
            .daily_error_rate
            .and_then(|rate| tier(rate, latest.daily_volume()))
        {
            match tier {
                Tier::Low => Status::LowErrorRate,
                Tier::High => Status::HighErrorRate,
                Tier::Extreme => Status::ExtremeErrorRate,
            }
        } else if imports_deviating(latest, config) {
            Status::DeviatingImports
        } else {
            Status::Online
        };

        Ok((status, status.color()))
    }

    fn trailing_window<'a>(&self, history: &'a [NodeHistoryRow]) -> &'a [NodeHistoryRow] {
        let start = history.len().saturating_sub(self.window_days);
        &history[start..]
    }
}

/// An absent timestamp is stale by definition: the node never reported.
fn is_stale(timestamp: Option<DateTime<Utc>>, hours: i64, now: DateTime<Utc>) -> bool {
    match timestamp {
        Some(ts) => now - ts > Duration::hours(hours),
        None => true,
    }
}

/// Whether the latest daily volume falls outside the configured band.
///
/// Without a configured volume threshold, or without both daily counts,
/// the rule does not trigger.
fn imports_deviating(latest: &NodeHistoryRow, config: &NodeThresholdConfig) -> bool {
    let Some(threshold) = config.import_volume_threshold else {
        return false;
    };
    let Some(volume) = latest.daily_volume() else {
        return false;
    };
    let lower = threshold as f64 * (1.0 - IMPORT_DEVIATION_WIDTH);
    let upper = threshold as f64 * (1.0 + IMPORT_DEVIATION_WIDTH);
    let volume = volume as f64;
    volume < lower || volume > upper
}
