//! Consecutive-import trend detection.
//!
//! A newly onboarded node shows sporadic imports while its integration
//! is still being tested. Only a sustained run of import-producing days
//! signals production readiness.

use crate::data::NodeHistoryRow;

/// Report whether the node has an established consecutive-import run.
///
/// Scans the window for the longest run of consecutive days with
/// `daily_imported > 0`; established means that run reaches `threshold`.
/// A threshold larger than the available window cannot be evaluated and
/// counts as established, so short histories are not punished. Absent
/// counts break a run.
pub fn is_established(window: &[NodeHistoryRow], threshold: u32) -> bool {
    if threshold as usize > window.len() {
        return true;
    }
    longest_import_run(window) >= threshold
}

fn longest_import_run(window: &[NodeHistoryRow]) -> u32 {
    let mut longest = 0;
    let mut current = 0;
    for row in window {
        if row.daily_imported.unwrap_or(0) > 0 {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}
