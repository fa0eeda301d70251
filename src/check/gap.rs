//! Monitoring-cadence gap detection.

use chrono::NaiveDate;

use crate::data::NodeHistoryRow;

/// Report whether the daily monitoring cadence has a break.
///
/// Only the trailing pair of rows is examined: no gap means the two
/// most recent rows are exactly one calendar day apart and the most
/// recent row carries today's date. Any other spacing (duplicate day,
/// skipped day, stale last row) counts as a gap.
///
/// Gaps further back in the window stay invisible; the rule favors
/// recency over a full-window audit. With fewer than two rows nothing
/// can be concluded and no gap is reported.
pub fn has_gap(window: &[NodeHistoryRow], today: NaiveDate) -> bool {
    let [.., previous, latest] = window else {
        return false;
    };

    let latest_date = latest.date.date_naive();
    if latest_date != today {
        return true;
    }
    latest_date - previous.date.date_naive() != chrono::Duration::days(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn today() -> NaiveDate {
        Utc.with_ymd_and_hms(2024, 3, 10, 14, 0, 0).unwrap().date_naive()
    }

    /// Seven rows ending on `today`, one per day.
    fn contiguous_week() -> Vec<NodeHistoryRow> {
        let last = Utc.with_ymd_and_hms(2024, 3, 10, 6, 0, 0).unwrap();
        (0..7)
            .rev()
            .map(|days_back| NodeHistoryRow {
                date: last - Duration::days(days_back),
                last_contact: None,
                last_write: None,
                daily_imported: Some(1),
                daily_updated: Some(0),
                daily_error_rate: None,
            })
            .collect()
    }

    #[test]
    fn contiguous_week_has_no_gap() {
        assert!(!has_gap(&contiguous_week(), today()));
    }

    #[test]
    fn stale_last_row_is_a_gap() {
        let mut window = contiguous_week();
        // Last check ran yesterday; nothing was recorded today.
        window.last_mut().unwrap().date -= Duration::days(1);
        assert!(has_gap(&window, today()));
    }

    #[test]
    fn skipped_day_before_last_row_is_a_gap() {
        let mut window = contiguous_week();
        let idx = window.len() - 2;
        window[idx].date -= Duration::days(1);
        assert!(has_gap(&window, today()));
    }

    #[test]
    fn duplicate_day_before_last_row_is_a_gap() {
        let mut window = contiguous_week();
        let idx = window.len() - 2;
        window[idx].date += Duration::days(1);
        assert!(has_gap(&window, today()));
    }

    #[test]
    fn gap_earlier_in_window_is_invisible() {
        let mut window = contiguous_week();
        window[3].date -= Duration::days(2);
        assert!(!has_gap(&window, today()));
    }

    #[test]
    fn fewer_than_two_rows_is_inconclusive() {
        let week = contiguous_week();
        assert!(!has_gap(&week[6..], today()));
        assert!(!has_gap(&[], today()));
    }
}
