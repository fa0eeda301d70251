//! CSV-backed history source.
//!
//! The upstream aggregation job appends one row per day to
//! `<root>/<node id>/<node id>_stats_<year>.csv`, semicolon-separated,
//! with `-` marking values that were not recorded. This source parses
//! those files into [`NodeHistoryRow`]s.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use csv::StringRecord;
use tracing::debug;

use super::HistorySource;
use crate::data::{parse_optional, parse_timestamp, NodeHistoryRow};
use crate::error::{ClassifyError, HistoryError};

const STATS_CATEGORY: &str = "stats";

/// Reads node histories from per-node stats CSV files.
#[derive(Debug, Clone)]
pub struct CsvHistorySource {
    root: PathBuf,
    year: i32,
    description: String,
}

impl CsvHistorySource {
    /// Create a source over the given stats directory for one year.
    ///
    /// Stats files roll over per year; the caller picks the year that
    /// matches the instant it classifies against.
    pub fn new<P: AsRef<Path>>(root: P, year: i32) -> Self {
        let root = root.as_ref().to_path_buf();
        let description = format!("stats csv: {} ({})", root.display(), year);
        Self {
            root,
            year,
            description,
        }
    }

    /// Path of the stats file for a node.
    ///
    /// Naming convention is `<ID>_<CATEGORY>_<YEAR>.csv` inside a
    /// directory named after the node.
    pub fn csv_path(&self, node_id: &str) -> PathBuf {
        self.root
            .join(node_id)
            .join(format!("{}_{}_{}.csv", node_id, STATS_CATEGORY, self.year))
    }
}

impl HistorySource for CsvHistorySource {
    fn fetch(&self, node_id: &str) -> Result<Vec<NodeHistoryRow>, HistoryError> {
        let path = self.csv_path(node_id);
        debug!(node = node_id, path = %path.display(), "reading node history");

        let mut reader = csv::ReaderBuilder::new().delimiter(b';').from_path(&path)?;
        let columns = Columns::locate(node_id, reader.headers()?)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(columns.parse_row(node_id, &record?)?);
        }
        Ok(rows)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Header indices of the fields the monitor consumes.
///
/// Stats files carry more columns (totals, invalid/failed counts);
/// anything not listed here is ignored.
struct Columns {
    date: usize,
    last_contact: usize,
    last_write: usize,
    daily_imported: usize,
    daily_updated: usize,
    daily_error_rate: usize,
}

impl Columns {
    fn locate(node_id: &str, headers: &StringRecord) -> Result<Self, HistoryError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| malformed(node_id, format!("missing column '{}'", name)))
        };
        Ok(Self {
            date: find("date")?,
            last_contact: find("last_contact")?,
            last_write: find("last_write")?,
            daily_imported: find("daily_imported")?,
            daily_updated: find("daily_updated")?,
            daily_error_rate: find("daily_error_rate")?,
        })
    }

    fn parse_row(
        &self,
        node_id: &str,
        record: &StringRecord,
    ) -> Result<NodeHistoryRow, HistoryError> {
        let date_raw = record.get(self.date).unwrap_or_default();
        let date = parse_timestamp(date_raw)
            .map_err(|e| malformed(node_id, format!("bad date '{}': {}", date_raw, e)))?;

        Ok(NodeHistoryRow {
            date,
            last_contact: self.optional_timestamp(node_id, record, self.last_contact)?,
            last_write: self.optional_timestamp(node_id, record, self.last_write)?,
            daily_imported: self.optional_value(node_id, record, self.daily_imported)?,
            daily_updated: self.optional_value(node_id, record, self.daily_updated)?,
            daily_error_rate: self.optional_value(node_id, record, self.daily_error_rate)?,
        })
    }

    fn optional_timestamp(
        &self,
        node_id: &str,
        record: &StringRecord,
        index: usize,
    ) -> Result<Option<DateTime<Utc>>, HistoryError> {
        let raw = record.get(index).unwrap_or_default().trim();
        if raw.is_empty() || raw == crate::data::NO_DATA {
            return Ok(None);
        }
        parse_timestamp(raw)
            .map(Some)
            .map_err(|e| malformed(node_id, format!("bad timestamp '{}': {}", raw, e)))
    }

    fn optional_value<T: std::str::FromStr>(
        &self,
        node_id: &str,
        record: &StringRecord,
        index: usize,
    ) -> Result<Option<T>, HistoryError>
    where
        T::Err: std::fmt::Display,
    {
        let raw = record.get(index).unwrap_or_default();
        parse_optional(raw).map_err(|e| malformed(node_id, format!("bad value '{}': {}", raw, e)))
    }
}

fn malformed(node_id: &str, detail: String) -> HistoryError {
    HistoryError::Malformed(ClassifyError::MalformedRow {
        node: node_id.to_string(),
        detail,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "date;last_contact;last_start;last_write;last_reject;\
imported;updated;invalid;failed;error_rate;\
daily_imported;daily_updated;daily_invalid;daily_failed;daily_error_rate";

    fn write_stats(dir: &TempDir, node_id: &str, rows: &[&str]) -> CsvHistorySource {
        let node_dir = dir.path().join(node_id);
        fs::create_dir_all(&node_dir).unwrap();
        let mut content = String::from(HEADER);
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        fs::write(
            node_dir.join(format!("{}_stats_2024.csv", node_id)),
            content,
        )
        .unwrap();
        CsvHistorySource::new(dir.path(), 2024)
    }

    #[test]
    fn parses_rows_in_file_order() {
        let dir = TempDir::new().unwrap();
        let source = write_stats(
            &dir,
            "7",
            &[
                "2024-03-09 06:00:00;2024-03-09 05:55:00;-;2024-03-09 04:00:00;-;\
900;100;0;0;0.0;450;50;0;0;0.5",
                "2024-03-10 06:00:00;2024-03-10 05:55:00;-;2024-03-10 04:00:00;-;\
1800;200;0;0;0.0;900;100;0;0;1.5",
            ],
        );

        let rows = source.fetch("7").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].date,
            Utc.with_ymd_and_hms(2024, 3, 9, 6, 0, 0).unwrap()
        );
        assert_eq!(rows[1].daily_imported, Some(900));
        assert_eq!(rows[1].daily_updated, Some(100));
        assert_eq!(rows[1].daily_error_rate, Some(1.5));
        assert_eq!(
            rows[1].last_write,
            Some(Utc.with_ymd_and_hms(2024, 3, 10, 4, 0, 0).unwrap())
        );
    }

    #[test]
    fn dash_marker_becomes_absent() {
        let dir = TempDir::new().unwrap();
        let source = write_stats(
            &dir,
            "7",
            &["2024-03-10 06:00:00;-;-;-;-;-;-;-;-;-;-;-;-;-;-"],
        );

        let rows = source.fetch("7").unwrap();
        let row = &rows[0];
        assert_eq!(row.last_contact, None);
        assert_eq!(row.last_write, None);
        assert_eq!(row.daily_imported, None);
        assert_eq!(row.daily_error_rate, None);
    }

    #[test]
    fn empty_file_yields_empty_history() {
        let dir = TempDir::new().unwrap();
        let source = write_stats(&dir, "7", &[]);
        assert!(source.fetch("7").unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let source = CsvHistorySource::new(dir.path(), 2024);
        assert!(source.fetch("99").is_err());
    }

    #[test]
    fn bad_count_is_malformed() {
        let dir = TempDir::new().unwrap();
        let source = write_stats(
            &dir,
            "7",
            &["2024-03-10 06:00:00;-;-;-;-;-;-;-;-;-;minus five;-;-;-;-"],
        );

        let err = source.fetch("7").unwrap_err();
        assert!(matches!(err, HistoryError::Malformed(_)));
    }

    #[test]
    fn bad_timestamp_is_malformed() {
        let dir = TempDir::new().unwrap();
        let source = write_stats(
            &dir,
            "7",
            &["2024-03-10 06:00:00;10.03.2024;-;-;-;-;-;-;-;-;-;-;-;-;-"],
        );

        let err = source.fetch("7").unwrap_err();
        assert!(matches!(err, HistoryError::Malformed(_)));
    }

    #[test]
    fn missing_column_is_malformed() {
        let dir = TempDir::new().unwrap();
        let node_dir = dir.path().join("7");
        fs::create_dir_all(&node_dir).unwrap();
        fs::write(node_dir.join("7_stats_2024.csv"), "date;last_contact\n").unwrap();

        let source = CsvHistorySource::new(dir.path(), 2024);
        let err = source.fetch("7").unwrap_err();
        assert!(err.to_string().contains("missing column"));
    }

    #[test]
    fn path_follows_naming_convention() {
        let source = CsvHistorySource::new("/var/monitoring", 2024);
        assert_eq!(
            source.csv_path("42"),
            PathBuf::from("/var/monitoring/42/42_stats_2024.csv")
        );
    }
}
