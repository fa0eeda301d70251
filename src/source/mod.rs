//! History source abstraction for obtaining node monitoring rows.
//!
//! The classifier never performs I/O itself; it consumes fully
//! materialized history slices fetched through this trait. The shipped
//! implementation reads the per-node stats CSVs maintained by the
//! upstream aggregation job, but tests and other hosts can supply their
//! own backing store.

mod csv_store;

pub use csv_store::CsvHistorySource;

use crate::data::NodeHistoryRow;
use crate::error::HistoryError;

/// Trait for fetching a node's monitoring history.
///
/// Implementations must return rows ordered oldest to newest, fully
/// parsed and immutable; the classifier relies on seeing a consistent
/// snapshot per call.
pub trait HistorySource {
    /// Fetch the complete recorded history for a node.
    fn fetch(&self, node_id: &str) -> Result<Vec<NodeHistoryRow>, HistoryError>;

    /// Human-readable description of the source, for logs and reports.
    fn description(&self) -> &str;
}
