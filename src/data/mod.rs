//! Data model for node monitoring histories and statuses.

pub mod row;
pub mod status;

pub use row::{parse_optional, parse_timestamp, NodeHistoryRow, NO_DATA, TIMESTAMP_FORMAT};
pub use status::{Color, Status};
