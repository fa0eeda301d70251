//! The status classification core.
//!
//! Pure decision logic only; all input rows and configuration are
//! passed in and the current instant is injected by the caller.

pub mod classifier;
pub mod error_rate;
pub mod gap;
pub mod trend;

pub use classifier::{StatusClassifier, DEFAULT_WINDOW_DAYS, IMPORT_DEVIATION_WIDTH};
pub use error_rate::{tier, Tier};
pub use gap::has_gap;
pub use trend::is_established;
