//! # nodewatch
//!
//! Status engine for a dashboard that monitors clinical data-import
//! nodes. Each node's daily monitoring history (import counters, error
//! rates, contact timestamps) is reduced to a single prioritized health
//! status with a severity color.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                       Host application                     │
//! │  ┌─────────┐     ┌──────────┐     ┌────────────────────┐   │
//! │  │ source  │────▶│   data   │────▶│       check        │   │
//! │  │ (rows)  │     │ (model)  │     │  (classification)  │   │
//! │  └─────────┘     └──────────┘     └────────────────────┘   │
//! │       ▲                                      ▲             │
//! │  stats CSVs                            ┌──────────┐        │
//! │                                        │  config  │        │
//! │                                        └──────────┘        │
//! │                                              ▲             │
//! │                                   per-node mapping JSON    │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`data`]**: the row and status model — [`NodeHistoryRow`],
//!   [`Status`], [`Color`]
//! - **[`check`]**: the classification core — [`StatusClassifier`] and the
//!   pure helpers [`has_gap`], [`is_established`], [`tier`]
//! - **[`config`]**: per-node thresholds behind the [`ThresholdProvider`]
//!   capability
//! - **[`source`]**: the [`HistorySource`] trait with a CSV-backed
//!   implementation
//!
//! The classification core performs no I/O and reads no ambient clock;
//! history, configuration and the current instant are all passed in, so
//! calls are deterministic and safe to run concurrently per node.
//!
//! ## Usage
//!
//! ```
//! use chrono::Utc;
//! use nodewatch::{NodeThresholdConfig, StatusClassifier};
//!
//! let classifier = StatusClassifier::default();
//! let config = NodeThresholdConfig::default();
//! match classifier.classify("42", &[], &config, Utc::now()) {
//!     Ok((status, color)) => println!("{} ({:?})", status, color),
//!     Err(e) => eprintln!("node 42 unmonitored: {}", e),
//! }
//! ```

pub mod check;
pub mod config;
pub mod data;
pub mod error;
pub mod source;

// Re-export main types for convenience
pub use check::{has_gap, is_established, tier, StatusClassifier, Tier};
pub use config::{MappingProvider, NodeThresholdConfig, ThresholdProvider};
pub use data::{Color, NodeHistoryRow, Status};
pub use error::{ClassifyError, HistoryError};
pub use source::{CsvHistorySource, HistorySource};
