//! Error taxonomy for classification and history loading.
//!
//! Everything here is caller-recoverable: a node with bad or missing
//! data is reported as such, it never aborts a monitoring run.

use thiserror::Error;

/// Errors raised by the classification core.
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// The history slice was empty. The caller must treat the node as
    /// unmonitored, never as silently ONLINE.
    #[error("no monitoring history for node {node}")]
    NoHistory { node: String },

    /// A row carried a value outside its declared domain.
    #[error("malformed history row for node {node}: {detail}")]
    MalformedRow { node: String, detail: String },
}

/// Errors raised while loading node history from a backing store.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("failed to read history file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse history file: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Malformed(#[from] ClassifyError),
}
