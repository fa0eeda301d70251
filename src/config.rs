//! Per-node threshold configuration.
//!
//! Nodes differ: a large university hospital imports thousands of
//! records a day, a freshly onboarded site a handful. The mapping file
//! maintained next to the dashboard carries per-node overrides; nodes
//! without an entry run on the system defaults.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default minimum run of consecutive import days before a node counts
/// as established rather than testing.
pub const DEFAULT_CONSECUTIVE_IMPORT_THRESHOLD: u32 = 3;

/// Default hours without contact before a node is OFFLINE.
pub const DEFAULT_OFFLINE_HOURS: i64 = 24;

/// Default hours without a write before a node shows NO IMPORTS.
pub const DEFAULT_NO_IMPORTS_HOURS: i64 = 24;

/// Threshold overrides for a single node.
///
/// Field names mirror the keys of the JSON mapping file. Every field is
/// optional; [`NodeThresholdConfig::default`] yields the system defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeThresholdConfig {
    /// Expected daily import volume; enables the DEVIATING IMPORTS rule.
    #[serde(rename = "DAILY_IMPORT_THRESHOLD")]
    pub import_volume_threshold: Option<u64>,

    /// Minimum consecutive-import run length in days.
    #[serde(rename = "CONSECUTIVE_IMPORT_THRESHOLD")]
    pub consecutive_import_threshold: Option<u32>,

    /// Hours without contact before OFFLINE.
    #[serde(rename = "HOURS_UNTIL_OFFLINE")]
    pub offline_hours: Option<i64>,

    /// Hours without a write before NO IMPORTS.
    #[serde(rename = "HOURS_UNTIL_NO_IMPORTS")]
    pub no_imports_hours: Option<i64>,
}

impl NodeThresholdConfig {
    /// Consecutive-import threshold with the default applied.
    pub fn consecutive_import_threshold(&self) -> u32 {
        self.consecutive_import_threshold
            .unwrap_or(DEFAULT_CONSECUTIVE_IMPORT_THRESHOLD)
    }

    /// Contact-staleness threshold in hours with the default applied.
    pub fn offline_hours(&self) -> i64 {
        self.offline_hours.unwrap_or(DEFAULT_OFFLINE_HOURS)
    }

    /// Write-staleness threshold in hours with the default applied.
    pub fn no_imports_hours(&self) -> i64 {
        self.no_imports_hours.unwrap_or(DEFAULT_NO_IMPORTS_HOURS)
    }
}

/// Capability for looking up a node's threshold configuration.
///
/// Injected into the classifier's caller instead of living in global
/// state, so tests and alternative stores can supply their own mapping.
pub trait ThresholdProvider {
    /// Configuration for the given node; defaults if the node is unmapped.
    fn get(&self, node_id: &str) -> NodeThresholdConfig;

    /// All node ids known to this provider, sorted.
    fn node_ids(&self) -> Vec<String>;
}

/// Threshold provider backed by the dashboard's JSON mapping file.
///
/// File shape: `{"<node id>": {"DAILY_IMPORT_THRESHOLD": 1000, ...}, ...}`.
/// Unknown keys inside a node entry are ignored.
#[derive(Debug, Clone, Default)]
pub struct MappingProvider {
    mapping: HashMap<String, NodeThresholdConfig>,
}

impl MappingProvider {
    /// Load the mapping from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading node mapping {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse the mapping from a JSON string.
    pub fn parse(content: &str) -> Result<Self> {
        let mapping: HashMap<String, NodeThresholdConfig> =
            serde_json::from_str(content).context("parsing node mapping JSON")?;
        Ok(Self { mapping })
    }

    /// Build a provider from an in-memory mapping.
    pub fn from_mapping(mapping: HashMap<String, NodeThresholdConfig>) -> Self {
        Self { mapping }
    }
}

impl ThresholdProvider for MappingProvider {
    fn get(&self, node_id: &str) -> NodeThresholdConfig {
        self.mapping.get(node_id).cloned().unwrap_or_default()
    }

    fn node_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.mapping.keys().cloned().collect();
        ids.sort();
        ids
    }
}
