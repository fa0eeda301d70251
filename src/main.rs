// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Datelike, Utc};
use clap::Parser;
use tracing::{info, warn};

mod check;
mod config;
mod data;
mod error;
mod source;

use check::{StatusClassifier, DEFAULT_WINDOW_DAYS};
use config::{MappingProvider, ThresholdProvider};
use data::{Color, Status};
use error::ClassifyError;
use source::{CsvHistorySource, HistorySource};

#[derive(Parser, Debug)]
#[command(name = "nodewatch")]
#[command(about = "Status dashboard engine for monitored data-import nodes")]
struct Args {
    /// Root directory of the per-node stats CSVs
    #[arg(short, long)]
    dir: PathBuf,

    /// Path to the per-node threshold mapping JSON
    #[arg(short, long)]
    mapping: Option<PathBuf>,

    /// Classify only the given node id (repeatable); defaults to every
    /// node in the mapping
    #[arg(short, long)]
    node: Vec<String>,

    /// Trailing history window in days
    #[arg(short, long, default_value_t = DEFAULT_WINDOW_DAYS)]
    window: usize,

    /// Stats-file year; defaults to the current year
    #[arg(short, long)]
    year: Option<i32>,

    /// Write the report as JSON to this path instead of stdout
    #[arg(short, long)]
    export: Option<PathBuf>,
}

/// Classification outcome for one node, ready for rendering.
struct NodeReport {
    node: String,
    status: Option<(Status, Color)>,
    detail: Option<String>,
}

impl NodeReport {
    fn label(&self) -> &str {
        match &self.status {
            Some((status, _)) => status.label(),
            None => "NO DATA",
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nodewatch=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let now = Utc::now();

    let provider = match &args.mapping {
        Some(path) => MappingProvider::load(path)?,
        None => MappingProvider::default(),
    };

    let nodes = if args.node.is_empty() {
        provider.node_ids()
    } else {
        args.node.clone()
    };
    if nodes.is_empty() {
        anyhow::bail!("no nodes to classify; pass --node or a --mapping file");
    }

    let source = CsvHistorySource::new(&args.dir, args.year.unwrap_or_else(|| now.year()));
    let classifier = StatusClassifier::new(args.window);

    info!(
        nodes = nodes.len(),
        source = source.description(),
        "classifying nodes"
    );

    let reports: Vec<NodeReport> = nodes
        .iter()
        .map(|node| classify_node(node, &source, &provider, &classifier, now))
        .collect();

    match &args.export {
        Some(path) => export_to_file(&reports, now, path)?,
        None => print_table(&reports),
    }

    Ok(())
}

/// Classify a single node, folding load and classification failures
/// into a report entry instead of aborting the run.
fn classify_node(
    node: &str,
    source: &dyn HistorySource,
    provider: &dyn ThresholdProvider,
    classifier: &StatusClassifier,
    now: DateTime<Utc>,
) -> NodeReport {
    let history = match source.fetch(node) {
        Ok(history) => history,
        Err(e) => {
            warn!(node, error = %e, "could not load node history");
            return NodeReport {
                node: node.to_string(),
                status: None,
                detail: Some(e.to_string()),
            };
        }
    };

    match classifier.classify(node, &history, &provider.get(node), now) {
        Ok((status, color)) => NodeReport {
            node: node.to_string(),
            status: Some((status, color)),
            detail: None,
        },
        Err(e @ ClassifyError::NoHistory { .. }) => {
            // An unmonitored node must surface as such, never as ONLINE.
            warn!(node, "node has no monitoring history");
            NodeReport {
                node: node.to_string(),
                status: None,
                detail: Some(e.to_string()),
            }
        }
        Err(e) => {
            warn!(node, error = %e, "classification failed");
            NodeReport {
                node: node.to_string(),
                status: None,
                detail: Some(e.to_string()),
            }
        }
    }
}

fn print_table(reports: &[NodeReport]) {
    println!("{:<10} {:<20} {:<8}", "NODE", "STATUS", "SEVERITY");
    for report in reports {
        let severity = match &report.status {
            Some((_, color)) => format!("{:?}", color),
            None => "-".to_string(),
        };
        println!("{:<10} {:<20} {:<8}", report.node, report.label(), severity);
        if let Some(detail) = &report.detail {
            println!("{:<10} ^ {}", "", detail);
        }
    }
}

/// Write the run's results as a JSON report.
fn export_to_file(
    reports: &[NodeReport],
    now: DateTime<Utc>,
    path: &std::path::Path,
) -> Result<()> {
    let nodes: Vec<serde_json::Value> = reports
        .iter()
        .map(|r| {
            serde_json::json!({
                "node": r.node,
                "status": r.label(),
                "color": r.status.map(|(_, color)| format!("{:?}", color)),
                "detail": r.detail,
            })
        })
        .collect();

    let export = serde_json::json!({
        "checked_at": now.to_rfc3339(),
        "nodes": nodes,
    });

    std::fs::write(path, serde_json::to_string_pretty(&export)?)?;
    info!(path = %path.display(), "exported status report");
    Ok(())
}
