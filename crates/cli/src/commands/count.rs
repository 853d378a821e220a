//! `count` command implementation.

use anyhow::{Context, Result};
use contracts::ItemCounts;
use dispatcher::{apply_iter, CountHandler, DispatchError};
use observability::metrics::{
    record_dispatch_failure, record_item_counts, record_traversal, CountsAggregator,
};
use serde::Serialize;
use tracing::info;

use super::{handler_records, load_buffer};
use crate::cli::CountArgs;
use crate::error::CliError;

/// Counts of one file for JSON output
#[derive(Serialize)]
struct FileCounts {
    path: String,
    records: usize,
    #[serde(flatten)]
    counts: ItemCounts,
}

#[derive(Serialize)]
struct CountReport {
    files: Vec<FileCounts>,
    total: ItemCounts,
}

/// Execute the `count` command
pub fn run_count(args: &CountArgs) -> Result<()> {
    let mut aggregator = CountsAggregator::new();
    let mut files = Vec::with_capacity(args.files.len());

    for path in &args.files {
        info!(dataset = %path.display(), "Counting records");

        let buffer = load_buffer(path)?;
        let counts = count_buffer(&buffer, args.strict)
            .map_err(|e| CliError::traversal(path.display().to_string(), e))?;

        aggregator.update(&counts);
        files.push(FileCounts {
            path: path.display().to_string(),
            records: buffer.len(),
            counts,
        });
    }

    let summary = aggregator.summary();

    if args.json {
        let report = CountReport {
            files,
            total: summary.totals,
        };
        let json =
            serde_json::to_string_pretty(&report).context("Failed to serialize counts")?;
        println!("{}", json);
    } else {
        for file in &files {
            print_file_counts(file);
        }
        if files.len() > 1 {
            println!("\n{}", summary);
        }
    }

    Ok(())
}

/// Run one counting traversal and record its metrics
fn count_buffer(buffer: &contracts::Buffer, strict: bool) -> Result<ItemCounts, DispatchError> {
    let mut counter = CountHandler::new();

    match apply_iter(handler_records(buffer, strict), &mut counter) {
        Ok(traversal) => {
            record_traversal(traversal.items, traversal.groups);
            record_item_counts(counter.counts());
            Ok(counter.into_counts())
        }
        Err(e) => {
            if let Some(item_type) = e.item_type() {
                record_dispatch_failure(item_type);
            }
            Err(e)
        }
    }
}

fn print_file_counts(file: &FileCounts) {
    println!("{} ({} records)", file.path, file.records);
    println!("  Nodes:      {}", file.counts.nodes);
    println!("  Ways:       {}", file.counts.ways);
    println!("  Relations:  {}", file.counts.relations);
    println!("  Changesets: {}", file.counts.changesets);
    println!("  Groups:     {}", file.counts.groups);
}
