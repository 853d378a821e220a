//! Traversal metrics
//!
//! Records per-kind item counts after each traversal, and aggregates them
//! across traversals for end-of-run summaries.

use std::fmt;

use contracts::{ItemCounts, ItemType};
use metrics::{counter, gauge};

/// Record the counts of one traversal
///
/// # Example
///
/// ```ignore
/// let mut counter = CountHandler::new();
/// dispatcher::apply(&buffer, &mut counter)?;
/// record_item_counts(counter.counts());
/// ```
pub fn record_item_counts(counts: &ItemCounts) {
    counter!("osm_visit_runs_total").increment(1);

    for item_type in [
        ItemType::Node,
        ItemType::Way,
        ItemType::Relation,
        ItemType::Changeset,
    ] {
        let n = counts.get(item_type);
        if n > 0 {
            counter!("osm_visit_items_total", "kind" => item_type.as_str()).increment(n);
        }
    }

    counter!("osm_visit_groups_total").increment(counts.groups);
}

/// Record the size of one traversal
pub fn record_traversal(items: u64, groups: u64) {
    gauge!("osm_visit_last_traversal_items").set(items as f64);
    gauge!("osm_visit_last_traversal_groups").set(groups as f64);
}

/// Record a traversal aborted on an unroutable tag
pub fn record_dispatch_failure(item_type: ItemType) {
    counter!("osm_visit_dispatch_failures_total", "kind" => item_type.as_str()).increment(1);
}

/// Accumulates counts over several traversals
#[derive(Debug, Default)]
pub struct CountsAggregator {
    total: ItemCounts,
    runs: u64,
    largest_run: u64,
}

impl CountsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in the counts of one traversal
    pub fn update(&mut self, counts: &ItemCounts) {
        self.total.nodes += counts.nodes;
        self.total.ways += counts.ways;
        self.total.relations += counts.relations;
        self.total.changesets += counts.changesets;
        self.total.groups += counts.groups;
        self.runs += 1;
        self.largest_run = self.largest_run.max(counts.total());
    }

    pub fn summary(&self) -> CountsSummary {
        CountsSummary {
            runs: self.runs,
            totals: self.total,
            largest_run: self.largest_run,
            mean_per_run: if self.runs == 0 {
                0.0
            } else {
                self.total.total() as f64 / self.runs as f64
            },
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Snapshot of aggregated counts
#[derive(Debug, Clone, Copy)]
pub struct CountsSummary {
    pub runs: u64,
    pub totals: ItemCounts,
    pub largest_run: u64,
    pub mean_per_run: f64,
}

impl fmt::Display for CountsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Traversals: {}", self.runs)?;
        writeln!(f, "  Nodes:      {}", self.totals.nodes)?;
        writeln!(f, "  Ways:       {}", self.totals.ways)?;
        writeln!(f, "  Relations:  {}", self.totals.relations)?;
        writeln!(f, "  Changesets: {}", self.totals.changesets)?;
        writeln!(f, "  Groups:     {}", self.totals.groups)?;
        write!(
            f,
            "  Per run:    mean={:.1} max={}",
            self.mean_per_run, self.largest_run
        )
    }
}
