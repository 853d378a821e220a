//! CountHandler - tallies entities and groups

use contracts::{Changeset, ItemCounts, ItemType, Node, Relation, Way};

use crate::visitor::{Handler, Lifecycle};

/// Handler counting entities per kind and the groups they arrive in
#[derive(Debug, Default)]
pub struct CountHandler {
    counts: ItemCounts,
    runs: u64,
    finished: bool,
}

impl CountHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts so far
    pub fn counts(&self) -> &ItemCounts {
        &self.counts
    }

    /// Completed traversals (each `done` seen)
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// True between `done` and the next `init`
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn into_counts(self) -> ItemCounts {
        self.counts
    }
}

impl Lifecycle for CountHandler {
    fn init(&mut self) {
        self.finished = false;
    }

    fn before_nodes(&mut self) {
        self.counts.groups += 1;
    }

    fn before_ways(&mut self) {
        self.counts.groups += 1;
    }

    fn before_relations(&mut self) {
        self.counts.groups += 1;
    }

    fn before_changesets(&mut self) {
        self.counts.groups += 1;
    }

    fn done(&mut self) {
        self.runs += 1;
        self.finished = true;
    }
}

impl Handler for CountHandler {
    fn node(&mut self, _node: &Node) {
        self.counts.record(ItemType::Node);
    }

    fn way(&mut self, _way: &Way) {
        self.counts.record(ItemType::Way);
    }

    fn relation(&mut self, _relation: &Relation) {
        self.counts.record(ItemType::Relation);
    }

    fn changeset(&mut self, _changeset: &Changeset) {
        self.counts.record(ItemType::Changeset);
    }
}
