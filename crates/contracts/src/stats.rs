//! ItemCounts - traversal summary
//!
//! Per-kind tallies collected while walking a stream (for diagnostics).

use serde::Serialize;

use crate::ItemType;

/// Per-kind record counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ItemCounts {
    pub nodes: u64,
    pub ways: u64,
    pub relations: u64,
    pub changesets: u64,

    /// Contiguous same-kind runs seen
    pub groups: u64,
}

impl ItemCounts {
    /// Count one entity; other tags are ignored
    pub fn record(&mut self, item_type: ItemType) {
        match item_type {
            ItemType::Node => self.nodes += 1,
            ItemType::Way => self.ways += 1,
            ItemType::Relation => self.relations += 1,
            ItemType::Changeset => self.changesets += 1,
            _ => {}
        }
    }

    /// Count for one entity kind
    pub fn get(&self, item_type: ItemType) -> u64 {
        match item_type {
            ItemType::Node => self.nodes,
            ItemType::Way => self.ways,
            ItemType::Relation => self.relations,
            ItemType::Changeset => self.changesets,
            _ => 0,
        }
    }

    pub fn total(&self) -> u64 {
        self.nodes + self.ways + self.relations + self.changesets
    }
}
