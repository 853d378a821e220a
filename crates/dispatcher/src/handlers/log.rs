//! LogHandler - logs entities and group boundaries via tracing

use contracts::{Changeset, Node, Relation, Way};
use tracing::{debug, info};

use crate::visitor::{Handler, Lifecycle};

/// Handler that logs every entity for debugging
pub struct LogHandler {
    name: String,
    entities: u64,
}

impl LogHandler {
    /// Create a new LogHandler with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entities: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entities logged so far
    pub fn entities(&self) -> u64 {
        self.entities
    }

    fn boundary(&self, event: &'static str) {
        debug!(handler = %self.name, event, "group boundary");
    }
}

impl Lifecycle for LogHandler {
    fn init(&mut self) {
        self.boundary("init");
    }

    fn before_nodes(&mut self) {
        self.boundary("before_nodes");
    }

    fn after_nodes(&mut self) {
        self.boundary("after_nodes");
    }

    fn before_ways(&mut self) {
        self.boundary("before_ways");
    }

    fn after_ways(&mut self) {
        self.boundary("after_ways");
    }

    fn before_relations(&mut self) {
        self.boundary("before_relations");
    }

    fn after_relations(&mut self) {
        self.boundary("after_relations");
    }

    fn before_changesets(&mut self) {
        self.boundary("before_changesets");
    }

    fn after_changesets(&mut self) {
        self.boundary("after_changesets");
    }

    fn done(&mut self) {
        info!(handler = %self.name, entities = self.entities, "LogHandler done");
    }
}

impl Handler for LogHandler {
    fn node(&mut self, node: &Node) {
        self.entities += 1;
        info!(
            handler = %self.name,
            id = node.id,
            lon = node.location.lon,
            lat = node.location.lat,
            tags = node.tags.len(),
            "node"
        );
    }

    fn way(&mut self, way: &Way) {
        self.entities += 1;
        info!(
            handler = %self.name,
            id = way.id,
            nodes = way.nodes.len(),
            closed = way.nodes.is_closed(),
            tags = way.tags.len(),
            "way"
        );
    }

    fn relation(&mut self, relation: &Relation) {
        self.entities += 1;
        info!(
            handler = %self.name,
            id = relation.id,
            members = relation.members.len(),
            tags = relation.tags.len(),
            "relation"
        );
    }

    fn changeset(&mut self, changeset: &Changeset) {
        self.entities += 1;
        info!(
            handler = %self.name,
            id = changeset.id,
            user = %changeset.user,
            changes = changeset.num_changes,
            "changeset"
        );
    }
}
