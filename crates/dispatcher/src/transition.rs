//! Group-transition dispatch
//!
//! A group is a contiguous run of records sharing one tag. When the tag
//! changes, the run that ended gets its `after_*` hook and the run that
//! starts gets its `before_*` hook. `Undefined` stands for the stream edges:
//! leaving it fires `init`, entering it fires `done`.
//!
//! Runs are detected by comparing neighbours only. A stream such as
//! `[node, way, node]` yields two node groups.

use contracts::ItemType;

use crate::visitor::Lifecycle;

/// Fire the hooks for one transition
///
/// Two independent switches, each firing at most one hook. Tags that never
/// form entity groups (composite lists, raw records) fire nothing.
pub fn dispatch_hooks<L: Lifecycle + ?Sized>(visitor: &mut L, last: ItemType, current: ItemType) {
    match last {
        ItemType::Undefined => visitor.init(),
        ItemType::Node => visitor.after_nodes(),
        ItemType::Way => visitor.after_ways(),
        ItemType::Relation => visitor.after_relations(),
        ItemType::Changeset => visitor.after_changesets(),
        _ => {}
    }

    match current {
        ItemType::Undefined => visitor.done(),
        ItemType::Node => visitor.before_nodes(),
        ItemType::Way => visitor.before_ways(),
        ItemType::Relation => visitor.before_relations(),
        ItemType::Changeset => visitor.before_changesets(),
        _ => {}
    }
}
