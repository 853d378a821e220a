//! Visitor capability shapes
//!
//! A visitor is either a *Callable* (one entry point taking a shape view,
//! covering every routed shape, no lifecycle) or a *Handler* (named
//! per-entity methods plus lifecycle hooks). Read-only and mutable flavours
//! exist for both; a read-only visitor can also walk a mutable stream.

use contracts::{Changeset, ItemMut, ItemRef, Node, Relation, Way};

/// Read-only Callable visitor
///
/// Implement it with an exhaustive `match` over [`ItemRef`], or pass any
/// `FnMut(ItemRef<'_>)` closure.
pub trait Callable {
    fn call(&mut self, item: ItemRef<'_>);
}

impl<F> Callable for F
where
    F: FnMut(ItemRef<'_>),
{
    #[inline]
    fn call(&mut self, item: ItemRef<'_>) {
        self(item)
    }
}

/// Mutable Callable visitor
pub trait CallableMut {
    fn call_mut(&mut self, item: ItemMut<'_>);
}

impl<F> CallableMut for F
where
    F: FnMut(ItemMut<'_>),
{
    #[inline]
    fn call_mut(&mut self, item: ItemMut<'_>) {
        self(item)
    }
}

/// Group lifecycle hooks shared by both Handler flavours
///
/// Every hook defaults to a no-op. During one traversal `init` fires before
/// anything else and `done` after everything else; `before_*`/`after_*`
/// bracket each contiguous run of one entity kind.
pub trait Lifecycle {
    fn init(&mut self) {}

    fn before_nodes(&mut self) {}

    fn after_nodes(&mut self) {}

    fn before_ways(&mut self) {}

    fn after_ways(&mut self) {}

    fn before_relations(&mut self) {}

    fn after_relations(&mut self) {}

    fn before_changesets(&mut self) {}

    fn after_changesets(&mut self) {}

    fn done(&mut self) {}
}

/// Read-only Handler visitor
pub trait Handler: Lifecycle {
    fn node(&mut self, _node: &Node) {}

    fn way(&mut self, _way: &Way) {}

    fn relation(&mut self, _relation: &Relation) {}

    fn changeset(&mut self, _changeset: &Changeset) {}
}

/// Mutable Handler visitor
pub trait HandlerMut: Lifecycle {
    fn node(&mut self, _node: &mut Node) {}

    fn way(&mut self, _way: &mut Way) {}

    fn relation(&mut self, _relation: &mut Relation) {}

    fn changeset(&mut self, _changeset: &mut Changeset) {}
}
