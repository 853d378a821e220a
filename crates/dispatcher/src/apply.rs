//! Stream driver - one traversal loop behind every entry point
//!
//! `Traversal` carries the tag of the previous record. Each record whose tag
//! differs from it triggers a transition fan-out before the item fan-out;
//! `finish` closes the stream with a transition into `Undefined`.
//!
//! State per traversal: Start, InGroup(tag), End.
//! - Start -> InGroup(t): `init` + `before_t`
//! - InGroup(t) -> InGroup(t2): `after_t` + `before_t2`
//! - InGroup(t) -> End: `after_t` + `done`
//! - Start -> End (empty stream): `init` + `done`
//!
//! Stopping early (an error, or dropping a `Traversal` without `finish`)
//! skips the closing transition.

use std::mem;

use contracts::{Buffer, Item, ItemSource, ItemType, ObjectMut, ObjectRef};
use tracing::{debug, instrument, trace};

use crate::error::DispatchError;
use crate::fanout::{HandlerList, HandlerListMut, VisitorList, VisitorListMut};

/// Counters reported when a traversal finishes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalSummary {
    /// Records dispatched
    pub items: u64,

    /// Contiguous same-tag runs
    pub groups: u64,
}

/// In-progress traversal
///
/// Items may be fed in several batches (one per buffer of a source); group
/// detection continues across batch boundaries. Feeding consumes the
/// traversal and hands it back on success, so a traversal that hit an error
/// cannot be fed or finished again.
#[derive(Debug, Default)]
pub struct Traversal {
    last_type: ItemType,
    items: u64,
    groups: u64,
}

impl Traversal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag of the most recent record, `Undefined` before the first one
    pub fn last_type(&self) -> ItemType {
        self.last_type
    }

    /// Records dispatched so far
    pub fn items(&self) -> u64 {
        self.items
    }

    /// Dispatch a batch of read-only records
    ///
    /// # Errors
    /// The first `UnknownType` raised by any visitor; the rest of the batch
    /// is not dispatched and the traversal is dropped
    pub fn feed<'a, I, L, S>(mut self, items: I, visitors: &mut L) -> Result<Self, DispatchError>
    where
        I: IntoIterator<Item = &'a Item>,
        L: VisitorList<S>,
    {
        for item in items {
            if let Some((last, current)) = self.advance(item.item_type()) {
                visitors.transition_each(last, current);
            }
            visitors.visit_each(item)?;
            self.items += 1;
        }
        Ok(self)
    }

    /// Dispatch a batch of mutable records
    ///
    /// # Errors
    /// See [`Traversal::feed`]
    pub fn feed_mut<'a, I, L, S>(
        mut self,
        items: I,
        visitors: &mut L,
    ) -> Result<Self, DispatchError>
    where
        I: IntoIterator<Item = &'a mut Item>,
        L: VisitorListMut<S>,
    {
        for item in items {
            if let Some((last, current)) = self.advance(item.item_type()) {
                visitors.transition_each_mut(last, current);
            }
            visitors.visit_each_mut(item)?;
            self.items += 1;
        }
        Ok(self)
    }

    /// Close the stream for read-only visitors
    pub fn finish<L, S>(mut self, visitors: &mut L) -> TraversalSummary
    where
        L: VisitorList<S>,
    {
        let last = self.close();
        visitors.transition_each(last, ItemType::Undefined);
        self.summary()
    }

    /// Close the stream for mutable visitors
    pub fn finish_mut<L, S>(mut self, visitors: &mut L) -> TraversalSummary
    where
        L: VisitorListMut<S>,
    {
        let last = self.close();
        visitors.transition_each_mut(last, ItemType::Undefined);
        self.summary()
    }

    /// Record the tag of the next item; returns the transition it causes
    fn advance(&mut self, current: ItemType) -> Option<(ItemType, ItemType)> {
        if current == self.last_type {
            return None;
        }
        let last = mem::replace(&mut self.last_type, current);
        self.groups += 1;
        trace!(from = %last, to = %current, "group transition");
        Some((last, current))
    }

    fn close(&mut self) -> ItemType {
        trace!(from = %self.last_type, "stream end");
        mem::replace(&mut self.last_type, ItemType::Undefined)
    }

    fn summary(&self) -> TraversalSummary {
        debug!(items = self.items, groups = self.groups, "traversal finished");
        TraversalSummary {
            items: self.items,
            groups: self.groups,
        }
    }
}

/// Walk read-only records in iteration order
///
/// # Errors
/// `UnknownType` from the first record some visitor has no route for. The
/// traversal stops there and the closing `done` is not fired.
#[instrument(name = "dispatcher_apply_iter", level = "debug", skip_all)]
pub fn apply_iter<'a, I, L, S>(items: I, mut visitors: L) -> Result<TraversalSummary, DispatchError>
where
    I: IntoIterator<Item = &'a Item>,
    L: VisitorList<S>,
{
    let traversal = Traversal::new().feed(items, &mut visitors)?;
    Ok(traversal.finish(&mut visitors))
}

/// Walk mutable records in iteration order
///
/// # Errors
/// See [`apply_iter`]
#[instrument(name = "dispatcher_apply_iter_mut", level = "debug", skip_all)]
pub fn apply_iter_mut<'a, I, L, S>(
    items: I,
    mut visitors: L,
) -> Result<TraversalSummary, DispatchError>
where
    I: IntoIterator<Item = &'a mut Item>,
    L: VisitorListMut<S>,
{
    let traversal = Traversal::new().feed_mut(items, &mut visitors)?;
    Ok(traversal.finish_mut(&mut visitors))
}

/// Walk a buffer read-only
///
/// # Errors
/// See [`apply_iter`]
///
/// # Example
///
/// ```
/// use contracts::{Buffer, Location, Node, Way};
/// use dispatcher::{apply, Handler, Lifecycle};
///
/// #[derive(Default)]
/// struct Ids(Vec<i64>);
///
/// impl Lifecycle for Ids {}
/// impl Handler for Ids {
///     fn node(&mut self, node: &Node) {
///         self.0.push(node.id);
///     }
///     fn way(&mut self, way: &Way) {
///         self.0.push(way.id);
///     }
/// }
///
/// let mut buffer = Buffer::new();
/// buffer.push(Node::new(1, Location::default()));
/// buffer.push(Way::new(10, [1, 2]));
///
/// let mut ids = Ids::default();
/// let summary = apply(&buffer, &mut ids).unwrap();
/// assert_eq!(ids.0, vec![1, 10]);
/// assert_eq!(summary.groups, 2);
/// ```
pub fn apply<L, S>(buffer: &Buffer, visitors: L) -> Result<TraversalSummary, DispatchError>
where
    L: VisitorList<S>,
{
    apply_iter(buffer.iter(), visitors)
}

/// Walk a buffer with mutable access
///
/// # Errors
/// See [`apply_iter`]
pub fn apply_mut<L, S>(buffer: &mut Buffer, visitors: L) -> Result<TraversalSummary, DispatchError>
where
    L: VisitorListMut<S>,
{
    apply_iter_mut(buffer.iter_mut(), visitors)
}

/// Drain a source, walking every buffer it yields as one stream
///
/// Groups continue across buffer boundaries. Visitors get mutable access
/// since the source hands over ownership of its buffers.
///
/// # Errors
/// `Source` when reading fails, otherwise see [`apply_iter`]
#[instrument(
    name = "dispatcher_apply_source",
    level = "debug",
    skip_all,
    fields(source = %source.name())
)]
pub fn apply_source<Src, L, S>(
    source: &mut Src,
    mut visitors: L,
) -> Result<TraversalSummary, DispatchError>
where
    Src: ItemSource + ?Sized,
    L: VisitorListMut<S>,
{
    let mut traversal = Traversal::new();
    let mut buffers: u64 = 0;
    while let Some(mut buffer) = source.read()? {
        buffers += 1;
        traversal = traversal.feed_mut(buffer.iter_mut(), &mut visitors)?;
    }
    debug!(buffers, "source exhausted");
    Ok(traversal.finish_mut(&mut visitors))
}

/// Dispatch one read-only record outside any stream (no lifecycle hooks)
///
/// # Errors
/// `UnknownType` when some visitor has no route for the record's tag
pub fn dispatch_item<L, S>(item: &Item, mut visitors: L) -> Result<(), DispatchError>
where
    L: VisitorList<S>,
{
    visitors.visit_each(item)
}

/// Dispatch one mutable record outside any stream
///
/// # Errors
/// `UnknownType` when some visitor has no route for the record's tag
pub fn dispatch_item_mut<L, S>(item: &mut Item, mut visitors: L) -> Result<(), DispatchError>
where
    L: VisitorListMut<S>,
{
    visitors.visit_each_mut(item)
}

/// Fire the lifecycle hooks of one transition on every visitor
pub fn dispatch_transition<L, S>(last: ItemType, current: ItemType, mut visitors: L)
where
    L: VisitorList<S>,
{
    visitors.transition_each(last, current);
}

/// Dispatch an Object view to every Handler in the list
pub fn dispatch_objects<L: HandlerList>(object: ObjectRef<'_>, mut handlers: L) {
    handlers.object_each(object);
}

/// Dispatch a mutable Object view to every Handler in the list
pub fn dispatch_objects_mut<L: HandlerListMut>(mut object: ObjectMut<'_>, mut handlers: L) {
    handlers.object_each_mut(&mut object);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Handler, HandlerMut, Lifecycle};
    use contracts::{Changeset, ItemRef, Location, Node, Relation, TagList, VecSource, Way};

    /// Handler logging every call, in order
    #[derive(Default)]
    struct Trace(Vec<String>);

    impl Trace {
        fn log(&mut self, event: impl Into<String>) {
            self.0.push(event.into());
        }
    }

    impl Lifecycle for Trace {
        fn init(&mut self) {
            self.log("init");
        }
        fn before_nodes(&mut self) {
            self.log("before_nodes");
        }
        fn after_nodes(&mut self) {
            self.log("after_nodes");
        }
        fn before_ways(&mut self) {
            self.log("before_ways");
        }
        fn after_ways(&mut self) {
            self.log("after_ways");
        }
        fn before_relations(&mut self) {
            self.log("before_relations");
        }
        fn after_relations(&mut self) {
            self.log("after_relations");
        }
        fn before_changesets(&mut self) {
            self.log("before_changesets");
        }
        fn after_changesets(&mut self) {
            self.log("after_changesets");
        }
        fn done(&mut self) {
            self.log("done");
        }
    }

    impl Handler for Trace {
        fn node(&mut self, node: &Node) {
            self.log(format!("node {}", node.id));
        }
        fn way(&mut self, way: &Way) {
            self.log(format!("way {}", way.id));
        }
        fn relation(&mut self, relation: &Relation) {
            self.log(format!("relation {}", relation.id));
        }
        fn changeset(&mut self, changeset: &Changeset) {
            self.log(format!("changeset {}", changeset.id));
        }
    }

    fn node(id: i64) -> Node {
        Node::new(id, Location::default())
    }

    #[test]
    fn test_empty_stream_fires_init_then_done() {
        let mut trace = Trace::default();
        let summary = apply(&Buffer::new(), &mut trace).unwrap();
        assert_eq!(trace.0, vec!["init", "done"]);
        assert_eq!(summary, TraversalSummary::default());
    }

    #[test]
    fn test_grouped_stream_sequence() {
        let mut buffer = Buffer::new();
        buffer.push(node(1));
        buffer.push(node(2));
        buffer.push(Way::new(10, [1, 2]));
        buffer.push(Relation::new(20));
        buffer.push(Relation::new(21));

        let mut trace = Trace::default();
        let summary = apply(&buffer, &mut trace).unwrap();

        assert_eq!(
            trace.0,
            vec![
                "init",
                "before_nodes",
                "node 1",
                "node 2",
                "after_nodes",
                "before_ways",
                "way 10",
                "after_ways",
                "before_relations",
                "relation 20",
                "relation 21",
                "after_relations",
                "done",
            ]
        );
        assert_eq!(summary, TraversalSummary { items: 5, groups: 3 });
    }

    #[test]
    fn test_non_contiguous_kinds_form_separate_groups() {
        let buffer: Buffer = vec![
            Item::from(node(1)),
            Item::from(Way::new(5, [1, 2])),
            Item::from(node(2)),
        ]
        .into();

        let mut trace = Trace::default();
        let summary = apply(&buffer, &mut trace).unwrap();

        let before_nodes = trace.0.iter().filter(|e| *e == "before_nodes").count();
        assert_eq!(before_nodes, 2);
        assert_eq!(summary.groups, 3);
    }

    #[test]
    fn test_error_aborts_stream_without_done() {
        let mut buffer = Buffer::new();
        buffer.push(node(1));
        buffer.push(TagList::new());
        buffer.push(node(2));

        let mut trace = Trace::default();
        let err = apply(&buffer, &mut trace).unwrap_err();

        assert_eq!(err.item_type(), Some(ItemType::TagList));
        assert_eq!(
            trace.0,
            vec!["init", "before_nodes", "node 1", "after_nodes"]
        );
    }

    #[test]
    fn test_callable_sees_composites_without_hooks() {
        let mut buffer = Buffer::new();
        buffer.push(node(1));
        buffer.push(TagList::new());

        let mut seen = Vec::new();
        let mut record = |item: ItemRef<'_>| seen.push(item.item_type());
        apply(&buffer, &mut record).unwrap();

        assert_eq!(seen, vec![ItemType::Node, ItemType::TagList]);
    }

    #[test]
    fn test_apply_mut_with_mutable_handler() {
        struct Retag;
        impl Lifecycle for Retag {}
        impl HandlerMut for Retag {
            fn way(&mut self, way: &mut Way) {
                way.tags.push("oneway", "yes");
            }
        }

        let mut buffer = Buffer::new();
        buffer.push(Way::new(1, [1, 2]));
        buffer.push(Way::new(2, [2, 3]));

        let mut trace = Trace::default();
        apply_mut(&mut buffer, (&mut Retag, &mut trace)).unwrap();

        assert!(buffer
            .iter()
            .all(|item| matches!(item, Item::Way(w) if w.tags.get("oneway") == Some("yes"))));
        assert_eq!(trace.0.first().map(String::as_str), Some("init"));
        assert_eq!(trace.0.last().map(String::as_str), Some("done"));
    }

    #[test]
    fn test_source_groups_span_buffers() {
        let first: Buffer = vec![node(1), node(2)].into_iter().collect();
        let second: Buffer = vec![Item::from(node(3)), Item::from(Way::new(9, [1, 3]))].into();
        let mut source = VecSource::new("fixture", vec![first, Buffer::new(), second]);

        let mut trace = Trace::default();
        let summary = apply_source(&mut source, &mut trace).unwrap();

        assert_eq!(
            trace.0,
            vec![
                "init",
                "before_nodes",
                "node 1",
                "node 2",
                "node 3",
                "after_nodes",
                "before_ways",
                "way 9",
                "after_ways",
                "done",
            ]
        );
        assert_eq!(summary, TraversalSummary { items: 4, groups: 2 });
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_traversal_batches_share_cursor() {
        let a: Buffer = vec![node(1)].into_iter().collect();
        let b: Buffer = vec![node(2)].into_iter().collect();

        let mut trace = Trace::default();
        let mut visitors = &mut trace;
        let traversal = Traversal::new()
            .feed(&a, &mut visitors)
            .unwrap()
            .feed(&b, &mut visitors)
            .unwrap();
        assert_eq!(traversal.last_type(), ItemType::Node);
        assert_eq!(traversal.items(), 2);
        let summary = traversal.finish(&mut visitors);

        assert_eq!(summary.groups, 1);
        assert_eq!(
            trace.0,
            vec!["init", "before_nodes", "node 1", "node 2", "after_nodes", "done"]
        );
    }

    #[test]
    fn test_failed_batch_consumes_traversal() {
        let good: Buffer = vec![node(1)].into_iter().collect();
        let mut bad = Buffer::new();
        bad.push(TagList::new());
        bad.push(node(2));

        let mut trace = Trace::default();
        let mut visitors = &mut trace;
        let traversal = Traversal::new().feed(&good, &mut visitors).unwrap();
        assert_eq!(traversal.items(), 1);

        // On error only the DispatchError comes back; nothing is left to finish.
        let result: Result<Traversal, DispatchError> = traversal.feed(&bad, &mut visitors);
        let err = result.unwrap_err();

        assert_eq!(err.item_type(), Some(ItemType::TagList));
        assert_eq!(trace.0, vec!["init", "before_nodes", "node 1", "after_nodes"]);
    }

    #[test]
    fn test_dispatch_item_fires_no_hooks() {
        let mut trace = Trace::default();
        dispatch_item(&Item::from(Changeset::new(3, "u")), &mut trace).unwrap();
        assert_eq!(trace.0, vec!["changeset 3"]);

        dispatch_transition(ItemType::Changeset, ItemType::Undefined, &mut trace);
        assert_eq!(trace.0, vec!["changeset 3", "after_changesets", "done"]);
    }

    #[test]
    fn test_dispatch_objects_to_handlers() {
        let mut a = Trace::default();
        let mut b = Trace::default();
        let item = Item::from(Relation::new(4));
        if let Some(object) = item.as_object() {
            dispatch_objects(object, (&mut a, &mut b));
        }
        assert_eq!(a.0, vec!["relation 4"]);
        assert_eq!(b.0, vec!["relation 4"]);
    }
}
