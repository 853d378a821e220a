//! Single-item dispatch
//!
//! Routes one record to one visitor by matching on its tag. The match arm is
//! the downcast: each arm hands the visitor the shape it just matched, with
//! the same constness the record was borrowed with.

use contracts::{Item, ItemMut, ItemRef, ItemType, ObjectMut, ObjectRef};

use crate::error::DispatchError;
use crate::shape::{CallableMutShape, CallableShape, HandlerMutShape, HandlerShape, Shape};
use crate::transition::dispatch_hooks;
use crate::visitor::{Callable, CallableMut, Handler, HandlerMut};

/// Visitor dispatchable over read-only records
///
/// Implemented for every [`Callable`] under [`CallableShape`] and every
/// [`Handler`] under [`HandlerShape`]; there is nothing to implement by hand.
pub trait Visit<S: Shape> {
    /// Route one record to the matching entry point
    ///
    /// # Errors
    /// `UnknownType` when the record's tag has no entry point for this shape
    fn visit(&mut self, item: &Item) -> Result<(), DispatchError>;

    /// Fire lifecycle hooks for a group transition (no-op for Callables)
    fn transition(&mut self, last: ItemType, current: ItemType);
}

/// Visitor dispatchable over mutable records
///
/// Read-only visitors qualify too; they see the record through a reborrow.
pub trait VisitMut<S: Shape> {
    /// Route one record to the matching entry point
    ///
    /// # Errors
    /// `UnknownType` when the record's tag has no entry point for this shape
    fn visit_mut(&mut self, item: &mut Item) -> Result<(), DispatchError>;

    /// Fire lifecycle hooks for a group transition (no-op for Callables)
    fn transition_mut(&mut self, last: ItemType, current: ItemType);
}

impl<T: Callable + ?Sized> Visit<CallableShape> for T {
    #[inline]
    fn visit(&mut self, item: &Item) -> Result<(), DispatchError> {
        route_callable(self, item)
    }

    #[inline]
    fn transition(&mut self, _last: ItemType, _current: ItemType) {}
}

impl<T: Handler + ?Sized> Visit<HandlerShape> for T {
    #[inline]
    fn visit(&mut self, item: &Item) -> Result<(), DispatchError> {
        route_handler(self, item)
    }

    #[inline]
    fn transition(&mut self, last: ItemType, current: ItemType) {
        dispatch_hooks(self, last, current);
    }
}

impl<T: Callable + ?Sized> VisitMut<CallableShape> for T {
    #[inline]
    fn visit_mut(&mut self, item: &mut Item) -> Result<(), DispatchError> {
        route_callable(self, item)
    }

    #[inline]
    fn transition_mut(&mut self, _last: ItemType, _current: ItemType) {}
}

impl<T: CallableMut + ?Sized> VisitMut<CallableMutShape> for T {
    #[inline]
    fn visit_mut(&mut self, item: &mut Item) -> Result<(), DispatchError> {
        route_callable_mut(self, item)
    }

    #[inline]
    fn transition_mut(&mut self, _last: ItemType, _current: ItemType) {}
}

impl<T: Handler + ?Sized> VisitMut<HandlerShape> for T {
    #[inline]
    fn visit_mut(&mut self, item: &mut Item) -> Result<(), DispatchError> {
        route_handler(self, item)
    }

    #[inline]
    fn transition_mut(&mut self, last: ItemType, current: ItemType) {
        dispatch_hooks(self, last, current);
    }
}

impl<T: HandlerMut + ?Sized> VisitMut<HandlerMutShape> for T {
    #[inline]
    fn visit_mut(&mut self, item: &mut Item) -> Result<(), DispatchError> {
        route_handler_mut(self, item)
    }

    #[inline]
    fn transition_mut(&mut self, last: ItemType, current: ItemType) {
        dispatch_hooks(self, last, current);
    }
}

/// Seven routed shapes; both relation member list tags share one arm
fn route_callable<C: Callable + ?Sized>(
    visitor: &mut C,
    item: &Item,
) -> Result<(), DispatchError> {
    let view = match item {
        Item::Node(node) => ItemRef::Node(node),
        Item::Way(way) => ItemRef::Way(way),
        Item::Relation(relation) => ItemRef::Relation(relation),
        Item::Changeset(changeset) => ItemRef::Changeset(changeset),
        Item::TagList(tags) => ItemRef::TagList(tags),
        Item::WayNodeList(nodes) => ItemRef::WayNodeList(nodes),
        Item::RelationMemberList(members) => ItemRef::RelationMemberList(members),
        Item::Raw(raw) => return Err(DispatchError::unknown_type(raw.item_type())),
    };
    visitor.call(view);
    Ok(())
}

fn route_callable_mut<C: CallableMut + ?Sized>(
    visitor: &mut C,
    item: &mut Item,
) -> Result<(), DispatchError> {
    let view = match item {
        Item::Node(node) => ItemMut::Node(node),
        Item::Way(way) => ItemMut::Way(way),
        Item::Relation(relation) => ItemMut::Relation(relation),
        Item::Changeset(changeset) => ItemMut::Changeset(changeset),
        Item::TagList(tags) => ItemMut::TagList(tags),
        Item::WayNodeList(nodes) => ItemMut::WayNodeList(nodes),
        Item::RelationMemberList(members) => ItemMut::RelationMemberList(members),
        Item::Raw(raw) => return Err(DispatchError::unknown_type(raw.item_type())),
    };
    visitor.call_mut(view);
    Ok(())
}

/// Four entity shapes; composite and raw records have no Handler route
fn route_handler<H: Handler + ?Sized>(handler: &mut H, item: &Item) -> Result<(), DispatchError> {
    match item {
        Item::Node(node) => Handler::node(handler, node),
        Item::Way(way) => Handler::way(handler, way),
        Item::Relation(relation) => Handler::relation(handler, relation),
        Item::Changeset(changeset) => Handler::changeset(handler, changeset),
        other => return Err(DispatchError::unknown_type(other.item_type())),
    }
    Ok(())
}

fn route_handler_mut<H: HandlerMut + ?Sized>(
    handler: &mut H,
    item: &mut Item,
) -> Result<(), DispatchError> {
    match item {
        Item::Node(node) => HandlerMut::node(handler, node),
        Item::Way(way) => HandlerMut::way(handler, way),
        Item::Relation(relation) => HandlerMut::relation(handler, relation),
        Item::Changeset(changeset) => HandlerMut::changeset(handler, changeset),
        other => return Err(DispatchError::unknown_type(other.item_type())),
    }
    Ok(())
}

/// Route an Object view to a read-only Handler
///
/// An Object can only be a node, a way or a relation, so every value has a
/// route and there is no error path.
#[inline]
pub fn dispatch_object<H: Handler + ?Sized>(object: ObjectRef<'_>, handler: &mut H) {
    match object {
        ObjectRef::Node(node) => Handler::node(handler, node),
        ObjectRef::Way(way) => Handler::way(handler, way),
        ObjectRef::Relation(relation) => Handler::relation(handler, relation),
    }
}

/// Route a mutable Object view to a mutable Handler
#[inline]
pub fn dispatch_object_mut<H: HandlerMut + ?Sized>(object: ObjectMut<'_>, handler: &mut H) {
    match object {
        ObjectMut::Node(node) => HandlerMut::node(handler, node),
        ObjectMut::Way(way) => HandlerMut::way(handler, way),
        ObjectMut::Relation(relation) => HandlerMut::relation(handler, relation),
    }
}
