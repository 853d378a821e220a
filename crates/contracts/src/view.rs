//! Shape views
//!
//! Borrowed, already-downcast views of an `Item`. `ItemRef`/`ItemMut` cover
//! every routed shape, with both relation member list wire tags folded into
//! one variant. `ObjectRef`/`ObjectMut` cover the Object supertype: a value
//! of these types can only ever hold a node, a way or a relation.

use crate::{
    Changeset, ItemType, Node, ObjectId, Relation, RelationMemberList, TagList, Way, WayNodeList,
};

/// Read-only shape view
#[derive(Debug, Clone, Copy)]
pub enum ItemRef<'a> {
    Node(&'a Node),
    Way(&'a Way),
    Relation(&'a Relation),
    Changeset(&'a Changeset),
    TagList(&'a TagList),
    WayNodeList(&'a WayNodeList),
    RelationMemberList(&'a RelationMemberList),
}

impl ItemRef<'_> {
    /// Wire tag of the viewed record
    pub fn item_type(&self) -> ItemType {
        match self {
            ItemRef::Node(_) => ItemType::Node,
            ItemRef::Way(_) => ItemType::Way,
            ItemRef::Relation(_) => ItemType::Relation,
            ItemRef::Changeset(_) => ItemType::Changeset,
            ItemRef::TagList(_) => ItemType::TagList,
            ItemRef::WayNodeList(_) => ItemType::WayNodeList,
            ItemRef::RelationMemberList(list) => list.item_type(),
        }
    }
}

/// Mutable shape view
#[derive(Debug)]
pub enum ItemMut<'a> {
    Node(&'a mut Node),
    Way(&'a mut Way),
    Relation(&'a mut Relation),
    Changeset(&'a mut Changeset),
    TagList(&'a mut TagList),
    WayNodeList(&'a mut WayNodeList),
    RelationMemberList(&'a mut RelationMemberList),
}

impl ItemMut<'_> {
    /// Wire tag of the viewed record
    pub fn item_type(&self) -> ItemType {
        match self {
            ItemMut::Node(_) => ItemType::Node,
            ItemMut::Way(_) => ItemType::Way,
            ItemMut::Relation(_) => ItemType::Relation,
            ItemMut::Changeset(_) => ItemType::Changeset,
            ItemMut::TagList(_) => ItemType::TagList,
            ItemMut::WayNodeList(_) => ItemType::WayNodeList,
            ItemMut::RelationMemberList(list) => list.item_type(),
        }
    }

    /// Reborrow as a read-only view
    pub fn as_ref(&self) -> ItemRef<'_> {
        match self {
            ItemMut::Node(n) => ItemRef::Node(n),
            ItemMut::Way(w) => ItemRef::Way(w),
            ItemMut::Relation(r) => ItemRef::Relation(r),
            ItemMut::Changeset(c) => ItemRef::Changeset(c),
            ItemMut::TagList(t) => ItemRef::TagList(t),
            ItemMut::WayNodeList(n) => ItemRef::WayNodeList(n),
            ItemMut::RelationMemberList(m) => ItemRef::RelationMemberList(m),
        }
    }
}

/// Read-only Object supertype view
#[derive(Debug, Clone, Copy)]
pub enum ObjectRef<'a> {
    Node(&'a Node),
    Way(&'a Way),
    Relation(&'a Relation),
}

impl ObjectRef<'_> {
    pub fn item_type(&self) -> ItemType {
        match self {
            ObjectRef::Node(_) => ItemType::Node,
            ObjectRef::Way(_) => ItemType::Way,
            ObjectRef::Relation(_) => ItemType::Relation,
        }
    }

    pub fn id(&self) -> ObjectId {
        match self {
            ObjectRef::Node(n) => n.id,
            ObjectRef::Way(w) => w.id,
            ObjectRef::Relation(r) => r.id,
        }
    }

    pub fn tags(&self) -> &TagList {
        match self {
            ObjectRef::Node(n) => &n.tags,
            ObjectRef::Way(w) => &w.tags,
            ObjectRef::Relation(r) => &r.tags,
        }
    }
}

/// Mutable Object supertype view
#[derive(Debug)]
pub enum ObjectMut<'a> {
    Node(&'a mut Node),
    Way(&'a mut Way),
    Relation(&'a mut Relation),
}

impl ObjectMut<'_> {
    pub fn item_type(&self) -> ItemType {
        match self {
            ObjectMut::Node(_) => ItemType::Node,
            ObjectMut::Way(_) => ItemType::Way,
            ObjectMut::Relation(_) => ItemType::Relation,
        }
    }

    pub fn id(&self) -> ObjectId {
        match self {
            ObjectMut::Node(n) => n.id,
            ObjectMut::Way(w) => w.id,
            ObjectMut::Relation(r) => r.id,
        }
    }

    pub fn tags_mut(&mut self) -> &mut TagList {
        match self {
            ObjectMut::Node(n) => &mut n.tags,
            ObjectMut::Way(w) => &mut w.tags,
            ObjectMut::Relation(r) => &mut r.tags,
        }
    }
}
