//! Item - one buffered record
//!
//! Closed sum over the record shapes. The runtime tag is derived from the
//! variant, so a tag and its shape can never disagree.

use bytes::Bytes;

use crate::{
    Changeset, ContractError, ItemType, Node, ObjectMut, ObjectRef, Relation, RelationMemberList,
    TagList, Way, WayNodeList,
};

/// Buffered record
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Node(Node),
    Way(Way),
    Relation(Relation),
    Changeset(Changeset),
    TagList(TagList),
    WayNodeList(WayNodeList),
    RelationMemberList(RelationMemberList),
    /// Record whose tag has no modelled shape (areas, rings)
    Raw(RawItem),
}

impl Item {
    /// Runtime type tag
    pub fn item_type(&self) -> ItemType {
        match self {
            Item::Node(_) => ItemType::Node,
            Item::Way(_) => ItemType::Way,
            Item::Relation(_) => ItemType::Relation,
            Item::Changeset(_) => ItemType::Changeset,
            Item::TagList(_) => ItemType::TagList,
            Item::WayNodeList(_) => ItemType::WayNodeList,
            Item::RelationMemberList(list) => list.item_type(),
            Item::Raw(raw) => raw.item_type(),
        }
    }

    /// Read-only Object view (node, way or relation only)
    pub fn as_object(&self) -> Option<ObjectRef<'_>> {
        match self {
            Item::Node(node) => Some(ObjectRef::Node(node)),
            Item::Way(way) => Some(ObjectRef::Way(way)),
            Item::Relation(relation) => Some(ObjectRef::Relation(relation)),
            _ => None,
        }
    }

    /// Mutable Object view (node, way or relation only)
    pub fn as_object_mut(&mut self) -> Option<ObjectMut<'_>> {
        match self {
            Item::Node(node) => Some(ObjectMut::Node(node)),
            Item::Way(way) => Some(ObjectMut::Way(way)),
            Item::Relation(relation) => Some(ObjectMut::Relation(relation)),
            _ => None,
        }
    }
}

macro_rules! impl_from_shape {
    ($($shape:ident),* $(,)?) => {
        $(
            impl From<$shape> for Item {
                fn from(value: $shape) -> Self {
                    Item::$shape(value)
                }
            }
        )*
    };
}

impl_from_shape!(
    Node,
    Way,
    Relation,
    Changeset,
    TagList,
    WayNodeList,
    RelationMemberList
);

impl From<RawItem> for Item {
    fn from(value: RawItem) -> Self {
        Item::Raw(value)
    }
}

/// Opaque record
///
/// Only tags without a concrete shape can be stored this way; everything
/// else has a dedicated `Item` variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawItem {
    item_type: ItemType,
    data: Bytes,
}

impl RawItem {
    /// # Errors
    /// Returns `InvalidRawItem` for `undefined` and for tags that have a shape
    pub fn new(item_type: ItemType, data: impl Into<Bytes>) -> Result<Self, ContractError> {
        if item_type == ItemType::Undefined {
            return Err(ContractError::invalid_raw_item(
                item_type,
                "undefined never tags a stored record",
            ));
        }
        if item_type.is_entity() || item_type.is_composite() {
            return Err(ContractError::invalid_raw_item(
                item_type,
                "tag has a concrete shape",
            ));
        }
        Ok(Self {
            item_type,
            data: data.into(),
        })
    }

    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }
}
