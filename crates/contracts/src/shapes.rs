//! Record shapes
//!
//! Concrete shapes a buffered item can take. Entity shapes (`Node`, `Way`,
//! `Relation`, `Changeset`) embed the composite shapes (`TagList`,
//! `WayNodeList`, `RelationMemberList`), which can also appear as stand-alone
//! items in a buffer.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ItemType;

/// Object identifier (negative ids are allowed for unsaved objects)
pub type ObjectId = i64;

/// WGS84 position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Location {
    /// Longitude (degrees)
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,

    /// Latitude (degrees)
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
}

impl Location {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Key/value tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// Ordered list of tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagList(Vec<Tag>);

impl TagList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tag (duplicates are kept, order is preserved)
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push(Tag {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Value of the first tag with this key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.value.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Tag>> for TagList {
    fn from(tags: Vec<Tag>) -> Self {
        Self(tags)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagList {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = Self::new();
        for (k, v) in iter {
            list.push(k, v);
        }
        list
    }
}

/// Reference from a way to one of its nodes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeRef {
    #[serde(rename = "ref")]
    pub ref_id: ObjectId,

    /// Resolved location, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

/// Ordered node references of a way
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WayNodeList(Vec<NodeRef>);

impl WayNodeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ref_id: ObjectId) {
        self.0.push(NodeRef {
            ref_id,
            location: None,
        });
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NodeRef> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, NodeRef> {
        self.0.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the first and last reference point at the same node
    pub fn is_closed(&self) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) => self.0.len() > 1 && first.ref_id == last.ref_id,
            _ => false,
        }
    }
}

impl From<Vec<NodeRef>> for WayNodeList {
    fn from(nodes: Vec<NodeRef>) -> Self {
        Self(nodes)
    }
}

impl FromIterator<ObjectId> for WayNodeList {
    fn from_iter<I: IntoIterator<Item = ObjectId>>(iter: I) -> Self {
        let mut list = Self::new();
        for id in iter {
            list.push(id);
        }
        list
    }
}

/// Relation member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationMember {
    /// Kind of the referenced object (node, way or relation)
    pub member_type: ItemType,

    #[serde(rename = "ref")]
    pub ref_id: ObjectId,

    #[serde(default)]
    pub role: String,
}

/// Ordered members of a relation
///
/// Stored under one of two wire tags depending on whether the members carry
/// full copies of the referenced objects. Both tags describe this one shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationMemberList {
    pub members: Vec<RelationMember>,

    #[serde(default)]
    pub full_members: bool,
}

impl RelationMemberList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Member list stored under the full-members wire tag
    pub fn with_full_members() -> Self {
        Self {
            members: Vec::new(),
            full_members: true,
        }
    }

    pub fn push(&mut self, member_type: ItemType, ref_id: ObjectId, role: impl Into<String>) {
        self.members.push(RelationMember {
            member_type,
            ref_id,
            role: role.into(),
        });
    }

    /// Wire tag this list is stored under
    pub fn item_type(&self) -> ItemType {
        if self.full_members {
            ItemType::RelationMemberListWithFullMembers
        } else {
            ItemType::RelationMemberList
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Point feature
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: ObjectId,

    #[serde(default)]
    pub version: u32,

    pub location: Location,

    #[serde(default)]
    pub tags: TagList,
}

impl Node {
    pub fn new(id: ObjectId, location: Location) -> Self {
        Self {
            id,
            location,
            ..Self::default()
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(key, value);
        self
    }
}

/// Ordered list of nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Way {
    pub id: ObjectId,

    #[serde(default)]
    pub version: u32,

    pub nodes: WayNodeList,

    #[serde(default)]
    pub tags: TagList,
}

impl Way {
    pub fn new(id: ObjectId, nodes: impl IntoIterator<Item = ObjectId>) -> Self {
        Self {
            id,
            nodes: nodes.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(key, value);
        self
    }
}

/// Group of objects with roles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub id: ObjectId,

    #[serde(default)]
    pub version: u32,

    #[serde(default)]
    pub members: RelationMemberList,

    #[serde(default)]
    pub tags: TagList,
}

impl Relation {
    pub fn new(id: ObjectId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_member(
        mut self,
        member_type: ItemType,
        ref_id: ObjectId,
        role: impl Into<String>,
    ) -> Self {
        self.members.push(member_type, ref_id, role);
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(key, value);
        self
    }
}

/// Edit session metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changeset {
    pub id: ObjectId,

    #[serde(default)]
    pub num_changes: u32,

    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub tags: TagList,
}

impl Changeset {
    pub fn new(id: ObjectId, user: impl Into<String>) -> Self {
        Self {
            id,
            user: user.into(),
            ..Self::default()
        }
    }
}
