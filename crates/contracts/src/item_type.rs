//! ItemType - runtime tag carried by every buffered record
//!
//! Closed set shared with the storage layer. Wire codes are stable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ContractError;

/// Record type tag
///
/// `Undefined` never tags a stored record; the stream driver uses it to mark
/// the start and the end of a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    #[default]
    Undefined,
    Node,
    Way,
    Relation,
    Area,
    Changeset,
    TagList,
    WayNodeList,
    RelationMemberList,
    RelationMemberListWithFullMembers,
    OuterRing,
    InnerRing,
}

impl ItemType {
    /// All tags, in wire-code order
    pub const ALL: [ItemType; 12] = [
        ItemType::Undefined,
        ItemType::Node,
        ItemType::Way,
        ItemType::Relation,
        ItemType::Area,
        ItemType::Changeset,
        ItemType::TagList,
        ItemType::WayNodeList,
        ItemType::RelationMemberList,
        ItemType::RelationMemberListWithFullMembers,
        ItemType::OuterRing,
        ItemType::InnerRing,
    ];

    /// Wire code
    pub const fn code(self) -> u16 {
        match self {
            ItemType::Undefined => 0x00,
            ItemType::Node => 0x01,
            ItemType::Way => 0x02,
            ItemType::Relation => 0x03,
            ItemType::Area => 0x04,
            ItemType::Changeset => 0x05,
            ItemType::TagList => 0x11,
            ItemType::WayNodeList => 0x12,
            ItemType::RelationMemberList => 0x13,
            ItemType::RelationMemberListWithFullMembers => 0x23,
            ItemType::OuterRing => 0x40,
            ItemType::InnerRing => 0x41,
        }
    }

    /// Decode a wire code
    ///
    /// # Errors
    /// Returns `UnknownTypeCode` for codes outside the closed set
    pub fn from_code(code: u16) -> Result<Self, ContractError> {
        Self::ALL
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or(ContractError::UnknownTypeCode { code })
    }

    /// Snake-case name, identical to the serde representation
    pub const fn as_str(self) -> &'static str {
        match self {
            ItemType::Undefined => "undefined",
            ItemType::Node => "node",
            ItemType::Way => "way",
            ItemType::Relation => "relation",
            ItemType::Area => "area",
            ItemType::Changeset => "changeset",
            ItemType::TagList => "tag_list",
            ItemType::WayNodeList => "way_node_list",
            ItemType::RelationMemberList => "relation_member_list",
            ItemType::RelationMemberListWithFullMembers => {
                "relation_member_list_with_full_members"
            }
            ItemType::OuterRing => "outer_ring",
            ItemType::InnerRing => "inner_ring",
        }
    }

    /// Node, way, relation or changeset
    pub const fn is_entity(self) -> bool {
        matches!(
            self,
            ItemType::Node | ItemType::Way | ItemType::Relation | ItemType::Changeset
        )
    }

    /// Node, way or relation (the Object supertype)
    pub const fn is_object(self) -> bool {
        matches!(self, ItemType::Node | ItemType::Way | ItemType::Relation)
    }

    /// Tag list, way node list or either relation member list variant
    pub const fn is_composite(self) -> bool {
        matches!(
            self,
            ItemType::TagList
                | ItemType::WayNodeList
                | ItemType::RelationMemberList
                | ItemType::RelationMemberListWithFullMembers
        )
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ContractError::UnknownTypeName { name: s.to_string() })
    }
}

impl TryFrom<u16> for ItemType {
    type Error = ContractError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}
