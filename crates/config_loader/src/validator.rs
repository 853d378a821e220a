//! Dataset validation
//!
//! Rules:
//! - node locations finite and within WGS84 range
//! - ways reference at least one node
//! - tag keys are non-empty
//! - relation members reference a node, way or relation
//! - raw records never carry `undefined` or a shaped tag

use contracts::{ContractError, ItemType, Location, RelationMemberList, TagList};
use validator::Validate;

use crate::parser::{Dataset, RecordSpec};

/// Validate a parsed dataset
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(dataset: &Dataset) -> Result<(), ContractError> {
    for (idx, record) in dataset.items.iter().enumerate() {
        validate_record(idx, record)?;
    }
    Ok(())
}

fn validate_record(idx: usize, record: &RecordSpec) -> Result<(), ContractError> {
    match record {
        RecordSpec::Node(node) => {
            let Location { lon, lat } = node.location;
            if !lon.is_finite() || !lat.is_finite() {
                return Err(ContractError::config_validation(
                    format!("items[{idx}].location"),
                    format!("location must be finite, got ({lon}, {lat})"),
                ));
            }
            node.location.validate().map_err(|e| {
                ContractError::config_validation(
                    format!("items[{idx}].location"),
                    format!("location out of range: {e}"),
                )
            })?;
            validate_tags(idx, &node.tags)
        }
        RecordSpec::Way(way) => {
            if way.nodes.is_empty() {
                return Err(ContractError::config_validation(
                    format!("items[{idx}].nodes"),
                    format!("way {} has no nodes", way.id),
                ));
            }
            validate_tags(idx, &way.tags)
        }
        RecordSpec::Relation(relation) => {
            validate_members(idx, &relation.members)?;
            validate_tags(idx, &relation.tags)
        }
        RecordSpec::Changeset(changeset) => validate_tags(idx, &changeset.tags),
        RecordSpec::TagList { tags } => validate_tags(idx, tags),
        RecordSpec::WayNodeList { .. } => Ok(()),
        RecordSpec::RelationMemberList(list) => validate_members(idx, list),
        RecordSpec::Raw { item_type, .. } => validate_raw_type(idx, *item_type),
    }
}

/// Tag keys must be non-empty
fn validate_tags(idx: usize, tags: &TagList) -> Result<(), ContractError> {
    for (pos, tag) in tags.iter().enumerate() {
        if tag.key.is_empty() {
            return Err(ContractError::config_validation(
                format!("items[{idx}].tags[{pos}].key"),
                "tag key cannot be empty",
            ));
        }
    }
    Ok(())
}

/// Members must reference objects
fn validate_members(idx: usize, members: &RelationMemberList) -> Result<(), ContractError> {
    for (pos, member) in members.members.iter().enumerate() {
        if !member.member_type.is_object() {
            return Err(ContractError::config_validation(
                format!("items[{idx}].members[{pos}].member_type"),
                format!(
                    "member type must be node, way or relation, got '{}'",
                    member.member_type
                ),
            ));
        }
    }
    Ok(())
}

fn validate_raw_type(idx: usize, item_type: ItemType) -> Result<(), ContractError> {
    if item_type == ItemType::Undefined {
        return Err(ContractError::config_validation(
            format!("items[{idx}].item_type"),
            "undefined is not a record type",
        ));
    }
    if item_type.is_entity() || item_type.is_composite() {
        return Err(ContractError::config_validation(
            format!("items[{idx}].item_type"),
            format!("'{item_type}' has its own record type, use it instead of raw"),
        ));
    }
    Ok(())
}
