//! Dataset parsing
//!
//! TOML (primary) and JSON. A dataset is a flat list of records, each tagged
//! by its `type` name.

use serde::{Deserialize, Serialize};

use contracts::{
    Buffer, Changeset, ContractError, Item, ItemType, Node, RawItem, Relation,
    RelationMemberList, TagList, Way, WayNodeList,
};

/// Dataset file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML (preferred)
    Toml,
    /// JSON
    Json,
}

impl ConfigFormat {
    /// Infer format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// On-disk form of a buffer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub items: Vec<RecordSpec>,
}

/// One record as written in a dataset file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordSpec {
    Node(Node),
    Way(Way),
    Relation(Relation),
    Changeset(Changeset),
    TagList {
        #[serde(default)]
        tags: TagList,
    },
    WayNodeList {
        #[serde(default)]
        nodes: WayNodeList,
    },
    RelationMemberList(RelationMemberList),
    /// Unshaped tag with opaque payload
    Raw {
        item_type: ItemType,
        #[serde(default)]
        data: Vec<u8>,
    },
}

impl RecordSpec {
    /// Tag the record will carry once buffered
    pub fn item_type(&self) -> ItemType {
        match self {
            RecordSpec::Node(_) => ItemType::Node,
            RecordSpec::Way(_) => ItemType::Way,
            RecordSpec::Relation(_) => ItemType::Relation,
            RecordSpec::Changeset(_) => ItemType::Changeset,
            RecordSpec::TagList { .. } => ItemType::TagList,
            RecordSpec::WayNodeList { .. } => ItemType::WayNodeList,
            RecordSpec::RelationMemberList(list) => list.item_type(),
            RecordSpec::Raw { item_type, .. } => *item_type,
        }
    }

    /// # Errors
    /// `InvalidRawItem` when a raw record carries a shaped or undefined tag
    pub fn into_item(self) -> Result<Item, ContractError> {
        Ok(match self {
            RecordSpec::Node(node) => node.into(),
            RecordSpec::Way(way) => way.into(),
            RecordSpec::Relation(relation) => relation.into(),
            RecordSpec::Changeset(changeset) => changeset.into(),
            RecordSpec::TagList { tags } => tags.into(),
            RecordSpec::WayNodeList { nodes } => nodes.into(),
            RecordSpec::RelationMemberList(list) => list.into(),
            RecordSpec::Raw { item_type, data } => RawItem::new(item_type, data)?.into(),
        })
    }
}

impl From<&Item> for RecordSpec {
    fn from(item: &Item) -> Self {
        match item {
            Item::Node(node) => RecordSpec::Node(node.clone()),
            Item::Way(way) => RecordSpec::Way(way.clone()),
            Item::Relation(relation) => RecordSpec::Relation(relation.clone()),
            Item::Changeset(changeset) => RecordSpec::Changeset(changeset.clone()),
            Item::TagList(tags) => RecordSpec::TagList { tags: tags.clone() },
            Item::WayNodeList(nodes) => RecordSpec::WayNodeList {
                nodes: nodes.clone(),
            },
            Item::RelationMemberList(list) => RecordSpec::RelationMemberList(list.clone()),
            Item::Raw(raw) => RecordSpec::Raw {
                item_type: raw.item_type(),
                data: raw.data().to_vec(),
            },
        }
    }
}

impl Dataset {
    /// Convert into a buffer, preserving record order
    ///
    /// # Errors
    /// First record that cannot be buffered
    pub fn into_buffer(self) -> Result<Buffer, ContractError> {
        let mut buffer = Buffer::with_capacity(self.items.len());
        for record in self.items {
            buffer.push(record.into_item()?);
        }
        Ok(buffer)
    }
}

impl From<&Buffer> for Dataset {
    fn from(buffer: &Buffer) -> Self {
        Self {
            items: buffer.iter().map(RecordSpec::from).collect(),
        }
    }
}

/// Parse TOML dataset
pub fn parse_toml(content: &str) -> Result<Dataset, ContractError> {
    toml::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse JSON dataset
pub fn parse_json(content: &str) -> Result<Dataset, ContractError> {
    serde_json::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse according to format
pub fn parse(content: &str, format: ConfigFormat) -> Result<Dataset, ContractError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}
