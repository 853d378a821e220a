//! Layered error definitions
//!
//! Categorized by source: tag model / records / dataset / source

use thiserror::Error;

use crate::ItemType;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Tag Model Errors =====
    /// Wire code outside the closed tag set
    #[error("unknown item type code: {code:#04x}")]
    UnknownTypeCode { code: u16 },

    /// Unknown tag name
    #[error("unknown item type name: '{name}'")]
    UnknownTypeName { name: String },

    // ===== Record Errors =====
    /// Raw item built with a tag that has a concrete shape
    #[error("raw item cannot carry tag '{item_type}': {message}")]
    InvalidRawItem { item_type: ItemType, message: String },

    // ===== Dataset Errors =====
    /// Dataset parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Dataset validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Source Errors =====
    /// Item source read failure
    #[error("source '{source_name}' read error: {message}")]
    SourceRead {
        source_name: String,
        message: String,
    },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create invalid raw item error
    pub fn invalid_raw_item(item_type: ItemType, message: impl Into<String>) -> Self {
        Self::InvalidRawItem {
            item_type,
            message: message.into(),
        }
    }

    /// Create source read error
    pub fn source_read(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceRead {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}
