//! Dispatcher error types

use contracts::{ContractError, ItemType};
use thiserror::Error;

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Item tag has no route for the visitor it reached
    #[error("unknown type: no route for item type '{item_type}'")]
    UnknownType { item_type: ItemType },

    /// Item source failed while being drained (from contract)
    #[error("source error: {0}")]
    Source(#[from] ContractError),
}

impl DispatchError {
    /// Create an unknown type error
    pub fn unknown_type(item_type: ItemType) -> Self {
        Self::UnknownType { item_type }
    }

    /// Offending tag, for `UnknownType`
    pub fn item_type(&self) -> Option<ItemType> {
        match self {
            Self::UnknownType { item_type } => Some(*item_type),
            Self::Source(_) => None,
        }
    }
}
