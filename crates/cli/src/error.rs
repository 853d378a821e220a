//! Error types for CLI operations.

use dispatcher::DispatchError;
use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Dataset file not found
    #[error("Dataset file not found: {path}")]
    DatasetNotFound { path: String },

    /// A traversal stopped on a record no visitor could take
    #[error("Traversal of {path} aborted: {source}")]
    Traversal {
        path: String,
        #[source]
        source: DispatchError,
    },
}

impl CliError {
    pub fn dataset_not_found(path: impl Into<String>) -> Self {
        Self::DatasetNotFound { path: path.into() }
    }

    pub fn traversal(path: impl Into<String>, source: DispatchError) -> Self {
        Self::Traversal {
            path: path.into(),
            source,
        }
    }
}
