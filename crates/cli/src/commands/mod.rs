//! Command implementations.

mod count;
mod dump;
mod validate;

pub use count::run_count;
pub use dump::run_dump;
pub use validate::run_validate;

use std::path::Path;

use anyhow::{Context, Result};
use contracts::{Buffer, Item};
use tracing::debug;

use crate::error::CliError;

/// Load a dataset file, failing early when it does not exist
fn load_buffer(path: &Path) -> Result<Buffer> {
    if !path.exists() {
        return Err(CliError::dataset_not_found(path.display().to_string()).into());
    }
    config_loader::DatasetLoader::load_from_path(path)
        .with_context(|| format!("Failed to load dataset from {}", path.display()))
}

/// Records a Handler-only traversal will see
///
/// Unless `strict`, composite and raw records are left out, since a Handler
/// has no route for them.
fn handler_records(buffer: &Buffer, strict: bool) -> impl Iterator<Item = &Item> {
    let skipped = if strict {
        0
    } else {
        buffer
            .iter()
            .filter(|item| !item.item_type().is_entity())
            .count()
    };
    if skipped > 0 {
        debug!(skipped, "Skipping non-entity records");
    }
    buffer
        .iter()
        .filter(move |item| strict || item.item_type().is_entity())
}
