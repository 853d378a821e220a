//! # Config Loader
//!
//! Dataset loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON dataset files
//! - Validate record contents
//! - Produce a `Buffer`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::DatasetLoader;
//! use std::path::Path;
//!
//! let buffer = DatasetLoader::load_from_path(Path::new("extract.toml")).unwrap();
//! println!("{} records", buffer.len());
//! ```

mod parser;
mod validator;

pub use contracts::Buffer;
pub use parser::{ConfigFormat, Dataset, RecordSpec};

use contracts::ContractError;
use std::path::Path;

/// Dataset loader
///
/// Provides static methods to load datasets from files or strings.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Load dataset from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<Buffer, ContractError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load dataset from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<Buffer, ContractError> {
        Self::parse_and_validate(content, format)?.into_buffer()
    }

    /// Parse and validate without converting, for reporting
    pub fn load_dataset(content: &str, format: ConfigFormat) -> Result<Dataset, ContractError> {
        Self::parse_and_validate(content, format)
    }

    /// Serialize buffer to TOML string
    pub fn to_toml(buffer: &Buffer) -> Result<String, ContractError> {
        toml::to_string_pretty(&Dataset::from(buffer))
            .map_err(|e| ContractError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize buffer to JSON string
    pub fn to_json(buffer: &Buffer) -> Result<String, ContractError> {
        serde_json::to_string_pretty(&Dataset::from(buffer))
            .map_err(|e| ContractError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl DatasetLoader {
    /// Infer dataset format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported dataset format: .{ext}"))
        })
    }

    /// Read dataset file content
    fn read_file(path: &Path) -> Result<String, ContractError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn parse_and_validate(content: &str, format: ConfigFormat) -> Result<Dataset, ContractError> {
        let dataset = parser::parse(content, format)?;
        validator::validate(&dataset)?;
        Ok(dataset)
    }
}
