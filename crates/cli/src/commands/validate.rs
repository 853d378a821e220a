//! `validate` command implementation.

use anyhow::{Context, Result};
use config_loader::{ConfigFormat, Dataset, DatasetLoader};
use contracts::ItemType;
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    dataset_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<DatasetSummary>,
}

#[derive(Serialize)]
struct DatasetSummary {
    records: usize,
    entities: usize,
    composites: usize,
    raw: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(dataset = %args.file.display(), "Validating dataset");

    let result = validate_dataset(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Dataset validation failed")
    }
}

fn validate_dataset(args: &ValidateArgs) -> ValidationResult {
    let dataset_path = args.file.display().to_string();

    match load(args) {
        Ok(dataset) => {
            let warnings = collect_warnings(&dataset);
            ValidationResult {
                valid: true,
                dataset_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(summarize(&dataset)),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            dataset_path,
            error: Some(format!("{e:#}")),
            warnings: None,
            summary: None,
        },
    }
}

fn load(args: &ValidateArgs) -> Result<Dataset> {
    if !args.file.exists() {
        anyhow::bail!("File not found: {}", args.file.display());
    }

    let format = args
        .file
        .extension()
        .and_then(|e| e.to_str())
        .and_then(ConfigFormat::from_extension)
        .with_context(|| format!("Unsupported dataset format: {}", args.file.display()))?;
    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let dataset = DatasetLoader::load_dataset(&content, format)?;
    // Raw payloads are only checked when buffered.
    dataset.clone().into_buffer()?;
    Ok(dataset)
}

fn summarize(dataset: &Dataset) -> DatasetSummary {
    let types: Vec<ItemType> = dataset.items.iter().map(|r| r.item_type()).collect();
    DatasetSummary {
        records: types.len(),
        entities: types.iter().filter(|t| t.is_entity()).count(),
        composites: types.iter().filter(|t| t.is_composite()).count(),
        raw: types
            .iter()
            .filter(|t| !t.is_entity() && !t.is_composite())
            .count(),
    }
}

/// Collect dataset warnings (non-fatal issues)
fn collect_warnings(dataset: &Dataset) -> Vec<String> {
    let mut warnings = Vec::new();

    if dataset.items.is_empty() {
        warnings.push("Dataset has no records - traversals only fire init/done".to_string());
    }

    let non_entities = dataset
        .items
        .iter()
        .filter(|r| !r.item_type().is_entity())
        .count();
    if non_entities > 0 {
        warnings.push(format!(
            "{non_entities} non-entity record(s) - handlers reject them unless skipped"
        ));
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Dataset is valid: {}", result.dataset_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Records: {}", summary.records);
            println!("  Entities: {}", summary.entities);
            println!("  Composites: {}", summary.composites);
            println!("  Raw: {}", summary.raw);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Dataset is invalid: {}", result.dataset_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
