//! Loads the pipeline inputs from JSON files.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::{Error, config::PipelineConfig, filter::FilterOptions, transaction::RawTransaction};

/// The accepted shapes of a transaction export.
#[derive(Deserialize)]
#[serde(untagged)]
enum TransactionExport {
    List(Vec<RawTransaction>),
    Wrapped { transactions: Vec<RawTransaction> },
}

/// Parses a transaction export, either a JSON array of transactions or an
/// object with a `transactions` array.
///
/// Individual fields are not validated here, that is the normalizer's job.
///
/// # Errors
/// Returns [Error::InvalidTransactions] if `text` has neither shape.
pub fn parse_transactions(text: &str) -> Result<Vec<RawTransaction>, Error> {
    let export: TransactionExport = serde_json::from_str(text).map_err(|error| {
        Error::InvalidTransactions(format!(
            "expected a JSON array of transactions or an object with a \"transactions\" array ({error})"
        ))
    })?;

    Ok(match export {
        TransactionExport::List(transactions) => transactions,
        TransactionExport::Wrapped { transactions } => transactions,
    })
}

/// Reads and parses the transaction export at `path`.
///
/// # Errors
/// Returns [Error::ReadFile] if the file cannot be read, or
/// [Error::InvalidTransactions] if it cannot be parsed.
pub fn load_transactions(path: &Path) -> Result<Vec<RawTransaction>, Error> {
    let transactions = parse_transactions(&read_file(path)?)?;
    tracing::info!(
        "Loaded {} transactions from {}",
        transactions.len(),
        path.display()
    );

    Ok(transactions)
}

/// Reads a [FilterOptions] JSON document from `path`.
///
/// # Errors
/// Returns [Error::ReadFile] if the file cannot be read, or
/// [Error::InvalidFilters] if it is not a valid filter configuration.
pub fn load_filters(path: &Path) -> Result<FilterOptions, Error> {
    serde_json::from_str(&read_file(path)?)
        .map_err(|error| Error::InvalidFilters(format!("{}: {error}", path.display())))
}

/// Reads a [PipelineConfig] JSON document from `path` and validates it.
///
/// # Errors
/// Returns [Error::ReadFile] if the file cannot be read, or
/// [Error::InvalidConfig] if it is malformed or out of range.
pub fn load_pipeline_config(path: &Path) -> Result<PipelineConfig, Error> {
    let config: PipelineConfig = serde_json::from_str(&read_file(path)?)
        .map_err(|error| Error::InvalidConfig(format!("{}: {error}", path.display())))?;
    config.validate()?;

    Ok(config)
}

fn read_file(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path)
        .map_err(|error| Error::ReadFile(path.display().to_string(), error.to_string()))
}
