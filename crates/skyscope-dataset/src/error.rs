//! # Dataset Errors

use std::path::PathBuf;

use thiserror::Error;

/// Failure reading a dataset file.
///
/// Malformed rows are not errors; they are skipped and counted in
/// [`LoadReport`](crate::LoadReport).
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader failed in a way that is not confined to one row.
    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),
}

/// Caller-facing dataset lookup failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    /// Not one of `airlines`, `airports`, `routes`.
    #[error("unknown dataset: {0:?}")]
    UnknownKind(String),
}
