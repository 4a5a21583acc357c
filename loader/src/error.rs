//! Error types for schema file operations.
//!
//! Covers I/O, JSON and YAML (de)serialization, unknown file formats, and
//! schemas rejected by [`validate_schema`](argchecker_core::validate_schema).

use std::path::PathBuf;

use argchecker_core::SchemaIssue;
use thiserror::Error;

/// Errors that can occur while loading or saving a schema file.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The file extension is not `.json`, `.yaml` or `.yml`.
    #[error("unsupported schema file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The schema parsed but failed linting.
    #[error("invalid schema in {}: {}", .path.display(), join_issues(.issues))]
    InvalidSchema {
        /// File the schema was read from.
        path: PathBuf,
        /// Every issue found.
        issues: Vec<SchemaIssue>,
    },
}

fn join_issues(issues: &[SchemaIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience alias for results with [`LoaderError`].
pub type Result<T> = std::result::Result<T, LoaderError>;
