//! Error types for query_compiler

use search_common::CatalogError;
use thiserror::Error;

/// Unified error type for query_compiler operations
#[derive(Debug, Error)]
pub enum QueryError {
    /// Catalog lookup or load failed
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// Failed to parse JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A selected entry name is not in the priced pool
    #[error("Unknown entry: {0}")]
    UnknownEntry(String),
}

/// Result alias for query_compiler operations
pub type Result<T> = std::result::Result<T, QueryError>;
