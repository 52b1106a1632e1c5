//! Error types for catalog loading and lookups

use thiserror::Error;

/// Unified error type for catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A category key was requested that the loaded catalog does not contain.
    /// Selection and catalog are out of sync upstream; the caller must abort.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    /// A modifier key was requested that the loaded catalog does not contain
    #[error("Unknown modifier: {0}")]
    UnknownModifier(String),
    /// Failed to read a catalog file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Failed to parse catalog JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
