//! Error types for the catalog crate.
//!
//! Every failure the catalog can report is a variant of [`CatalogError`]:
//! lookups that miss, catalog files that can't be read or parsed, and
//! records that break the catalog invariants.

use crate::types::MovieId;
use thiserror::Error;

/// Errors that can occur while building or querying a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// No record carries the requested id
    #[error("Movie {id} not found")]
    NotFound { id: MovieId },

    /// Catalog file could not be found or opened
    #[error("Failed to open catalog file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the catalog file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Catalog file is not a JSON array of movie records
    #[error("Parse error in {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// A record field had an invalid value
    #[error("Invalid value for {field} of movie {id}: {value}")]
    InvalidValue {
        id: MovieId,
        field: String,
        value: String,
    },

    /// Two records share the same id
    #[error("Duplicate movie id {id}")]
    DuplicateId { id: MovieId },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
