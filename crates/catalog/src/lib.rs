//! # Catalog Crate
//!
//! This crate holds the movie catalog: a fixed, ordered list of movie
//! records built once at startup and only read afterwards.
//!
//! ## Main Components
//!
//! - **types**: `Movie`, `MovieId` and the `Catalog` store with its queries
//! - **loader**: Load a catalog from a JSON file and validate it
//! - **seed**: The builtin catalog
//! - **error**: Error types for lookups and loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//!
//! let catalog = Catalog::builtin();
//!
//! let inception = catalog.get(1)?;
//! let sci_fi = catalog.search("sci");
//!
//! println!("{} matches, first is {}", sci_fi.len(), inception.title);
//! ```

// Public modules
pub mod error;
pub mod loader;
pub mod seed;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use types::{Catalog, MAX_RATING, MIN_RATING, Movie, MovieId};
