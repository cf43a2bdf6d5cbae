//! Catalog loading and validation.
//!
//! A catalog can come from the builtin seed or from a JSON file holding an
//! array of movie records. Either way it goes through [`Catalog::validate`]
//! before the service gets to see it.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{CatalogError, Result};
use crate::types::*;

impl Catalog {
    /// Load a catalog from a JSON file
    ///
    /// The file must contain an array of `{id, title, genre, rating, year}`
    /// objects. Order in the file becomes catalog order.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        info!("Loading catalog from {:?}", path);

        if !path.exists() {
            return Err(CatalogError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let bytes = fs::read(path)?;
        let movies: Vec<Movie> =
            serde_json::from_slice(&bytes).map_err(|e| CatalogError::ParseError {
                file: path.display().to_string(),
                reason: e.to_string(),
            })?;

        debug!("Parsed {} movie records", movies.len());
        let catalog = Catalog::new(movies)?;

        info!("Catalog loaded with {} movies", catalog.len());
        Ok(catalog)
    }

    /// Validate catalog integrity
    ///
    /// Check that:
    /// - Every id is unique
    /// - Every rating is a finite number in range (0.0 - 10.0)
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.movies.len());
        for movie in &self.movies {
            if !seen.insert(movie.id) {
                return Err(CatalogError::DuplicateId { id: movie.id });
            }
            if !movie.rating.is_finite() || movie.rating < MIN_RATING || movie.rating > MAX_RATING
            {
                return Err(CatalogError::InvalidValue {
                    id: movie.id,
                    field: "rating".to_string(),
                    value: movie.rating.to_string(),
                });
            }
        }
        Ok(())
    }
}
