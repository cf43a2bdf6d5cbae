//! Core domain types for the movie catalog.
//!
//! The catalog is an ordered, read-only sequence of [`Movie`] records with
//! an id index on the side. Once built it is never mutated, so it can be
//! shared behind an `Arc` by any number of readers without locking.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{CatalogError, Result};

/// Unique identifier for a movie, assigned when the catalog is built
pub type MovieId = u32;

/// Lowest rating a movie can carry
pub const MIN_RATING: f64 = 0.0;

/// Highest rating a movie can carry
pub const MAX_RATING: f64 = 10.0;

/// A single movie record.
///
/// Field order matches the JSON shape served to clients:
/// `{id, title, genre, rating, year}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub genre: String,
    /// Rating on a 0-10 scale
    pub rating: f64,
    pub year: u16,
}

impl Movie {
    pub fn new(
        id: MovieId,
        title: impl Into<String>,
        genre: impl Into<String>,
        rating: f64,
        year: u16,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            genre: genre.into(),
            rating,
            year,
        }
    }

    /// Whether the title or genre contains `needle`.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.genre.to_lowercase().contains(needle)
    }
}

// =============================================================================
// Catalog - The In-Memory Store
// =============================================================================

/// Immutable, ordered collection of movies.
///
/// Records keep the order they were given in; `by_id` maps each id to its
/// position so lookups don't scan.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub(crate) movies: Vec<Movie>,
    pub(crate) by_id: HashMap<MovieId, usize>,
}

impl Catalog {
    /// Build a catalog from records, validating them first.
    ///
    /// Fails when two records share an id or a rating falls outside
    /// `[MIN_RATING, MAX_RATING]`.
    pub fn new(movies: Vec<Movie>) -> Result<Self> {
        let catalog = Self::from_movies(movies);
        catalog.validate()?;
        Ok(catalog)
    }

    /// Build without validating. Duplicate ids resolve to the first record.
    pub(crate) fn from_movies(movies: Vec<Movie>) -> Self {
        let mut by_id = HashMap::with_capacity(movies.len());
        for (position, movie) in movies.iter().enumerate() {
            by_id.entry(movie.id).or_insert(position);
        }
        Self { movies, by_id }
    }

    /// All movies in catalog order
    pub fn list(&self) -> &[Movie] {
        &self.movies
    }

    /// Get a movie by id
    pub fn get(&self, id: MovieId) -> Result<&Movie> {
        self.by_id
            .get(&id)
            .map(|&position| &self.movies[position])
            .ok_or(CatalogError::NotFound { id })
    }

    /// Case-insensitive substring search over title and genre.
    ///
    /// Results keep catalog order. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Movie> {
        let needle = query.to_lowercase();
        self.movies
            .iter()
            .filter(|movie| movie.matches(&needle))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
