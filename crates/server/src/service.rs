//! # Catalog Service
//!
//! Read operations over the catalog plus the recommendation passthrough:
//! 1. Resolve the movie id against the catalog
//! 2. Build the recommend request (target movie + whole catalog)
//! 3. Hand it to the recommender
//! 4. Return the recommender's answer untouched, or an upstream error
//!
//! The catalog never changes after startup, so the service is just two
//! shared handles and can be cloned into every request.

use std::sync::Arc;
use std::time::Instant;

use catalog::{Catalog, Movie, MovieId};
use recommender_client::{RecommendRequest, Recommendations, Recommender};
use tracing::{debug, error, info};

use crate::error::ServiceError;

#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<Catalog>,
    recommender: Arc<dyn Recommender>,
}

impl CatalogService {
    /// Create a service over an already-built catalog
    ///
    /// # Arguments
    /// * `catalog` - Shared, read-only catalog
    /// * `recommender` - Client for the external recommender
    pub fn new(catalog: Arc<Catalog>, recommender: Arc<dyn Recommender>) -> Self {
        Self {
            catalog,
            recommender,
        }
    }

    /// Every movie, in catalog order
    pub fn list(&self) -> &[Movie] {
        self.catalog.list()
    }

    /// Search title and genre; a missing query matches everything
    pub fn search(&self, query: Option<&str>) -> Vec<&Movie> {
        let query = query.unwrap_or_default();
        let results = self.catalog.search(query);
        debug!("Search {:?} matched {} movies", query, results.len());
        results
    }

    /// Look up a movie by the id as it appears in the request path
    pub fn get(&self, raw_id: &str) -> Result<&Movie, ServiceError> {
        let not_found = || ServiceError::NotFound(raw_id.to_string());
        let id = parse_movie_id(raw_id).ok_or_else(not_found)?;
        self.catalog.get(id).map_err(|_| not_found())
    }

    /// Main entry point: recommendations for one catalog movie
    ///
    /// Unknown ids fail with `NotFound` before the recommender is
    /// contacted. Any recommender failure becomes `Upstream`; nothing is
    /// returned in that case, not even a partial list.
    pub async fn recommendations(&self, raw_id: &str) -> Result<Recommendations, ServiceError> {
        let start_time = Instant::now();

        let movie = self.get(raw_id)?;
        let request = RecommendRequest::for_movie(movie, self.catalog.list());

        let recommendations = self.recommender.recommend(&request).await.map_err(|e| {
            error!("Recommender failed for movie {}: {}", movie.id, e);
            ServiceError::Upstream(e)
        })?;

        info!(
            "Got {} recommendations for movie {} in {:.2?}",
            recommendations.len(),
            movie.id,
            start_time.elapsed()
        );
        Ok(recommendations)
    }
}

/// Read a path id the way web clients build them: leading whitespace is
/// skipped, then the longest run of digits is taken and anything after it
/// ignored ("7abc" and "7.5" are both 7). A "0x" prefix switches to hex.
///
/// `None` when there are no digits, the value is negative, or it is too
/// large to be a catalog id.
fn parse_movie_id(raw: &str) -> Option<MovieId> {
    let s = raw.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, s) = match s.get(..2) {
        Some("0x" | "0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let end = s.find(|c: char| !c.is_digit(radix)).unwrap_or(s.len());
    let id = MovieId::from_str_radix(&s[..end], radix).ok()?;
    if negative && id != 0 {
        return None;
    }
    Some(id)
}
