//! Client view state.
//!
//! The view only changes in two ways: the user starts something
//! (`set_search_query`, `begin_search`, `begin_recommendations`) or a
//! request finishes and its [`Completion`] is applied. Requests may overlap;
//! whichever completion is applied last decides what is shown.

use catalog::{Movie, MovieId};
use recommender_client::Recommendation;
use tracing::{debug, error};

use crate::api::ClientError;

/// Outcome of a request issued by the view
#[derive(Debug)]
pub enum Completion {
    Movies(Result<Vec<Movie>, ClientError>),
    Recommendations(MovieId, Result<Vec<Recommendation>, ClientError>),
}

#[derive(Debug, Default)]
pub struct ClientView {
    search_query: String,
    movies: Vec<Movie>,
    recommendations: Vec<Recommendation>,
    loading: bool,
}

impl ClientView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The search control is disabled while a request is in flight
    pub fn can_search(&self) -> bool {
        !self.loading
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Start a search with the current query.
    ///
    /// Returns the query to send, or `None` if the search control is
    /// disabled.
    pub fn begin_search(&mut self) -> Option<String> {
        if !self.can_search() {
            debug!("Search ignored while a request is in flight");
            return None;
        }
        self.loading = true;
        Some(self.search_query.clone())
    }

    /// Start fetching recommendations for a listed movie.
    ///
    /// Selection stays enabled while loading, so this always issues a
    /// request.
    pub fn begin_recommendations(&mut self, movie_id: MovieId) -> MovieId {
        self.loading = true;
        movie_id
    }

    /// Apply a finished request.
    ///
    /// Success replaces the matching list; failure is logged and leaves the
    /// previous list in place. Either way the view stops loading.
    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Movies(Ok(movies)) => {
                debug!("Search returned {} movies", movies.len());
                self.movies = movies;
            }
            Completion::Movies(Err(e)) => {
                error!("Search for {:?} failed: {}", self.search_query, e);
            }
            Completion::Recommendations(movie_id, Ok(recommendations)) => {
                debug!(
                    "Got {} recommendations for movie {}",
                    recommendations.len(),
                    movie_id
                );
                self.recommendations = recommendations;
            }
            Completion::Recommendations(movie_id, Err(e)) => {
                error!("Recommendations for movie {} failed: {}", movie_id, e);
            }
        }
        self.loading = false;
    }
}
