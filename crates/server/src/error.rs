//! Errors returned by the catalog service and their HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use recommender_client::RecommenderError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    /// The requested movie id is not in the catalog (or isn't an id at all)
    #[error("Movie {0} not found")]
    NotFound(String),

    /// The recommender could not be reached or gave an unusable answer
    #[error("Failed to fetch recommendations: {0}")]
    Upstream(#[from] RecommenderError),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ServiceError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "Movie not found",
                }),
            ),
            ServiceError::Upstream(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Failed to fetch recommendations",
                    "details": err.to_string(),
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
