//! HTTP surface of the catalog service.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::error::ServiceError;
use crate::service::CatalogService;

#[derive(Clone)]
pub struct AppState {
    pub service: CatalogService,
}

impl AppState {
    pub fn new(service: CatalogService) -> Self {
        Self { service }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/movies", get(list_movies))
        .route("/api/movies/search", get(search_movies))
        .route("/api/movies/:id", get(get_movie))
        .route("/api/recommendations/:movie_id", get(get_recommendations))
        .fallback(fallback_handler)
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "backend",
    }))
}

async fn list_movies(State(state): State<AppState>) -> Response {
    Json(state.service.list()).into_response()
}

async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    Json(state.service.search(params.q.as_deref())).into_response()
}

async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    let movie = state.service.get(&id)?;
    Ok(Json(movie).into_response())
}

/// Forwards the recommender's body byte for byte
async fn get_recommendations(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<Response, ServiceError> {
    let recommendations = state.service.recommendations(&movie_id).await?;
    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        recommendations.into_body(),
    )
        .into_response())
}

async fn fallback_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
