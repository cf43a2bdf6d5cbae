//! Client for the external recommendation service.
//!
//! The recommender is a separate HTTP service that, given a target movie and
//! the full catalog, answers with a list of similar movies. This crate hides
//! its wire details behind the [`Recommender`] trait:
//! - Building the `POST /recommend` request body from catalog types
//! - Sending it with a bounded timeout
//! - Checking the response status and shape
//! - Keeping the raw response body so callers can forward it untouched

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use catalog::{Movie, MovieId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info};

/// Timeout applied to every recommender call unless configured otherwise
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when talking to the recommender
#[derive(Error, Debug)]
pub enum RecommenderError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Failed to connect to recommender at {addr}: {reason}")]
    Connection { addr: String, reason: String },

    #[error("Recommender did not respond within {0:?}")]
    Timeout(Duration),

    #[error("Recommender returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from recommender: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, RecommenderError>;

// =============================================================================
// Wire Types
// =============================================================================

/// Body of `POST /recommend`
#[derive(Debug, Clone, Serialize)]
pub struct RecommendRequest<'a> {
    pub movie_id: MovieId,
    pub movie_genre: &'a str,
    pub movie_rating: f64,
    pub all_movies: &'a [Movie],
}

impl<'a> RecommendRequest<'a> {
    /// Request recommendations for `movie` against the whole catalog
    pub fn for_movie(movie: &'a Movie, all_movies: &'a [Movie]) -> Self {
        Self {
            movie_id: movie.id,
            movie_genre: &movie.genre,
            movie_rating: movie.rating,
            all_movies,
        }
    }
}

/// A single suggestion returned by the recommender.
///
/// Only `title`, `genre` and `similarity_score` are required. Whatever else
/// the recommender sends (id, rating, year...) ends up in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub genre: String,
    /// Percentage in [0, 100], computed by the recommender
    pub similarity_score: f64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A successful recommender answer.
///
/// `body` holds the response bytes exactly as the recommender sent them;
/// `items` is the same data parsed into [`Recommendation`] records.
#[derive(Debug, Clone)]
pub struct Recommendations {
    body: Bytes,
    items: Vec<Recommendation>,
}

impl Recommendations {
    /// Check that `body` is a JSON array of recommendation records
    pub fn from_body(body: impl Into<Bytes>) -> Result<Self> {
        let body = body.into();
        let items: Vec<Recommendation> = serde_json::from_slice(&body)
            .map_err(|e| RecommenderError::InvalidResponse(e.to_string()))?;
        Ok(Self { body, items })
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }

    pub fn items(&self) -> &[Recommendation] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Recommender Trait
// =============================================================================

/// Anything that can produce recommendations for a catalog movie.
///
/// `Send + Sync` so one instance can be shared by every request handler.
#[async_trait]
pub trait Recommender: Send + Sync {
    /// Ask for movies similar to `request.movie_id`
    async fn recommend(&self, request: &RecommendRequest<'_>) -> Result<Recommendations>;

    /// Check that the recommender is up
    async fn health(&self) -> Result<()>;
}

/// [`Recommender`] backed by the recommendation service's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpRecommender {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpRecommender {
    /// Create a client for the service at `base_url`
    ///
    /// # Arguments
    /// * `base_url` - Address of the service (e.g., "http://localhost:8000")
    /// * `timeout` - Upper bound for a whole call, connect included
    ///
    /// No connection is made here; the first request opens one.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("Using recommender at {} (timeout {:?})", base_url, timeout);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RecommenderError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Get the address of the recommender this client talks to.
    pub fn service_address(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn transport_error(&self, err: reqwest::Error) -> RecommenderError {
        if err.is_timeout() {
            RecommenderError::Timeout(self.timeout)
        } else {
            RecommenderError::Connection {
                addr: self.base_url.clone(),
                reason: err.to_string(),
            }
        }
    }

    /// Turn a non-2xx response into a `Status` error
    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        error!("Recommender returned {}: {}", status, body);
        Err(RecommenderError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl Recommender for HttpRecommender {
    async fn recommend(&self, request: &RecommendRequest<'_>) -> Result<Recommendations> {
        debug!(
            "Requesting recommendations for movie {} ({} catalog entries)",
            request.movie_id,
            request.all_movies.len()
        );

        let response = self
            .client
            .post(self.endpoint("recommend"))
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = self.check_status(response).await?;

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        let recommendations = Recommendations::from_body(body)?;
        debug!(
            "Recommender returned {} suggestions for movie {}",
            recommendations.len(),
            request.movie_id
        );
        Ok(recommendations)
    }

    async fn health(&self) -> Result<()> {
        let response = self
            .client
            .get(self.endpoint("health"))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    type Seen = Arc<Mutex<Option<Value>>>;

    fn test_movies() -> Vec<Movie> {
        vec![
            Movie::new(1, "Inception", "Sci-Fi", 8.8, 2010),
            Movie::new(2, "The Matrix", "Sci-Fi", 8.7, 1999),
            Movie::new(4, "The Godfather", "Crime", 9.2, 1972),
        ]
    }

    fn canned_response() -> Value {
        json!([
            {"id": 2, "title": "The Matrix", "genre": "Sci-Fi", "rating": 8.7, "year": 1999, "similarity_score": 99},
            {"id": 4, "title": "The Godfather", "genre": "Crime", "rating": 9.2, "year": 1972, "similarity_score": 71}
        ])
    }

    /// Start a mock recommender on a random port
    async fn start_mock_recommender(app: Router) -> (String, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock recommender");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock recommender failed");
        });

        (format!("http://{}", addr), handle)
    }

    fn recording_recommender(seen: Seen) -> Router {
        Router::new()
            .route(
                "/recommend",
                post(|State(seen): State<Seen>, Json(body): Json<Value>| async move {
                    *seen.lock().unwrap() = Some(body);
                    Json(canned_response())
                }),
            )
            .route("/health", get(|| async { Json(json!({"status": "healthy"})) }))
            .with_state(seen)
    }

    fn client(addr: &str) -> HttpRecommender {
        HttpRecommender::new(addr, Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn test_request_body_shape() {
        let movies = test_movies();
        let request = RecommendRequest::for_movie(&movies[0], &movies);

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["movie_id"], 1);
        assert_eq!(body["movie_genre"], "Sci-Fi");
        assert_eq!(body["movie_rating"].as_f64(), Some(8.8));
        assert_eq!(body["all_movies"].as_array().unwrap().len(), 3);
        assert_eq!(body["all_movies"][2]["title"], "The Godfather");
    }

    #[test]
    fn test_recommendations_keep_extra_fields() {
        let recommendations = Recommendations::from_body(canned_response().to_string()).unwrap();

        assert_eq!(recommendations.len(), 2);
        let first = &recommendations.items()[0];
        assert_eq!(first.title, "The Matrix");
        assert_eq!(first.similarity_score, 99.0);
        assert_eq!(first.extra.get("year"), Some(&json!(1999)));
        assert_eq!(recommendations.body(), canned_response().to_string().as_bytes());
    }

    #[test]
    fn test_recommendations_body_is_not_reformatted() {
        let raw = r#"[ {"title": "Alien", "genre": "Horror", "similarity_score": 64.50, "id": 11} ]"#;
        let recommendations = Recommendations::from_body(raw).unwrap();

        assert_eq!(recommendations.items()[0].title, "Alien");
        assert_eq!(recommendations.into_body(), raw.as_bytes());
    }

    #[test]
    fn test_recommendations_reject_wrong_shape() {
        let not_array = Recommendations::from_body(json!({"error": "nope"}).to_string());
        assert!(matches!(not_array, Err(RecommenderError::InvalidResponse(_))));

        let missing_score = Recommendations::from_body(json!([{"title": "X", "genre": "Y"}]).to_string());
        assert!(matches!(missing_score, Err(RecommenderError::InvalidResponse(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = HttpRecommender::new("http://ia-service:8000/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.service_address(), "http://ia-service:8000");
        assert_eq!(client.endpoint("recommend"), "http://ia-service:8000/recommend");
    }

    #[tokio::test]
    async fn test_recommend_posts_payload_and_returns_body_verbatim() {
        let seen = Seen::default();
        let (addr, handle) = start_mock_recommender(recording_recommender(seen.clone())).await;

        let movies = test_movies();
        let request = RecommendRequest::for_movie(&movies[1], &movies);
        let recommendations = client(&addr).recommend(&request).await.unwrap();

        let forwarded: Value = serde_json::from_slice(recommendations.body()).unwrap();
        assert_eq!(forwarded, canned_response());

        let posted = seen.lock().unwrap().clone().expect("recommender was not called");
        assert_eq!(posted["movie_id"], 2);
        assert_eq!(posted["movie_genre"], "Sci-Fi");
        assert_eq!(posted["all_movies"], serde_json::to_value(&movies).unwrap());

        handle.abort();
    }

    #[tokio::test]
    async fn test_recommend_non_success_status() {
        let app = Router::new().route(
            "/recommend",
            post(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({"error": "target movie not found"})),
                )
            }),
        );
        let (addr, handle) = start_mock_recommender(app).await;

        let movies = test_movies();
        let request = RecommendRequest::for_movie(&movies[0], &movies);
        let result = client(&addr).recommend(&request).await;

        match result {
            Err(RecommenderError::Status { status, body }) => {
                assert_eq!(status, 404);
                assert!(body.contains("target movie not found"));
            }
            other => panic!("expected Status error, got {:?}", other),
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_recommend_malformed_body() {
        let app = Router::new().route("/recommend", post(|| async { "definitely not json" }));
        let (addr, handle) = start_mock_recommender(app).await;

        let movies = test_movies();
        let request = RecommendRequest::for_movie(&movies[0], &movies);
        let result = client(&addr).recommend(&request).await;

        assert!(matches!(result, Err(RecommenderError::InvalidResponse(_))));

        handle.abort();
    }

    #[tokio::test]
    async fn test_recommend_unreachable() {
        // Grab a free port, then close it so nothing is listening there
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let movies = test_movies();
        let request = RecommendRequest::for_movie(&movies[0], &movies);
        let result = client(&addr).recommend(&request).await;

        match result {
            Err(err @ RecommenderError::Connection { .. }) => {
                assert!(!err.to_string().is_empty());
            }
            other => panic!("expected Connection error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_recommend_timeout() {
        let app = Router::new().route(
            "/recommend",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!([]))
            }),
        );
        let (addr, handle) = start_mock_recommender(app).await;

        let slow_client = HttpRecommender::new(&addr, Duration::from_millis(200)).unwrap();
        let movies = test_movies();
        let request = RecommendRequest::for_movie(&movies[0], &movies);
        let result = slow_client.recommend(&request).await;

        assert!(matches!(result, Err(RecommenderError::Timeout(_))));

        handle.abort();
    }

    #[tokio::test]
    async fn test_health() {
        let (addr, handle) = start_mock_recommender(recording_recommender(Seen::default())).await;
        assert!(client(&addr).health().await.is_ok());
        handle.abort();

        let app = Router::new().route("/health", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
        let (addr, handle) = start_mock_recommender(app).await;
        assert!(matches!(
            client(&addr).health().await,
            Err(RecommenderError::Status { status: 503, .. })
        ));
        handle.abort();
    }
}
