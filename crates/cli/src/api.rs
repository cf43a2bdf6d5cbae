//! HTTP client for the catalog service.

use std::time::Duration;

use catalog::{Movie, MovieId};
use recommender_client::Recommendation;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Anything that went wrong between the client and the catalog service
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Could not parse response from {url}: {reason}")]
    Parse { url: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// `GET /api/movies/search?q=<query>`
    pub async fn search(&self, query: &str) -> Result<Vec<Movie>, ClientError> {
        self.get_json("api/movies/search", &[("q", query)]).await
    }

    /// `GET /api/recommendations/<movie_id>`
    pub async fn recommendations(
        &self,
        movie_id: MovieId,
    ) -> Result<Vec<Recommendation>, ClientError> {
        self.get_json(&format!("api/recommendations/{}", movie_id), &[])
            .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ClientError::Request {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| ClientError::Parse {
            url,
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::post;
    use axum::{Json, Router};
    use catalog::Catalog;
    use recommender_client::HttpRecommender;
    use serde_json::{json, Value};
    use server::{build_router, AppState, CatalogService};
    use std::sync::Arc;
    use tokio::net::TcpListener;

    /// Serve `app` on a random local port
    async fn serve(app: Router) -> (String, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        (format!("http://{}", addr), handle)
    }

    /// Run a real catalog service backed by a canned recommender
    async fn start_catalog_service() -> (String, Vec<tokio::task::JoinHandle<()>>) {
        let recommender_app = Router::new().route(
            "/recommend",
            post(|Json(_body): Json<Value>| async {
                Json(json!([
                    {"title": "The Matrix", "genre": "Sci-Fi", "similarity_score": 99}
                ]))
            }),
        );
        let (recommender_addr, recommender_handle) = serve(recommender_app).await;

        let recommender = HttpRecommender::new(recommender_addr, Duration::from_secs(2)).unwrap();
        let service = CatalogService::new(Arc::new(Catalog::builtin()), Arc::new(recommender));
        let (addr, service_handle) = serve(build_router(AppState::new(service))).await;

        (addr, vec![recommender_handle, service_handle])
    }

    fn client(addr: &str) -> CatalogClient {
        CatalogClient::new(addr, Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_search() {
        let (addr, handles) = start_catalog_service().await;

        let movies = client(&addr).search("star wars").await.unwrap();
        let ids: Vec<_> = movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![16, 17, 18, 19]);

        let all = client(&addr).search("").await.unwrap();
        assert_eq!(all.len(), 19);

        handles.iter().for_each(|h| h.abort());
    }

    #[tokio::test]
    async fn test_recommendations() {
        let (addr, handles) = start_catalog_service().await;

        let recommendations = client(&addr).recommendations(1).await.unwrap();
        assert_eq!(recommendations.len(), 1);
        assert_eq!(recommendations[0].title, "The Matrix");
        assert_eq!(recommendations[0].similarity_score, 99.0);

        handles.iter().for_each(|h| h.abort());
    }

    #[tokio::test]
    async fn test_recommendations_for_missing_movie() {
        let (addr, handles) = start_catalog_service().await;

        let result = client(&addr).recommendations(999).await;
        assert!(matches!(result, Err(ClientError::Status { status: 404, .. })));

        handles.iter().for_each(|h| h.abort());
    }

    #[tokio::test]
    async fn test_service_unreachable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let result = client(&addr).search("sci").await;
        assert!(matches!(result, Err(ClientError::Request { .. })));
    }

    #[tokio::test]
    async fn test_unparsable_response() {
        let app = Router::new().route(
            "/api/movies/search",
            axum::routing::get(|| async { "<html>not json</html>" }),
        );
        let (addr, handle) = serve(app).await;

        let result = client(&addr).search("sci").await;
        assert!(matches!(result, Err(ClientError::Parse { .. })));

        handle.abort();
    }
}
