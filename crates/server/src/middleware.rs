//! Request logging middleware.

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::info;

/// Log method, URL and final status of every request
pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;

    info!(
        method = %method,
        url = %uri,
        status = response.status().as_u16(),
        "HTTP request"
    );

    response
}
