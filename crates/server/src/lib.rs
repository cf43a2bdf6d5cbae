//! Server crate for the MovieRec catalog service.
//!
//! This crate exposes the catalog over HTTP and forwards recommendation
//! requests to the external recommender.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod service;

pub use api::{AppState, build_router};
pub use config::Config;
pub use error::ServiceError;
pub use service::CatalogService;
