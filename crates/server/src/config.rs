//! Command line / environment configuration for the catalog service.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use catalog::Catalog;
use clap::Parser;

/// MovieRec catalog service
#[derive(Parser, Debug, Clone)]
#[command(name = "movierec-server")]
#[command(about = "Movie catalog API with recommendation passthrough", long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "MOVIEREC_LISTEN", default_value = "0.0.0.0:5000")]
    pub listen: SocketAddr,

    /// Base URL of the recommendation service
    #[arg(long, env = "RECOMMENDER_URL", default_value = "http://ia-service:8000")]
    pub recommender_url: String,

    /// Timeout for a single recommender call, in seconds
    #[arg(long, env = "RECOMMENDER_TIMEOUT_SECS", default_value = "10")]
    pub recommender_timeout_secs: u64,

    /// JSON file with the catalog to serve (builtin catalog if omitted)
    #[arg(long, env = "MOVIEREC_CATALOG")]
    pub catalog: Option<PathBuf>,
}

impl Config {
    pub fn recommender_timeout(&self) -> Duration {
        Duration::from_secs(self.recommender_timeout_secs)
    }

    /// Build the catalog this service will serve
    pub fn load_catalog(&self) -> catalog::Result<Catalog> {
        match &self.catalog {
            Some(path) => Catalog::from_json_file(path),
            None => Ok(Catalog::builtin()),
        }
    }
}
