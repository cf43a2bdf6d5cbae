mod api;
mod browse;
mod render;
mod view;

use std::time::Duration;

use anyhow::{Context, Result};
use catalog::MovieId;
use clap::{Parser, Subcommand};

use api::CatalogClient;
use render::render;
use view::{ClientView, Completion};

/// MovieRec - browse the catalog and ask for recommendations
#[derive(Parser)]
#[command(name = "movierec")]
#[command(about = "Search the movie catalog and get similar-movie recommendations", long_about = None)]
struct Cli {
    /// Base URL of the catalog service
    #[arg(long, env = "MOVIEREC_API_URL", default_value = "http://localhost:5000")]
    api_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "10")]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search movies by title or genre (case-insensitive substring match)
    Search {
        /// Text to look for; omit to list every movie
        query: Option<String>,
    },

    /// Get recommendations for a movie
    Recommend {
        /// Catalog id of the movie
        movie_id: MovieId,
    },

    /// Interactive session
    Browse,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = CatalogClient::new(&cli.api_url, Duration::from_secs(cli.timeout_secs))
        .context("Failed to create catalog client")?;

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Search { query } => handle_search(&client, query.unwrap_or_default()).await,
        Commands::Recommend { movie_id } => handle_recommend(&client, movie_id).await,
        Commands::Browse => browse::run(client).await?,
    }

    Ok(())
}

/// Handle the 'search' command
async fn handle_search(client: &CatalogClient, query: String) {
    let mut view = ClientView::new();
    view.set_search_query(query);

    if let Some(query) = view.begin_search() {
        let result = client.search(&query).await;
        view.apply(Completion::Movies(result));
    }

    print!("{}", render(&view));
}

/// Handle the 'recommend' command
async fn handle_recommend(client: &CatalogClient, movie_id: MovieId) {
    let mut view = ClientView::new();

    let movie_id = view.begin_recommendations(movie_id);
    let result = client.recommendations(movie_id).await;
    view.apply(Completion::Recommendations(movie_id, result));

    print!("{}", render(&view));
}
