use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trivia_duel::{
    api,
    state::AppState,
    trivia::{TriviaApiClient, TriviaConfig},
    types::GameConfig,
};

const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist, only log if it's a different issue
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trivia_duel=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Trivia Duel...");

    let trivia_config = TriviaConfig::from_env();
    let client = match TriviaApiClient::new(&trivia_config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to initialize trivia client: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Using trivia service at {} (category sample {}, {} questions per category)",
        trivia_config.base_url,
        trivia_config.category_sample,
        trivia_config.question_limit
    );

    let state = Arc::new(AppState::new(Arc::new(client), GameConfig::from_env()));
    let app = api::router(state, "static");

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on http://{}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}
