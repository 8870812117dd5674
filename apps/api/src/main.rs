mod config;
mod errors;
mod job_board;
mod matching;
mod models;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::job_board::HttpJobBoard;
use crate::matching::scorer::SkillOverlapScorer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career Navigator API v{}", env!("CARGO_PKG_VERSION"));

    let job_board = HttpJobBoard::new(&config.job_board_api_url, config.job_board_timeout())
        .context("Failed to build job board HTTP client")?;
    info!("Job board client initialized ({})", config.job_board_api_url);

    let scorer = Arc::new(SkillOverlapScorer);
    info!(
        "Recommendation filters: high match >= {}, recent within {} days",
        config.high_match_threshold, config.recent_window_days
    );

    let state = AppState {
        job_board: Arc::new(job_board),
        scorer,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
