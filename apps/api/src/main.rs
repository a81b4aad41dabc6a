mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::scraper::LlmSiteKeywordSource;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Ad Copy API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let mut llm = LlmClient::new(config.anthropic_api_key.clone(), config.llm_timeout)?;
    if let Some(base_url) = &config.anthropic_base_url {
        llm = llm.with_base_url(base_url);
        info!("Using Anthropic API at {base_url}");
    }
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize competitor keyword source
    let keyword_source = Arc::new(LlmSiteKeywordSource::new(
        llm.clone(),
        config.scrape_timeout,
    )?);
    info!(
        "Keyword scraper initialized (concurrency: {}, timeout: {:?})",
        config.scrape_concurrency, config.scrape_timeout
    );

    // Build app state
    let state = AppState {
        llm,
        config: config.clone(),
        keyword_source,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the form's origin once it is deployed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
