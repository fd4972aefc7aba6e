mod config;
mod errors;
mod jobs;
mod llm_client;
mod resume;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::jobs::feed::RemoteOkFeed;
use crate::llm_client::LlmClient;
use crate::resume::structurer::ResumeStructurer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting {} v{}",
        routes::health::SERVICE_NAME,
        env!("CARGO_PKG_VERSION")
    );

    // LLM client is optional: without a key every resume goes through fallback parsing
    let llm = match &config.openai_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone(), &config.openai_base_url, config.openai_model.clone());
            info!("LLM client initialized (model: {})", client.model());
            Some(client)
        }
        None => {
            warn!("OPENAI_API_KEY is not set. AI features will be limited to fallback parsing.");
            None
        }
    };

    let job_feed = Arc::new(RemoteOkFeed::new(
        config.job_feed_url.clone(),
        Duration::from_secs(config.job_feed_timeout_secs),
    ));
    info!(
        "Job feed: {} (timeout {}s)",
        config.job_feed_url, config.job_feed_timeout_secs
    );

    let state = AppState {
        structurer: ResumeStructurer::new(llm),
        job_feed,
        config: config.clone(),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
