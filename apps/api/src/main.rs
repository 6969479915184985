mod config;
mod document;
mod errors;
mod llm_client;
mod mailer;
mod models;
mod pathway;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::mailer::SmtpMailer;
use crate::pathway::controller::PathwayController;
use crate::pathway::generator::LlmPathwayGenerator;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pathway API v{}", env!("CARGO_PKG_VERSION"));
    info!("{config:?}");

    // Initialize LLM client
    let llm = LlmClient::new(
        config.llm_api_key.clone(),
        config.llm_model.clone(),
        config.llm_base_url.clone(),
    )?;
    info!("LLM client initialized (model: {})", llm.model());

    // Initialize SMTP mailer (connects lazily on first send)
    let mailer = SmtpMailer::new(&config.smtp)?;
    info!(
        "SMTP mailer initialized ({}:{} as {})",
        config.smtp.host, config.smtp.port, config.smtp.username
    );

    let controller = PathwayController::new(
        Arc::new(LlmPathwayGenerator::new(llm)),
        Arc::new(mailer),
    );

    let state = AppState {
        controller: Arc::new(controller),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
