//! Elicit - interview simulation for requirements gathering
//!
//! A web service that plays an interviewee persona so students can
//! practice information-gathering interviews, with rule-based feedback
//! when the session ends.

mod api;
mod classifier;
mod dispatcher;
mod feedback;
mod llm;
mod persona;
mod session;

use api::{create_router, AppState};
use llm::LlmConfig;
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "elicit=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let port: u16 = std::env::var("ELICIT_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    let llm_config = LlmConfig::from_env();
    let model = llm_config.build_service();

    if let Some(service) = &model {
        tracing::info!(model = %service.model_id(), "model service initialized");
    } else {
        tracing::warn!(
            "No model credentials configured. Set OPENAI_API_KEY or LLM_GATEWAY; \
             chat turns will surface the failure in the transcript."
        );
    }

    // Create application state
    let state = AppState::new(model);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state)
        .layer(cors)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Elicit server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
