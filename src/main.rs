use std::sync::Arc;

use axum::http::HeaderValue;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use reelscope::{
    api::{create_router, AppState},
    config::Config,
    services::providers::HttpBackend,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("reelscope=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let backend = Arc::new(HttpBackend::from_config(&config)?);
    tracing::info!(backend = %config.backend_api_url, "Using movie backend");

    // One process is one session; the first movie is loaded before serving
    let state = AppState::new(backend.clone(), backend, config.research_view);
    if let Err(e) = state.controller.initialize().await {
        tracing::error!(error = %e, "Initial movie load failed; waiting for a manual retry");
    }

    let origins: Vec<HeaderValue> = config
        .cors_origin_list()
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    let app = create_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::new().allow_origin(origins)),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %config.bind_address(), "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
