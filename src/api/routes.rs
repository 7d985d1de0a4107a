use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Rating loop
        .route("/session", get(handlers::get_session))
        .route("/session/next", post(handlers::load_next))
        .route("/session/rate", post(handlers::rate))
        .route("/session/favorite", post(handlers::toggle_favorite))
        .route("/session/mode", put(handlers::set_mode))
        // Research view
        .route(
            "/session/research",
            get(handlers::get_research).put(handlers::set_research),
        )
        // History
        .route("/history/summary", get(handlers::history_summary))
}
