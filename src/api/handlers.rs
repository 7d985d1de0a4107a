use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{RatingMode, RatingSummary, SessionView, VisualizationFrame},
};

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub up: bool,
}

#[derive(Debug, Deserialize)]
pub struct ModeRequest {
    pub mode: RatingMode,
}

#[derive(Debug, Deserialize)]
pub struct ResearchRequest {
    pub visible: bool,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Current session view
pub async fn get_session(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.controller.snapshot().await)
}

/// Re-requests a movie for the current mode
pub async fn load_next(State(state): State<AppState>) -> AppResult<Json<SessionView>> {
    let mode = state.controller.mode().await;
    state.controller.load_next(mode).await?;
    Ok(Json(state.controller.snapshot().await))
}

/// Rates the current movie up or down
pub async fn rate(
    State(state): State<AppState>,
    Json(request): Json<RateRequest>,
) -> AppResult<Json<SessionView>> {
    state.controller.rate(request.up).await?;
    Ok(Json(state.controller.snapshot().await))
}

/// Toggles the current movie's favorite flag
pub async fn toggle_favorite(State(state): State<AppState>) -> AppResult<Json<SessionView>> {
    state.controller.toggle_favorite().await?;
    Ok(Json(state.controller.snapshot().await))
}

/// Switches recommendation mode; a locked smart mode leaves the session untouched
pub async fn set_mode(
    State(state): State<AppState>,
    Json(request): Json<ModeRequest>,
) -> AppResult<Json<SessionView>> {
    state.controller.set_mode(request.mode).await?;
    Ok(Json(state.controller.snapshot().await))
}

/// Shows or hides the research panel
pub async fn set_research(
    State(state): State<AppState>,
    Json(request): Json<ResearchRequest>,
) -> Json<SessionView> {
    state.controller.set_research_visible(request.visible).await;
    Json(state.controller.snapshot().await)
}

/// Last rendered research frame
pub async fn get_research(State(state): State<AppState>) -> AppResult<Json<VisualizationFrame>> {
    state
        .frames
        .latest()
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No visualization rendered yet".to_string()))
}

/// Up/down/unrated tally over the full rating history
pub async fn history_summary(State(state): State<AppState>) -> AppResult<Json<RatingSummary>> {
    let history = state.feed.fetch_rating_history().await?;
    Ok(Json(RatingSummary::from_history(&history)))
}
