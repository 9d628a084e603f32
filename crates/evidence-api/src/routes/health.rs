//! Health check endpoint.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use evidence_content::domain::language::Language;
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Active content language.
    pub language: Language,
    /// Whether the active content can be played.
    pub content_ready: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        language: state.content.language(),
        content_ready: state.content.document().is_playable(),
    })
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
