//! Routes for the saved profile: identity, history and backups.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use evidence_content::domain::model::PlaythroughResult;
use evidence_profile::profile::{Identity, ProfileExport, ProfileImport};
use serde::Serialize;
use tracing::{info, instrument};

use crate::state::AppState;

/// Response body for GET /.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// Whether an identity is saved.
    pub registered: bool,
    /// The saved identity, if any.
    pub user: Option<Identity>,
}

/// GET /
async fn get_profile(State(state): State<AppState>) -> Json<ProfileResponse> {
    let user = state.profile.identity().await;
    Json(ProfileResponse {
        registered: user.is_some(),
        user,
    })
}

/// DELETE /
#[instrument(skip(state))]
async fn clear_profile(State(state): State<AppState>) -> StatusCode {
    state.profile.clear().await;
    info!("profile cleared");
    StatusCode::NO_CONTENT
}

/// GET /history
async fn get_history(State(state): State<AppState>) -> Json<Vec<PlaythroughResult>> {
    Json(state.profile.history().await)
}

/// GET /export
#[instrument(skip(state))]
async fn export_profile(State(state): State<AppState>) -> Json<ProfileExport> {
    Json(state.profile.export().await)
}

/// POST /import
///
/// Responds with the snapshot as it stands after the import.
#[instrument(skip(state, snapshot))]
async fn import_profile(
    State(state): State<AppState>,
    Json(snapshot): Json<ProfileImport>,
) -> Json<ProfileExport> {
    state.profile.import(snapshot).await;
    Json(state.profile.export().await)
}

/// Returns the router for the saved profile.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile).delete(clear_profile))
        .route("/history", get(get_history))
        .route("/export", get(export_profile))
        .route("/import", post(import_profile))
}
