//! Routes for language content: text lookup and language switching.

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use evidence_content::application::provider::LoadOutcome;
use evidence_content::domain::language::Language;
use evidence_core::error::DomainError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

/// Query string for GET /text.
#[derive(Debug, Deserialize)]
pub struct TextQuery {
    /// Dot-separated path into the text table.
    pub key: String,
    /// Returned when the path does not resolve. Defaults to the key.
    pub fallback: Option<String>,
}

/// Response body for GET /text.
#[derive(Debug, Serialize)]
pub struct TextResponse {
    /// The requested path.
    pub key: String,
    /// The resolved text or the fallback.
    pub text: String,
}

/// Request body for POST /language.
#[derive(Debug, Deserialize)]
pub struct LanguageRequest {
    /// Language code, e.g. `pt` or `en`.
    pub language: String,
}

/// Response body for the language routes.
#[derive(Debug, Serialize)]
pub struct LanguageResponse {
    /// The active language after the request.
    pub language: Language,
    /// Whether a load is in flight.
    pub loading: bool,
    /// What happened to a load request; absent on reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<&'static str>,
}

fn language_response(state: &AppState, outcome: Option<LoadOutcome>) -> LanguageResponse {
    LanguageResponse {
        language: state.content.language(),
        loading: state.content.is_loading(),
        outcome: outcome.map(|outcome| match outcome {
            LoadOutcome::Loaded => "loaded",
            LoadOutcome::Skipped => "skipped",
            LoadOutcome::Failed => "failed",
        }),
    }
}

fn loaded(
    state: &AppState,
    requested: Language,
    outcome: LoadOutcome,
) -> Result<Json<LanguageResponse>, ApiError> {
    if outcome == LoadOutcome::Failed {
        return Err(DomainError::ContentUnavailable(format!(
            "could not load content for {requested}"
        ))
        .into());
    }
    Ok(Json(language_response(state, Some(outcome))))
}

/// GET /text
async fn get_text(
    State(state): State<AppState>,
    Query(query): Query<TextQuery>,
) -> Json<TextResponse> {
    let text = match &query.fallback {
        Some(fallback) => state.content.t(&query.key, fallback),
        None => state.content.text(&query.key),
    };
    Json(TextResponse {
        key: query.key,
        text,
    })
}

/// GET /language
async fn get_language(State(state): State<AppState>) -> Json<LanguageResponse> {
    Json(language_response(&state, None))
}

/// POST /language
#[instrument(skip(state, request), fields(language = %request.language))]
async fn load_language(
    State(state): State<AppState>,
    Json(request): Json<LanguageRequest>,
) -> Result<Json<LanguageResponse>, ApiError> {
    let language: Language = request.language.parse()?;
    let outcome = state.content.load_language(language).await;
    loaded(&state, language, outcome)
}

/// POST /language/toggle
#[instrument(skip(state))]
async fn toggle_language(
    State(state): State<AppState>,
) -> Result<Json<LanguageResponse>, ApiError> {
    let requested = state.content.language().toggled();
    let outcome = state.content.load_language(requested).await;
    loaded(&state, requested, outcome)
}

/// Returns the router for language content.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/text", get(get_text))
        .route("/language", get(get_language).post(load_language))
        .route("/language/toggle", post(toggle_language))
}
