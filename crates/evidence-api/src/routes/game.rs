//! Routes for the game controller: its read-only state and its intents.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use evidence_core::event::DomainEvent;
use evidence_game::application::command_handlers::{self, GameCommandResult};
use evidence_game::application::query_handlers::{self, GameStateView};
use evidence_game::domain::commands;
use evidence_game::domain::controller::Direction;
use evidence_profile::profile::NewIdentity;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /register.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// Free-form location.
    pub location: String,
}

/// Request body for POST /choose.
#[derive(Debug, Deserialize)]
pub struct ChooseRequest {
    /// `left` or `right`.
    pub direction: Direction,
}

/// Response body returned after an intent is applied.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    /// Type of the transition event.
    pub event_type: &'static str,
    /// When the transition happened.
    pub occurred_at: DateTime<Utc>,
    /// Controller state after the transition.
    pub state: GameStateView,
}

impl From<GameCommandResult> for CommandResponse {
    fn from(result: GameCommandResult) -> Self {
        Self {
            event_type: result.event.event_type(),
            occurred_at: result.event.occurred_at(),
            state: result.state,
        }
    }
}

/// GET /
async fn get_game(State(state): State<AppState>) -> Json<GameStateView> {
    let controller = state.controller.lock().await;
    Json(query_handlers::get_game_state(&controller))
}

/// POST /begin
#[instrument(skip(state))]
async fn begin(State(state): State<AppState>) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::BeginPlaythrough {
        correlation_id: Uuid::new_v4(),
    };
    let mut controller = state.controller.lock().await;
    let result = command_handlers::handle_begin_playthrough(
        &command,
        &mut controller,
        &state.profile,
        state.clock.as_ref(),
    )
    .await?;
    Ok(Json(result.into()))
}

/// POST /register
#[instrument(skip(state, request))]
async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::CompleteRegistration {
        correlation_id: Uuid::new_v4(),
        identity: NewIdentity {
            name: request.name,
            email: request.email,
            location: request.location,
        },
    };
    let mut controller = state.controller.lock().await;
    let result = command_handlers::handle_complete_registration(
        &command,
        &mut controller,
        &state.profile,
        state.clock.as_ref(),
    )
    .await?;
    Ok(Json(result.into()))
}

/// POST /skip-registration
#[instrument(skip(state))]
async fn skip_registration(
    State(state): State<AppState>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::SkipRegistration {
        correlation_id: Uuid::new_v4(),
    };
    let mut controller = state.controller.lock().await;
    let result = command_handlers::handle_skip_registration(
        &command,
        &mut controller,
        state.clock.as_ref(),
    )?;
    Ok(Json(result.into()))
}

/// POST /choose
#[instrument(skip(state, request), fields(direction = ?request.direction))]
async fn choose(
    State(state): State<AppState>,
    Json(request): Json<ChooseRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::ApplyChoice {
        correlation_id: Uuid::new_v4(),
        direction: request.direction,
    };
    let mut controller = state.controller.lock().await;
    let result = command_handlers::handle_apply_choice(
        &command,
        &mut controller,
        &state.profile,
        state.clock.as_ref(),
    )
    .await?;
    Ok(Json(result.into()))
}

/// POST /toggle-shadow
#[instrument(skip(state))]
async fn toggle_shadow(State(state): State<AppState>) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::ToggleShadow {
        correlation_id: Uuid::new_v4(),
    };
    let mut controller = state.controller.lock().await;
    let result =
        command_handlers::handle_toggle_shadow(&command, &mut controller, state.clock.as_ref())?;
    Ok(Json(result.into()))
}

/// POST /restart
#[instrument(skip(state))]
async fn restart(State(state): State<AppState>) -> Json<CommandResponse> {
    let command = commands::Restart {
        correlation_id: Uuid::new_v4(),
    };
    let mut controller = state.controller.lock().await;
    let result = command_handlers::handle_restart(&command, &mut controller, state.clock.as_ref());
    Json(result.into())
}

/// Returns the router for the game controller.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_game))
        .route("/begin", post(begin))
        .route("/register", post(register))
        .route("/skip-registration", post(skip_registration))
        .route("/choose", post(choose))
        .route("/toggle-shadow", post(toggle_shadow))
        .route("/restart", post(restart))
}
