//! Command handlers for the game controller.
//!
//! Each handler runs one controller transition and performs the persistence
//! it implies: the registration check on begin, saving the identity, and
//! recording a finished result in the history.

use evidence_core::clock::Clock;
use evidence_core::command::Command;
use evidence_core::error::DomainError;
use evidence_core::event::DomainEvent;
use evidence_profile::profile::ProfileStore;
use tracing::info;

use crate::application::query_handlers::{GameStateView, get_game_state};
use crate::domain::commands::{
    ApplyChoice, BeginPlaythrough, CompleteRegistration, Restart, SkipRegistration, ToggleShadow,
};
use crate::domain::controller::GameController;
use crate::domain::events::GameEvent;

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct GameCommandResult {
    /// The transition that happened.
    pub event: GameEvent,
    /// The controller state after the transition.
    pub state: GameStateView,
}

fn handled(
    command: &dyn Command,
    event: GameEvent,
    controller: &GameController,
) -> GameCommandResult {
    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        event_type = event.event_type(),
        "command handled"
    );
    GameCommandResult {
        event,
        state: get_game_state(controller),
    }
}

/// Handles `BeginPlaythrough`: asks for registration unless an identity is
/// already saved.
///
/// # Errors
///
/// Returns `DomainError::ContentUnavailable` if there is nothing to play.
pub async fn handle_begin_playthrough(
    command: &BeginPlaythrough,
    controller: &mut GameController,
    profile: &ProfileStore,
    clock: &dyn Clock,
) -> Result<GameCommandResult, DomainError> {
    let registered = profile.is_registered().await;
    let event = controller.begin(registered, clock)?;
    Ok(handled(command, event, controller))
}

/// Handles `CompleteRegistration`: starts play and saves the identity.
/// Nothing is saved when play cannot start.
///
/// # Errors
///
/// Returns `DomainError::ContentUnavailable` if there is nothing to play.
pub async fn handle_complete_registration(
    command: &CompleteRegistration,
    controller: &mut GameController,
    profile: &ProfileStore,
    clock: &dyn Clock,
) -> Result<GameCommandResult, DomainError> {
    let event = controller.complete_registration(clock)?;
    profile.save_identity(command.identity.clone()).await;
    Ok(handled(command, event, controller))
}

/// Handles `SkipRegistration`.
///
/// # Errors
///
/// Returns `DomainError::InvalidPhase` outside registration and
/// `DomainError::ContentUnavailable` if there is nothing to play.
pub fn handle_skip_registration(
    command: &SkipRegistration,
    controller: &mut GameController,
    clock: &dyn Clock,
) -> Result<GameCommandResult, DomainError> {
    let event = controller.skip_registration(clock)?;
    Ok(handled(command, event, controller))
}

/// Handles `ApplyChoice`. When the choice finishes the playthrough the
/// result is appended to the history.
///
/// # Errors
///
/// Returns `DomainError::InvalidPhase` outside the playing phase and
/// `DomainError::ContentUnavailable` if content needed to continue is
/// missing.
pub async fn handle_apply_choice(
    command: &ApplyChoice,
    controller: &mut GameController,
    profile: &ProfileStore,
    clock: &dyn Clock,
) -> Result<GameCommandResult, DomainError> {
    let event = controller.apply_choice(command.direction, clock)?;
    if let Some(result) = event.finished_result() {
        profile.append_result(result).await;
    }
    Ok(handled(command, event, controller))
}

/// Handles `ToggleShadow`.
///
/// # Errors
///
/// Returns `DomainError::InvalidPhase` outside the finished phase.
pub fn handle_toggle_shadow(
    command: &ToggleShadow,
    controller: &mut GameController,
    clock: &dyn Clock,
) -> Result<GameCommandResult, DomainError> {
    let event = controller.toggle_shadow(clock)?;
    Ok(handled(command, event, controller))
}

/// Handles `Restart`. Always succeeds.
pub fn handle_restart(
    command: &Restart,
    controller: &mut GameController,
    clock: &dyn Clock,
) -> GameCommandResult {
    let event = controller.restart(clock);
    handled(command, event, controller)
}
