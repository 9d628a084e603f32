//! Transition events emitted by the game controller.

use chrono::{DateTime, Utc};
use evidence_content::domain::model::{PlaythroughResult, ScoreVector};
use evidence_core::event::DomainEvent;
use serde::{Deserialize, Serialize};

use super::controller::Direction;

/// Emitted when begin finds no saved identity and asks for registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRequested;

/// Emitted when a playthrough enters the playing phase with fresh scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaythroughStarted {
    /// Number of scenarios in this playthrough.
    pub scenario_count: usize,
}

/// Emitted when a choice is applied and play continues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceApplied {
    /// Index of the scenario that was answered.
    pub scenario_index: usize,
    /// Which side was picked.
    pub direction: Direction,
    /// Scores after applying the choice.
    pub scores: ScoreVector,
}

/// Emitted when the last choice resolves the playthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaythroughFinished {
    /// Which side was picked on the last scenario.
    pub direction: Direction,
    /// The resolved result.
    pub result: PlaythroughResult,
}

/// Emitted when the shadow description is revealed or hidden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowToggled {
    /// The new value of the display flag.
    pub show_shadow: bool,
}

/// Emitted when the controller returns to the intro phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaythroughReset;

/// Event type identifier for [`RegistrationRequested`].
pub const REGISTRATION_REQUESTED_EVENT_TYPE: &str = "playthrough.registration_requested";

/// Event type identifier for [`PlaythroughStarted`].
pub const PLAYTHROUGH_STARTED_EVENT_TYPE: &str = "playthrough.started";

/// Event type identifier for [`ChoiceApplied`].
pub const CHOICE_APPLIED_EVENT_TYPE: &str = "playthrough.choice_applied";

/// Event type identifier for [`PlaythroughFinished`].
pub const PLAYTHROUGH_FINISHED_EVENT_TYPE: &str = "playthrough.finished";

/// Event type identifier for [`ShadowToggled`].
pub const SHADOW_TOGGLED_EVENT_TYPE: &str = "playthrough.shadow_toggled";

/// Event type identifier for [`PlaythroughReset`].
pub const PLAYTHROUGH_RESET_EVENT_TYPE: &str = "playthrough.reset";

/// Event payload variants for the game controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEventKind {
    /// Registration is required before playing.
    RegistrationRequested(RegistrationRequested),
    /// A playthrough has started.
    PlaythroughStarted(PlaythroughStarted),
    /// A choice was applied.
    ChoiceApplied(ChoiceApplied),
    /// The playthrough finished with a result.
    PlaythroughFinished(PlaythroughFinished),
    /// The shadow flag was flipped.
    ShadowToggled(ShadowToggled),
    /// The controller was reset to intro.
    PlaythroughReset(PlaythroughReset),
}

/// Domain event envelope for the game controller.
#[derive(Debug, Clone, PartialEq)]
pub struct GameEvent {
    /// When the transition happened.
    pub occurred_at: DateTime<Utc>,
    /// Event-specific payload.
    pub kind: GameEventKind,
}

impl GameEvent {
    /// Returns the result carried by a `PlaythroughFinished` event.
    #[must_use]
    pub fn finished_result(&self) -> Option<&PlaythroughResult> {
        match &self.kind {
            GameEventKind::PlaythroughFinished(finished) => Some(&finished.result),
            _ => None,
        }
    }
}

impl DomainEvent for GameEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            GameEventKind::RegistrationRequested(_) => REGISTRATION_REQUESTED_EVENT_TYPE,
            GameEventKind::PlaythroughStarted(_) => PLAYTHROUGH_STARTED_EVENT_TYPE,
            GameEventKind::ChoiceApplied(_) => CHOICE_APPLIED_EVENT_TYPE,
            GameEventKind::PlaythroughFinished(_) => PLAYTHROUGH_FINISHED_EVENT_TYPE,
            GameEventKind::ShadowToggled(_) => SHADOW_TOGGLED_EVENT_TYPE,
            GameEventKind::PlaythroughReset(_) => PLAYTHROUGH_RESET_EVENT_TYPE,
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("GameEventKind serialization is infallible")
    }
}
