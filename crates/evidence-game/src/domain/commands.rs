//! Commands accepted by the game controller.

use evidence_core::command::Command;
use evidence_profile::profile::NewIdentity;
use uuid::Uuid;

use super::controller::Direction;

/// Command to begin a playthrough from the intro screen.
#[derive(Debug, Clone)]
pub struct BeginPlaythrough {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for BeginPlaythrough {
    fn command_type(&self) -> &'static str {
        "game.begin_playthrough"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to register an identity and start playing.
#[derive(Debug, Clone)]
pub struct CompleteRegistration {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Identity details entered by the user.
    pub identity: NewIdentity,
}

impl Command for CompleteRegistration {
    fn command_type(&self) -> &'static str {
        "game.complete_registration"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to start playing without registering.
#[derive(Debug, Clone)]
pub struct SkipRegistration {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for SkipRegistration {
    fn command_type(&self) -> &'static str {
        "game.skip_registration"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to answer the current scenario.
#[derive(Debug, Clone)]
pub struct ApplyChoice {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The side picked.
    pub direction: Direction,
}

impl Command for ApplyChoice {
    fn command_type(&self) -> &'static str {
        "game.apply_choice"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to reveal or hide the shadow description.
#[derive(Debug, Clone)]
pub struct ToggleShadow {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for ToggleShadow {
    fn command_type(&self) -> &'static str {
        "game.toggle_shadow"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to go back to the intro screen.
#[derive(Debug, Clone)]
pub struct Restart {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for Restart {
    fn command_type(&self) -> &'static str {
        "game.restart"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
