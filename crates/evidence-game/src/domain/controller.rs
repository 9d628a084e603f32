//! The game controller: one playthrough's lifecycle and score state.

use std::sync::Arc;

use evidence_content::domain::document::ContentDocument;
use evidence_content::domain::model::{PlaythroughResult, Scenario, ScoreVector};
use evidence_core::clock::Clock;
use evidence_core::error::DomainError;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::events::{
    ChoiceApplied, GameEvent, GameEventKind, PlaythroughFinished, PlaythroughReset,
    PlaythroughStarted, RegistrationRequested, ShadowToggled,
};
use super::resolution;

/// Lifecycle phase of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for the user to begin.
    Intro,
    /// Waiting for identity details (or a skip).
    Registration,
    /// Answering scenarios.
    Playing,
    /// Showing the resolved result.
    Finished,
}

impl Phase {
    /// Lowercase phase name, as used in errors and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Registration => "registration",
            Self::Playing => "playing",
            Self::Finished => "finished",
        }
    }
}

/// Which option of a scenario the user picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The left option.
    Left,
    /// The right option.
    Right,
}

/// Owns the progress of the current playthrough and the content it is
/// played against.
#[derive(Debug)]
pub struct GameController {
    content: Arc<ContentDocument>,
    pub(crate) phase: Phase,
    pub(crate) scenario_index: usize,
    pub(crate) scores: ScoreVector,
    pub(crate) result: Option<PlaythroughResult>,
    pub(crate) show_shadow: bool,
}

impl GameController {
    /// Creates a controller in the intro phase playing against `content`.
    #[must_use]
    pub fn new(content: Arc<ContentDocument>) -> Self {
        Self {
            content,
            phase: Phase::Intro,
            scenario_index: 0,
            scores: ScoreVector::default(),
            result: None,
            show_shadow: false,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the scenario being answered.
    #[must_use]
    pub fn scenario_index(&self) -> usize {
        self.scenario_index
    }

    /// Number of scenarios in the active content.
    #[must_use]
    pub fn scenario_count(&self) -> usize {
        self.content.scenarios().len()
    }

    /// Scores accumulated so far.
    #[must_use]
    pub fn scores(&self) -> ScoreVector {
        self.scores
    }

    /// The result of the finished playthrough, if any.
    #[must_use]
    pub fn result(&self) -> Option<&PlaythroughResult> {
        self.result.as_ref()
    }

    /// Whether the shadow description is displayed.
    #[must_use]
    pub fn show_shadow(&self) -> bool {
        self.show_shadow
    }

    /// The content the controller plays against.
    #[must_use]
    pub fn content(&self) -> &Arc<ContentDocument> {
        &self.content
    }

    /// The scenario awaiting an answer, while playing.
    #[must_use]
    pub fn current_scenario(&self) -> Option<&Scenario> {
        if self.phase != Phase::Playing {
            return None;
        }
        self.content.scenarios().get(self.scenario_index)
    }

    /// Percentage of the playthrough reached, counting the current scenario.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        let count = self.scenario_count();
        if count == 0 {
            return 0.0;
        }
        (self.scenario_index + 1) as f64 / count as f64 * 100.0
    }

    /// Begins a playthrough. Without a saved identity the controller asks
    /// for registration first; otherwise play starts at the first scenario
    /// with zeroed scores.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ContentUnavailable` if there are no scenarios or
    /// no archetypes to play with. The phase is left unchanged.
    pub fn begin(&mut self, registered: bool, clock: &dyn Clock) -> Result<GameEvent, DomainError> {
        self.ensure_playable()?;
        if !registered {
            self.phase = Phase::Registration;
            info!("registration requested before playthrough");
            return Ok(Self::event(
                GameEventKind::RegistrationRequested(RegistrationRequested),
                clock,
            ));
        }
        Ok(self.start_playing(clock))
    }

    /// Starts play after the identity was handed to the store.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ContentUnavailable` if there is nothing to play.
    pub fn complete_registration(&mut self, clock: &dyn Clock) -> Result<GameEvent, DomainError> {
        self.ensure_playable()?;
        Ok(self.start_playing(clock))
    }

    /// Starts play without registering.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhase` outside the registration phase and
    /// `DomainError::ContentUnavailable` if there is nothing to play.
    pub fn skip_registration(&mut self, clock: &dyn Clock) -> Result<GameEvent, DomainError> {
        self.require_phase(Phase::Registration)?;
        self.ensure_playable()?;
        Ok(self.start_playing(clock))
    }

    /// Applies the chosen side's impact and advances, or resolves the
    /// playthrough when the current scenario is the last one.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhase` outside the playing phase and
    /// `DomainError::ContentUnavailable` if the scenario or archetype needed
    /// is missing. State is unchanged on error.
    pub fn apply_choice(
        &mut self,
        direction: Direction,
        clock: &dyn Clock,
    ) -> Result<GameEvent, DomainError> {
        self.require_phase(Phase::Playing)?;

        let answered = self.scenario_index;
        let impact = {
            let scenario = self.content.scenarios().get(answered).ok_or_else(|| {
                DomainError::ContentUnavailable(format!("no scenario at index {answered}"))
            })?;
            match direction {
                Direction::Left => scenario.left.impact,
                Direction::Right => scenario.right.impact,
            }
        };

        let mut scores = self.scores;
        if let Some(impact) = impact {
            scores.apply(&impact);
        }

        if answered + 1 < self.scenario_count() {
            self.scores = scores;
            self.scenario_index += 1;
            return Ok(Self::event(
                GameEventKind::ChoiceApplied(ChoiceApplied {
                    scenario_index: answered,
                    direction,
                    scores,
                }),
                clock,
            ));
        }

        let archetype = resolution::resolve(&scores, self.content.archetypes())
            .cloned()
            .ok_or_else(|| DomainError::ContentUnavailable("no archetypes loaded".to_owned()))?;
        let result = PlaythroughResult {
            archetype,
            dimensions: scores,
            completed_at: clock.now(),
        };

        info!(
            archetype = %result.archetype.title,
            chaos = scores.chaos,
            order = scores.order,
            emotion = scores.emotion,
            logic = scores.logic,
            "playthrough finished"
        );

        self.scores = scores;
        self.result = Some(result.clone());
        self.show_shadow = false;
        self.phase = Phase::Finished;

        Ok(Self::event(
            GameEventKind::PlaythroughFinished(PlaythroughFinished { direction, result }),
            clock,
        ))
    }

    /// Reveals or hides the shadow description of the result.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhase` outside the finished phase.
    pub fn toggle_shadow(&mut self, clock: &dyn Clock) -> Result<GameEvent, DomainError> {
        self.require_phase(Phase::Finished)?;
        self.show_shadow = !self.show_shadow;
        Ok(Self::event(
            GameEventKind::ShadowToggled(ShadowToggled {
                show_shadow: self.show_shadow,
            }),
            clock,
        ))
    }

    /// Returns to the intro phase, discarding progress and result. Valid
    /// from any phase.
    pub fn restart(&mut self, clock: &dyn Clock) -> GameEvent {
        self.phase = Phase::Intro;
        self.reset_progress();
        Self::event(GameEventKind::PlaythroughReset(PlaythroughReset), clock)
    }

    /// Swaps in new content (after a language change). A playthrough whose
    /// position no longer exists in the new content is restarted.
    pub fn replace_content(
        &mut self,
        content: Arc<ContentDocument>,
        clock: &dyn Clock,
    ) -> Option<GameEvent> {
        self.content = content;
        let stranded = self.phase == Phase::Playing
            && (self.scenario_index >= self.scenario_count() || !self.content.is_playable());
        if stranded {
            warn!(
                scenario_index = self.scenario_index,
                scenario_count = self.scenario_count(),
                "new content cannot continue the playthrough, restarting"
            );
            return Some(self.restart(clock));
        }
        None
    }

    fn start_playing(&mut self, clock: &dyn Clock) -> GameEvent {
        self.phase = Phase::Playing;
        self.reset_progress();
        info!(scenarios = self.scenario_count(), "playthrough started");
        Self::event(
            GameEventKind::PlaythroughStarted(PlaythroughStarted {
                scenario_count: self.scenario_count(),
            }),
            clock,
        )
    }

    fn reset_progress(&mut self) {
        self.scenario_index = 0;
        self.scores = ScoreVector::default();
        self.result = None;
        self.show_shadow = false;
    }

    fn require_phase(&self, expected: Phase) -> Result<(), DomainError> {
        if self.phase != expected {
            return Err(DomainError::InvalidPhase {
                expected: expected.as_str(),
                actual: self.phase.as_str(),
            });
        }
        Ok(())
    }

    fn ensure_playable(&self) -> Result<(), DomainError> {
        if self.content.scenarios().is_empty() {
            return Err(DomainError::ContentUnavailable(
                "no scenarios loaded".to_owned(),
            ));
        }
        if self.content.archetypes().is_empty() {
            return Err(DomainError::ContentUnavailable(
                "no archetypes loaded".to_owned(),
            ));
        }
        Ok(())
    }

    fn event(kind: GameEventKind, clock: &dyn Clock) -> GameEvent {
        GameEvent {
            occurred_at: clock.now(),
            kind,
        }
    }
}
