//! Query handlers for the game controller.
//!
//! Builds the read-only view a presentation layer renders from.

use evidence_content::domain::model::{PlaythroughResult, Scenario, ScoreVector};
use serde::Serialize;

use crate::domain::controller::{GameController, Phase};

/// Percent shares for the two result dimension bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DimensionsView {
    /// Chaos share of chaos + order, 0..=100.
    pub chaos_share: f64,
    /// Emotion share of emotion + logic, 0..=100.
    pub emotion_share: f64,
}

impl From<&ScoreVector> for DimensionsView {
    fn from(scores: &ScoreVector) -> Self {
        Self {
            chaos_share: scores.chaos_share(),
            emotion_share: scores.emotion_share(),
        }
    }
}

/// Read-only view of the controller.
#[derive(Debug, Clone, Serialize)]
pub struct GameStateView {
    /// Current lifecycle phase.
    pub phase: Phase,
    /// Index of the scenario being answered.
    pub scenario_index: usize,
    /// Number of scenarios in the active content.
    pub scenario_count: usize,
    /// Percentage reached, counting the current scenario.
    pub progress: f64,
    /// The scenario awaiting an answer, while playing.
    pub current_scenario: Option<Scenario>,
    /// Scores accumulated so far.
    pub scores: ScoreVector,
    /// Dimension bar shares for `scores`.
    pub dimensions: DimensionsView,
    /// Result of the finished playthrough.
    pub result: Option<PlaythroughResult>,
    /// Whether the shadow description is displayed.
    pub show_shadow: bool,
}

/// Snapshots the controller into a view.
#[must_use]
pub fn get_game_state(controller: &GameController) -> GameStateView {
    let scores = controller.scores();
    GameStateView {
        phase: controller.phase(),
        scenario_index: controller.scenario_index(),
        scenario_count: controller.scenario_count(),
        progress: controller.progress(),
        current_scenario: controller.current_scenario().cloned(),
        scores,
        dimensions: DimensionsView::from(&scores),
        result: controller.result().cloned(),
        show_shadow: controller.show_shadow(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use evidence_test_support::FixedClock;
    use evidence_test_support::fixtures::sample_document;

    use super::*;
    use crate::domain::controller::Direction;

    #[test]
    fn test_intro_view_has_no_scenario_and_even_bars() {
        let controller = GameController::new(Arc::new(sample_document()));

        let view = get_game_state(&controller);

        assert_eq!(view.phase, Phase::Intro);
        assert!(view.current_scenario.is_none());
        assert_eq!(view.scenario_count, 3);
        assert!((view.dimensions.chaos_share - 50.0).abs() < f64::EPSILON);
        assert!((view.dimensions.emotion_share - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_playing_view_exposes_current_scenario() {
        let mut controller = GameController::new(Arc::new(sample_document()));
        controller.begin(true, &FixedClock::default()).unwrap();
        controller
            .apply_choice(Direction::Left, &FixedClock::default())
            .unwrap();

        let view = get_game_state(&controller);

        assert_eq!(view.scenario_index, 1);
        assert_eq!(
            view.current_scenario.unwrap().question,
            "A friend asks for a favour."
        );
        assert!((view.dimensions.chaos_share - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_view_serializes_phase_in_snake_case() {
        let controller = GameController::new(Arc::new(sample_document()));

        let json = serde_json::to_value(get_game_state(&controller)).unwrap();

        assert_eq!(json["phase"], "intro");
        assert_eq!(json["show_shadow"], false);
        assert!(json["result"].is_null());
    }
}
