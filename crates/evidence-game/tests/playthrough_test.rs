//! End-to-end playthroughs through the command handlers.

use std::sync::Arc;

use evidence_content::domain::model::ScoreVector;
use evidence_game::application::command_handlers::{
    handle_apply_choice, handle_begin_playthrough, handle_complete_registration, handle_restart,
    handle_toggle_shadow,
};
use evidence_game::domain::commands::{
    ApplyChoice, BeginPlaythrough, CompleteRegistration, Restart, ToggleShadow,
};
use evidence_game::domain::controller::{Direction, GameController, Phase};
use evidence_profile::profile::{NewIdentity, ProfileStore};
use evidence_test_support::fixtures::sample_document;
use evidence_test_support::{FailingKeyValueStore, FixedClock, MemoryKeyValueStore, fixed_now};
use uuid::Uuid;

fn choose(direction: Direction) -> ApplyChoice {
    ApplyChoice {
        correlation_id: Uuid::new_v4(),
        direction,
    }
}

#[tokio::test]
async fn test_registered_playthrough_records_result_and_replays_without_registration() {
    // Arrange
    let clock = FixedClock::default();
    let store = Arc::new(MemoryKeyValueStore::new());
    let profile = ProfileStore::new(store.clone(), Arc::new(clock));
    let mut controller = GameController::new(Arc::new(sample_document()));

    // Act: first playthrough, with registration.
    let begun = handle_begin_playthrough(
        &BeginPlaythrough {
            correlation_id: Uuid::new_v4(),
        },
        &mut controller,
        &profile,
        &clock,
    )
    .await
    .unwrap();
    assert_eq!(begun.state.phase, Phase::Registration);

    handle_complete_registration(
        &CompleteRegistration {
            correlation_id: Uuid::new_v4(),
            identity: NewIdentity {
                name: "Rui".to_owned(),
                email: "rui@example.com".to_owned(),
                location: "Braga".to_owned(),
            },
        },
        &mut controller,
        &profile,
        &clock,
    )
    .await
    .unwrap();

    for _ in 0..3 {
        handle_apply_choice(&choose(Direction::Right), &mut controller, &profile, &clock)
            .await
            .unwrap();
    }

    let toggled = handle_toggle_shadow(
        &ToggleShadow {
            correlation_id: Uuid::new_v4(),
        },
        &mut controller,
        &clock,
    )
    .unwrap();

    // Assert
    let result = toggled.state.result.unwrap();
    assert_eq!(result.archetype.title, "Athena");
    assert_eq!(result.dimensions, ScoreVector::new(0, 6, 0, 6));
    assert!(toggled.state.show_shadow);
    assert_eq!(profile.history().await[0].completed_at, fixed_now());

    // Act: second playthrough skips registration.
    handle_restart(
        &Restart {
            correlation_id: Uuid::new_v4(),
        },
        &mut controller,
        &clock,
    );
    let again = handle_begin_playthrough(
        &BeginPlaythrough {
            correlation_id: Uuid::new_v4(),
        },
        &mut controller,
        &profile,
        &clock,
    )
    .await
    .unwrap();
    assert_eq!(again.state.phase, Phase::Playing);
    assert_eq!(again.state.scores, ScoreVector::default());

    for _ in 0..3 {
        handle_apply_choice(&choose(Direction::Left), &mut controller, &profile, &clock)
            .await
            .unwrap();
    }

    let history = profile.history().await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].archetype.title, "Ares");
    assert_eq!(history[1].archetype.title, "Athena");
}

#[tokio::test]
async fn test_playthrough_completes_when_storage_is_unavailable() {
    let clock = FixedClock::default();
    let profile = ProfileStore::new(Arc::new(FailingKeyValueStore), Arc::new(clock));
    let mut controller = GameController::new(Arc::new(sample_document()));

    let begun = handle_begin_playthrough(
        &BeginPlaythrough {
            correlation_id: Uuid::new_v4(),
        },
        &mut controller,
        &profile,
        &clock,
    )
    .await
    .unwrap();
    assert_eq!(begun.state.phase, Phase::Registration);
    handle_complete_registration(
        &CompleteRegistration {
            correlation_id: Uuid::new_v4(),
            identity: NewIdentity {
                name: String::new(),
                email: String::new(),
                location: String::new(),
            },
        },
        &mut controller,
        &profile,
        &clock,
    )
    .await
    .unwrap();

    let mut last = None;
    for _ in 0..3 {
        last = Some(
            handle_apply_choice(&choose(Direction::Left), &mut controller, &profile, &clock)
                .await
                .unwrap(),
        );
    }

    assert_eq!(last.unwrap().state.phase, Phase::Finished);
    assert!(profile.history().await.is_empty());
}
