//! Integration tests for the game routes: full playthroughs over HTTP.

mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

async fn choose(app: &axum::Router, direction: &str) -> (StatusCode, Value) {
    common::post_json(
        app,
        "/api/v1/game/choose",
        &json!({ "direction": direction }),
    )
    .await
}

#[tokio::test]
async fn test_registered_playthrough_round_trip() {
    let app = common::build_test_app().await;

    // GET /api/v1/game: intro with the loaded content.
    let (status, json) = common::get_json(&app.router, "/api/v1/game").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["phase"], "intro");
    assert_eq!(json["scenario_count"], 3);

    // POST /begin: no identity yet.
    let (status, json) = common::post_json(&app.router, "/api/v1/game/begin", &Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["state"]["phase"], "registration");

    // POST /register
    let (status, json) = common::post_json(
        &app.router,
        "/api/v1/game/register",
        &json!({ "name": "Ana", "email": "ana@example.com", "location": "Lisboa" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["event_type"], "playthrough.started");
    assert_eq!(json["state"]["phase"], "playing");
    assert_eq!(
        json["state"]["current_scenario"]["question"],
        "The alarm rings early."
    );
    assert_eq!(
        json["state"]["current_scenario"]["leftChoice"]["impact"]["chaos"],
        3
    );

    // Three right choices.
    let (_, json) = choose(&app.router, "right").await;
    assert_eq!(json["event_type"], "playthrough.choice_applied");
    assert_eq!(json["state"]["scenario_index"], 1);
    choose(&app.router, "right").await;
    let (status, json) = choose(&app.router, "right").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["event_type"], "playthrough.finished");
    assert_eq!(json["state"]["phase"], "finished");
    assert_eq!(json["state"]["result"]["title"], "Athena");
    assert_eq!(
        json["state"]["result"]["dimensions"],
        json!({ "chaos": 0, "order": 6, "emotion": 0, "logic": 6 })
    );
    assert_eq!(json["state"]["dimensions"]["chaos_share"], 0.0);
    assert_eq!(json["state"]["show_shadow"], false);

    // The result reached the history.
    let (status, json) = common::get_json(&app.router, "/api/v1/profile/history").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["title"], "Athena");
    assert_eq!(json[0]["completedAt"], "2026-01-15T10:00:00Z");
}

#[tokio::test]
async fn test_shadow_toggle_and_restart() {
    let app = common::build_test_app().await;
    common::post_json(&app.router, "/api/v1/game/begin", &Value::Null).await;
    common::post_json(&app.router, "/api/v1/game/skip-registration", &Value::Null).await;
    for _ in 0..3 {
        choose(&app.router, "left").await;
    }

    let (status, json) =
        common::post_json(&app.router, "/api/v1/game/toggle-shadow", &Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["state"]["show_shadow"], true);
    assert_eq!(json["state"]["result"]["shadow"], "Ares shadow");

    let (status, json) = common::post_json(&app.router, "/api/v1/game/restart", &Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["state"]["phase"], "intro");
    assert!(json["state"]["result"].is_null());

    // Skipping registration saved no identity, so begin asks again.
    let (_, json) = common::post_json(&app.router, "/api/v1/game/begin", &Value::Null).await;
    assert_eq!(json["state"]["phase"], "registration");
}

#[tokio::test]
async fn test_second_playthrough_skips_registration() {
    let app = common::build_test_app().await;
    common::post_json(&app.router, "/api/v1/game/begin", &Value::Null).await;
    common::post_json(
        &app.router,
        "/api/v1/game/register",
        &json!({ "name": "", "email": "", "location": "" }),
    )
    .await;
    for _ in 0..3 {
        choose(&app.router, "left").await;
    }
    common::post_json(&app.router, "/api/v1/game/restart", &Value::Null).await;

    let (status, json) = common::post_json(&app.router, "/api/v1/game/begin", &Value::Null).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["state"]["phase"], "playing");
    assert_eq!(
        json["state"]["scores"],
        json!({ "chaos": 0, "order": 0, "emotion": 0, "logic": 0 })
    );
}

#[tokio::test]
async fn test_phase_violations_return_409_and_leave_state_unchanged() {
    let app = common::build_test_app().await;

    let (status, json) =
        common::post_json(&app.router, "/api/v1/game/toggle-shadow", &Value::Null).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "invalid_phase");

    let (status, _) =
        common::post_json(&app.router, "/api/v1/game/skip-registration", &Value::Null).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, json) = common::get_json(&app.router, "/api/v1/game").await;
    assert_eq!(json["phase"], "intro");
}
