//! Integration tests for `SqliteKeyValueStore`.

use std::sync::Arc;

use evidence_core::store::KeyValueStore;
use evidence_profile::profile::{NewIdentity, ProfileStore};
use evidence_profile::sqlite_store::SqliteKeyValueStore;
use evidence_test_support::FixedClock;
use serde_json::json;
use sqlx::Row;

async fn memory_store() -> SqliteKeyValueStore {
    SqliteKeyValueStore::connect("sqlite::memory:").await.unwrap()
}

// --- get ---

#[tokio::test]
async fn test_get_returns_none_for_missing_key() {
    let store = memory_store().await;

    let value = store.get("evidence_user").await.unwrap();

    assert!(value.is_none());
}

// --- set + get ---

#[tokio::test]
async fn test_set_and_get_round_trip() {
    let store = memory_store().await;
    let document = json!({ "name": "Ana", "tags": [1, 2, 3] });

    store.set("evidence_user", &document).await.unwrap();

    assert_eq!(store.get("evidence_user").await.unwrap(), Some(document));
}

#[tokio::test]
async fn test_set_overwrites_existing_value() {
    let store = memory_store().await;
    store.set("k", &json!(1)).await.unwrap();

    store.set("k", &json!(2)).await.unwrap();

    assert_eq!(store.get("k").await.unwrap(), Some(json!(2)));
    let count: i64 = sqlx::query("SELECT COUNT(*) AS n FROM evidence_kv")
        .fetch_one(store.pool())
        .await
        .unwrap()
        .get("n");
    assert_eq!(count, 1);
}

// --- remove ---

#[tokio::test]
async fn test_remove_deletes_value_and_tolerates_missing_key() {
    let store = memory_store().await;
    store.set("k", &json!("v")).await.unwrap();

    store.remove("k").await.unwrap();
    store.remove("never-set").await.unwrap();

    assert!(store.get("k").await.unwrap().is_none());
}

// --- corrupted data ---

#[tokio::test]
async fn test_get_reports_non_json_value_as_infrastructure_error() {
    let store = memory_store().await;
    sqlx::query("INSERT INTO evidence_kv (key, value) VALUES ('broken', '{nope')")
        .execute(store.pool())
        .await
        .unwrap();

    let result = store.get("broken").await;

    assert!(matches!(
        result,
        Err(evidence_core::error::DomainError::Infrastructure(_))
    ));
}

// --- migrate ---

#[tokio::test]
async fn test_migrate_is_idempotent() {
    let store = memory_store().await;

    store.migrate().await.unwrap();
    store.migrate().await.unwrap();
}

// --- profile over sqlite ---

#[tokio::test]
async fn test_profile_store_persists_identity_through_sqlite() {
    let backend = Arc::new(memory_store().await);
    let profile = ProfileStore::new(backend.clone(), Arc::new(FixedClock::default()));

    profile
        .save_identity(NewIdentity {
            name: "Ana".to_owned(),
            email: "ana@example.com".to_owned(),
            location: "Porto".to_owned(),
        })
        .await;

    assert!(profile.is_registered().await);
    let raw = backend.get("evidence_user").await.unwrap().unwrap();
    assert_eq!(raw["location"], "Porto");
}
