//! Namespaced profile persistence.
//!
//! Store failures never reach callers: they are logged, writes become
//! no-ops and reads come back empty.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use evidence_content::domain::language::Language;
use evidence_content::domain::model::PlaythroughResult;
use evidence_core::clock::Clock;
use evidence_core::error::DomainError;
use evidence_core::store::KeyValueStore;

/// Prefix applied to every key this store writes.
pub const KEY_PREFIX: &str = "evidence_";

/// Format version written into exports.
pub const EXPORT_VERSION: &str = "1.0";

/// Maximum number of results kept by [`ProfileStore::append_result`].
pub const HISTORY_LIMIT: usize = 50;

const USER_KEY: &str = "user";
const HISTORY_KEY: &str = "history";
const LANGUAGE_KEY: &str = "language";

/// Identity details entered at registration. Not validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIdentity {
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// Free-form location.
    pub location: String,
}

/// A saved identity record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// Free-form location.
    pub location: String,
    /// When the record was saved.
    pub registered_at: DateTime<Utc>,
}

/// Full backup snapshot produced by [`ProfileStore::export`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileExport {
    /// Export format version.
    pub version: String,
    /// When the snapshot was taken.
    pub exported_at: DateTime<Utc>,
    /// The saved identity, if any.
    pub user: Option<Identity>,
    /// Result history, most recent first.
    pub history: Vec<PlaythroughResult>,
}

/// Snapshot accepted by [`ProfileStore::import`]. Both parts are optional;
/// an export document is a valid import document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProfileImport {
    /// Identity to save (re-stamped at import time).
    #[serde(default)]
    pub user: Option<NewIdentity>,
    /// History that replaces the stored one wholesale.
    #[serde(default)]
    pub history: Option<Vec<PlaythroughResult>>,
}

/// Profile persistence on top of a raw key/value backend.
pub struct ProfileStore {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ProfileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileStore")
            .field("prefix", &KEY_PREFIX)
            .finish_non_exhaustive()
    }
}

impl ProfileStore {
    /// Creates a profile store writing through `store`, stamping records
    /// with `clock`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Saves the identity record, replacing any previous one.
    pub async fn save_identity(&self, identity: NewIdentity) {
        let record = Identity {
            name: identity.name,
            email: identity.email,
            location: identity.location,
            registered_at: self.clock.now(),
        };
        self.set(USER_KEY, &record).await;
    }

    /// The saved identity record, if any.
    pub async fn identity(&self) -> Option<Identity> {
        self.get(USER_KEY).await
    }

    /// Whether an identity record exists.
    pub async fn is_registered(&self) -> bool {
        self.identity().await.is_some()
    }

    /// Inserts `result` at the front of the history, stamped with the
    /// current time, keeping only the most recent [`HISTORY_LIMIT`] entries.
    /// If the stored history cannot be read, nothing is written.
    pub async fn append_result(&self, result: &PlaythroughResult) {
        let mut history: Vec<PlaythroughResult> = match self.try_get(HISTORY_KEY).await {
            Ok(history) => history.unwrap_or_default(),
            Err(e) => {
                error!(error = %e, "history unreadable, result not recorded");
                return;
            }
        };
        let mut entry = result.clone();
        entry.completed_at = self.clock.now();
        history.insert(0, entry);
        history.truncate(HISTORY_LIMIT);
        self.set(HISTORY_KEY, &history).await;
    }

    /// Result history, most recent first.
    pub async fn history(&self) -> Vec<PlaythroughResult> {
        self.get(HISTORY_KEY).await.unwrap_or_default()
    }

    /// Removes the identity record and the history.
    pub async fn clear(&self) {
        self.remove(USER_KEY).await;
        self.remove(HISTORY_KEY).await;
        info!("profile data cleared");
    }

    /// Takes a full snapshot for backup.
    pub async fn export(&self) -> ProfileExport {
        ProfileExport {
            version: EXPORT_VERSION.to_owned(),
            exported_at: self.clock.now(),
            user: self.identity().await,
            history: self.history().await,
        }
    }

    /// Restores a snapshot. The identity is saved (and re-stamped) if present;
    /// the history replaces the stored one wholesale, without applying
    /// [`HISTORY_LIMIT`].
    pub async fn import(&self, snapshot: ProfileImport) {
        if let Some(user) = snapshot.user {
            self.save_identity(user).await;
        }
        if let Some(history) = snapshot.history {
            info!(entries = history.len(), "importing result history");
            self.set(HISTORY_KEY, &history).await;
        }
    }

    /// The preferred content language, if one was saved.
    pub async fn language(&self) -> Option<Language> {
        self.get(LANGUAGE_KEY).await
    }

    /// Saves the preferred content language.
    pub async fn save_language(&self, language: Language) {
        self.set(LANGUAGE_KEY, &language).await;
    }

    async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_get(key).await {
            Ok(value) => value,
            Err(e) => {
                error!(key = %format!("{KEY_PREFIX}{key}"), error = %e, "storage read failed");
                None
            }
        }
    }

    /// Reads `key`, telling an absent value apart from one that could not be
    /// read or decoded.
    async fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DomainError> {
        let full_key = format!("{KEY_PREFIX}{key}");
        match self.store.get(&full_key).await? {
            Some(value) => serde_json::from_value(value).map(Some).map_err(|e| {
                DomainError::Infrastructure(format!("stored value has unexpected shape: {e}"))
            }),
            None => Ok(None),
        }
    }

    async fn set<T: Serialize>(&self, key: &str, value: &T) {
        let full_key = format!("{KEY_PREFIX}{key}");
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(e) => {
                error!(key = %full_key, error = %e, "storage serialization failed");
                return;
            }
        };
        if let Err(e) = self.store.set(&full_key, &value).await {
            error!(key = %full_key, error = %e, "storage write failed");
        }
    }

    async fn remove(&self, key: &str) {
        let full_key = format!("{KEY_PREFIX}{key}");
        if let Err(e) = self.store.remove(&full_key).await {
            error!(key = %full_key, error = %e, "storage remove failed");
        }
    }
}
