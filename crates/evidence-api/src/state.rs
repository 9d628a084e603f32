//! Shared application state.

use std::sync::Arc;

use evidence_content::application::provider::{ContentProvider, LanguageChanged};
use evidence_core::clock::Clock;
use evidence_game::domain::controller::GameController;
use evidence_profile::profile::ProfileStore;
use tokio::sync::Mutex;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock for timestamps.
    pub clock: Arc<dyn Clock>,
    /// Identity, history and language preference persistence.
    pub profile: Arc<ProfileStore>,
    /// Active language content.
    pub content: Arc<ContentProvider>,
    /// The single controller; intents are applied one at a time.
    pub controller: Arc<Mutex<GameController>>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("profile", &self.profile)
            .field("content", &self.content)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create new application state. The controller starts with whatever
    /// document the provider currently holds.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        profile: Arc<ProfileStore>,
        content: Arc<ContentProvider>,
    ) -> Self {
        let controller = GameController::new(content.document());
        Self {
            clock,
            profile,
            content,
            controller: Arc::new(Mutex::new(controller)),
        }
    }

    /// Hands the provider's active document to the controller and saves the
    /// language preference.
    pub async fn apply_language_change(&self, change: &LanguageChanged) {
        let document = self.content.document();
        let restarted = self
            .controller
            .lock()
            .await
            .replace_content(document, self.clock.as_ref())
            .is_some();
        self.profile.save_language(change.language).await;
        info!(
            language = %change.language,
            version_hash = %change.version_hash,
            restarted,
            "controller content replaced"
        );
    }

    /// Spawns the task that keeps the controller in step with the content
    /// provider. The task holds the state itself, so it runs until aborted.
    pub fn spawn_content_sync(&self) -> JoinHandle<()> {
        let mut changes = self.content.subscribe();
        let state = self.clone();
        tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(change) => state.apply_language_change(&change).await,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "language changes lagged, syncing latest");
                        let change = LanguageChanged {
                            language: state.content.language(),
                            version_hash: state.content.document().version_hash().to_owned(),
                        };
                        state.apply_language_change(&change).await;
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}
