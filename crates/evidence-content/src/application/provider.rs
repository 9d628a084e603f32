//! The content provider: holds the currently loaded language document and
//! swaps it when a new language is loaded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::broadcast;
use tracing::{error, info, warn};

use super::source::ContentSource;
use crate::domain::document::ContentDocument;
use crate::domain::language::Language;

/// Capacity of the language-changed channel. Slow subscribers only ever
/// need the latest change, so a small buffer is enough.
const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// Broadcast to subscribers after a language document has been loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageChanged {
    /// The newly active language.
    pub language: Language,
    /// Version hash of the newly active document.
    pub version_hash: String,
}

/// What happened to a load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The document was loaded and is now active.
    Loaded,
    /// Another load was already in flight; this request was dropped.
    Skipped,
    /// The source failed; the previous document stays active.
    Failed,
}

#[derive(Debug)]
struct Active {
    language: Language,
    document: Arc<ContentDocument>,
}

/// Owns the active content document and the "load in progress" guard.
pub struct ContentProvider {
    source: Arc<dyn ContentSource>,
    active: RwLock<Active>,
    loading: AtomicBool,
    changes: broadcast::Sender<LanguageChanged>,
}

impl std::fmt::Debug for ContentProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentProvider")
            .field("language", &self.language())
            .field("loading", &self.is_loading())
            .finish_non_exhaustive()
    }
}

/// Clears the loading flag when a load finishes, however it finishes.
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ContentProvider {
    /// Creates a provider with an empty document for `language`. Nothing is
    /// fetched until [`ContentProvider::load_language`] is called.
    #[must_use]
    pub fn new(source: Arc<dyn ContentSource>, language: Language) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            source,
            active: RwLock::new(Active {
                language,
                document: Arc::new(ContentDocument::default()),
            }),
            loading: AtomicBool::new(false),
            changes,
        }
    }

    /// The currently active language.
    pub fn language(&self) -> Language {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .language
    }

    /// The currently active document.
    pub fn document(&self) -> Arc<ContentDocument> {
        Arc::clone(
            &self
                .active
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .document,
        )
    }

    /// Whether a load is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Subscribe to language changes.
    pub fn subscribe(&self) -> broadcast::Receiver<LanguageChanged> {
        self.changes.subscribe()
    }

    /// Text lookup against the active document.
    pub fn t(&self, path: &str, fallback: &str) -> String {
        self.document().text().t(path, fallback).to_owned()
    }

    /// Text lookup that falls back to the path itself.
    pub fn text(&self, path: &str) -> String {
        self.document().text().text(path).to_owned()
    }

    /// Loads `language` from the source and makes it active.
    ///
    /// A request made while another load is in flight is dropped. A failed
    /// load is logged and leaves the previous document and language active.
    pub async fn load_language(&self, language: Language) -> LoadOutcome {
        if self
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!(%language, "content load already in progress, dropping request");
            return LoadOutcome::Skipped;
        }
        let _guard = LoadingGuard(&self.loading);

        match self.source.fetch(language).await {
            Ok(document) => {
                let change = LanguageChanged {
                    language,
                    version_hash: document.version_hash().to_owned(),
                };
                info!(
                    %language,
                    version_hash = %change.version_hash,
                    scenarios = document.scenarios().len(),
                    archetypes = document.archetypes().len(),
                    "content loaded"
                );
                {
                    let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
                    active.language = language;
                    active.document = Arc::new(document);
                }
                // No subscribers is fine.
                let _ = self.changes.send(change);
                LoadOutcome::Loaded
            }
            Err(e) => {
                error!(%language, error = %e, "failed to load content");
                LoadOutcome::Failed
            }
        }
    }

    /// Loads whichever supported language is not currently active.
    pub async fn toggle_language(&self) -> LoadOutcome {
        self.load_language(self.language().toggled()).await
    }
}
