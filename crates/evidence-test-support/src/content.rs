//! Test content sources — `ContentSource` implementations for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use evidence_content::application::source::ContentSource;
use evidence_content::domain::document::ContentDocument;
use evidence_content::domain::language::Language;
use evidence_core::error::DomainError;
use tokio::sync::Notify;

/// Serves fixed documents per language. Languages without a document fail
/// with `ContentUnavailable`.
#[derive(Debug, Default)]
pub struct StaticContentSource {
    documents: HashMap<Language, ContentDocument>,
}

impl StaticContentSource {
    /// Creates a source serving `document` for every supported language.
    #[must_use]
    pub fn new(document: ContentDocument) -> Self {
        Self::default()
            .with(Language::Pt, document.clone())
            .with(Language::En, document)
    }

    /// Adds or replaces the document served for `language`.
    #[must_use]
    pub fn with(mut self, language: Language, document: ContentDocument) -> Self {
        self.documents.insert(language, document);
        self
    }
}

#[async_trait]
impl ContentSource for StaticContentSource {
    async fn fetch(&self, language: Language) -> Result<ContentDocument, DomainError> {
        self.documents.get(&language).cloned().ok_or_else(|| {
            DomainError::ContentUnavailable(format!("no document for {language}"))
        })
    }
}

/// A source whose every fetch fails, as an unreachable content file would.
#[derive(Debug)]
pub struct FailingContentSource;

#[async_trait]
impl ContentSource for FailingContentSource {
    async fn fetch(&self, language: Language) -> Result<ContentDocument, DomainError> {
        Err(DomainError::Infrastructure(format!(
            "failed to load {language}.json"
        )))
    }
}

/// A source that holds every fetch open until [`GatedContentSource::release`]
/// is called. Used to observe behaviour while a load is in flight.
#[derive(Debug)]
pub struct GatedContentSource {
    document: ContentDocument,
    entered: Notify,
    gate: Notify,
}

impl GatedContentSource {
    /// Creates a gated source that eventually serves `document`.
    #[must_use]
    pub fn new(document: ContentDocument) -> Self {
        Self {
            document,
            entered: Notify::new(),
            gate: Notify::new(),
        }
    }

    /// Waits until a fetch has started and is blocked on the gate.
    pub async fn wait_until_fetching(&self) {
        self.entered.notified().await;
    }

    /// Lets one blocked fetch complete.
    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl ContentSource for GatedContentSource {
    async fn fetch(&self, _language: Language) -> Result<ContentDocument, DomainError> {
        self.entered.notify_one();
        self.gate.notified().await;
        Ok(self.document.clone())
    }
}
