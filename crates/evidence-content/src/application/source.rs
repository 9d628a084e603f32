//! Content sources: where language documents come from.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use evidence_core::error::DomainError;
use tracing::debug;

use crate::domain::document::ContentDocument;
use crate::domain::language::Language;

/// Asynchronous, fallible supplier of content documents.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the document for `language`.
    async fn fetch(&self, language: Language) -> Result<ContentDocument, DomainError>;
}

/// Reads `<root>/<code>.json`, falling back to `<code>.yaml` and `<code>.yml`.
#[derive(Debug, Clone)]
pub struct DirectoryContentSource {
    root: PathBuf,
}

impl DirectoryContentSource {
    /// Creates a source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory documents are read from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ContentSource for DirectoryContentSource {
    async fn fetch(&self, language: Language) -> Result<ContentDocument, DomainError> {
        for extension in ["json", "yaml", "yml"] {
            let path = self.root.join(format!("{}.{extension}", language.code()));
            match tokio::fs::read_to_string(&path).await {
                Ok(source) => {
                    debug!(path = %path.display(), "reading content document");
                    return if extension == "json" {
                        ContentDocument::from_json_str(&source)
                    } else {
                        ContentDocument::from_yaml_str(&source)
                    };
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(DomainError::Infrastructure(format!(
                        "failed to read {}: {e}",
                        path.display()
                    )));
                }
            }
        }
        Err(DomainError::ContentUnavailable(format!(
            "no content document for language {language} in {}",
            self.root.display()
        )))
    }
}
