//! Supported content languages.

use std::fmt;
use std::str::FromStr;

use evidence_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A language the quiz content is available in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Portuguese.
    #[default]
    Pt,
    /// English.
    En,
}

impl Language {
    /// Returns the language code used for content file names.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Pt => "pt",
            Self::En => "en",
        }
    }

    /// Returns the other supported language.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Pt => Self::En,
            Self::En => Self::Pt,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pt" => Ok(Self::Pt),
            "en" => Ok(Self::En),
            other => Err(DomainError::Validation(format!(
                "unsupported language: {other}"
            ))),
        }
    }
}
