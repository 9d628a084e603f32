//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use evidence_content::domain::language::Language;

use crate::error::AppError;

const DEFAULT_DATABASE_URL: &str = "sqlite://evidence.db?mode=rwc";
const DEFAULT_CONTENT_DIR: &str = "./locales";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

/// Runtime configuration for the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite connection string for the profile store.
    pub database_url: String,
    /// Directory holding `<language>.json` / `.yaml` content files.
    pub content_dir: PathBuf,
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Language forced at startup. When unset the stored preference wins.
    pub default_language: Option<Language>,
}

impl Config {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `PORT` or `DEFAULT_LANGUAGE` is invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, applying defaults for unset
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `PORT` or `DEFAULT_LANGUAGE` is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };
        let default_language = lookup("DEFAULT_LANGUAGE")
            .map(|raw| raw.parse::<Language>())
            .transpose()
            .map_err(|e| AppError::Config(format!("DEFAULT_LANGUAGE: {e}")))?;

        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned()),
            content_dir: lookup("CONTENT_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_CONTENT_DIR), PathBuf::from),
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port,
            default_language,
        })
    }

    /// The address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host:port` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
