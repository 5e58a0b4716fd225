//! Settings from the environment (`DATABASE_URL`, optionally via a `.env` file).

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: default_database_url(),
        }
    }
}

/// Where a `sqlite:` URL points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatabaseTarget {
    InMemory,
    File(PathBuf),
}

impl Settings {
    /// Load `.env` if present, then read `DATABASE_URL` (default in-memory SQLite).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Settings {
            database_url: std::env::var("DATABASE_URL").unwrap_or_else(|_| default_database_url()),
        }
    }

    pub fn database(&self) -> Result<DatabaseTarget, ConfigError> {
        parse_database_url(&self.database_url)
    }
}

/// Accepts `sqlite::memory:`, `sqlite://<path>` and `sqlite:<path>`.
pub fn parse_database_url(url: &str) -> Result<DatabaseTarget, ConfigError> {
    let rest = url
        .strip_prefix("sqlite:")
        .ok_or_else(|| ConfigError::InvalidDatabaseUrl(url.to_string()))?;
    let path = rest.strip_prefix("//").unwrap_or(rest);
    match path {
        ":memory:" | ":memory" => Ok(DatabaseTarget::InMemory),
        "" => Err(ConfigError::InvalidDatabaseUrl(url.to_string())),
        p => Ok(DatabaseTarget::File(PathBuf::from(p))),
    }
}
