use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::errors::DatabaseError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://thread_store.db?mode=rwc";

/// Top-level layout of a `thread-store.toml` file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    /// Route sqlx statement logging through tracing at debug level.
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 5,
            sqlx_logging: false,
        }
    }
}

impl DatabaseConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, DatabaseError> {
        let file: FileConfig = toml::from_str(content)?;
        file.database.validate()?;
        Ok(file.database)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatabaseError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    fn validate(&self) -> Result<(), DatabaseError> {
        if self.url.trim().is_empty() {
            return Err(DatabaseError::Config("database url must not be empty".into()));
        }
        if self.max_connections == 0 {
            return Err(DatabaseError::Config(
                "max_connections must be at least 1".into(),
            ));
        }
        if self.min_connections > self.max_connections {
            return Err(DatabaseError::Config(format!(
                "min_connections ({}) exceeds max_connections ({})",
                self.min_connections, self.max_connections
            )));
        }
        Ok(())
    }
}
