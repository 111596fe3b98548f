//! Error types for database setup and migration runs
//!
//! Engine failures (duplicate table, missing referenced table, constraint
//! violations) are carried as the original [`sea_orm::DbErr`] so callers see
//! the database's own message.
//!
//! # Examples
//!
//! ```rust
//! use thread_store::errors::DatabaseError;
//!
//! let err = DatabaseError::Config("database url must not be empty".to_string());
//! assert!(err.is_config_error());
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error reported by the database engine or the migrator
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DatabaseError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::Config(_) | DatabaseError::Toml(_) | DatabaseError::Io(_)
        )
    }

    /// The underlying engine error, if this came from the database.
    pub fn as_db_err(&self) -> Option<&sea_orm::DbErr> {
        match self {
            DatabaseError::Database(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_is_transparent() {
        let err: DatabaseError = sea_orm::DbErr::Custom("table thread already exists".into()).into();
        assert_eq!(
            err.to_string(),
            sea_orm::DbErr::Custom("table thread already exists".into()).to_string()
        );
        assert!(err.as_db_err().is_some());
        assert!(!err.is_config_error());
    }
}
