use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::debug;

use crate::config::DatabaseConfig;

pub async fn establish_connection(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.clone());

    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(config.connect_timeout())
        .acquire_timeout(config.connect_timeout())
        .sqlx_logging(config.sqlx_logging)
        .sqlx_logging_level(tracing::log::LevelFilter::Debug);

    debug!("Connecting to {}", config.url);
    Database::connect(opt).await
}

/// Turns a `--database` argument into a connection URL.
///
/// Anything that already looks like a URL is passed through untouched, so
/// `postgres://...` works as well as a plain SQLite path.
pub fn get_database_url(database_path: Option<&str>) -> String {
    match database_path {
        Some(":memory:") => "sqlite::memory:".to_string(),
        Some(url) if url.contains("://") || url.starts_with("sqlite:") => url.to_string(),
        Some(path) => format!("sqlite://{}?mode=rwc", path),
        None => crate::config::DEFAULT_DATABASE_URL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_database_url() {
        assert_eq!(get_database_url(Some(":memory:")), "sqlite::memory:");
        assert_eq!(
            get_database_url(Some("data/threads.db")),
            "sqlite://data/threads.db?mode=rwc"
        );
        assert_eq!(
            get_database_url(Some("postgres://wren@localhost/wren")),
            "postgres://wren@localhost/wren"
        );
        assert_eq!(get_database_url(None), "sqlite://thread_store.db?mode=rwc");
    }

    #[tokio::test]
    async fn test_establish_in_memory_connection() {
        let config = DatabaseConfig::default().with_url("sqlite::memory:");
        let db = establish_connection(&config).await.unwrap();
        db.ping().await.unwrap();
    }
}
