use clap::{Subcommand, ValueEnum};
use sea_orm::DatabaseConnection;
use sea_orm_migration::prelude::*;
use sea_orm_migration::MigrationStatus;
use tracing::info;

use super::connection::establish_connection;
use super::migrations::m20240627_000001_create_thread_tables as thread_tables;
use super::migrations::Migrator;
use crate::config::DatabaseConfig;
use crate::errors::DatabaseError;

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateDirection {
    /// Apply all pending migrations
    Up,
    /// Roll back the last applied migration
    Down,
    /// Drop every table, then apply all migrations
    Fresh,
    /// Roll back all applied migrations, then apply them again
    Refresh,
    /// Roll back all applied migrations
    Reset,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaBackend {
    Sqlite,
    Postgres,
    Mysql,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

pub async fn run_migrations(
    db: &DatabaseConnection,
    direction: MigrateDirection,
) -> Result<(), DatabaseError> {
    match direction {
        MigrateDirection::Up => {
            info!("Running migrations up");
            Migrator::up(db, None).await?;
        }
        MigrateDirection::Down => {
            info!("Running migrations down");
            Migrator::down(db, Some(1)).await?;
        }
        MigrateDirection::Fresh => {
            info!("Running fresh migrations (drop all then up)");
            Migrator::fresh(db).await?;
        }
        MigrateDirection::Refresh => {
            info!("Refreshing migrations (down all then up)");
            Migrator::refresh(db).await?;
        }
        MigrateDirection::Reset => {
            info!("Resetting migrations (down all)");
            Migrator::reset(db).await?;
        }
    }

    Ok(())
}

pub async fn migrate_database(
    config: &DatabaseConfig,
    direction: MigrateDirection,
) -> Result<(), DatabaseError> {
    let db = establish_connection(config).await?;
    run_migrations(&db, direction).await?;
    info!("Database migration completed");
    Ok(())
}

pub async fn migration_status(db: &DatabaseConnection) -> Result<Vec<MigrationState>, DatabaseError> {
    let migrations = Migrator::get_migration_with_status(db).await?;
    Ok(migrations
        .iter()
        .map(|migration| MigrationState {
            name: migration.name().to_string(),
            applied: migration.status() == MigrationStatus::Applied,
        })
        .collect())
}

/// Renders the DDL the `up` migration issues, for review before running it.
pub fn schema_sql(backend: SchemaBackend) -> Vec<String> {
    vec![
        render(&thread_tables::create_thread_table(), backend),
        render(&thread_tables::create_thread_response_table(), backend),
        render(&thread_tables::create_thread_response_thread_index(), backend),
    ]
}

fn render<S: SchemaStatementBuilder>(statement: &S, backend: SchemaBackend) -> String {
    match backend {
        SchemaBackend::Sqlite => statement.build(SqliteQueryBuilder),
        SchemaBackend::Postgres => statement.build(PostgresQueryBuilder),
        SchemaBackend::Mysql => statement.build(MysqlQueryBuilder),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_utils::setup_test_db;

    #[test]
    fn test_schema_sql_orders_parent_first() {
        for backend in [SchemaBackend::Sqlite, SchemaBackend::Postgres, SchemaBackend::Mysql] {
            let statements = schema_sql(backend);
            assert_eq!(statements.len(), 3);
            assert!(statements[0].contains("thread"));
            assert!(!statements[0].contains("thread_response"));
            assert!(statements[1].contains("thread_response"));
            assert!(statements[1].contains("ON DELETE CASCADE"));
            assert!(statements[2].contains("idx_thread_response_thread_id"));
        }
    }

    #[tokio::test]
    async fn test_status_after_up_and_reset() {
        let db = setup_test_db().await;

        let status = migration_status(&db).await.unwrap();
        assert_eq!(
            status,
            vec![MigrationState {
                name: "m20240627_000001_create_thread_tables".to_string(),
                applied: true,
            }]
        );

        run_migrations(&db, MigrateDirection::Reset).await.unwrap();
        let status = migration_status(&db).await.unwrap();
        assert!(status.iter().all(|m| !m.applied));
    }
}
