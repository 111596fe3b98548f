use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // thread_response references thread, so thread goes first
        manager.create_table(create_thread_table()).await?;
        manager.create_table(create_thread_response_table()).await?;
        manager
            .create_index(create_thread_response_thread_index())
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Child before parent, otherwise the FK blocks the drop
        manager
            .drop_table(Table::drop().table(ThreadResponse::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Thread::Table).to_owned())
            .await?;

        Ok(())
    }
}

pub fn create_thread_table() -> TableCreateStatement {
    Table::create()
        .table(Thread::Table)
        .col(
            ColumnDef::new(Thread::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        // No FK: project lives outside this schema
        .col(ColumnDef::new(Thread::ProjectId).integer())
        .col(ColumnDef::new(Thread::Sql).string_len(255))
        .col(ColumnDef::new(Thread::Summary).text())
        .col(
            ColumnDef::new(Thread::CreatedAt)
                .timestamp()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Thread::UpdatedAt)
                .timestamp()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

pub fn create_thread_response_table() -> TableCreateStatement {
    Table::create()
        .table(ThreadResponse::Table)
        .col(
            ColumnDef::new(ThreadResponse::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(ThreadResponse::ThreadId).integer())
        .col(ColumnDef::new(ThreadResponse::QueryId).string_len(255))
        .col(ColumnDef::new(ThreadResponse::Question).text())
        .col(ColumnDef::new(ThreadResponse::Status).string_len(255))
        .col(ColumnDef::new(ThreadResponse::Detail).json())
        .col(ColumnDef::new(ThreadResponse::Error).string_len(255))
        .col(
            ColumnDef::new(ThreadResponse::CreatedAt)
                .timestamp()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(ThreadResponse::UpdatedAt)
                .timestamp()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_thread_response_thread_id")
                .from(ThreadResponse::Table, ThreadResponse::ThreadId)
                .to(Thread::Table, Thread::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

pub fn create_thread_response_thread_index() -> IndexCreateStatement {
    Index::create()
        .name("idx_thread_response_thread_id")
        .table(ThreadResponse::Table)
        .col(ThreadResponse::ThreadId)
        .to_owned()
}

#[derive(Iden)]
enum Thread {
    Table,
    Id,
    ProjectId,
    Sql,
    Summary,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ThreadResponse {
    Table,
    Id,
    ThreadId,
    QueryId,
    Question,
    Status,
    Detail,
    Error,
    CreatedAt,
    UpdatedAt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names_match_schema() {
        let thread = create_thread_table().to_string(SqliteQueryBuilder);
        let response = create_thread_response_table().to_string(SqliteQueryBuilder);

        assert!(thread.starts_with(r#"CREATE TABLE "thread" ("#));
        assert!(response.starts_with(r#"CREATE TABLE "thread_response" ("#));
        assert!(!thread.contains("IF NOT EXISTS"));
    }

    #[test]
    fn test_thread_response_cascades_from_thread() {
        let sql = create_thread_response_table().to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#"FOREIGN KEY ("thread_id") REFERENCES "thread" ("id")"#));
        assert!(sql.contains("ON DELETE CASCADE"));
        assert!(sql.contains(r#""detail" json"#));
    }

    #[test]
    fn test_project_id_has_no_foreign_key() {
        let sql = create_thread_table().to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#""project_id" integer"#));
        assert!(!sql.contains("FOREIGN KEY"));
        assert!(sql.contains(r#""sql" varchar(255)"#));
        assert!(sql.contains(r#""summary" text"#));
    }

    #[test]
    fn test_migration_name() {
        assert_eq!(Migration.name(), "m20240627_000001_create_thread_tables");
    }
}
