use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "thread")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub project_id: Option<i32>,
    pub sql: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub summary: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::thread_responses::Entity")]
    Responses,
}

impl Related<super::thread_responses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Responses.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now().naive_utc();
        if insert && self.created_at.is_not_set() {
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::migrations::m20240627_000001_create_thread_tables::create_thread_table;
    use sea_orm::sea_query::PostgresQueryBuilder;
    use sea_orm::{DbBackend, Schema};

    #[test]
    fn test_timestamps_match_migration_on_postgres() {
        let entity_sql = Schema::new(DbBackend::Postgres)
            .create_table_from_entity(Entity)
            .to_string(PostgresQueryBuilder);
        let migration_sql = create_thread_table().to_string(PostgresQueryBuilder);

        // Both sides must agree on a zone-less timestamp or rows fail to decode
        for column in ["created_at", "updated_at"] {
            assert!(entity_sql.contains(&format!(r#""{}" timestamp without time zone"#, column)));
            assert!(migration_sql.contains(&format!(r#""{}" timestamp"#, column)));
        }
        assert!(!entity_sql.contains("timestamp with time zone"));
        assert!(!migration_sql.contains("with time zone"));
    }
}
