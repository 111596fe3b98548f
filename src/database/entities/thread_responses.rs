use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "thread_response")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub thread_id: Option<i32>,
    pub query_id: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub question: Option<String>,
    pub status: Option<String>,
    pub detail: Option<Json>,
    pub error: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::threads::Entity",
        from = "Column::ThreadId",
        to = "super::threads::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Thread,
}

impl Related<super::threads::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Thread.def()
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

/// Status reported by the SQL explanation service for a query.
///
/// The column is a free string; values this crate does not know about are
/// kept verbatim in [`ResponseStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
    Understanding,
    Generating,
    Finished,
    Failed,
    Other(String),
}

impl ResponseStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ResponseStatus::Understanding => "understanding",
            ResponseStatus::Generating => "generating",
            ResponseStatus::Finished => "finished",
            ResponseStatus::Failed => "failed",
            ResponseStatus::Other(value) => value,
        }
    }

    /// The service will not send further updates for this query.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ResponseStatus::Finished | ResponseStatus::Failed)
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ResponseStatus> for String {
    fn from(status: ResponseStatus) -> Self {
        match status {
            ResponseStatus::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl From<String> for ResponseStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "understanding" => ResponseStatus::Understanding,
            "generating" => ResponseStatus::Generating,
            "finished" => ResponseStatus::Finished,
            "failed" => ResponseStatus::Failed,
            _ => ResponseStatus::Other(status),
        }
    }
}

impl Model {
    pub fn get_status(&self) -> Option<ResponseStatus> {
        self.status.clone().map(ResponseStatus::from)
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Decodes the stored response body into a caller-defined shape.
    pub fn detail_as<T: DeserializeOwned>(&self) -> Result<Option<T>, serde_json::Error> {
        self.detail
            .clone()
            .map(serde_json::from_value)
            .transpose()
    }
}
