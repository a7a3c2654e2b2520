pub mod memory;
pub mod postgres;

pub use memory::MemoryDesignStore;
pub use postgres::PgDesignStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

/// A user-owned design document. `canvas_data` is an opaque editor-state blob;
/// the API only ever checks that it is a JSON object, never its contents.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Design {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub canvas_data: Value,
    pub thumbnail: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for design creation. Has no owner field on purpose: the
/// owner comes from the authenticated identity, never from the client body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDesign {
    pub title: String,
    pub canvas_data: Value,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Validated partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDesign {
    pub title: Option<String>,
    pub canvas_data: Option<Value>,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Owner-scoped persistence for designs.
///
/// Every entry point takes the caller's owner id alongside (or instead of) the
/// record id, so an unscoped lookup cannot be expressed. A design owned by
/// someone else looks exactly like a missing design: `get`/`update` return
/// `None`, `delete` returns `false`.
#[async_trait]
pub trait DesignStore: Send + Sync {
    /// All designs for one owner, newest first.
    async fn list(&self, owner_id: Uuid) -> Result<Vec<Design>, StoreError>;

    async fn get(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Design>, StoreError>;

    async fn create(&self, owner_id: Uuid, input: CreateDesign) -> Result<Design, StoreError>;

    async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        changes: UpdateDesign,
    ) -> Result<Option<Design>, StoreError>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<bool, StoreError>;
}
