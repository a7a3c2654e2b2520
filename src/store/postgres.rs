use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;
use uuid::Uuid;

use super::{CreateDesign, Design, DesignStore, StoreError, UpdateDesign};

const SELECT_COLUMNS: &str = "id, owner_id, title, canvas_data, thumbnail, created_at, updated_at";

/// sqlx-backed store. The pool is injected at construction so the store can be
/// built against any database, including a test one.
pub struct PgDesignStore {
    pool: PgPool,
}

impl PgDesignStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect, run pending migrations, and return a ready store.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("connected to postgres, migrations applied");

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl DesignStore for PgDesignStore {
    async fn list(&self, owner_id: Uuid) -> Result<Vec<Design>, StoreError> {
        let sql = format!(
            "SELECT {} FROM designs WHERE owner_id = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        );
        let designs = sqlx::query_as::<_, Design>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(designs)
    }

    async fn get(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Design>, StoreError> {
        let sql = format!(
            "SELECT {} FROM designs WHERE id = $1 AND owner_id = $2",
            SELECT_COLUMNS
        );
        let design = sqlx::query_as::<_, Design>(&sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(design)
    }

    async fn create(&self, owner_id: Uuid, input: CreateDesign) -> Result<Design, StoreError> {
        let sql = format!(
            "INSERT INTO designs (owner_id, title, canvas_data, thumbnail) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            SELECT_COLUMNS
        );
        let design = sqlx::query_as::<_, Design>(&sql)
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.canvas_data)
            .bind(input.thumbnail.unwrap_or_default())
            .fetch_one(&self.pool)
            .await?;
        Ok(design)
    }

    async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        changes: UpdateDesign,
    ) -> Result<Option<Design>, StoreError> {
        let sql = format!(
            "UPDATE designs SET \
               title = COALESCE($3, title), \
               canvas_data = COALESCE($4, canvas_data), \
               thumbnail = COALESCE($5, thumbnail), \
               updated_at = now() \
             WHERE id = $1 AND owner_id = $2 RETURNING {}",
            SELECT_COLUMNS
        );
        let design = sqlx::query_as::<_, Design>(&sql)
            .bind(id)
            .bind(owner_id)
            .bind(&changes.title)
            .bind(&changes.canvas_data)
            .bind(&changes.thumbnail)
            .fetch_optional(&self.pool)
            .await?;
        Ok(design)
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM designs WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
