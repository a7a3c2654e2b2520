use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CreateDesign, Design, DesignStore, StoreError, UpdateDesign};

/// HashMap-backed store used when no database is configured in development,
/// and by the test suite. Same scoping contract as the postgres store.
#[derive(Default)]
pub struct MemoryDesignStore {
    designs: RwLock<HashMap<Uuid, Design>>,
}

impl MemoryDesignStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DesignStore for MemoryDesignStore {
    async fn list(&self, owner_id: Uuid) -> Result<Vec<Design>, StoreError> {
        let designs = self.designs.read().await;
        let mut owned: Vec<Design> = designs
            .values()
            .filter(|d| d.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn get(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Design>, StoreError> {
        let designs = self.designs.read().await;
        Ok(designs
            .get(&id)
            .filter(|d| d.owner_id == owner_id)
            .cloned())
    }

    async fn create(&self, owner_id: Uuid, input: CreateDesign) -> Result<Design, StoreError> {
        let now = Utc::now();
        let design = Design {
            id: Uuid::new_v4(),
            owner_id,
            title: input.title,
            canvas_data: input.canvas_data,
            thumbnail: input.thumbnail.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        let mut designs = self.designs.write().await;
        designs.insert(design.id, design.clone());
        Ok(design)
    }

    async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        changes: UpdateDesign,
    ) -> Result<Option<Design>, StoreError> {
        let mut designs = self.designs.write().await;
        let Some(design) = designs.get_mut(&id).filter(|d| d.owner_id == owner_id) else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            design.title = title;
        }
        if let Some(canvas_data) = changes.canvas_data {
            design.canvas_data = canvas_data;
        }
        if let Some(thumbnail) = changes.thumbnail {
            design.thumbnail = thumbnail;
        }
        design.updated_at = Utc::now();

        Ok(Some(design.clone()))
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<bool, StoreError> {
        let mut designs = self.designs.write().await;
        match designs.get(&id) {
            Some(d) if d.owner_id == owner_id => {
                designs.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
