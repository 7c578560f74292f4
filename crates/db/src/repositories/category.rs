//! Category repository.

use std::sync::Arc;

use crate::entities::{Categorizable, Category, OwnerKind, categorizable, category};
use chrono::Utc;
use folio_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

/// Category repository for database operations.
#[derive(Clone)]
pub struct CategoryRepository {
    db: Arc<DatabaseConnection>,
}

impl CategoryRepository {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a category by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<category::Model>> {
        Category::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a category by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<category::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category: {id}")))
    }

    /// Find a category by its unique handle.
    pub async fn find_by_handle(&self, handle: &str) -> AppResult<Option<category::Model>> {
        Category::find()
            .filter(category::Column::Handle.eq(handle))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all categories by handle.
    pub async fn find_all(&self) -> AppResult<Vec<category::Model>> {
        Category::find()
            .order_by_asc(category::Column::Handle)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new category.
    pub async fn create(&self, handle: &str) -> AppResult<category::Model> {
        let active = category::ActiveModel {
            handle: Set(handle.to_string()),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };
        active
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Attach a category to a record. Idempotent: returns `false` when the
    /// pair already existed.
    pub async fn attach(
        &self,
        kind: OwnerKind,
        entity_id: i32,
        category_id: i32,
    ) -> AppResult<bool> {
        let existing = Categorizable::find()
            .filter(categorizable::Column::EntityType.eq(kind))
            .filter(categorizable::Column::EntityId.eq(entity_id))
            .filter(categorizable::Column::CategoryId.eq(category_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if existing.is_some() {
            return Ok(false);
        }

        let link = categorizable::ActiveModel {
            entity_type: Set(kind),
            entity_id: Set(entity_id),
            category_id: Set(category_id),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };
        link.insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(true)
    }

    /// Detach a category from a record. Returns `false` when no link
    /// existed.
    pub async fn detach(
        &self,
        kind: OwnerKind,
        entity_id: i32,
        category_id: i32,
    ) -> AppResult<bool> {
        let result = Categorizable::delete_many()
            .filter(categorizable::Column::EntityType.eq(kind))
            .filter(categorizable::Column::EntityId.eq(entity_id))
            .filter(categorizable::Column::CategoryId.eq(category_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    /// Find the categories attached to a record, ordered by handle.
    pub async fn find_for_entity(
        &self,
        kind: OwnerKind,
        entity_id: i32,
    ) -> AppResult<Vec<category::Model>> {
        let links = Categorizable::find()
            .filter(categorizable::Column::EntityType.eq(kind))
            .filter(categorizable::Column::EntityId.eq(entity_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let category_ids: Vec<i32> = links.iter().map(|link| link.category_id).collect();
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }

        Category::find()
            .filter(category::Column::Id.is_in(category_ids))
            .order_by_asc(category::Column::Handle)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
