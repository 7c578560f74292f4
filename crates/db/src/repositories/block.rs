//! Block repository.

use std::sync::Arc;

use crate::entities::{Block, block};
use crate::repositories::{LocaleDescriptor, PictureDescriptor};
use folio_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use serde::Deserialize;
use serde_json::Value;

/// One entry of a block reconciliation list.
///
/// Carries an optional id (a positive id targets an existing block, anything
/// else creates one), the fillable block fields, and the nested locale and
/// picture lists reconciled alongside the block itself. A supplied `order`
/// is overwritten with the entry's rank among the kept entries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockDescriptor {
    pub id: Option<i32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub area: Option<String>,
    pub order: Option<i32>,
    pub properties: Option<Value>,
    pub locales: Vec<LocaleDescriptor>,
    pub pictures: Vec<PictureDescriptor>,
}

/// Block repository for database operations.
#[derive(Clone)]
pub struct BlockRepository {
    db: Arc<DatabaseConnection>,
}

impl BlockRepository {
    /// Create a new block repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the blocks of a page, ordered by their position.
    pub async fn find_for_page(&self, page_id: i32) -> AppResult<Vec<block::Model>> {
        Block::find()
            .filter(block::Column::PageId.eq(page_id))
            .order_by_asc(block::Column::Order)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a block by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<block::Model>> {
        Block::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a block by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<block::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::BlockNotFound(id.to_string()))
    }

    /// Find a block by ID on the supplied connection.
    pub async fn find_by_id_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i32,
    ) -> AppResult<Option<block::Model>> {
        Block::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the blocks of a page on the supplied connection, ordered by
    /// their position.
    pub async fn find_for_page_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        page_id: i32,
    ) -> AppResult<Vec<block::Model>> {
        Block::find()
            .filter(block::Column::PageId.eq(page_id))
            .order_by_asc(block::Column::Order)
            .all(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a new block on the supplied connection.
    pub async fn insert_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: block::ActiveModel,
    ) -> AppResult<block::Model> {
        model
            .insert(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a block on the supplied connection.
    pub async fn update_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: block::ActiveModel,
    ) -> AppResult<block::Model> {
        model
            .update(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a block row on the supplied connection.
    pub async fn delete_on<C: ConnectionTrait>(&self, conn: &C, id: i32) -> AppResult<()> {
        Block::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn test_block(id: i32, order: i32) -> block::Model {
        block::Model {
            id,
            page_id: 1,
            kind: "text".to_string(),
            area: "main".to_string(),
            order,
            properties: String::new(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_for_page() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_block(10, 0), test_block(11, 1)]])
                .into_connection(),
        );

        let repo = BlockRepository::new(db);
        let blocks = repo.find_for_page(1).await.unwrap();

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].order, 0);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<block::Model>::new()])
                .into_connection(),
        );

        let repo = BlockRepository::new(db);
        let err = repo.get_by_id(999).await.unwrap_err();

        assert!(matches!(err, AppError::BlockNotFound(_)));
    }

    #[test]
    fn test_descriptor_deserializes_from_sparse_input() {
        let descriptor: BlockDescriptor =
            serde_json::from_value(serde_json::json!({"id": 5, "area": "side"})).unwrap();

        assert_eq!(descriptor.id, Some(5));
        assert_eq!(descriptor.area.as_deref(), Some("side"));
        assert!(descriptor.kind.is_none());
        assert!(descriptor.locales.is_empty());
        assert!(descriptor.pictures.is_empty());
    }

    #[test]
    fn test_descriptor_type_field_rename() {
        let descriptor: BlockDescriptor =
            serde_json::from_value(serde_json::json!({"type": "gallery"})).unwrap();

        assert_eq!(descriptor.kind.as_deref(), Some("gallery"));
    }
}
