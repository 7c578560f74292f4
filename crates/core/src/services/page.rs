//! Page service: lifecycle, publication scopes and block reconciliation.

use std::sync::Arc;

use chrono::Utc;
use folio_common::{AppError, AppResult};
use folio_db::entities::{OwnerKind, block, locale, page};
use folio_db::properties;
use folio_db::repositories::{
    BlockRepository, LocaleRepository, PageRepository, PictureRepository,
};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ConnectionTrait, DatabaseConnection, Set, TransactionTrait};
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

// Re-export for convenience
pub use folio_db::entities::picture;
pub use folio_db::repositories::{BlockDescriptor, LocaleDescriptor, PictureDescriptor};

/// Input for creating a page.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePageInput {
    /// Unique slug; filled in as `"<type>_<id>"` when omitted or empty.
    #[serde(default)]
    #[validate(length(max = 255))]
    pub handle: Option<String>,
    /// Free-text discriminator.
    #[serde(rename = "type")]
    #[validate(length(max = 64))]
    pub kind: String,
    /// Free-form JSON document; a string value is stored verbatim.
    #[serde(default)]
    pub properties: Option<Value>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub publish_at: Option<DateTimeWithTimeZone>,
    #[serde(default)]
    pub parent_id: Option<i32>,
}

/// Input for updating a page. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdatePageInput {
    #[validate(length(min = 1, max = 255))]
    pub handle: Option<String>,
    #[serde(rename = "type")]
    #[validate(length(max = 64))]
    pub kind: Option<String>,
    pub properties: Option<Value>,
    pub published: Option<bool>,
    pub publish_at: Option<DateTimeWithTimeZone>,
    pub parent_id: Option<i32>,
}

/// Service for managing pages and their owned blocks.
#[derive(Clone)]
pub struct PageService {
    db: Arc<DatabaseConnection>,
    pages: PageRepository,
    blocks: BlockRepository,
    locales: LocaleRepository,
    pictures: PictureRepository,
}

impl PageService {
    /// Create a new page service.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            pages: PageRepository::new(db.clone()),
            blocks: BlockRepository::new(db.clone()),
            locales: LocaleRepository::new(db.clone()),
            pictures: PictureRepository::new(db.clone()),
            db,
        }
    }

    // ==================== Lifecycle ====================

    /// Create a new page.
    ///
    /// When no handle is supplied, one is assigned as `"<type>_<id>"`
    /// immediately after the row first persists, inside the same
    /// transaction.
    pub async fn create(&self, input: CreatePageInput) -> AppResult<page::Model> {
        input.validate()?;

        let handle = input.handle.filter(|handle| !handle.is_empty());
        if let Some(ref handle) = handle {
            if self.pages.find_by_handle(handle).await?.is_some() {
                return Err(AppError::Conflict(format!(
                    "Page with handle '{handle}' already exists"
                )));
            }
        }

        let active = page::ActiveModel {
            handle: Set(handle),
            kind: Set(input.kind),
            properties: Set(input
                .properties
                .as_ref()
                .map(properties::encode)
                .unwrap_or_default()),
            published: Set(input.published),
            publish_at: Set(input.publish_at),
            parent_id: Set(input.parent_id),
            deleted_at: Set(None),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
            ..Default::default()
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        let page = self.pages.insert_on(&txn, active).await?;
        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::info!(page_id = page.id, handle = ?page.handle, "created page");
        Ok(page)
    }

    /// Update a page, applying only the supplied fields.
    pub async fn update(&self, page_id: i32, input: UpdatePageInput) -> AppResult<page::Model> {
        input.validate()?;

        let page = self.pages.get_by_id(page_id).await?;
        let mut active: page::ActiveModel = page.into();

        if let Some(handle) = input.handle {
            if let Some(existing) = self.pages.find_by_handle(&handle).await? {
                if existing.id != page_id {
                    return Err(AppError::Conflict(format!(
                        "Page with handle '{handle}' already exists"
                    )));
                }
            }
            active.handle = Set(Some(handle));
        }
        if let Some(kind) = input.kind {
            active.kind = Set(kind);
        }
        if let Some(value) = input.properties {
            active.properties = Set(properties::encode(&value));
        }
        if let Some(published) = input.published {
            active.published = Set(published);
        }
        if let Some(publish_at) = input.publish_at {
            active.publish_at = Set(Some(publish_at));
        }
        if let Some(parent_id) = input.parent_id {
            active.parent_id = Set(Some(parent_id));
        }
        active.updated_at = Set(Some(Utc::now().into()));

        self.pages.update(active).await
    }

    /// Soft-delete a page. The row is marked and disappears from every
    /// read path; it is never physically removed.
    pub async fn delete(&self, page_id: i32) -> AppResult<()> {
        self.pages.soft_delete(page_id).await?;
        tracing::info!(page_id, "soft-deleted page");
        Ok(())
    }

    // ==================== Reads ====================

    /// Get a page by ID.
    pub async fn get(&self, page_id: i32) -> AppResult<page::Model> {
        self.pages.get_by_id(page_id).await
    }

    /// Get a page by its unique handle.
    pub async fn get_by_handle(&self, handle: &str) -> AppResult<page::Model> {
        self.pages
            .find_by_handle(handle)
            .await?
            .ok_or_else(|| AppError::PageNotFound(handle.to_string()))
    }

    /// Get the parent of a page, if any.
    pub async fn parent(&self, page: &page::Model) -> AppResult<Option<page::Model>> {
        self.pages.find_parent(page).await
    }

    /// Get the direct children of a page.
    pub async fn children(&self, page_id: i32) -> AppResult<Vec<page::Model>> {
        self.pages.find_children(page_id).await
    }

    /// List pages visible at `now`: flagged published and past their
    /// scheduled time, if any.
    pub async fn list_published(
        &self,
        now: DateTimeWithTimeZone,
    ) -> AppResult<Vec<page::Model>> {
        self.pages.find_published(now).await
    }

    /// List pages hidden at `now`.
    pub async fn list_not_published(
        &self,
        now: DateTimeWithTimeZone,
    ) -> AppResult<Vec<page::Model>> {
        self.pages.find_not_published(now).await
    }

    // ==================== Blocks ====================

    /// The page's blocks, ordered by position.
    pub async fn blocks(&self, page_id: i32) -> AppResult<Vec<block::Model>> {
        self.blocks.find_for_page(page_id).await
    }

    /// The page's blocks belonging to one area, in position order.
    pub async fn blocks_for_area(&self, page_id: i32, area: &str) -> AppResult<Vec<block::Model>> {
        let blocks = self.blocks.find_for_page(page_id).await?;
        Ok(block::for_area(&blocks, area).into_iter().cloned().collect())
    }

    /// Reconcile the page's block set against `descriptors`, in a single
    /// transaction. Returns the kept block ids in input order.
    ///
    /// Each descriptor either targets an existing block by positive id
    /// (blocks of other pages are adopted) or creates a new one; a
    /// descriptor whose id resolves to nothing is dropped without error.
    /// Block `order` is reassigned densely, 0-based, in kept order. Nested
    /// locale and picture lists are reconciled per block. Blocks of the
    /// page that are not part of the result are deleted together with
    /// their locales and pictures — an empty input clears the page.
    pub async fn sync_blocks(
        &self,
        page_id: i32,
        descriptors: &[BlockDescriptor],
    ) -> AppResult<Vec<i32>> {
        self.pages.get_by_id(page_id).await?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut kept: Vec<i32> = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let existing = match descriptor.id {
                Some(id) if id > 0 => match self.blocks.find_by_id_on(&txn, id).await? {
                    Some(block) => Some(block),
                    None => {
                        tracing::debug!(block_id = id, "dropping descriptor for unknown block");
                        continue;
                    }
                },
                _ => None,
            };

            let now = Utc::now();
            let order = kept.len() as i32;
            let saved = match existing {
                Some(block) => {
                    let mut active: block::ActiveModel = block.into();
                    Self::fill_block(&mut active, descriptor);
                    active.page_id = Set(page_id);
                    active.order = Set(order);
                    active.updated_at = Set(Some(now.into()));
                    self.blocks.update_on(&txn, active).await?
                }
                None => {
                    let mut active = block::ActiveModel {
                        page_id: Set(page_id),
                        kind: Set(String::new()),
                        area: Set(String::new()),
                        properties: Set(String::new()),
                        created_at: Set(now.into()),
                        ..Default::default()
                    };
                    Self::fill_block(&mut active, descriptor);
                    active.order = Set(order);
                    self.blocks.insert_on(&txn, active).await?
                }
            };
            kept.push(saved.id);

            self.locales
                .sync_on(&txn, OwnerKind::Block, saved.id, &descriptor.locales)
                .await?;
            self.pictures
                .sync_on(&txn, OwnerKind::Block, saved.id, &descriptor.pictures)
                .await?;
        }

        let owned = self.blocks.find_for_page_on(&txn, page_id).await?;
        for block in owned {
            if !kept.contains(&block.id) {
                self.delete_block_on(&txn, &block).await?;
            }
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::info!(page_id, kept = kept.len(), "synced blocks");
        Ok(kept)
    }

    // ==================== Locales & Pictures ====================

    /// The page's locale variants.
    pub async fn locales(&self, page_id: i32) -> AppResult<Vec<locale::Model>> {
        self.locales.find_for_parent(OwnerKind::Page, page_id).await
    }

    /// Reconcile the page's own locale variants.
    pub async fn sync_locales(
        &self,
        page_id: i32,
        descriptors: &[LocaleDescriptor],
    ) -> AppResult<()> {
        self.pages.get_by_id(page_id).await?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        self.locales
            .sync_on(&txn, OwnerKind::Page, page_id, descriptors)
            .await?;
        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// The page's pictures, in position order.
    pub async fn pictures(&self, page_id: i32) -> AppResult<Vec<picture::Model>> {
        self.pictures.find_for_parent(OwnerKind::Page, page_id).await
    }

    /// Reconcile the page's own pictures. Returns kept picture ids.
    pub async fn sync_pictures(
        &self,
        page_id: i32,
        descriptors: &[PictureDescriptor],
    ) -> AppResult<Vec<i32>> {
        self.pages.get_by_id(page_id).await?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        let kept = self
            .pictures
            .sync_on(&txn, OwnerKind::Page, page_id, descriptors)
            .await?;
        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(kept)
    }

    // ==================== Locale-aware reads ====================

    /// The page's parent together with its variant for `code`.
    pub async fn parent_with_locale(
        &self,
        page: &page::Model,
        code: &str,
    ) -> AppResult<Option<(page::Model, Option<locale::Model>)>> {
        match self.pages.find_parent(page).await? {
            Some(parent) => {
                let variant = self
                    .locales
                    .find_locale(OwnerKind::Page, parent.id, code)
                    .await?;
                Ok(Some((parent, variant)))
            }
            None => Ok(None),
        }
    }

    /// The page's blocks paired with their variants for `code`, in
    /// position order.
    pub async fn blocks_with_locale(
        &self,
        page_id: i32,
        code: &str,
    ) -> AppResult<Vec<(block::Model, Option<locale::Model>)>> {
        let blocks = self.blocks.find_for_page(page_id).await?;
        let ids: Vec<i32> = blocks.iter().map(|block| block.id).collect();
        let variants = self
            .locales
            .find_for_parents(OwnerKind::Block, &ids, code)
            .await?;

        Ok(blocks
            .into_iter()
            .map(|block| {
                let variant = variants
                    .iter()
                    .find(|variant| variant.parent_id == block.id)
                    .cloned();
                (block, variant)
            })
            .collect())
    }

    // ==================== Helpers ====================

    fn fill_block(active: &mut block::ActiveModel, descriptor: &BlockDescriptor) {
        if let Some(kind) = &descriptor.kind {
            active.kind = Set(kind.clone());
        }
        if let Some(area) = &descriptor.area {
            active.area = Set(area.clone());
        }
        if let Some(order) = descriptor.order {
            active.order = Set(order);
        }
        if let Some(value) = &descriptor.properties {
            active.properties = Set(properties::encode(value));
        }
    }

    async fn delete_block_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        block: &block::Model,
    ) -> AppResult<()> {
        self.locales
            .delete_for_parent_on(conn, OwnerKind::Block, block.id)
            .await?;
        self.pictures
            .delete_for_parent_on(conn, OwnerKind::Block, block.id)
            .await?;
        self.blocks.delete_on(conn, block.id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{ActiveValue, DatabaseBackend, MockDatabase};
    use serde_json::json;

    fn mock_service(db: MockDatabase) -> PageService {
        PageService::new(Arc::new(db.into_connection()))
    }

    #[tokio::test]
    async fn test_create_rejects_overlong_handle() {
        let service = mock_service(MockDatabase::new(DatabaseBackend::Postgres));

        let input = CreatePageInput {
            handle: Some("h".repeat(300)),
            kind: "page".to_string(),
            properties: None,
            published: false,
            publish_at: None,
            parent_id: None,
        };

        let err = service.create(input).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<page::Model>::new()]);
        let service = mock_service(db);

        let err = service.get(404).await.unwrap_err();
        assert!(matches!(err, AppError::PageNotFound(_)));
    }

    #[test]
    fn test_fill_block_applies_only_present_fields() {
        let mut active = block::ActiveModel {
            kind: Set("text".to_string()),
            area: Set("main".to_string()),
            ..Default::default()
        };

        let descriptor = BlockDescriptor {
            area: Some("side".to_string()),
            properties: Some(json!({"columns": 2})),
            ..Default::default()
        };
        PageService::fill_block(&mut active, &descriptor);

        assert_eq!(active.area.clone().unwrap(), "side");
        assert_eq!(active.kind.clone().unwrap(), "text");
        assert_eq!(active.properties.clone().unwrap(), r#"{"columns":2}"#);
        assert!(matches!(active.order, ActiveValue::NotSet));
    }

    #[test]
    fn test_create_input_treats_empty_handle_as_absent() {
        let input: CreatePageInput =
            serde_json::from_value(json!({"type": "page", "handle": ""})).unwrap();

        assert!(input.validate().is_ok());
        assert_eq!(input.handle.filter(|h| !h.is_empty()), None);
    }
}
