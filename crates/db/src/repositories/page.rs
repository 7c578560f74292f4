//! Page repository.

use std::sync::Arc;

use crate::entities::{Page, page};
use chrono::Utc;
use folio_common::{AppError, AppResult};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

/// Page repository for database operations.
///
/// Every read excludes soft-deleted rows; deletion only ever sets the
/// `deleted_at` marker.
#[derive(Clone)]
pub struct PageRepository {
    db: Arc<DatabaseConnection>,
}

impl PageRepository {
    /// Create a new page repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Condition selecting pages visible at `now`: flagged published and
    /// past their scheduled time, if any.
    #[must_use]
    pub fn published_condition(now: DateTimeWithTimeZone) -> Condition {
        Condition::all()
            .add(page::Column::Published.eq(true))
            .add(
                Condition::any()
                    .add(page::Column::PublishAt.is_null())
                    .add(page::Column::PublishAt.lte(now)),
            )
    }

    /// Condition selecting pages hidden at `now`.
    ///
    /// Kept as its own OR predicate mirroring the stored filter, not as a
    /// negation of [`Self::published_condition`].
    #[must_use]
    pub fn not_published_condition(now: DateTimeWithTimeZone) -> Condition {
        Condition::any()
            .add(page::Column::Published.eq(false))
            .add(
                Condition::all()
                    .add(page::Column::PublishAt.is_not_null())
                    .add(page::Column::PublishAt.gt(now)),
            )
    }

    /// Find a page by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<page::Model>> {
        Page::find_by_id(id)
            .filter(page::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a page by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<page::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::PageNotFound(id.to_string()))
    }

    /// Find a page by its unique handle.
    pub async fn find_by_handle(&self, handle: &str) -> AppResult<Option<page::Model>> {
        Page::find()
            .filter(page::Column::Handle.eq(handle))
            .filter(page::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the parent of a page, if it has one.
    pub async fn find_parent(&self, page: &page::Model) -> AppResult<Option<page::Model>> {
        match page.parent_id {
            Some(parent_id) => self.find_by_id(parent_id).await,
            None => Ok(None),
        }
    }

    /// Find the direct children of a page.
    pub async fn find_children(&self, parent_id: i32) -> AppResult<Vec<page::Model>> {
        Page::find()
            .filter(page::Column::ParentId.eq(parent_id))
            .filter(page::Column::DeletedAt.is_null())
            .order_by_asc(page::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find all pages visible at `now`.
    pub async fn find_published(
        &self,
        now: DateTimeWithTimeZone,
    ) -> AppResult<Vec<page::Model>> {
        Page::find()
            .filter(page::Column::DeletedAt.is_null())
            .filter(Self::published_condition(now))
            .order_by_asc(page::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find all pages hidden at `now`.
    pub async fn find_not_published(
        &self,
        now: DateTimeWithTimeZone,
    ) -> AppResult<Vec<page::Model>> {
        Page::find()
            .filter(page::Column::DeletedAt.is_null())
            .filter(Self::not_published_condition(now))
            .order_by_asc(page::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a new page on the supplied connection.
    pub async fn insert_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: page::ActiveModel,
    ) -> AppResult<page::Model> {
        model
            .insert(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a page.
    pub async fn update(&self, model: page::ActiveModel) -> AppResult<page::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Soft-delete a page: the row is marked, never removed.
    pub async fn soft_delete(&self, id: i32) -> AppResult<page::Model> {
        let page = self.get_by_id(id).await?;
        let mut active: page::ActiveModel = page.into();
        active.deleted_at = Set(Some(Utc::now().into()));
        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
