//! Tag service: free-text tagging for pages.

use std::sync::Arc;

use folio_common::AppResult;
use folio_db::entities::{OwnerKind, tag};
use folio_db::repositories::TagRepository;
use sea_orm::DatabaseConnection;

/// Service for managing free-text tags.
#[derive(Clone)]
pub struct TagService {
    tags: TagRepository,
}

impl TagService {
    /// Create a new tag service.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            tags: TagRepository::new(db),
        }
    }

    /// The tags attached to a record, alphabetically.
    pub async fn tags_for(&self, kind: OwnerKind, entity_id: i32) -> AppResult<Vec<tag::Model>> {
        self.tags.find_for_entity(kind, entity_id).await
    }

    /// Attach tags by name, creating missing ones. Blank names are
    /// skipped; already-attached pairs are left alone.
    pub async fn attach(
        &self,
        kind: OwnerKind,
        entity_id: i32,
        names: &[String],
    ) -> AppResult<Vec<tag::Model>> {
        self.tags.attach(kind, entity_id, names).await
    }

    /// Detach tags by name. Returns how many links were removed.
    pub async fn detach(
        &self,
        kind: OwnerKind,
        entity_id: i32,
        names: &[String],
    ) -> AppResult<u64> {
        self.tags.detach(kind, entity_id, names).await
    }

    /// Reconcile a record's tag set to exactly `names`.
    pub async fn sync(
        &self,
        kind: OwnerKind,
        entity_id: i32,
        names: &[String],
    ) -> AppResult<Vec<tag::Model>> {
        self.tags.sync(kind, entity_id, names).await
    }
}
