//! Tag repository: free-text tag association.

use std::sync::Arc;

use crate::entities::{OwnerKind, Tag, Taggable, tag, taggable};
use chrono::Utc;
use folio_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

/// Tag repository for database operations.
#[derive(Clone)]
pub struct TagRepository {
    db: Arc<DatabaseConnection>,
}

impl TagRepository {
    /// Create a new tag repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the tags attached to a record, alphabetically.
    pub async fn find_for_entity(
        &self,
        kind: OwnerKind,
        entity_id: i32,
    ) -> AppResult<Vec<tag::Model>> {
        let links = Taggable::find()
            .filter(taggable::Column::TaggableType.eq(kind))
            .filter(taggable::Column::TaggableId.eq(entity_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let tag_ids: Vec<i32> = links.iter().map(|link| link.tag_id).collect();
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }

        Tag::find()
            .filter(tag::Column::Id.is_in(tag_ids))
            .order_by_asc(tag::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a tag by name, creating it when missing.
    pub async fn get_or_create(&self, name: &str) -> AppResult<tag::Model> {
        let existing = Tag::find()
            .filter(tag::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if let Some(tag) = existing {
            return Ok(tag);
        }

        let active = tag::ActiveModel {
            name: Set(name.to_string()),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };
        active
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Attach tags by name. Missing tags are created; pairs that already
    /// exist are left alone. Returns the attached tag rows in input order.
    pub async fn attach(
        &self,
        kind: OwnerKind,
        entity_id: i32,
        names: &[String],
    ) -> AppResult<Vec<tag::Model>> {
        let mut attached = Vec::with_capacity(names.len());

        for name in names {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let tag = self.get_or_create(name).await?;

            let linked = Taggable::find()
                .filter(taggable::Column::TagId.eq(tag.id))
                .filter(taggable::Column::TaggableType.eq(kind))
                .filter(taggable::Column::TaggableId.eq(entity_id))
                .one(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;

            if linked.is_none() {
                let link = taggable::ActiveModel {
                    tag_id: Set(tag.id),
                    taggable_type: Set(kind),
                    taggable_id: Set(entity_id),
                    created_at: Set(Utc::now().into()),
                    ..Default::default()
                };
                link.insert(self.db.as_ref())
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
            }
            attached.push(tag);
        }

        Ok(attached)
    }

    /// Detach tags by name. Unknown names are ignored. Returns how many
    /// links were removed.
    pub async fn detach(
        &self,
        kind: OwnerKind,
        entity_id: i32,
        names: &[String],
    ) -> AppResult<u64> {
        let trimmed: Vec<&str> = names
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .collect();
        if trimmed.is_empty() {
            return Ok(0);
        }

        let tags = Tag::find()
            .filter(tag::Column::Name.is_in(trimmed))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        let tag_ids: Vec<i32> = tags.iter().map(|tag| tag.id).collect();
        if tag_ids.is_empty() {
            return Ok(0);
        }

        let result = Taggable::delete_many()
            .filter(taggable::Column::TagId.is_in(tag_ids))
            .filter(taggable::Column::TaggableType.eq(kind))
            .filter(taggable::Column::TaggableId.eq(entity_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }

    /// Reconcile a record's tag set to exactly `names`.
    pub async fn sync(
        &self,
        kind: OwnerKind,
        entity_id: i32,
        names: &[String],
    ) -> AppResult<Vec<tag::Model>> {
        let attached = self.attach(kind, entity_id, names).await?;
        let keep_ids: Vec<i32> = attached.iter().map(|tag| tag.id).collect();

        let mut delete = Taggable::delete_many()
            .filter(taggable::Column::TaggableType.eq(kind))
            .filter(taggable::Column::TaggableId.eq(entity_id));
        if !keep_ids.is_empty() {
            delete = delete.filter(taggable::Column::TagId.is_not_in(keep_ids));
        }
        delete
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(attached)
    }
}
