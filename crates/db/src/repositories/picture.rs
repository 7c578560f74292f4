//! Picture repository: images attached to pages and blocks.

use std::sync::Arc;

use crate::entities::{OwnerKind, Picture, picture};
use chrono::Utc;
use folio_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;

/// One entry of a picture reconciliation list.
///
/// A positive `id` targets an existing picture (adopted and re-parented if
/// it belonged to another record); anything else creates one. `position`
/// is assigned from the entry's rank among the kept entries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PictureDescriptor {
    pub id: Option<i32>,
    pub filename: Option<String>,
    pub alt: Option<String>,
}

/// Picture repository for database operations.
#[derive(Clone)]
pub struct PictureRepository {
    db: Arc<DatabaseConnection>,
}

impl PictureRepository {
    /// Create a new picture repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find all pictures of a record, ordered by position.
    pub async fn find_for_parent(
        &self,
        kind: OwnerKind,
        parent_id: i32,
    ) -> AppResult<Vec<picture::Model>> {
        Picture::find()
            .filter(picture::Column::ParentType.eq(kind))
            .filter(picture::Column::ParentId.eq(parent_id))
            .order_by_asc(picture::Column::Position)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Reconcile a record's pictures against `descriptors`, on the supplied
    /// connection.
    ///
    /// Follows the block reconciliation shape: descriptors with an unknown
    /// id are silently dropped, kept rows are positioned 0-based in the
    /// order they were kept, and rows not in the kept set are deleted.
    /// Returns the kept picture ids in input order.
    pub async fn sync_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        kind: OwnerKind,
        parent_id: i32,
        descriptors: &[PictureDescriptor],
    ) -> AppResult<Vec<i32>> {
        let mut kept: Vec<i32> = Vec::with_capacity(descriptors.len());

        for descriptor in descriptors {
            let existing = match descriptor.id {
                Some(id) if id > 0 => {
                    match Picture::find_by_id(id)
                        .one(conn)
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))?
                    {
                        Some(picture) => Some(picture),
                        None => {
                            tracing::debug!(
                                picture_id = id,
                                "dropping descriptor for unknown picture"
                            );
                            continue;
                        }
                    }
                }
                _ => None,
            };

            let now = Utc::now();
            let position = kept.len() as i32;
            let saved = match existing {
                Some(picture) => {
                    let mut active: picture::ActiveModel = picture.into();
                    if let Some(filename) = &descriptor.filename {
                        active.filename = Set(filename.clone());
                    }
                    if let Some(alt) = &descriptor.alt {
                        active.alt = Set(Some(alt.clone()));
                    }
                    active.parent_type = Set(kind);
                    active.parent_id = Set(parent_id);
                    active.position = Set(position);
                    active.updated_at = Set(Some(now.into()));
                    active
                        .update(conn)
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))?
                }
                None => {
                    let active = picture::ActiveModel {
                        parent_type: Set(kind),
                        parent_id: Set(parent_id),
                        filename: Set(descriptor.filename.clone().unwrap_or_default()),
                        alt: Set(descriptor.alt.clone()),
                        position: Set(position),
                        created_at: Set(now.into()),
                        ..Default::default()
                    };
                    active
                        .insert(conn)
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))?
                }
            };
            kept.push(saved.id);
        }

        let owned = Picture::find()
            .filter(picture::Column::ParentType.eq(kind))
            .filter(picture::Column::ParentId.eq(parent_id))
            .all(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        for picture in owned {
            if !kept.contains(&picture.id) {
                Picture::delete_by_id(picture.id)
                    .exec(conn)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
            }
        }

        Ok(kept)
    }

    /// Delete every picture of a record, on the supplied connection.
    pub async fn delete_for_parent_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        kind: OwnerKind,
        parent_id: i32,
    ) -> AppResult<()> {
        Picture::delete_many()
            .filter(picture::Column::ParentType.eq(kind))
            .filter(picture::Column::ParentId.eq(parent_id))
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
