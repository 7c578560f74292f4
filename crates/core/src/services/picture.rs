//! Picture service: the image-attachment capability consumed by pages and
//! blocks.

use std::sync::Arc;

use folio_common::{AppError, AppResult};
use folio_db::entities::{OwnerKind, picture};
use folio_db::repositories::{PictureDescriptor, PictureRepository};
use sea_orm::{DatabaseConnection, TransactionTrait};

/// Service for managing attached pictures.
#[derive(Clone)]
pub struct PictureService {
    db: Arc<DatabaseConnection>,
    pictures: PictureRepository,
}

impl PictureService {
    /// Create a new picture service.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            pictures: PictureRepository::new(db.clone()),
            db,
        }
    }

    /// All pictures of a record, in position order.
    pub async fn pictures_for(
        &self,
        kind: OwnerKind,
        parent_id: i32,
    ) -> AppResult<Vec<picture::Model>> {
        self.pictures.find_for_parent(kind, parent_id).await
    }

    /// Reconcile a record's pictures against `descriptors`, in a single
    /// transaction. Returns the kept picture ids in input order.
    pub async fn sync(
        &self,
        kind: OwnerKind,
        parent_id: i32,
        descriptors: &[PictureDescriptor],
    ) -> AppResult<Vec<i32>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        let kept = self
            .pictures
            .sync_on(&txn, kind, parent_id, descriptors)
            .await?;
        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(kept)
    }
}
