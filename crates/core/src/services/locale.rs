//! Locale service: the localization capability consumed by pages, blocks
//! and categories.

use std::sync::Arc;

use folio_common::{AppError, AppResult};
use folio_db::entities::{OwnerKind, locale};
use folio_db::repositories::{LocaleDescriptor, LocaleRepository};
use sea_orm::{DatabaseConnection, TransactionTrait};

/// Service for managing per-locale content variants.
#[derive(Clone)]
pub struct LocaleService {
    db: Arc<DatabaseConnection>,
    locales: LocaleRepository,
}

impl LocaleService {
    /// Create a new locale service.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            locales: LocaleRepository::new(db.clone()),
            db,
        }
    }

    /// All locale variants of a record.
    pub async fn locales_for(
        &self,
        kind: OwnerKind,
        parent_id: i32,
    ) -> AppResult<Vec<locale::Model>> {
        self.locales.find_for_parent(kind, parent_id).await
    }

    /// One locale variant of a record.
    pub async fn locale_for(
        &self,
        kind: OwnerKind,
        parent_id: i32,
        code: &str,
    ) -> AppResult<Option<locale::Model>> {
        self.locales.find_locale(kind, parent_id, code).await
    }

    /// Reconcile a record's locale variants against `descriptors`, in a
    /// single transaction. An empty input removes every variant.
    pub async fn sync(
        &self,
        kind: OwnerKind,
        parent_id: i32,
        descriptors: &[LocaleDescriptor],
    ) -> AppResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        self.locales
            .sync_on(&txn, kind, parent_id, descriptors)
            .await?;
        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
