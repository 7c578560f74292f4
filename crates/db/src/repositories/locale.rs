//! Locale repository: per-locale content variants for pages, blocks and
//! categories.

use std::sync::Arc;

use crate::entities::{Locale, OwnerKind, locale};
use crate::properties;
use chrono::Utc;
use folio_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use serde_json::Value;

/// One entry of a locale reconciliation list, keyed by locale code.
#[derive(Debug, Clone, Deserialize)]
pub struct LocaleDescriptor {
    /// Locale code, e.g. `en` or `fr-CA`.
    pub locale: String,
    /// Localized fields; follows the same coercion rules as page
    /// properties.
    #[serde(default)]
    pub content: Value,
}

/// Locale repository for database operations.
#[derive(Clone)]
pub struct LocaleRepository {
    db: Arc<DatabaseConnection>,
}

impl LocaleRepository {
    /// Create a new locale repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find all locale variants of a record.
    pub async fn find_for_parent(
        &self,
        kind: OwnerKind,
        parent_id: i32,
    ) -> AppResult<Vec<locale::Model>> {
        Locale::find()
            .filter(locale::Column::ParentType.eq(kind))
            .filter(locale::Column::ParentId.eq(parent_id))
            .order_by_asc(locale::Column::Locale)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find one locale variant of a record.
    pub async fn find_locale(
        &self,
        kind: OwnerKind,
        parent_id: i32,
        code: &str,
    ) -> AppResult<Option<locale::Model>> {
        Locale::find()
            .filter(locale::Column::ParentType.eq(kind))
            .filter(locale::Column::ParentId.eq(parent_id))
            .filter(locale::Column::Locale.eq(code))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Batch-load one locale's variants for many records of the same kind.
    pub async fn find_for_parents(
        &self,
        kind: OwnerKind,
        parent_ids: &[i32],
        code: &str,
    ) -> AppResult<Vec<locale::Model>> {
        if parent_ids.is_empty() {
            return Ok(Vec::new());
        }
        Locale::find()
            .filter(locale::Column::ParentType.eq(kind))
            .filter(locale::Column::ParentId.is_in(parent_ids.iter().copied()))
            .filter(locale::Column::Locale.eq(code))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Reconcile a record's locale variants against `descriptors`, on the
    /// supplied connection.
    ///
    /// Upserts by locale code; codes absent from the input are deleted, so
    /// an empty input removes every variant. With duplicate codes in one
    /// input the last write wins.
    pub async fn sync_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        kind: OwnerKind,
        parent_id: i32,
        descriptors: &[LocaleDescriptor],
    ) -> AppResult<()> {
        let mut kept: Vec<String> = Vec::with_capacity(descriptors.len());

        for descriptor in descriptors {
            let existing = Locale::find()
                .filter(locale::Column::ParentType.eq(kind))
                .filter(locale::Column::ParentId.eq(parent_id))
                .filter(locale::Column::Locale.eq(descriptor.locale.as_str()))
                .one(conn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;

            let now = Utc::now();
            match existing {
                Some(row) => {
                    let mut active: locale::ActiveModel = row.into();
                    active.content = Set(properties::encode(&descriptor.content));
                    active.updated_at = Set(Some(now.into()));
                    active
                        .update(conn)
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))?;
                }
                None => {
                    let active = locale::ActiveModel {
                        parent_type: Set(kind),
                        parent_id: Set(parent_id),
                        locale: Set(descriptor.locale.clone()),
                        content: Set(properties::encode(&descriptor.content)),
                        created_at: Set(now.into()),
                        ..Default::default()
                    };
                    active
                        .insert(conn)
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))?;
                }
            }
            kept.push(descriptor.locale.clone());
        }

        let mut delete = Locale::delete_many()
            .filter(locale::Column::ParentType.eq(kind))
            .filter(locale::Column::ParentId.eq(parent_id));
        if !kept.is_empty() {
            delete = delete.filter(locale::Column::Locale.is_not_in(kept));
        }
        delete
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    /// Delete every locale variant of a record, on the supplied connection.
    pub async fn delete_for_parent_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        kind: OwnerKind,
        parent_id: i32,
    ) -> AppResult<()> {
        Locale::delete_many()
            .filter(locale::Column::ParentType.eq(kind))
            .filter(locale::Column::ParentId.eq(parent_id))
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

    #[test]
    fn test_descriptor_content_defaults_to_null() {
        let descriptor: LocaleDescriptor =
            serde_json::from_value(serde_json::json!({"locale": "en"})).unwrap();

        assert_eq!(descriptor.locale, "en");
        assert!(descriptor.content.is_null());
    }

    #[test]
    fn test_descriptor_with_content() {
        let descriptor: LocaleDescriptor = serde_json::from_value(
            serde_json::json!({"locale": "fr", "content": {"title": "Accueil"}}),
        )
        .unwrap();

        assert_eq!(descriptor.content["title"], "Accueil");
    }
}
