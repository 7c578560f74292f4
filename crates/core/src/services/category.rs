//! Category service.

use std::sync::Arc;

use folio_common::{AppError, AppResult};
use folio_db::entities::{OwnerKind, category, locale};
use folio_db::repositories::{CategoryRepository, LocaleRepository};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use validator::Validate;

/// Input for creating a category.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryInput {
    /// Unique slug for the category.
    #[validate(length(min = 1, max = 255))]
    pub handle: String,
}

/// Service for managing categories and their attachments.
#[derive(Clone)]
pub struct CategoryService {
    categories: CategoryRepository,
    locales: LocaleRepository,
}

impl CategoryService {
    /// Create a new category service.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            categories: CategoryRepository::new(db.clone()),
            locales: LocaleRepository::new(db),
        }
    }

    /// Create a new category.
    pub async fn create(&self, input: CreateCategoryInput) -> AppResult<category::Model> {
        input.validate()?;

        if self
            .categories
            .find_by_handle(&input.handle)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Category with handle '{}' already exists",
                input.handle
            )));
        }

        self.categories.create(&input.handle).await
    }

    /// Get a category by ID.
    pub async fn get(&self, category_id: i32) -> AppResult<category::Model> {
        self.categories.get_by_id(category_id).await
    }

    /// List all categories by handle.
    pub async fn list(&self) -> AppResult<Vec<category::Model>> {
        self.categories.find_all().await
    }

    /// Attach a category to a record. Idempotent.
    pub async fn attach(
        &self,
        kind: OwnerKind,
        entity_id: i32,
        category_id: i32,
    ) -> AppResult<bool> {
        self.categories.get_by_id(category_id).await?;
        self.categories.attach(kind, entity_id, category_id).await
    }

    /// Detach a category from a record.
    pub async fn detach(
        &self,
        kind: OwnerKind,
        entity_id: i32,
        category_id: i32,
    ) -> AppResult<bool> {
        self.categories.detach(kind, entity_id, category_id).await
    }

    /// The categories attached to a record, ordered by handle.
    pub async fn categories_for(
        &self,
        kind: OwnerKind,
        entity_id: i32,
    ) -> AppResult<Vec<category::Model>> {
        self.categories.find_for_entity(kind, entity_id).await
    }

    /// The categories attached to a record, each paired with its variant
    /// for `code`.
    pub async fn categories_with_locale(
        &self,
        kind: OwnerKind,
        entity_id: i32,
        code: &str,
    ) -> AppResult<Vec<(category::Model, Option<locale::Model>)>> {
        let categories = self.categories.find_for_entity(kind, entity_id).await?;
        let ids: Vec<i32> = categories.iter().map(|category| category.id).collect();
        let variants = self
            .locales
            .find_for_parents(OwnerKind::Category, &ids, code)
            .await?;

        Ok(categories
            .into_iter()
            .map(|category| {
                let variant = variants
                    .iter()
                    .find(|variant| variant.parent_id == category.id)
                    .cloned();
                (category, variant)
            })
            .collect())
    }
}
