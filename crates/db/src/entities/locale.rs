//! Locale entity: a per-locale content variant attached to a page, block
//! or category.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::OwnerKind;
use crate::properties;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "locales")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Which table the owning record lives in.
    pub parent_type: OwnerKind,

    /// Id of the owning record.
    pub parent_id: i32,

    /// Locale code, e.g. `en` or `fr-CA`.
    pub locale: String,

    /// Localized fields as a serialized JSON document.
    #[sea_orm(column_type = "Text")]
    pub content: String,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Decoded `content` document, with the same tolerance as page
    /// properties: empty text is an empty object, garbage is `Null`.
    #[must_use]
    pub fn content(&self) -> Json {
        properties::decode(&self.content)
    }
}
