//! Database entities.

#![allow(missing_docs)]

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub mod block;
pub mod categorizable;
pub mod category;
pub mod locale;
pub mod page;
pub mod picture;
pub mod tag;
pub mod taggable;

pub use block::Entity as Block;
pub use categorizable::Entity as Categorizable;
pub use category::Entity as Category;
pub use locale::Entity as Locale;
pub use page::Entity as Page;
pub use picture::Entity as Picture;
pub use tag::Entity as Tag;
pub use taggable::Entity as Taggable;

/// Kind tag identifying which record a polymorphic row belongs to.
///
/// Stored as an explicit string column on the `locales`, `pictures`,
/// `categorizables` and `taggables` tables; no dynamic type resolution
/// happens at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum OwnerKind {
    #[sea_orm(string_value = "page")]
    Page,
    #[sea_orm(string_value = "block")]
    Block,
    #[sea_orm(string_value = "category")]
    Category,
}
