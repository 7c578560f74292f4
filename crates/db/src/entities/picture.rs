//! Picture entity: an image attached to a page or block.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::OwnerKind;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pictures")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Which table the owning record lives in.
    pub parent_type: OwnerKind,

    /// Id of the owning record.
    pub parent_id: i32,

    /// Stored file name.
    pub filename: String,

    /// Alternative text for accessibility.
    #[sea_orm(nullable)]
    pub alt: Option<String>,

    /// Position among the owner's pictures, 0-based, assigned on sync.
    pub position: i32,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
