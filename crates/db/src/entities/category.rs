//! Category entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Unique slug for the category.
    #[sea_orm(unique)]
    pub handle: String,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::categorizable::Entity")]
    Categorizables,
}

impl Related<super::categorizable::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categorizables.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
