//! Categorizable join row: links a category to a record of any kind.
//!
//! Explicit join table keyed by (entity type tag, entity id, category id);
//! the tag column replaces dynamic type resolution.

use sea_orm::entity::prelude::*;

use super::OwnerKind;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categorizables")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Which table the categorized record lives in.
    pub entity_type: OwnerKind,

    /// Id of the categorized record.
    pub entity_id: i32,

    /// The attached category.
    pub category_id: i32,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
