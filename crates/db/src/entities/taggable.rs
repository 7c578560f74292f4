//! Taggable join row: links a tag to a record of any kind.

use sea_orm::entity::prelude::*;

use super::OwnerKind;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "taggables")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// The attached tag.
    pub tag_id: i32,

    /// Which table the tagged record lives in.
    pub taggable_type: OwnerKind,

    /// Id of the tagged record.
    pub taggable_id: i32,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tag::Entity",
        from = "Column::TagId",
        to = "super::tag::Column::Id"
    )]
    Tag,
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tag.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
