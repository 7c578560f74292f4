//! Page entity.

use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::properties;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Unique human-readable slug. Filled in right after the first insert
    /// when the caller did not supply one; never empty afterwards.
    #[sea_orm(indexed)]
    pub handle: Option<String>,

    /// Free-text discriminator, interpreted by callers.
    #[sea_orm(column_name = "type")]
    pub kind: String,

    /// Free-form JSON document, stored as serialized text.
    #[sea_orm(column_type = "Text")]
    pub properties: String,

    /// Publication flag.
    pub published: bool,

    /// When set, gates visibility until this time even though `published`
    /// is already true.
    #[sea_orm(nullable)]
    pub publish_at: Option<DateTimeWithTimeZone>,

    /// Optional parent page, forming a tree.
    #[sea_orm(nullable)]
    pub parent_id: Option<i32>,

    /// Soft-delete marker; rows are never physically removed.
    #[sea_orm(nullable)]
    pub deleted_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(belongs_to = "Entity", from = "Column::ParentId", to = "Column::Id")]
    Parent,

    #[sea_orm(has_many = "super::block::Entity")]
    Blocks,
}

impl Related<super::block::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Blocks.def()
    }
}

impl Model {
    /// Decoded `properties` document.
    ///
    /// Empty stored text yields an empty object; unparseable text yields
    /// `Value::Null`, which callers must tolerate.
    #[must_use]
    pub fn properties(&self) -> Json {
        properties::decode(&self.properties)
    }

    /// Whether the page is visible at `now`: flagged published and past its
    /// scheduled time, if any.
    #[must_use]
    pub fn is_published(&self, now: DateTimeWithTimeZone) -> bool {
        self.published && self.publish_at.is_none_or(|at| at <= now)
    }

    /// Whether the page is hidden at `now`.
    ///
    /// Mirrors the `not_published` query scope: evaluated as its own
    /// OR predicate, not as a negation of [`Model::is_published`].
    #[must_use]
    pub fn is_not_published(&self, now: DateTimeWithTimeZone) -> bool {
        !self.published || self.publish_at.is_some_and(|at| at > now)
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Fills in a missing `handle` as `"<type>_<id>"` right after the row
    /// first persists, once the generated id is known.
    async fn after_save<C>(model: Model, db: &C, insert: bool) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert && model.handle.as_deref().is_none_or(str::is_empty) {
            let handle = format!("{}_{}", model.kind, model.id);
            let mut active: ActiveModel = model.into();
            active.handle = Set(Some(handle));
            return active.update(db).await;
        }
        Ok(model)
    }
}
