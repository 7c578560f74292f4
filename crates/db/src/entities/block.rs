//! Block entity: an ordered content unit belonging to a page.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::properties;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blocks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Owning page.
    #[sea_orm(indexed)]
    pub page_id: i32,

    /// Free-text discriminator, interpreted by callers.
    #[sea_orm(column_name = "type")]
    pub kind: String,

    /// Grouping label within the page (e.g. `main`, `side`).
    pub area: String,

    /// Position of the block within its page, 0-based. Reassigned on every
    /// sync from the block's index in the input list.
    pub order: i32,

    /// Free-form JSON document, stored as serialized text.
    #[sea_orm(column_type = "Text")]
    pub properties: String,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::page::Entity",
        from = "Column::PageId",
        to = "super::page::Column::Id"
    )]
    Page,
}

impl Related<super::page::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Page.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Decoded `properties` document.
    #[must_use]
    pub fn properties(&self) -> Json {
        properties::decode(&self.properties)
    }
}

/// Filter a loaded block collection down to one area.
///
/// Exact, case-sensitive match; the relative order of the input is kept.
#[must_use]
pub fn for_area<'a>(blocks: &'a [Model], area: &str) -> Vec<&'a Model> {
    blocks.iter().filter(|block| block.area == area).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_block(id: i32, area: &str, order: i32) -> Model {
        Model {
            id,
            page_id: 1,
            kind: "text".to_string(),
            area: area.to_string(),
            order,
            properties: String::new(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[test]
    fn test_for_area_keeps_relative_order() {
        let blocks = vec![
            test_block(10, "main", 0),
            test_block(11, "side", 1),
            test_block(12, "main", 2),
            test_block(13, "side", 3),
        ];

        let side: Vec<i32> = for_area(&blocks, "side").iter().map(|b| b.id).collect();
        assert_eq!(side, vec![11, 13]);

        let main: Vec<i32> = for_area(&blocks, "main").iter().map(|b| b.id).collect();
        assert_eq!(main, vec![10, 12]);
    }

    #[test]
    fn test_for_area_is_case_sensitive() {
        let blocks = vec![test_block(10, "Main", 0), test_block(11, "main", 1)];
        let matched = for_area(&blocks, "main");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, 11);
    }

    #[test]
    fn test_for_area_unknown_label() {
        let blocks = vec![test_block(10, "main", 0)];
        assert!(for_area(&blocks, "footer").is_empty());
    }
}
