//! Create tags and taggables tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tag::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tag::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tag::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Tag::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tags_name_unique")
                    .table(Tag::Table)
                    .col(Tag::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Taggable::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Taggable::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Taggable::TagId).integer().not_null())
                    .col(
                        ColumnDef::new(Taggable::TaggableType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Taggable::TaggableId).integer().not_null())
                    .col(
                        ColumnDef::new(Taggable::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_taggable_tag")
                            .from(Taggable::Table, Taggable::TagId)
                            .to(Tag::Table, Tag::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_taggables_entity")
                    .table(Taggable::Table)
                    .col(Taggable::TaggableType)
                    .col(Taggable::TaggableId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_taggables_unique")
                    .table(Taggable::Table)
                    .col(Taggable::TagId)
                    .col(Taggable::TaggableType)
                    .col(Taggable::TaggableId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Taggable::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Tag::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Tag {
    #[iden = "tags"]
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(Iden)]
enum Taggable {
    #[iden = "taggables"]
    Table,
    Id,
    TagId,
    TaggableType,
    TaggableId,
    CreatedAt,
}
