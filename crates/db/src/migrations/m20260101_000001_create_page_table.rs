//! Create pages table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Page::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Page::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Page::Handle).string_len(255).null())
                    .col(
                        ColumnDef::new(Page::Type)
                            .string_len(64)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Page::Properties).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Page::Published)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Page::PublishAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Page::ParentId).integer().null())
                    .col(
                        ColumnDef::new(Page::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Page::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Page::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_page_parent")
                            .from(Page::Table, Page::ParentId)
                            .to(Page::Table, Page::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pages_handle_unique")
                    .table(Page::Table)
                    .col(Page::Handle)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pages_parent_id")
                    .table(Page::Table)
                    .col(Page::ParentId)
                    .to_owned(),
            )
            .await?;

        // Covers both publication scopes.
        manager
            .create_index(
                Index::create()
                    .name("idx_pages_published_publish_at")
                    .table(Page::Table)
                    .col(Page::Published)
                    .col(Page::PublishAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Page::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Page {
    #[iden = "pages"]
    Table,
    Id,
    Handle,
    Type,
    Properties,
    Published,
    PublishAt,
    ParentId,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}
