//! Create locales table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Locale::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Locale::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Locale::ParentType).string_len(16).not_null())
                    .col(ColumnDef::new(Locale::ParentId).integer().not_null())
                    .col(ColumnDef::new(Locale::Locale).string_len(32).not_null())
                    .col(ColumnDef::new(Locale::Content).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Locale::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Locale::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_locales_parent")
                    .table(Locale::Table)
                    .col(Locale::ParentType)
                    .col(Locale::ParentId)
                    .to_owned(),
            )
            .await?;

        // One variant per locale code and owner.
        manager
            .create_index(
                Index::create()
                    .name("idx_locales_parent_locale_unique")
                    .table(Locale::Table)
                    .col(Locale::ParentType)
                    .col(Locale::ParentId)
                    .col(Locale::Locale)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Locale::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Locale {
    #[iden = "locales"]
    Table,
    Id,
    ParentType,
    ParentId,
    Locale,
    Content,
    CreatedAt,
    UpdatedAt,
}
