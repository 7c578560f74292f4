//! Create pictures table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Picture::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Picture::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Picture::ParentType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Picture::ParentId).integer().not_null())
                    .col(
                        ColumnDef::new(Picture::Filename)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Picture::Alt).string_len(255).null())
                    .col(
                        ColumnDef::new(Picture::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Picture::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Picture::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pictures_parent")
                    .table(Picture::Table)
                    .col(Picture::ParentType)
                    .col(Picture::ParentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Picture::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Picture {
    #[iden = "pictures"]
    Table,
    Id,
    ParentType,
    ParentId,
    Filename,
    Alt,
    Position,
    CreatedAt,
    UpdatedAt,
}
