//! Create categories and categorizables tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Category::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Category::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Category::Handle).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Category::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Category::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_categories_handle_unique")
                    .table(Category::Table)
                    .col(Category::Handle)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Categorizable::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categorizable::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Categorizable::EntityType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Categorizable::EntityId).integer().not_null())
                    .col(
                        ColumnDef::new(Categorizable::CategoryId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Categorizable::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Categorizable::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_categorizable_category")
                            .from(Categorizable::Table, Categorizable::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_categorizables_entity")
                    .table(Categorizable::Table)
                    .col(Categorizable::EntityType)
                    .col(Categorizable::EntityId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_categorizables_unique")
                    .table(Categorizable::Table)
                    .col(Categorizable::EntityType)
                    .col(Categorizable::EntityId)
                    .col(Categorizable::CategoryId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Categorizable::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Category::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Category {
    #[iden = "categories"]
    Table,
    Id,
    Handle,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Categorizable {
    #[iden = "categorizables"]
    Table,
    Id,
    EntityType,
    EntityId,
    CategoryId,
    CreatedAt,
    UpdatedAt,
}
