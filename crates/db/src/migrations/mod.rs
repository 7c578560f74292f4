//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20260101_000001_create_page_table;
mod m20260101_000002_create_block_table;
mod m20260101_000003_create_locale_table;
mod m20260101_000004_create_picture_table;
mod m20260101_000005_create_category_tables;
mod m20260101_000006_create_tag_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_page_table::Migration),
            Box::new(m20260101_000002_create_block_table::Migration),
            Box::new(m20260101_000003_create_locale_table::Migration),
            Box::new(m20260101_000004_create_picture_table::Migration),
            Box::new(m20260101_000005_create_category_tables::Migration),
            Box::new(m20260101_000006_create_tag_tables::Migration),
        ]
    }
}
