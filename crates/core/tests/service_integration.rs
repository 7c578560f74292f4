//! End-to-end service tests.
//!
//! These run the services against an in-memory SQLite database with every
//! migration applied. No external services are required.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use folio_common::AppError;
use folio_core::{
    BlockDescriptor, CategoryService, CreateCategoryInput, CreatePageInput, LocaleDescriptor,
    LocaleService, PageService, PictureDescriptor, TagService, UpdatePageInput,
};
use folio_db::entities::{OwnerKind, page};
use folio_db::test_utils::memory_db_arc;
use sea_orm::DatabaseConnection;
use serde_json::json;

async fn setup() -> (Arc<DatabaseConnection>, PageService) {
    let db = memory_db_arc().await.unwrap();
    let service = PageService::new(db.clone());
    (db, service)
}

fn page_input(kind: &str) -> CreatePageInput {
    CreatePageInput {
        handle: None,
        kind: kind.to_string(),
        properties: None,
        published: false,
        publish_at: None,
        parent_id: None,
    }
}

async fn create_page(service: &PageService, kind: &str) -> page::Model {
    service.create(page_input(kind)).await.unwrap()
}

fn block(kind: &str, area: &str) -> BlockDescriptor {
    BlockDescriptor {
        kind: Some(kind.to_string()),
        area: Some(area.to_string()),
        ..Default::default()
    }
}

// ==================== Lifecycle ====================

#[tokio::test]
async fn test_create_autofills_handle_from_type_and_id() {
    let (_db, service) = setup().await;

    let page = create_page(&service, "landing").await;
    assert_eq!(page.handle, Some(format!("landing_{}", page.id)));

    let reloaded = service.get(page.id).await.unwrap();
    assert_eq!(reloaded.handle, page.handle);
}

#[tokio::test]
async fn test_create_with_duplicate_handle_conflicts() {
    let (_db, service) = setup().await;

    let mut input = page_input("page");
    input.handle = Some("about".to_string());
    service.create(input).await.unwrap();

    let mut input = page_input("page");
    input.handle = Some("about".to_string());
    let err = service.create(input).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_properties_round_trip() {
    let (_db, service) = setup().await;

    let value = json!({"template": "landing", "columns": 3});
    let mut input = page_input("page");
    input.properties = Some(value.clone());
    let page = service.create(input).await.unwrap();
    assert_eq!(page.properties(), value);

    // A pre-serialized string is stored verbatim and decoded on read.
    let updated = service
        .update(
            page.id,
            UpdatePageInput {
                properties: Some(json!(r#"{"raw":true}"#)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.properties, r#"{"raw":true}"#);
    assert_eq!(updated.properties(), json!({"raw": true}));
}

#[tokio::test]
async fn test_update_applies_only_supplied_fields() {
    let (_db, service) = setup().await;

    let page = create_page(&service, "page").await;
    let handle = page.handle.clone();

    let updated = service
        .update(
            page.id,
            UpdatePageInput {
                kind: Some("article".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.kind, "article");
    assert_eq!(updated.handle, handle);
    assert!(updated.updated_at.is_some());
}

#[tokio::test]
async fn test_soft_delete_hides_page() {
    let (_db, service) = setup().await;

    let page = create_page(&service, "page").await;
    let handle = page.handle.clone().unwrap();
    service.delete(page.id).await.unwrap();

    assert!(matches!(
        service.get(page.id).await.unwrap_err(),
        AppError::PageNotFound(_)
    ));
    assert!(matches!(
        service.get_by_handle(&handle).await.unwrap_err(),
        AppError::PageNotFound(_)
    ));
}

// ==================== Publication scopes ====================

#[tokio::test]
async fn test_publication_scopes_with_injected_now() {
    let (_db, service) = setup().await;
    let now = Utc::now();

    let mut input = page_input("page");
    input.published = true;
    let live = service.create(input).await.unwrap();

    let mut input = page_input("page");
    input.published = true;
    input.publish_at = Some((now + Duration::hours(1)).into());
    let scheduled = service.create(input).await.unwrap();

    let draft = create_page(&service, "page").await;

    let published: Vec<i32> = service
        .list_published(now.into())
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(published, vec![live.id]);

    let hidden: Vec<i32> = service
        .list_not_published(now.into())
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(hidden, vec![scheduled.id, draft.id]);

    // Once the scheduled time passes, the page moves scopes.
    let later = now + Duration::hours(2);
    let published: Vec<i32> = service
        .list_published(later.into())
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(published, vec![live.id, scheduled.id]);
}

// ==================== Block sync ====================

#[tokio::test]
async fn test_sync_blocks_creates_in_order() {
    let (_db, service) = setup().await;
    let page = create_page(&service, "page").await;

    let kept = service
        .sync_blocks(
            page.id,
            &[
                block("text", "main"),
                block("gallery", "main"),
                block("text", "side"),
            ],
        )
        .await
        .unwrap();
    assert_eq!(kept.len(), 3);

    let blocks = service.blocks(page.id).await.unwrap();
    assert_eq!(blocks.len(), 3);
    let orders: Vec<i32> = blocks.iter().map(|b| b.order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
    assert_eq!(blocks[1].kind, "gallery");
}

#[tokio::test]
async fn test_sync_blocks_empty_input_deletes_everything() {
    let (_db, service) = setup().await;
    let page = create_page(&service, "page").await;

    let kept = service
        .sync_blocks(
            page.id,
            &[
                block("text", "main"),
                block("text", "main"),
                block("text", "side"),
            ],
        )
        .await
        .unwrap();
    assert_eq!(kept.len(), 3);

    let kept = service.sync_blocks(page.id, &[]).await.unwrap();
    assert!(kept.is_empty());
    assert!(service.blocks(page.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sync_blocks_adopts_block_from_another_page() {
    let (_db, service) = setup().await;
    let first = create_page(&service, "page").await;
    let second = create_page(&service, "page").await;

    let first_kept = service
        .sync_blocks(first.id, &[block("text", "main")])
        .await
        .unwrap();
    let adopted_id = first_kept[0];

    let resident = service
        .sync_blocks(second.id, &[block("text", "main")])
        .await
        .unwrap()[0];

    // The second page claims the first page's block plus a fresh one; its
    // resident block is not in the list and gets deleted.
    let kept = service
        .sync_blocks(
            second.id,
            &[
                BlockDescriptor {
                    id: Some(adopted_id),
                    kind: Some("quote".to_string()),
                    ..Default::default()
                },
                block("text", "side"),
            ],
        )
        .await
        .unwrap();
    assert_eq!(kept.len(), 2);
    assert_eq!(kept[0], adopted_id);

    let blocks = service.blocks(second.id).await.unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].id, adopted_id);
    assert_eq!(blocks[0].kind, "quote");
    assert_eq!(blocks[0].order, 0);
    assert_eq!(blocks[1].order, 1);
    assert!(!blocks.iter().any(|b| b.id == resident));

    // The first page no longer owns the adopted block.
    assert!(service.blocks(first.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sync_blocks_unknown_id_is_dropped_and_rest_deleted() {
    let (_db, service) = setup().await;
    let page = create_page(&service, "page").await;

    service
        .sync_blocks(page.id, &[block("text", "main"), block("text", "side")])
        .await
        .unwrap();

    let kept = service
        .sync_blocks(
            page.id,
            &[BlockDescriptor {
                id: Some(999),
                ..Default::default()
            }],
        )
        .await
        .unwrap();

    // The lone descriptor was dropped, so the kept set is empty and every
    // previously-owned block is gone.
    assert!(kept.is_empty());
    assert!(service.blocks(page.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sync_blocks_overrides_descriptor_order() {
    let (_db, service) = setup().await;
    let page = create_page(&service, "page").await;

    let mut first = block("text", "main");
    first.order = Some(99);
    let mut second = block("text", "main");
    second.order = Some(-7);

    service.sync_blocks(page.id, &[first, second]).await.unwrap();

    let orders: Vec<i32> = service
        .blocks(page.id)
        .await
        .unwrap()
        .iter()
        .map(|b| b.order)
        .collect();
    assert_eq!(orders, vec![0, 1]);
}

#[tokio::test]
async fn test_sync_blocks_reconciles_nested_locales_and_pictures() {
    let (db, service) = setup().await;
    let page = create_page(&service, "page").await;
    let locales = LocaleService::new(db.clone());

    let mut descriptor = block("text", "main");
    descriptor.locales = vec![LocaleDescriptor {
        locale: "en".to_string(),
        content: json!({"title": "Hello"}),
    }];
    descriptor.pictures = vec![PictureDescriptor {
        filename: Some("hero.jpg".to_string()),
        ..Default::default()
    }];

    let kept = service.sync_blocks(page.id, &[descriptor]).await.unwrap();
    let block_id = kept[0];

    let variants = locales
        .locales_for(OwnerKind::Block, block_id)
        .await
        .unwrap();
    assert_eq!(variants.len(), 1);
    assert_eq!(variants[0].content()["title"], "Hello");

    // Re-syncing the same block without nested lists clears them.
    let descriptor = BlockDescriptor {
        id: Some(block_id),
        ..Default::default()
    };
    service.sync_blocks(page.id, &[descriptor]).await.unwrap();

    assert!(
        locales
            .locales_for(OwnerKind::Block, block_id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_deleting_block_removes_its_locales_and_pictures() {
    let (db, service) = setup().await;
    let page = create_page(&service, "page").await;
    let locales = LocaleService::new(db.clone());

    let mut descriptor = block("text", "main");
    descriptor.locales = vec![LocaleDescriptor {
        locale: "en".to_string(),
        content: json!({"title": "Hello"}),
    }];
    let kept = service.sync_blocks(page.id, &[descriptor]).await.unwrap();
    let block_id = kept[0];

    service.sync_blocks(page.id, &[]).await.unwrap();

    assert!(
        locales
            .locales_for(OwnerKind::Block, block_id)
            .await
            .unwrap()
            .is_empty()
    );
}

// ==================== Area filter ====================

#[tokio::test]
async fn test_blocks_for_area_preserves_relative_order() {
    let (_db, service) = setup().await;
    let page = create_page(&service, "page").await;

    service
        .sync_blocks(
            page.id,
            &[
                block("text", "main"),
                block("text", "side"),
                block("gallery", "main"),
                block("links", "side"),
            ],
        )
        .await
        .unwrap();

    let side = service.blocks_for_area(page.id, "side").await.unwrap();
    let orders: Vec<i32> = side.iter().map(|b| b.order).collect();
    assert_eq!(orders, vec![1, 3]);
    assert!(side.iter().all(|b| b.area == "side"));

    assert!(
        service
            .blocks_for_area(page.id, "footer")
            .await
            .unwrap()
            .is_empty()
    );
}

// ==================== Locale-aware reads ====================

#[tokio::test]
async fn test_blocks_with_locale_pairs_variants() {
    let (_db, service) = setup().await;
    let page = create_page(&service, "page").await;

    let mut localized = block("text", "main");
    localized.locales = vec![LocaleDescriptor {
        locale: "fr".to_string(),
        content: json!({"title": "Bonjour"}),
    }];
    let bare = block("text", "main");

    service
        .sync_blocks(page.id, &[localized, bare])
        .await
        .unwrap();

    let pairs = service.blocks_with_locale(page.id, "fr").await.unwrap();
    assert_eq!(pairs.len(), 2);
    assert!(pairs[0].1.is_some());
    assert_eq!(pairs[0].1.as_ref().unwrap().content()["title"], "Bonjour");
    assert!(pairs[1].1.is_none());
}

#[tokio::test]
async fn test_parent_with_locale() {
    let (db, service) = setup().await;
    let locales = LocaleService::new(db.clone());

    let parent = create_page(&service, "section").await;
    locales
        .sync(
            OwnerKind::Page,
            parent.id,
            &[LocaleDescriptor {
                locale: "en".to_string(),
                content: json!({"title": "Docs"}),
            }],
        )
        .await
        .unwrap();

    let mut input = page_input("page");
    input.parent_id = Some(parent.id);
    let child = service.create(input).await.unwrap();

    let found = service.parent_with_locale(&child, "en").await.unwrap();
    let (found_parent, variant) = found.unwrap();
    assert_eq!(found_parent.id, parent.id);
    assert_eq!(variant.unwrap().content()["title"], "Docs");

    let orphan = create_page(&service, "page").await;
    assert!(
        service
            .parent_with_locale(&orphan, "en")
            .await
            .unwrap()
            .is_none()
    );
}

// ==================== Tags & categories ====================

#[tokio::test]
async fn test_tag_capability_on_pages() {
    let (db, service) = setup().await;
    let tags = TagService::new(db.clone());
    let page = create_page(&service, "page").await;

    tags.attach(
        OwnerKind::Page,
        page.id,
        &["rust".to_string(), " ".to_string(), "cms".to_string()],
    )
    .await
    .unwrap();

    let names: Vec<String> = tags
        .tags_for(OwnerKind::Page, page.id)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["cms".to_string(), "rust".to_string()]);

    tags.sync(OwnerKind::Page, page.id, &["docs".to_string()])
        .await
        .unwrap();
    let names: Vec<String> = tags
        .tags_for(OwnerKind::Page, page.id)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["docs".to_string()]);
}

#[tokio::test]
async fn test_categories_with_locale() {
    let (db, service) = setup().await;
    let categories = CategoryService::new(db.clone());
    let locales = LocaleService::new(db.clone());
    let page = create_page(&service, "page").await;

    let news = categories
        .create(CreateCategoryInput {
            handle: "news".to_string(),
        })
        .await
        .unwrap();
    locales
        .sync(
            OwnerKind::Category,
            news.id,
            &[LocaleDescriptor {
                locale: "fr".to_string(),
                content: json!({"name": "Nouvelles"}),
            }],
        )
        .await
        .unwrap();

    categories
        .attach(OwnerKind::Page, page.id, news.id)
        .await
        .unwrap();

    let pairs = categories
        .categories_with_locale(OwnerKind::Page, page.id, "fr")
        .await
        .unwrap();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].0.handle, "news");
    assert_eq!(pairs[0].1.as_ref().unwrap().content()["name"], "Nouvelles");
}
