/// Integration tests for the hero record store
///
/// These tests run against an in-memory SQLite database, so no external
/// services are required. Run with: cargo test --test hero_store_tests

use herodex_shared::db::migrations::run_migrations;
use herodex_shared::db::pool::{create_pool, DatabaseConfig};
use herodex_shared::models::hero::{CreateHero, Hero, HeroUpdate};
use sqlx::SqlitePool;

/// Helper to create a migrated in-memory database
///
/// The pool is capped at one connection so every query sees the same
/// in-memory database.
async fn test_pool() -> SqlitePool {
    let pool = create_pool(DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        ..Default::default()
    })
    .await
    .expect("Failed to create pool");

    run_migrations(&pool).await.expect("Failed to migrate");
    pool
}

fn deadpond() -> CreateHero {
    CreateHero {
        name: "Deadpond".to_string(),
        age: None,
        secret_name: "Dive Wilson".to_string(),
    }
}

#[tokio::test]
async fn test_create_assigns_id_and_roundtrips() {
    let pool = test_pool().await;

    let created = Hero::create(&pool, deadpond()).await.unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.name, "Deadpond");
    assert_eq!(created.age, None);

    let found = Hero::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(found, created);
}

#[tokio::test]
async fn test_find_by_id_missing_returns_none() {
    let pool = test_pool().await;

    let found = Hero::find_by_id(&pool, 42).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_update_applies_only_present_fields() {
    let pool = test_pool().await;
    let created = Hero::create(&pool, deadpond()).await.unwrap();

    let updated = Hero::update(
        &pool,
        created.id,
        HeroUpdate {
            age: Some(Some(32)),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.age, Some(32));
    assert_eq!(updated.name, "Deadpond");
    assert_eq!(updated.secret_name, "Dive Wilson");
}

#[tokio::test]
async fn test_update_explicit_null_clears_age() {
    let pool = test_pool().await;
    let created = Hero::create(
        &pool,
        CreateHero {
            age: Some(48),
            ..deadpond()
        },
    )
    .await
    .unwrap();

    let update: HeroUpdate = serde_json::from_str(r#"{"age": null}"#).unwrap();
    let updated = Hero::update(&pool, created.id, update)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.age, None);
    assert_eq!(updated.name, "Deadpond");
}

#[tokio::test]
async fn test_update_missing_id_returns_none_not_upsert() {
    let pool = test_pool().await;

    let result = Hero::update(
        &pool,
        7,
        HeroUpdate {
            name: Some("Spider-Boy".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(result.is_none());

    // No row was created by the failed update
    let heroes = Hero::list(&pool, 0, 100).await.unwrap();
    assert!(heroes.is_empty());
}

#[tokio::test]
async fn test_delete_then_read_returns_none() {
    let pool = test_pool().await;
    let created = Hero::create(&pool, deadpond()).await.unwrap();

    let deleted = Hero::delete(&pool, created.id).await.unwrap();
    assert!(deleted);

    let found = Hero::find_by_id(&pool, created.id).await.unwrap();
    assert!(found.is_none());

    // Deleting again reports missing, not success
    let deleted = Hero::delete(&pool, created.id).await.unwrap();
    assert!(!deleted);
}

#[tokio::test]
async fn test_list_pages_in_insertion_order() {
    let pool = test_pool().await;

    for i in 0..5 {
        Hero::create(
            &pool,
            CreateHero {
                name: format!("Hero {}", i),
                age: Some(20 + i),
                secret_name: format!("Secret {}", i),
            },
        )
        .await
        .unwrap();
    }

    let all = Hero::list(&pool, 0, 100).await.unwrap();
    assert_eq!(all.len(), 5);
    assert_eq!(all[0].name, "Hero 0");
    assert_eq!(all[4].name, "Hero 4");

    let page = Hero::list(&pool, 2, 2).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].name, "Hero 2");
    assert_eq!(page[1].name, "Hero 3");

    let tail = Hero::list(&pool, 4, 100).await.unwrap();
    assert_eq!(tail.len(), 1);
}

#[tokio::test]
async fn test_list_never_exceeds_limit() {
    let pool = test_pool().await;

    for i in 0..120 {
        Hero::create(
            &pool,
            CreateHero {
                name: format!("Hero {}", i),
                age: None,
                secret_name: format!("Secret {}", i),
            },
        )
        .await
        .unwrap();
    }

    let page = Hero::list(&pool, 0, 100).await.unwrap();
    assert_eq!(page.len(), 100);
}
