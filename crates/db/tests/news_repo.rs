//! Integration tests for the news repository and the Postgres gateway.
//!
//! Exercises the repository layer against a real database:
//! - News creation with initial category associations
//! - Transactional detach / overwrite / attach
//! - Foreign-key failures rolling back the whole write
//! - Gateway behaviour for missing rows

use newsdesk_core::types::EntityId;
use newsdesk_db::gateway::{NewsGateway, PgNewsGateway};
use newsdesk_db::models::category::{Category, CreateCategory};
use newsdesk_db::models::news::{CreateNews, NewsChanges, NewsFields};
use newsdesk_db::repositories::{CategoryRepo, NewsRepo};
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn category(pool: &PgPool, name: &str) -> Category {
    CategoryRepo::create(
        pool,
        &CreateCategory {
            name: name.to_string(),
            description: None,
        },
    )
    .await
    .unwrap()
}

fn new_news(category_ids: Vec<EntityId>) -> CreateNews {
    CreateNews {
        hat: "Economy".to_string(),
        title: "Rates held".to_string(),
        text: "The central bank held rates.".to_string(),
        author: "Desk".to_string(),
        image: "rates.png".to_string(),
        link: "https://example.com/rates".to_string(),
        is_active: true,
        category_ids,
    }
}

fn fields(title: &str, is_active: bool) -> NewsFields {
    NewsFields {
        hat: "Economy".to_string(),
        title: title.to_string(),
        text: "Updated body.".to_string(),
        author: "Editor".to_string(),
        image: "rates-2.png".to_string(),
        link: "https://example.com/rates-2".to_string(),
        is_active,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_with_categories(pool: PgPool) {
    let a = category(&pool, "A").await;
    let b = category(&pool, "B").await;

    let news = NewsRepo::create(&pool, &new_news(vec![b.id, a.id, a.id]))
        .await
        .unwrap();
    assert_eq!(news.title, "Rates held");
    assert!(news.is_active);

    let loaded = NewsRepo::find_by_id_with_categories(&pool, news.id)
        .await
        .unwrap()
        .expect("news should exist");
    // Ordered by name, duplicates collapsed by the junction key.
    assert_eq!(loaded.category_ids(), vec![a.id, b.id]);

    let found = CategoryRepo::find_by_id(&pool, b.id).await.unwrap();
    assert_eq!(found, Some(b));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_find_missing_returns_none(pool: PgPool) {
    let found = NewsRepo::find_by_id_with_categories(&pool, Uuid::new_v4())
        .await
        .unwrap();
    assert!(found.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_apply_changes_detach_overwrite_attach(pool: PgPool) {
    let a = category(&pool, "A").await;
    let b = category(&pool, "B").await;
    let c = category(&pool, "C").await;
    let news = NewsRepo::create(&pool, &new_news(vec![a.id, b.id]))
        .await
        .unwrap();

    let changes = NewsChanges {
        fields: Some(fields("Rates cut", false)),
        connect: vec![c.id],
        disconnect: vec![a.id],
    };
    let updated = NewsRepo::apply_changes(&pool, news.id, &changes)
        .await
        .unwrap()
        .expect("news should exist");

    assert_eq!(updated.news.title, "Rates cut");
    assert_eq!(updated.news.author, "Editor");
    assert!(!updated.news.is_active);
    assert!(updated.news.updated_at >= news.updated_at);
    assert_eq!(updated.category_ids(), vec![b.id, c.id]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_apply_changes_missing_news_writes_nothing(pool: PgPool) {
    let a = category(&pool, "A").await;
    let changes = NewsChanges {
        fields: Some(fields("Ghost", true)),
        connect: vec![a.id],
        disconnect: vec![],
    };

    let result = NewsRepo::apply_changes(&pool, Uuid::new_v4(), &changes)
        .await
        .unwrap();
    assert!(result.is_none());

    let links: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM news_categories")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(links.0, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_category_rolls_back_detach_and_fields(pool: PgPool) {
    let a = category(&pool, "A").await;
    let news = NewsRepo::create(&pool, &new_news(vec![a.id])).await.unwrap();

    let changes = NewsChanges {
        fields: Some(fields("Should not stick", false)),
        connect: vec![Uuid::new_v4()],
        disconnect: vec![a.id],
    };
    let err = NewsRepo::apply_changes(&pool, news.id, &changes)
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => assert_eq!(db_err.code().as_deref(), Some("23503")),
        other => panic!("expected foreign-key violation, got {other:?}"),
    }

    let stored = NewsRepo::find_by_id_with_categories(&pool, news.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.news.title, "Rates held");
    assert!(stored.news.is_active);
    assert_eq!(stored.category_ids(), vec![a.id]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_attach_is_idempotent(pool: PgPool) {
    let a = category(&pool, "A").await;
    let news = NewsRepo::create(&pool, &new_news(vec![a.id])).await.unwrap();

    let changes = NewsChanges {
        fields: None,
        connect: vec![a.id, a.id],
        disconnect: vec![],
    };
    let updated = NewsRepo::apply_changes(&pool, news.id, &changes)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.category_ids(), vec![a.id]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_pg_gateway_update_missing_is_row_not_found(pool: PgPool) {
    let gateway = PgNewsGateway::new(pool);
    let err = gateway
        .update(Uuid::new_v4(), &NewsChanges::default())
        .await
        .unwrap_err();
    assert!(matches!(err, sqlx::Error::RowNotFound));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_pg_gateway_find_one(pool: PgPool) {
    let a = category(&pool, "A").await;
    let news = NewsRepo::create(&pool, &new_news(vec![a.id])).await.unwrap();

    let gateway = PgNewsGateway::new(pool);
    let found = gateway.find_one(news.id).await.unwrap().unwrap();
    assert_eq!(found.news, news);
    assert_eq!(found.categories, vec![a]);
}
