mod common;

use linkwatch::domain::entities::NewLink;
use linkwatch::domain::repositories::LinkRepository;
use linkwatch::error::AppError;
use linkwatch::infrastructure::persistence::SqliteLinkRepository;
use std::sync::Arc;

fn new_link(code: &str, url: &str) -> NewLink {
    NewLink {
        short_code: code.to_string(),
        long_url: url.to_string(),
    }
}

#[tokio::test]
async fn test_create_and_get_by_short_code() {
    let pool = common::test_pool().await;
    let repo = SqliteLinkRepository::new(Arc::new(pool));

    let created = repo
        .create(new_link("abc123", "https://example.com/path?q=1"))
        .await
        .unwrap();

    assert!(created.id > 0);
    assert_eq!(created.short_code, "abc123");
    assert_eq!(created.long_url, "https://example.com/path?q=1");

    let found = repo.get_by_short_code("abc123").await.unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.long_url, created.long_url);
    assert_eq!(found.created_at, created.created_at);
}

#[tokio::test]
async fn test_get_by_short_code_missing_is_not_found() {
    let pool = common::test_pool().await;
    let repo = SqliteLinkRepository::new(Arc::new(pool));

    let err = repo.get_by_short_code("nope00").await.unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_short_code_lookup_is_case_sensitive() {
    let pool = common::test_pool().await;
    common::create_test_link(&pool, "AbCdEf", "https://example.com").await;
    let repo = SqliteLinkRepository::new(Arc::new(pool));

    assert!(repo.get_by_short_code("AbCdEf").await.is_ok());
    assert!(repo.get_by_short_code("abcdef").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_duplicate_short_code_is_store_error() {
    let pool = common::test_pool().await;
    let repo = SqliteLinkRepository::new(Arc::new(pool));

    repo.create(new_link("dup001", "https://a.example.com"))
        .await
        .unwrap();
    let err = repo
        .create(new_link("dup001", "https://b.example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Store { .. }));
    assert_eq!(err.to_string(), "Unique constraint violation");
}

#[tokio::test]
async fn test_list_all_and_count() {
    let pool = common::test_pool().await;
    let repo = SqliteLinkRepository::new(Arc::new(pool));

    assert!(repo.list_all().await.unwrap().is_empty());
    assert_eq!(repo.count().await.unwrap(), 0);

    for (code, url) in [
        ("first1", "https://one.example.com"),
        ("secnd2", "https://two.example.com"),
        ("third3", "https://three.example.com"),
    ] {
        repo.create(new_link(code, url)).await.unwrap();
    }

    let codes: Vec<String> = repo
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.short_code)
        .collect();

    assert_eq!(codes, vec!["first1", "secnd2", "third3"]);
    assert_eq!(repo.count().await.unwrap(), 3);
}
