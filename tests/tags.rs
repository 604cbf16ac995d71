mod common;

use common::*;
use geulbang::{db, error::AppError};

#[tokio::test]
async fn attaching_twice_is_idempotent() {
    let pool = test_pool().await;
    let entry = published(&pool, "Tagged", "body").await;
    let tags = strings(&["a", "b"]);

    let first = db::attach_tags(&pool, &entry, &tags).await.unwrap();
    assert_eq!((first.new_tags, first.new_links), (2, 2));
    assert_eq!(db::tags_for(&pool, &entry).await.unwrap(), vec!["a", "b"]);

    let second = db::attach_tags(&pool, &entry, &tags).await.unwrap();
    assert_eq!((second.new_tags, second.new_links), (0, 0));
    assert_eq!(db::tags_for(&pool, &entry).await.unwrap(), vec!["a", "b"]);
}

#[tokio::test]
async fn existing_tags_are_shared_between_entries() {
    let pool = test_pool().await;
    let first = published(&pool, "First", "body").await;
    let second = published(&pool, "Second", "body").await;

    db::attach_tags(&pool, &first, &strings(&["rust"])).await.unwrap();
    let outcome = db::attach_tags(&pool, &second, &strings(&["rust", "sqlite"]))
        .await
        .unwrap();

    assert_eq!((outcome.new_tags, outcome.new_links), (1, 2));
    let all: Vec<String> = db::list_tags(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|tag| tag.title)
        .collect();
    assert_eq!(all, vec!["rust", "sqlite"]);
}

#[tokio::test]
async fn blank_titles_are_skipped_and_others_trimmed() {
    let pool = test_pool().await;
    let entry = published(&pool, "Tagged", "body").await;

    let outcome = db::attach_tags(&pool, &entry, &strings(&["  ", " rust "]))
        .await
        .unwrap();

    assert_eq!((outcome.new_tags, outcome.new_links), (1, 1));
    assert_eq!(db::tags_for(&pool, &entry).await.unwrap(), vec!["rust"]);
}

#[tokio::test]
async fn get_or_create_reports_creation() {
    let pool = test_pool().await;
    let mut conn = pool.acquire().await.unwrap();

    let created = db::get_or_create_tag(&mut conn, "rust").await.unwrap();
    let found = db::get_or_create_tag(&mut conn, "rust").await.unwrap();

    assert!(created.created);
    assert!(!found.created);
    assert_eq!(created.value, found.value);
}

#[tokio::test]
async fn tag_search_normalizes_the_query_and_orders_newest_first() {
    let pool = test_pool().await;
    let older = published(&pool, "Older", "body").await;
    let newer = draft(&pool, "Newer", "body").await;
    let other = published(&pool, "Other", "body").await;

    let tag = strings(&["rust-lang"]);
    db::attach_tags(&pool, &older, &tag).await.unwrap();
    db::attach_tags(&pool, &newer, &tag).await.unwrap();
    db::attach_tags(&pool, &other, &strings(&["misc"])).await.unwrap();

    let found = db::tag_search(&pool, "  Rust Lang ").await.unwrap();
    assert_eq!(titles(&found), vec!["Newer", "Older"]);
}

#[tokio::test]
async fn unknown_tag_is_not_found() {
    let pool = test_pool().await;

    let err = db::tag_search(&pool, "nothing").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn create_with_tags_rolls_back_on_conflict() {
    let pool = test_pool().await;
    published(&pool, "Same Title", "body").await;

    let err = db::create_entry_with_tags(&pool, "Same Title", "again", true, &strings(&["fresh"]))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
    assert!(db::list_tags(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn save_with_tags_adds_without_removing() {
    let pool = test_pool().await;
    let (entry, _) =
        db::create_entry_with_tags(&pool, "Post", "body", true, &strings(&["a"]))
            .await
            .unwrap();

    let (_, outcome) = db::save_entry_with_tags(&pool, entry.clone(), &strings(&["b"]))
        .await
        .unwrap();

    assert_eq!((outcome.new_tags, outcome.new_links), (1, 1));
    assert_eq!(db::tags_for(&pool, &entry).await.unwrap(), vec!["a", "b"]);
}
