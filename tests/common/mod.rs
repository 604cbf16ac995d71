//! 통합 테스트 공용 도우미

#![allow(dead_code)]

use geulbang::{db, models::Entry};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

/// 테스트마다 독립된 인메모리 DB를 만들고 마이그레이션까지 적용합니다.
///
/// `sqlite::memory:`는 연결마다 다른 DB가 되므로 연결을 하나로 묶어 둡니다.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");

    db::migrate(&pool).await.expect("migrations");
    pool
}

pub async fn published(pool: &SqlitePool, title: &str, content: &str) -> Entry {
    db::create_entry(pool, title, content, true)
        .await
        .expect("create published entry")
}

pub async fn draft(pool: &SqlitePool, title: &str, content: &str) -> Entry {
    db::create_entry(pool, title, content, false)
        .await
        .expect("create draft entry")
}

pub fn titles(entries: &[Entry]) -> Vec<&str> {
    entries.iter().map(|entry| entry.title.as_str()).collect()
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
