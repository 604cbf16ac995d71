//! # 글(Entry) 저장소
//!
//! `entries` 테이블의 생성/수정/삭제와, 글과 함께 움직여야 하는 두 가지 파생 데이터를 관리합니다.
//!
//! ```text
//! entries (원본) ──1:1── entries_fts (검색 인덱스, rowid = entries.id)
//!        └──────1:N── entry_tags  (태그 연결)
//! ```
//!
//! ## 일관성 규칙
//! - 글을 저장하면 같은 트랜잭션 안에서 검색 인덱스 행을 만들거나 덮어씁니다
//!   (내용 = 제목 + "\n" + 본문)
//! - 글을 삭제하면 검색 인덱스 행과 태그 연결도 같은 트랜잭션 안에서 지웁니다
//! - 중간에 실패하면 트랜잭션이 롤백되어 "글만 저장되고 인덱스는 옛날 것" 같은 상태가 남지 않습니다
//!
//! ## 슬러그와 요약
//! - 슬러그는 비어 있을 때만 제목에서 새로 만듭니다. 제목을 고쳐도 URL은 그대로입니다.
//! - 요약은 저장할 때마다 본문에서 다시 뽑습니다.

use crate::db::tags::attach_in;
use crate::error::{conflict_on_unique, AppError};
use crate::models::{AttachOutcome, Entry};
use crate::services::{slugify, summarize};
// SqliteConnection: 트랜잭션 안에서 쓰는 단일 연결. `&mut *tx`로 얻습니다.
use sqlx::{SqliteConnection, SqlitePool};

/// ID로 글 하나를 조회합니다.
///
/// # 반환값
/// - `Ok(Some(Entry))`: 글을 찾은 경우
/// - `Ok(None)`: 해당 ID의 글이 없는 경우
pub async fn get_entry(pool: &SqlitePool, id: i64) -> Result<Option<Entry>, AppError> {
    let entry = sqlx::query_as::<_, Entry>(
        r#"
        SELECT id, title, slug, summary, content, published, timestamp
        FROM entries
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(entry)
}

/// 슬러그로 글 하나를 조회합니다. 상세/수정/삭제 화면의 URL이 슬러그 기반입니다.
pub async fn get_entry_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Entry>, AppError> {
    let entry = sqlx::query_as::<_, Entry>(
        r#"
        SELECT id, title, slug, summary, content, published, timestamp
        FROM entries
        WHERE slug = ?
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    Ok(entry)
}

/// 글 ID로 검색 인덱스에 저장된 텍스트를 조회합니다.
///
/// 인덱스 행이 없으면 `None`입니다 (삭제된 글 등).
pub async fn get_search_index(pool: &SqlitePool, id: i64) -> Result<Option<String>, AppError> {
    let row: Option<(String,)> = sqlx::query_as("SELECT content FROM entries_fts WHERE rowid = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|(content,)| content))
}

/// 새 글을 만듭니다.
///
/// ## 처리 흐름 (하나의 트랜잭션)
/// 1. 제목/본문이 비어 있으면 `Validation` 에러
/// 2. 제목에서 슬러그, 본문에서 요약을 만듭니다
/// 3. `entries`에 INSERT (슬러그 중복이면 `Conflict` 에러)
/// 4. 검색 인덱스 행을 만듭니다
pub async fn create_entry(
    pool: &SqlitePool,
    title: &str,
    content: &str,
    published: bool,
) -> Result<Entry, AppError> {
    let mut tx = pool.begin().await?;
    let entry = log_rollback("create entry", insert_entry(&mut *tx, title, content, published).await)?;
    tx.commit().await?;

    tracing::info!("Created entry {} ({})", entry.id, entry.slug);
    Ok(entry)
}

/// 새 글을 만들고 태그까지 한 트랜잭션으로 붙입니다.
///
/// 태그 붙이기가 실패하면 글 생성도 함께 롤백됩니다.
pub async fn create_entry_with_tags(
    pool: &SqlitePool,
    title: &str,
    content: &str,
    published: bool,
    tags: &[String],
) -> Result<(Entry, AttachOutcome), AppError> {
    let mut tx = pool.begin().await?;
    let entry = log_rollback("create entry", insert_entry(&mut *tx, title, content, published).await)?;
    let outcome = log_rollback("tag new entry", attach_in(&mut *tx, entry.id, tags).await)?;
    tx.commit().await?;

    tracing::info!(
        "Created entry {} ({}) with {} new tags, {} new links",
        entry.id,
        entry.slug,
        outcome.new_tags,
        outcome.new_links
    );
    Ok((entry, outcome))
}

/// 글을 저장합니다 (수정).
///
/// - 슬러그가 비어 있을 때만 제목에서 다시 만듭니다
/// - 요약은 항상 본문에서 다시 뽑습니다
/// - 검색 인덱스는 새 제목/본문으로 덮어씁니다 (없으면 새로 만듭니다)
///
/// # 에러
/// - `Validation`: 제목이나 본문이 빈 경우
/// - `NotFound`: 해당 ID의 글이 없는 경우
/// - `Conflict`: 새로 만든 슬러그가 다른 글과 겹치는 경우
pub async fn save_entry(pool: &SqlitePool, entry: Entry) -> Result<Entry, AppError> {
    let mut tx = pool.begin().await?;
    let saved = log_rollback("save entry", write_entry(&mut *tx, entry).await)?;
    tx.commit().await?;

    tracing::debug!("Saved entry {} ({})", saved.id, saved.slug);
    Ok(saved)
}

/// 글을 저장하고 태그를 다시 붙입니다 (수정 화면의 저장 버튼).
///
/// 태그는 추가만 합니다. 이미 붙어 있던 태그는 그대로 남습니다.
pub async fn save_entry_with_tags(
    pool: &SqlitePool,
    entry: Entry,
    tags: &[String],
) -> Result<(Entry, AttachOutcome), AppError> {
    let mut tx = pool.begin().await?;
    let saved = log_rollback("save entry", write_entry(&mut *tx, entry).await)?;
    let outcome = log_rollback("re-tag entry", attach_in(&mut *tx, saved.id, tags).await)?;
    tx.commit().await?;

    tracing::debug!("Saved entry {} ({})", saved.id, saved.slug);
    Ok((saved, outcome))
}

/// 글을 삭제합니다.
///
/// 글 행, 태그 연결, 검색 인덱스 행을 한 트랜잭션으로 지웁니다.
/// 태그(tags) 자체는 다른 글이 쓸 수 있으므로 남겨둡니다.
///
/// 검색 인덱스 행이 이미 없으면 에러 대신 경고 로그만 남깁니다.
///
/// # 에러
/// - `NotFound`: 해당 ID의 글이 없는 경우
pub async fn delete_entry(pool: &SqlitePool, entry: &Entry) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let links = sqlx::query("DELETE FROM entry_tags WHERE entry_id = ?")
        .bind(entry.id)
        .execute(&mut *tx)
        .await?;

    let deleted = sqlx::query("DELETE FROM entries WHERE id = ?")
        .bind(entry.id)
        .execute(&mut *tx)
        .await?;
    if deleted.rows_affected() == 0 {
        // tx가 commit 없이 drop되면 자동으로 롤백됩니다
        return Err(AppError::NotFound);
    }

    let index = sqlx::query("DELETE FROM entries_fts WHERE rowid = ?")
        .bind(entry.id)
        .execute(&mut *tx)
        .await?;
    if index.rows_affected() == 0 {
        tracing::warn!("Entry {} had no search index row", entry.id);
    }

    tx.commit().await?;

    tracing::info!(
        "Deleted entry {} ({}) and {} tag links",
        entry.id,
        entry.slug,
        links.rows_affected()
    );
    Ok(())
}

// ── 트랜잭션 내부에서 쓰는 함수들 ──
// 모두 `&mut SqliteConnection`을 받습니다. 호출하는 쪽이 트랜잭션을 열고 닫습니다.

/// 제목과 본문이 모두 비어 있지 않은지 확인합니다.
fn validate(title: &str, content: &str) -> Result<(), AppError> {
    if title.trim().is_empty() || content.trim().is_empty() {
        return Err(AppError::Validation(
            "Title and content are required".to_string(),
        ));
    }
    Ok(())
}

/// 실패한 결과를 로그로 남기고 그대로 돌려줍니다. 트랜잭션은 drop되면서 롤백됩니다.
fn log_rollback<T>(operation: &str, result: Result<T, AppError>) -> Result<T, AppError> {
    if let Err(e) = &result {
        tracing::warn!("Failed to {}, rolling back: {}", operation, e);
    }
    result
}

async fn insert_entry(
    conn: &mut SqliteConnection,
    title: &str,
    content: &str,
    published: bool,
) -> Result<Entry, AppError> {
    validate(title, content)?;

    let slug = slugify(title);
    let summary = summarize(content);

    // timestamp는 DB 기본값(생성 시각)을 씁니다
    let result = sqlx::query(
        r#"
        INSERT INTO entries (title, slug, summary, content, published)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(title)
    .bind(&slug)
    .bind(&summary)
    .bind(content)
    .bind(published)
    .execute(&mut *conn)
    .await
    .map_err(|e| conflict_on_unique(e, || format!("An entry with slug '{}' already exists", slug)))?;

    // INTEGER PRIMARY KEY는 rowid와 같으므로 last_insert_rowid()가 곧 글 ID입니다
    let entry = fetch_entry(conn, result.last_insert_rowid()).await?;
    update_search_index(conn, &entry).await?;

    Ok(entry)
}

async fn write_entry(conn: &mut SqliteConnection, mut entry: Entry) -> Result<Entry, AppError> {
    validate(&entry.title, &entry.content)?;

    if entry.slug.trim().is_empty() {
        entry.slug = slugify(&entry.title);
    }
    entry.summary = summarize(&entry.content);

    let result = sqlx::query(
        r#"
        UPDATE entries
        SET title = ?, slug = ?, summary = ?, content = ?, published = ?
        WHERE id = ?
        "#,
    )
    .bind(&entry.title)
    .bind(&entry.slug)
    .bind(&entry.summary)
    .bind(&entry.content)
    .bind(entry.published)
    .bind(entry.id)
    .execute(&mut *conn)
    .await
    .map_err(|e| {
        conflict_on_unique(e, || format!("An entry with slug '{}' already exists", entry.slug))
    })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    let saved = fetch_entry(conn, entry.id).await?;
    update_search_index(conn, &saved).await?;

    Ok(saved)
}

async fn fetch_entry(conn: &mut SqliteConnection, id: i64) -> Result<Entry, AppError> {
    sqlx::query_as::<_, Entry>(
        r#"
        SELECT id, title, slug, summary, content, published, timestamp
        FROM entries
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(AppError::NotFound)
}

/// 글의 검색 인덱스 행을 만들거나 덮어씁니다.
///
/// FTS5 가상 테이블도 일반 테이블처럼 rowid로 조회/UPDATE할 수 있습니다.
/// rowid를 글 ID와 같게 맞춰 두어 JOIN 한 번으로 글을 찾습니다.
async fn update_search_index(conn: &mut SqliteConnection, entry: &Entry) -> Result<(), AppError> {
    let search_content = format!("{}\n{}", entry.title, entry.content);

    let existing: Option<(i64,)> = sqlx::query_as("SELECT rowid FROM entries_fts WHERE rowid = ?")
        .bind(entry.id)
        .fetch_optional(&mut *conn)
        .await?;

    match existing {
        None => {
            sqlx::query("INSERT INTO entries_fts (rowid, content) VALUES (?, ?)")
                .bind(entry.id)
                .bind(&search_content)
                .execute(&mut *conn)
                .await?;
        }
        Some(_) => {
            sqlx::query("UPDATE entries_fts SET content = ? WHERE rowid = ?")
                .bind(&search_content)
                .bind(entry.id)
                .execute(&mut *conn)
                .await?;
        }
    }

    Ok(())
}
