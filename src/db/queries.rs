//! # 조회 서비스
//!
//! 화면에 보여줄 글 목록을 만드는 읽기 전용 쿼리들입니다.
//! 페이지 나누기는 하지 않습니다. 전체 결과를 돌려주고 호출하는 쪽이 자릅니다.
//!
//! ## FTS5 전문검색
//! `entries_fts`는 SQLite FTS5 가상 테이블이고, rowid가 `entries.id`와 같습니다.
//! `MATCH`로 역색인을 검색하고 `rank`(BM25 점수)로 정렬합니다.
//! rank 값이 작을수록(더 큰 음수) 관련도가 높습니다.

use crate::db::tags::search_by_tag;
use crate::error::AppError;
use crate::models::Entry;
use crate::services::{fts_match_expression, search_terms};
use sqlx::SqlitePool;

/// 공개된 글 목록 (최신순)
pub async fn public_entries(pool: &SqlitePool) -> Result<Vec<Entry>, AppError> {
    entries_by_published(pool, true).await
}

/// 임시 글 목록 (최신순)
pub async fn draft_entries(pool: &SqlitePool) -> Result<Vec<Entry>, AppError> {
    entries_by_published(pool, false).await
}

async fn entries_by_published(pool: &SqlitePool, published: bool) -> Result<Vec<Entry>, AppError> {
    let entries = sqlx::query_as::<_, Entry>(
        r#"
        SELECT id, title, slug, summary, content, published, timestamp
        FROM entries
        WHERE published = ?
        ORDER BY timestamp DESC, id DESC
        "#,
        // ↑ 같은 밀리초에 만든 글은 id가 큰 쪽이 더 최신입니다
    )
    .bind(published)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

/// 공개된 글에서 전문검색을 수행합니다 (관련도순).
///
/// 검색어를 공백으로 나눠 빈 토큰을 버리고, 남은 토큰이 없으면
/// 에러가 아니라 빈 목록을 돌려줍니다.
/// 임시 글은 검색어가 일치해도 결과에 나오지 않습니다.
///
/// ## SQL 쿼리 설명
/// ```sql
/// FROM entries_fts                       -- FTS5 가상 테이블에서 검색
/// JOIN entries e ON e.id = ...rowid      -- 글 행과 연결
/// WHERE entries_fts MATCH ?              -- 모든 토큰을 포함하는 글 (암묵적 AND)
///   AND e.published = 1                  -- 공개 글만
/// ORDER BY entries_fts.rank              -- 관련도순
/// ```
pub async fn full_text_search(pool: &SqlitePool, query: &str) -> Result<Vec<Entry>, AppError> {
    let terms = search_terms(query);
    if terms.is_empty() {
        return Ok(Vec::new());
    }

    let expression = fts_match_expression(&terms);
    tracing::debug!("Full-text search: {}", expression);

    let entries = sqlx::query_as::<_, Entry>(
        r#"
        SELECT e.id, e.title, e.slug, e.summary, e.content, e.published, e.timestamp
        FROM entries_fts
        JOIN entries e ON e.id = entries_fts.rowid
        WHERE entries_fts MATCH ?
          AND e.published = 1
        ORDER BY entries_fts.rank
        "#,
    )
    .bind(&expression)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

/// 태그로 글을 찾습니다. 태그 저장소의 `search_by_tag`에 그대로 맡깁니다.
pub async fn tag_search(pool: &SqlitePool, tag_title: &str) -> Result<Vec<Entry>, AppError> {
    search_by_tag(pool, tag_title).await
}
