//! # 태그 저장소
//!
//! 태그와 글-태그 관계를 관리하는 SQL 쿼리 함수들입니다.
//!
//! ## 테이블 구조
//! - `tags`: 태그 엔티티 (id, title) — title은 유일
//! - `entry_tags`: 글과 태그의 다대다(N:M) 관계 테이블. `id` 순서 = 연결된 순서
//!
//! ```text
//! tags ←── entry_tags ──→ entries
//!  (1)        (N:M)          (1)
//! ```
//!
//! ## get-or-create
//! 태그와 연결은 "있으면 가져오고, 없으면 만든다" 방식으로 다룹니다.
//! `INSERT OR IGNORE`의 영향받은 행 수로 이번 호출에서 새로 만들었는지 판단하고,
//! 결과를 `GetOrCreate { created, value }`로 돌려줍니다.

use crate::error::AppError;
use crate::models::{AttachOutcome, Entry, EntryTag, GetOrCreate, Tag};
use crate::services::slugify;
use sqlx::{SqliteConnection, SqlitePool};

/// 모든 태그를 이름순으로 조회합니다.
pub async fn list_tags(pool: &SqlitePool) -> Result<Vec<Tag>, AppError> {
    let tags = sqlx::query_as::<_, Tag>("SELECT id, title FROM tags ORDER BY title")
        .fetch_all(pool)
        .await?;

    Ok(tags)
}

/// 제목으로 태그를 찾고, 없으면 새로 만듭니다.
///
/// `INSERT OR IGNORE`: title의 UNIQUE 제약에 걸리면 에러 없이 무시합니다.
/// rows_affected()가 1이면 이번에 새로 만든 것, 0이면 이미 있던 것입니다.
pub async fn get_or_create_tag(
    conn: &mut SqliteConnection,
    title: &str,
) -> Result<GetOrCreate<Tag>, AppError> {
    let inserted = sqlx::query("INSERT OR IGNORE INTO tags (title) VALUES (?)")
        .bind(title)
        .execute(&mut *conn)
        .await?;

    let tag = sqlx::query_as::<_, Tag>("SELECT id, title FROM tags WHERE title = ?")
        .bind(title)
        .fetch_one(&mut *conn)
        .await?;

    Ok(GetOrCreate {
        created: inserted.rows_affected() > 0,
        value: tag,
    })
}

/// 글-태그 연결을 찾고, 없으면 새로 만듭니다.
///
/// (entry_id, tag_id)의 UNIQUE 제약 덕분에 같은 쌍은 한 번만 저장됩니다.
pub async fn get_or_create_link(
    conn: &mut SqliteConnection,
    entry_id: i64,
    tag_id: i64,
) -> Result<GetOrCreate<EntryTag>, AppError> {
    let inserted = sqlx::query("INSERT OR IGNORE INTO entry_tags (entry_id, tag_id) VALUES (?, ?)")
        .bind(entry_id)
        .bind(tag_id)
        .execute(&mut *conn)
        .await?;

    let link = sqlx::query_as::<_, EntryTag>(
        "SELECT id, entry_id, tag_id FROM entry_tags WHERE entry_id = ? AND tag_id = ?",
    )
    .bind(entry_id)
    .bind(tag_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(GetOrCreate {
        created: inserted.rows_affected() > 0,
        value: link,
    })
}

/// 글에 태그들을 붙입니다.
///
/// 각 태그 이름은 앞뒤 공백만 잘라서 그대로 씁니다. 잘라낸 결과가 빈 이름은 건너뜁니다.
/// (URL용 정규화는 호출하는 쪽의 몫입니다.)
///
/// ## 반환값
/// 새로 만든 태그 수와 새로 만든 연결 수.
/// 같은 이름들로 다시 호출하면 둘 다 0입니다.
pub async fn attach_tags(
    pool: &SqlitePool,
    entry: &Entry,
    titles: &[String],
) -> Result<AttachOutcome, AppError> {
    let mut tx = pool.begin().await?;
    let outcome = attach_in(&mut *tx, entry.id, titles).await?;
    tx.commit().await?;

    tracing::debug!(
        "Tagged entry {}: {} new tags, {} new links",
        entry.id,
        outcome.new_tags,
        outcome.new_links
    );
    Ok(outcome)
}

/// 트랜잭션 안에서 태그를 붙입니다. 글 저장소가 글 저장과 같은 트랜잭션으로 부릅니다.
pub(crate) async fn attach_in(
    conn: &mut SqliteConnection,
    entry_id: i64,
    titles: &[String],
) -> Result<AttachOutcome, AppError> {
    let mut outcome = AttachOutcome::default();

    for raw in titles {
        let title = raw.trim();
        if title.is_empty() {
            continue;
        }

        let tag = get_or_create_tag(conn, title).await?;
        if tag.created {
            outcome.new_tags += 1;
        }

        let link = get_or_create_link(conn, entry_id, tag.value.id).await?;
        if link.created {
            outcome.new_links += 1;
        }
    }

    Ok(outcome)
}

/// 글에 붙은 태그 이름들을 연결된 순서대로 조회합니다.
pub async fn tags_for(pool: &SqlitePool, entry: &Entry) -> Result<Vec<String>, AppError> {
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"
        SELECT t.title
        FROM entry_tags et
        JOIN tags t ON t.id = et.tag_id
        WHERE et.entry_id = ?
        ORDER BY et.id
        "#,
    )
    .bind(entry.id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(title,)| title).collect())
}

/// 태그로 글을 찾습니다 (최신순).
///
/// 검색어는 슬러그와 같은 규칙(소문자 + 비단어 문자 구간 → `-`)으로 정규화한 뒤
/// 태그 이름과 정확히 비교합니다. 공개/임시 글을 구분하지 않습니다.
///
/// # 에러
/// - `NotFound`: 정규화한 이름의 태그가 없는 경우
pub async fn search_by_tag(pool: &SqlitePool, tag_title: &str) -> Result<Vec<Entry>, AppError> {
    let normalized = slugify(tag_title.trim());

    let tag = sqlx::query_as::<_, Tag>("SELECT id, title FROM tags WHERE title = ?")
        .bind(&normalized)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound)?;

    let entries = sqlx::query_as::<_, Entry>(
        r#"
        SELECT e.id, e.title, e.slug, e.summary, e.content, e.published, e.timestamp
        FROM entries e
        JOIN entry_tags et ON et.entry_id = e.id
        WHERE et.tag_id = ?
        ORDER BY e.timestamp DESC, e.id DESC
        "#,
    )
    .bind(tag.id)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}
