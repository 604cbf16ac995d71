//! # 태그 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/tags | `list_tags` | 전체 태그 이름 |
//! | GET | /api/v1/tags/:tag | `entries_by_tag` | 태그가 붙은 글 목록 |
//! | GET | /api/v1/entries/:slug/tags | `get_entry_tags` | 글의 태그 목록 |
//! | POST | /api/v1/entries/:slug/tags | `attach_tags` | 글에 태그 붙이기 (관리자) |
//!
//! 태그 이름은 저장하기 전에 슬러그 규칙으로 정규화합니다.
//! 예: `"Rust Lang"` → `"rust-lang"`. 태그 검색도 같은 규칙을 쓰므로 항상 일치합니다.

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    routes::{
        entries::{find_visible_entry, AppState},
        pagination::{paginate, Page, PageQuery},
    },
    services::slugify,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

/// 요청 본문의 태그 이름들을 저장용으로 정규화합니다. 빈 이름은 버립니다.
pub(crate) fn normalize_tag_titles(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|title| title.trim())
        .filter(|title| !title.is_empty())
        .map(slugify)
        .collect()
}

/// `GET /tags` → `{ "tags": ["rust", "sqlite", ...] }`
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let tags: Vec<String> = db::list_tags(&state.pool)
        .await?
        .into_iter()
        .map(|tag| tag.title)
        .collect();

    Ok(Json(json!({ "tags": tags })))
}

/// `GET /tags/:tag` — 태그가 붙은 글 목록 (최신순).
///
/// 로그인하지 않았다면 임시 글은 빠집니다. 없는 태그면 404입니다.
pub async fn entries_by_tag(
    State(state): State<AppState>,
    auth: Option<AuthUser>,
    Path(tag): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Entry>>, AppError> {
    let mut entries = db::tag_search(&state.pool, &tag).await?;
    if auth.is_none() {
        // retain(): 조건을 만족하는 항목만 남깁니다 (제자리 필터링)
        entries.retain(|entry| entry.published);
    }

    Ok(Json(paginate(entries, query.page)))
}

/// `GET /entries/:slug/tags` → `{ "tags": [...] }` (붙인 순서)
pub async fn get_entry_tags(
    State(state): State<AppState>,
    auth: Option<AuthUser>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, AppError> {
    let entry = find_visible_entry(&state.pool, &slug, auth.is_some()).await?;
    let tags = db::tags_for(&state.pool, &entry).await?;

    Ok(Json(json!({ "tags": tags })))
}

/// `POST /entries/:slug/tags` + `{ "tags": ["..."] }` → `{ "new_tags": n, "new_links": m }`
///
/// 이미 붙어 있는 태그는 다시 만들지 않습니다. 같은 요청을 두 번 보내면
/// 두 번째 응답은 `{ "new_tags": 0, "new_links": 0 }`입니다.
pub async fn attach_tags(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(slug): Path<String>,
    Json(req): Json<AttachTagsRequest>,
) -> Result<Json<AttachOutcome>, AppError> {
    let entry = db::get_entry_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::NotFound)?;

    let titles = normalize_tag_titles(&req.tags);
    let outcome = db::attach_tags(&state.pool, &entry, &titles).await?;

    Ok(Json(outcome))
}
