//! # 글(Entry) 라우트 핸들러
//!
//! 글 목록/상세 조회와 관리자용 생성/수정/삭제를 처리하는 HTTP 핸들러 함수들입니다.
//!
//! ## 엔드포인트
//! - `GET    /api/v1/entries?q=&page=` → 공개 글 목록 (q가 있으면 전문검색)
//! - `GET    /api/v1/drafts?page=`     → 임시 글 목록 (관리자)
//! - `POST   /api/v1/entries`          → 새 글 작성 (관리자)
//! - `GET    /api/v1/entries/:slug`    → 글 상세 (임시 글은 관리자만)
//! - `PUT    /api/v1/entries/:slug`    → 글 수정 (관리자)
//! - `DELETE /api/v1/entries/:slug`    → 글 삭제 (관리자)
//!
//! ## 인증
//! 매개변수에 `AuthUser`가 있는 핸들러는 토큰이 없으면 실행되지 않습니다.
//! 추출기가 핸들러보다 먼저 실행되어 401을 돌려주기 때문입니다.

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    routes::{
        pagination::{paginate, Page, PageQuery},
        search::ListQuery,
        tags::normalize_tag_titles,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// 전역 변수 대신 이 구조체를 라우터에 넘겨 의존성을 주입합니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀 (내부적으로 Arc로 공유)
    pub pool: SqlitePool,
    /// JWT 토큰 서명용 비밀키
    pub jwt_secret: String,
    /// 관리자 비밀번호 해시 (Argon2id PHC 문자열)
    pub admin_password_hash: String,
    /// 업로드 요청에 필요한 `User-Agent` 값
    pub upload_client_id: String,
}

/// `GET /entries` — 공개 글 목록 (최신순).
///
/// `?q=`에 값이 있으면 전문검색 결과(관련도순)를 대신 돌려줍니다.
/// 공백뿐인 검색어도 검색으로 취급하므로 결과는 빈 목록입니다.
pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<Entry>>, AppError> {
    let entries = match query.q.as_deref() {
        Some(q) if !q.is_empty() => db::full_text_search(&state.pool, q).await?,
        _ => db::public_entries(&state.pool).await?,
    };

    Ok(Json(paginate(entries, query.page)))
}

/// `GET /drafts` — 임시 글 목록 (최신순). 관리자 전용.
pub async fn list_drafts(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Entry>>, AppError> {
    let entries = db::draft_entries(&state.pool).await?;
    Ok(Json(paginate(entries, query.page)))
}

/// `POST /entries` — 새 글을 작성합니다.
///
/// 글 저장, 검색 인덱스, 태그 연결이 한 트랜잭션으로 처리됩니다.
/// 성공 시 HTTP 201 Created와 함께 태그가 포함된 글을 돌려줍니다.
pub async fn create_entry(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<CreateEntryRequest>,
) -> Result<(StatusCode, Json<EntryDetail>), AppError> {
    // .unwrap_or_default(): None이면 빈 문자열 → 저장소의 검증에서 Validation 에러
    let title = req.title.unwrap_or_default();
    let content = req.content.unwrap_or_default();
    let tags = normalize_tag_titles(&req.tags);

    let (entry, _) =
        db::create_entry_with_tags(&state.pool, &title, &content, req.published, &tags).await?;
    let tags = db::tags_for(&state.pool, &entry).await?;

    Ok((StatusCode::CREATED, Json(EntryDetail { entry, tags })))
}

/// `GET /entries/:slug` — 글 상세.
///
/// 임시 글은 로그인한 경우에만 보입니다. 그 외에는 404입니다.
pub async fn get_entry(
    State(state): State<AppState>,
    auth: Option<AuthUser>,
    Path(slug): Path<String>,
) -> Result<Json<EntryDetail>, AppError> {
    let entry = find_visible_entry(&state.pool, &slug, auth.is_some()).await?;
    let tags = db::tags_for(&state.pool, &entry).await?;

    Ok(Json(EntryDetail { entry, tags }))
}

/// `PUT /entries/:slug` — 글을 수정합니다.
///
/// 제목/본문/공개 여부를 다시 설정하고 태그를 추가로 붙입니다.
/// 슬러그는 바뀌지 않으므로 수정 후에도 같은 URL로 접근할 수 있습니다.
pub async fn update_entry(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(slug): Path<String>,
    Json(req): Json<UpdateEntryRequest>,
) -> Result<Json<EntryDetail>, AppError> {
    let mut entry = db::get_entry_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::NotFound)?;

    entry.title = req.title.unwrap_or_default();
    entry.content = req.content.unwrap_or_default();
    entry.published = req.published;

    let tags = normalize_tag_titles(&req.tags);
    let (entry, _) = db::save_entry_with_tags(&state.pool, entry, &tags).await?;
    let tags = db::tags_for(&state.pool, &entry).await?;

    Ok(Json(EntryDetail { entry, tags }))
}

/// `DELETE /entries/:slug` — 글을 삭제합니다.
///
/// 검색 인덱스와 태그 연결도 함께 지워집니다.
/// 성공 시 HTTP 204 No Content를 반환합니다.
pub async fn delete_entry(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(slug): Path<String>,
) -> Result<StatusCode, AppError> {
    let entry = db::get_entry_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::NotFound)?;

    db::delete_entry(&state.pool, &entry).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// 슬러그로 글을 찾되, 로그인하지 않았다면 공개 글만 돌려줍니다.
pub(crate) async fn find_visible_entry(
    pool: &SqlitePool,
    slug: &str,
    authenticated: bool,
) -> Result<Entry, AppError> {
    db::get_entry_by_slug(pool, slug)
        .await?
        // .filter(): 조건을 만족하지 않으면 None으로 바꿉니다
        .filter(|entry| authenticated || entry.published)
        .ok_or(AppError::NotFound)
}
