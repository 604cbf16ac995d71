//! # 전문검색 API 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | GET | /api/v1/search?q=키워드&page=1 | 공개 글 전문검색 |
//!
//! ## 사용 예시
//! ```text
//! GET /api/v1/search?q=rust          ← "rust"가 들어간 공개 글
//! GET /api/v1/search?q=rust+async    ← 공백은 AND 검색
//! GET /api/v1/search?q=%20%20        ← 공백뿐인 검색어는 빈 목록 (에러 아님)
//! ```

use crate::{
    db,
    error::AppError,
    models::Entry,
    routes::{
        entries::AppState,
        pagination::{paginate, Page},
    },
};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

/// 목록/검색 쿼리 파라미터 (`?q=키워드&page=2`)
///
/// 둘 다 선택 항목입니다. `q`가 없으면 빈 검색어로 취급합니다.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub page: Option<usize>,
}

/// `GET /search?q=키워드` → `{ "entries": [...], "page": 1, "has_next": false }`
///
/// 관련도순으로 정렬된 공개 글만 돌려줍니다.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<Entry>>, AppError> {
    let q = query.q.unwrap_or_default();
    let entries = db::full_text_search(&state.pool, &q).await?;

    Ok(Json(paginate(entries, query.page)))
}
