//! # 업로드 라우트 핸들러
//!
//! 로컬 업로드 스크립트가 마크다운 글을 올리는 엔드포인트입니다.
//!
//! - `POST /api/v1/upload` + `{ "title": "...", "content": "...", "published": true }`
//!
//! 관리자 토큰(`AuthUser`)과 업로드 클라이언트 식별 헤더(`UploadClient`)를 모두 요구합니다.
//! 어느 하나라도 틀리거나 필드가 빠지면 아무것도 저장하지 않고 거절합니다.

use crate::{
    db,
    error::AppError,
    middleware::auth::{AuthUser, UploadClient},
    models::*,
    routes::entries::AppState,
};
use axum::{extract::State, http::StatusCode, Json};

/// 업로드 상태 코드 (스크립트가 그대로 해석합니다)
/// - 201: 저장됨
/// - 400: 필드 누락
/// - 401: 토큰 문제
/// - 403: 알 수 없는 클라이언트
pub async fn upload_entry(
    State(state): State<AppState>,
    _auth: AuthUser,
    _client: UploadClient,
    Json(req): Json<UploadEntryRequest>,
) -> Result<(StatusCode, Json<Entry>), AppError> {
    // let-else: 세 필드가 모두 있어야 진행합니다
    let (Some(title), Some(content), Some(published)) = (req.title, req.content, req.published)
    else {
        return Err(AppError::Validation(
            "title, content and published are required".to_string(),
        ));
    };

    let entry = db::create_entry(&state.pool, &title, &content, published).await?;
    tracing::info!("Uploaded entry {} ({})", entry.id, entry.slug);

    Ok((StatusCode::CREATED, Json(entry)))
}
