//! # 에러 처리 모듈
//!
//! 저장소(db/)와 라우트(routes/)에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 검증 실패, 없음, 슬러그 충돌 등 모든 에러 종류를 하나로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//! - `conflict_on_unique`: SQLite UNIQUE 제약 위반을 `Conflict`로 바꿔주는 도우미

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 각 에러 variant는 적절한 HTTP 상태 코드와 메시지로 변환됩니다.
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 글/태그/검색 인덱스를 찾을 수 없음 (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// 필수 입력값 누락 또는 빈 값 (HTTP 400)
    /// 예: 제목이나 본문 없이 글을 만들거나 수정하려는 경우
    #[error("Validation failed: {0}")]
    Validation(String),

    /// 슬러그 중복 등 유일성 제약 충돌 (HTTP 409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 로그인 실패 또는 토큰 문제 (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 인증은 되었지만 허용되지 않은 클라이언트 (HTTP 403)
    /// 업로드 엔드포인트의 클라이언트 식별 헤더 검사에서 사용합니다.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: sqlx::Error → AppError::Database 자동 변환 (`?` 연산자에서 사용)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// SQLite UNIQUE 제약 위반이면 `AppError::Conflict`로, 그 외에는 `Database`로 바꿉니다.
///
/// 글 저장 시 `slug` 컬럼의 UNIQUE 제약이 깨지는 경우에 사용합니다.
/// `map_err(|e| conflict_on_unique(e, || format!(...)))` 형태로 씁니다.
pub fn conflict_on_unique(err: sqlx::Error, message: impl FnOnce() -> String) -> AppError {
    // as_database_error(): 드라이버가 돌려준 DB 에러라면 Some(&dyn DatabaseError)
    let is_unique = err
        .as_database_error()
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false);

    if is_unique {
        AppError::Conflict(message())
    } else {
        AppError::Database(err)
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, Internal)는 실제 에러 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::Validation(ref msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            AppError::Unauthorized(ref msg) => {
                (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone())
            }
            AppError::Forbidden(ref msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
        };

        // 결과: { "error": { "code": "not_found", "message": "Resource not found" } }
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
