//! # 헬스체크(Health Check) 핸들러
//!
//! - `GET /api/v1/health` → `{ "status": "ok", "database": "ok" }`
//!
//! DB에 `SELECT 1`을 보내 연결 풀이 살아 있는지도 함께 확인합니다.

use crate::{error::AppError, routes::entries::AppState};
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// `GET /health` — 서버와 DB 상태를 확인합니다.
///
/// DB 쿼리가 실패하면 `AppError::Database` → HTTP 500이 됩니다.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    sqlx::query("SELECT 1").execute(&state.pool).await?;

    Ok(Json(json!({
        "status": "ok",
        "database": "ok"
    })))
}
