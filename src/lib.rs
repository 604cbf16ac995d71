//! # 글방(geulbang) 블로그 서버 라이브러리
//!
//! 바이너리(`main.rs`)와 통합 테스트(`tests/`)가 같은 코드를 쓰도록
//! 모듈과 라우터 조립 함수를 라이브러리로 공개합니다.
//!
//! 계층 구조:
//! - `routes` → HTTP 요청/응답 (핸들러)
//! - `db` → 저장소와 조회 서비스 (SQLite + FTS5)
//! - `services` → 순수 텍스트 처리 (슬러그, 요약, 검색어)
//! - `middleware` → 인증 추출기와 JWT/비밀번호 유틸리티

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use axum::{
    routing::{get, post},
    Router,
};
use routes::*;
use std::path::Path;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// 전체 HTTP 라우터를 조립합니다.
///
/// API는 `/api/v1` 아래에 모이고, `static_dir`이 주어지면
/// 나머지 경로는 정적 프론트엔드(SPA)로 넘어갑니다.
pub fn app(state: AppState, static_dir: Option<&str>) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/auth/login", post(routes::auth::login))
        // 글(Entry) API
        .route("/entries", get(list_entries).post(create_entry))
        .route(
            "/entries/{slug}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
        .route("/entries/{slug}/tags", get(get_entry_tags).post(attach_tags))
        .route("/drafts", get(list_drafts))
        // 검색/태그 API
        .route("/search", get(search))
        .route("/tags", get(list_tags))
        .route("/tags/{tag}", get(entries_by_tag))
        // 업로드 스크립트 전용
        .route("/upload", post(upload_entry))
        .with_state(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new().nest("/api/v1", api_routes);

    // 정적 파일 디렉토리가 있을 때만 SPA fallback을 붙입니다
    let router = match static_dir {
        Some(dir) if Path::new(dir).exists() => {
            tracing::info!("Serving static files from {}", dir);
            let index = Path::new(dir).join("index.html");
            router.fallback_service(ServeDir::new(dir).not_found_service(ServeFile::new(index)))
        }
        Some(dir) => {
            tracing::warn!("Static directory {} not found, serving API only", dir);
            router
        }
        None => router,
    };

    router.layer(cors).layer(TraceLayer::new_for_http())
}
