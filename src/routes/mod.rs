//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `auth`: 관리자 로그인
//! - `entries`: 글 목록/상세/작성/수정/삭제, 공유 상태(`AppState`)
//! - `health`: 서버 상태 확인
//! - `pagination`: 목록 응답 페이지 나누기
//! - `search`: 전문검색
//! - `tags`: 태그 목록, 태그별 글, 글에 태그 붙이기
//! - `upload`: 업로드 스크립트용 글 등록

pub mod auth;
pub mod entries;
pub mod health;
pub mod pagination;
pub mod search;
pub mod tags;
pub mod upload;

pub use entries::*;
pub use health::*;
pub use search::*;
pub use tags::*;
pub use upload::*;
