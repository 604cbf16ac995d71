//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! 각 하위 모듈은 특정 도메인의 데이터 타입을 담당합니다:
//! - `auth`: 관리자 로그인 요청/응답
//! - `entry`: 블로그 글(Entry)과 생성/수정/업로드 요청
//! - `tag`: 태그, 글-태그 연결, get-or-create 결과
//!
//! `pub use X::*;`로 재공개하여 `crate::models::Entry`처럼 짧게 접근할 수 있습니다.

pub mod auth;
pub mod entry;
pub mod tag;

pub use auth::*;
pub use entry::*;
pub use tag::*;
