//! # 서비스 모듈
//!
//! DB와 HTTP에 의존하지 않는 도메인 규칙을 모아둔 모듈입니다.
//! - `text`: 슬러그/요약/검색어 처리

pub mod text;

pub use text::*;
