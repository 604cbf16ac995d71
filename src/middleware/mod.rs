//! # 미들웨어 모듈
//!
//! 핸들러 앞단에서 요청을 검사하는 추출기(Extractor)들입니다.
//! - `auth`: 관리자 토큰 검사, 업로드 클라이언트 검사, 비밀번호 해시

pub mod auth;
