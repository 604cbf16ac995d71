//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `JWT_SECRET`: 로그인 토큰 서명에 사용할 비밀키 (필수)
//! - `ADMIN_PASSWORD_HASH`: 관리자 비밀번호의 Argon2id 해시 (필수)
//! - `UPLOAD_CLIENT_ID`: 업로드 스크립트가 보내는 `User-Agent` 값
//! - `STATIC_DIR`: 프론트엔드 정적 파일 디렉토리 (선택)
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호

use std::env;

/// 업로드 클라이언트 식별값의 기본값
pub const DEFAULT_UPLOAD_CLIENT_ID: &str = "geulbang/post-uploader";

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후,
/// 필요한 값만 `AppState`로 옮겨 핸들러에서 공유합니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/geulbang.db")
    pub database_url: String,
    /// JWT 토큰 서명/검증에 사용하는 비밀키
    pub jwt_secret: String,
    /// 관리자 비밀번호 해시 (PHC 문자열, `geulbang hash-password`로 생성)
    pub admin_password_hash: String,
    /// 업로드 요청을 허용할 `User-Agent` 값
    pub upload_client_id: String,
    /// 정적 파일 디렉토리. None이면 API만 서빙합니다.
    pub static_dir: Option<String>,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3000)
    pub port: u16,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`, `JWT_SECRET`, `ADMIN_PASSWORD_HASH`는 필수이며, 없으면 에러가 발생합니다.
    /// 나머지 설정은 기본값이 있어 환경변수가 없어도 동작합니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            jwt_secret: env::var("JWT_SECRET")?,
            admin_password_hash: env::var("ADMIN_PASSWORD_HASH")?,

            upload_client_id: env::var("UPLOAD_CLIENT_ID")
                .unwrap_or_else(|_| DEFAULT_UPLOAD_CLIENT_ID.to_string()),
            // .ok(): 변수가 없으면 None
            // .filter(): 빈 문자열로 설정된 경우도 "없음"으로 취급
            static_dir: env::var("STATIC_DIR").ok().filter(|dir| !dir.trim().is_empty()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        })
    }
}
