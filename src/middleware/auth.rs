//! # 인증 게이트
//!
//! 1인 작성자 블로그이므로 계정은 관리자 하나뿐입니다.
//! 관리자 비밀번호(Argon2id 해시)로 로그인하면 JWT를 발급하고,
//! 글을 바꾸는 핸들러는 매개변수에 `AuthUser`를 받아 토큰을 강제합니다.
//!
//! ## 추출기(Extractor)
//! - `AuthUser`: `Authorization: Bearer <jwt>` 필수. 없거나 틀리면 401
//! - `Option<AuthUser>`: 헤더가 없으면 `None` (공개 화면에서 임시 글 노출 여부 판단용)
//! - `UploadClient`: `User-Agent`가 설정된 업로드 클라이언트 값과 같아야 함. 다르면 403

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{
        header::{AUTHORIZATION, USER_AGENT},
        request::Parts,
        StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;
use crate::routes::entries::AppState;

/// 토큰의 subject. 관리자 하나뿐이라 고정값입니다.
pub const ADMIN_SUBJECT: &str = "admin";

/// 로그인 토큰 유효 시간
const ADMIN_TOKEN_HOURS: i64 = 12;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

/// 인증된 요청임을 나타내는 값
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub subject: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingToken)?;

        authenticate(auth_header, &state.jwt_secret)
    }
}

/// `Option<AuthUser>`로 받으면 헤더가 없을 때 거절 대신 `None`이 됩니다.
/// 헤더가 있는데 토큰이 틀렸다면 여전히 401입니다.
impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        let Some(value) = parts.headers.get(AUTHORIZATION) else {
            return Ok(None);
        };
        let auth_header = value.to_str().map_err(|_| AuthError::MalformedHeader)?;

        authenticate(auth_header, &state.jwt_secret).map(Some)
    }
}

fn authenticate(auth_header: &str, secret: &str) -> Result<AuthUser, AuthError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MalformedHeader)?;

    let claims = verify_admin_token(token, secret)?;

    Ok(AuthUser {
        subject: claims.sub,
    })
}

/// 업로드 스크립트에서 온 요청임을 나타내는 값
///
/// 업로드 엔드포인트는 `AuthUser`와 이 추출기를 함께 요구합니다.
#[derive(Debug, Clone)]
pub struct UploadClient;

impl FromRequestParts<AppState> for UploadClient {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let client = parts
            .headers
            .get(USER_AGENT)
            .and_then(|value| value.to_str().ok());

        match client {
            Some(id) if id == state.upload_client_id => Ok(UploadClient),
            other => {
                tracing::warn!("Rejected upload from client {:?}", other);
                Err(AppError::Forbidden("Unknown upload client".to_string()))
            }
        }
    }
}

/// 토큰 검사 실패 사유. 모두 401이며 `code`로 구분합니다.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Log in as the blog admin first")]
    MissingToken,
    #[error("Authorization header must be `Bearer <token>`")]
    MalformedHeader,
    #[error("Login token is not valid")]
    InvalidToken,
    #[error("Login token has expired, log in again")]
    ExpiredToken,
    /// 서명은 맞지만 관리자 토큰이 아닌 경우
    #[error("Only the blog admin can do this")]
    NotAdmin,
}

impl AuthError {
    fn code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "missing_token",
            AuthError::MalformedHeader => "malformed_header",
            AuthError::InvalidToken => "invalid_token",
            AuthError::ExpiredToken => "expired_token",
            AuthError::NotAdmin => "not_admin",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("Rejected admin request: {}", self);

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.to_string()
            }
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

/// 관리자 로그인 토큰을 발급합니다. subject는 항상 `ADMIN_SUBJECT`입니다.
pub fn create_admin_token(secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: ADMIN_SUBJECT.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(ADMIN_TOKEN_HOURS)).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// 관리자 토큰을 검증합니다.
///
/// 서명과 만료 외에 `sub == ADMIN_SUBJECT`도 확인합니다.
/// 같은 비밀키로 서명된 다른 용도의 토큰은 `NotAdmin`입니다.
pub fn verify_admin_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp", "sub"]);
    validation.sub = Some(ADMIN_SUBJECT.to_string());

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        ErrorKind::InvalidSubject => AuthError::NotAdmin,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

/// 비밀번호를 Argon2id PHC 문자열로 해싱합니다 (`geulbang hash-password`).
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?
        .to_string();

    Ok(hash)
}

/// 입력한 비밀번호가 저장된 해시와 맞는지 확인합니다.
///
/// 해시 문자열 자체가 깨져 있으면 설정 오류이므로 `Internal` 에러입니다.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AppError::Internal(format!("Password hash parse error: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
