use crate::{
    error::AppError,
    middleware::auth::{create_admin_token, verify_password},
    models::auth::*,
    routes::entries::AppState,
};
use axum::{extract::State, Json};

/// `POST /auth/login` + `{ "password": "..." }` → `{ "access_token": "..." }`
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if !verify_password(&req.password, &state.admin_password_hash)? {
        tracing::warn!("Rejected login with incorrect password");
        return Err(AppError::Unauthorized("Incorrect password".to_string()));
    }

    let access_token = create_admin_token(&state.jwt_secret)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

    tracing::info!("Admin logged in");
    Ok(Json(LoginResponse { access_token }))
}
