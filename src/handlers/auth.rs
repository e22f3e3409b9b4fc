// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{LoginPayload, RefreshTokenPayload},
};

// POST /auth/login
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login realizado com sucesso. Retorna tokens JWT.",
         body = crate::models::auth::TokenPair),
        (status = 400, description = "Dados inválidos no payload."),
        (status = 401, description = "Credenciais inválidas.")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // None vira 401; o serviço não distingue e-mail desconhecido de senha errada.
    let user = app_state
        .auth_service
        .validate_user(&payload.email, &payload.password)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let tokens = app_state.auth_service.login(&user)?;
    Ok((StatusCode::OK, Json(tokens)))
}

// POST /auth/refresh-token
#[utoipa::path(
    post,
    path = "/auth/refresh-token",
    tag = "Auth",
    request_body = RefreshTokenPayload,
    responses(
        (status = 200, description = "Access token renovado com sucesso.",
         body = crate::models::auth::AccessToken),
        (status = 400, description = "Dados inválidos no payload."),
        (status = 401, description = "Refresh token inválido ou expirado.")
    )
)]
pub async fn refresh_token(
    State(app_state): State<AppState>,
    Json(payload): Json<RefreshTokenPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let token = app_state.auth_service.refresh_token(&payload.refresh_token)?;
    Ok((StatusCode::OK, Json(token)))
}
