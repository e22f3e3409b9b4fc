// src/handlers/users.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, pagination::PaginationParams},
    config::AppState,
    middleware::rbac::{AdminOnly, RequireRole, Staff},
    models::auth::{CreateUserPayload, UpdateUserPayload},
};

// POST /users — rota pública de auto-registro
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Usuário criado com sucesso.", body = crate::models::auth::User),
        (status = 400, description = "Dados inválidos."),
        (status = 409, description = "Já existe um usuário com este e-mail.")
    )
)]
pub async fn create(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = app_state.user_service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

// GET /users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(PaginationParams),
    responses(
        (status = 200, description = "Lista de usuários retornada com sucesso.",
         body = crate::common::pagination::Paginated<crate::models::auth::User>)
    ),
    security(("api_jwt" = []))
)]
pub async fn find_all(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = app_state.user_service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(page)))
}

// GET /users/{id}
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Usuário encontrado com sucesso.", body = crate::models::auth::User),
        (status = 404, description = "Usuário não encontrado.")
    ),
    security(("api_jwt" = []))
)]
pub async fn find_one(
    State(app_state): State<AppState>,
    _guard: RequireRole<Staff>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state.user_service.find_one(id).await?;
    Ok((StatusCode::OK, Json(user)))
}

// PUT /users/{id}
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    request_body = UpdateUserPayload,
    responses(
        (status = 200, description = "Usuário atualizado com sucesso.", body = crate::models::auth::User),
        (status = 400, description = "Dados inválidos."),
        (status = 404, description = "Usuário não encontrado.")
    ),
    security(("api_jwt" = []))
)]
pub async fn update(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = app_state.user_service.update(id, &payload).await?;
    Ok((StatusCode::OK, Json(user)))
}

// DELETE /users/{id}
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 204, description = "Usuário removido com sucesso."),
        (status = 404, description = "Usuário não encontrado.")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.user_service.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
