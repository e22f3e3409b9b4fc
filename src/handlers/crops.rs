// src/handlers/crops.rs

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
    middleware::rbac::{AdminGestor, AdminOnly, RequireRole, Staff},
    models::crop::{CreateCropPayload, UpdateCropPayload},
};

// POST /crops
#[utoipa::path(
    post,
    path = "/crops",
    tag = "Crops",
    request_body = CreateCropPayload,
    responses(
        (status = 201, description = "Cultura criada com sucesso.", body = crate::models::crop::Crop),
        (status = 400, description = "Dados inválidos."),
        (status = 409, description = "Já existe uma cultura com esse nome.")
    ),
    security(("api_jwt" = []))
)]
pub async fn create(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminGestor>,
    Json(payload): Json<CreateCropPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let crop = app_state.crop_service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(crop)))
}

// GET /crops
#[utoipa::path(
    get,
    path = "/crops",
    tag = "Crops",
    params(PaginationParams),
    responses(
        (status = 200, description = "Lista retornada com sucesso.",
         body = crate::common::pagination::Paginated<crate::models::crop::CropWithHarvests>)
    ),
    security(("api_jwt" = []))
)]
pub async fn find_all(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = app_state.crop_service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(page)))
}

// GET /crops/{id}
#[utoipa::path(
    get,
    path = "/crops/{id}",
    tag = "Crops",
    params(("id" = Uuid, Path, description = "ID da cultura")),
    responses(
        (status = 200, description = "Cultura encontrada com sucesso.",
         body = crate::models::crop::CropWithHarvests),
        (status = 404, description = "Cultura não encontrada.")
    ),
    security(("api_jwt" = []))
)]
pub async fn find_one(
    State(app_state): State<AppState>,
    _guard: RequireRole<Staff>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let crop = app_state.crop_service.find_one(id).await?;
    Ok((StatusCode::OK, Json(crop)))
}

// PUT /crops/{id}
#[utoipa::path(
    put,
    path = "/crops/{id}",
    tag = "Crops",
    params(("id" = Uuid, Path, description = "ID da cultura")),
    request_body = UpdateCropPayload,
    responses(
        (status = 200, description = "Cultura atualizada com sucesso.", body = crate::models::crop::Crop),
        (status = 404, description = "Cultura não encontrada."),
        (status = 409, description = "Já existe uma cultura com esse nome.")
    ),
    security(("api_jwt" = []))
)]
pub async fn update(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminGestor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCropPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let crop = app_state.crop_service.update(id, &payload).await?;
    Ok((StatusCode::OK, Json(crop)))
}

// DELETE /crops/{id}
#[utoipa::path(
    delete,
    path = "/crops/{id}",
    tag = "Crops",
    params(("id" = Uuid, Path, description = "ID da cultura")),
    responses(
        (status = 204, description = "Cultura removida com sucesso."),
        (status = 404, description = "Cultura não encontrada.")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminGestor>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.crop_service.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
