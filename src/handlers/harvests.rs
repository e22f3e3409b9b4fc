// src/handlers/harvests.rs

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
    models::harvest::{CreateHarvestPayload, UpdateHarvestPayload},
};

// POST /harvests
#[utoipa::path(
    post,
    path = "/harvests",
    tag = "Harvests",
    request_body = CreateHarvestPayload,
    responses(
        (status = 201, description = "Safra criada com sucesso.", body = crate::models::harvest::Harvest),
        (status = 400, description = "Alguma(s) cultura(s) informada(s) não foram encontradas."),
        (status = 404, description = "Fazenda não encontrada."),
        (status = 409, description = "Já existe uma safra com esse nome para esta fazenda.")
    ),
    security(("api_jwt" = []))
)]
pub async fn create(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminGestor>,
    Json(payload): Json<CreateHarvestPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let harvest = app_state.harvest_service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(harvest)))
}

// GET /harvests
#[utoipa::path(
    get,
    path = "/harvests",
    tag = "Harvests",
    params(PaginationParams),
    responses(
        (status = 200, description = "Lista retornada com sucesso.",
         body = crate::common::pagination::Paginated<crate::models::harvest::HarvestWithRelations>)
    ),
    security(("api_jwt" = []))
)]
pub async fn find_all(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = app_state.harvest_service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(page)))
}

// GET /harvests/{id}
#[utoipa::path(
    get,
    path = "/harvests/{id}",
    tag = "Harvests",
    params(("id" = Uuid, Path, description = "ID da safra")),
    responses(
        (status = 200, description = "Safra encontrada com sucesso.",
         body = crate::models::harvest::HarvestWithRelations),
        (status = 404, description = "Safra não encontrada.")
    ),
    security(("api_jwt" = []))
)]
pub async fn find_one(
    State(app_state): State<AppState>,
    _guard: RequireRole<Staff>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let harvest = app_state.harvest_service.find_one(id).await?;
    Ok((StatusCode::OK, Json(harvest)))
}

// PUT /harvests/{id}
#[utoipa::path(
    put,
    path = "/harvests/{id}",
    tag = "Harvests",
    params(("id" = Uuid, Path, description = "ID da safra")),
    request_body = UpdateHarvestPayload,
    responses(
        (status = 200, description = "Safra atualizada com sucesso.", body = crate::models::harvest::Harvest),
        (status = 400, description = "Dados inválidos."),
        (status = 404, description = "Safra não encontrada."),
        (status = 409, description = "Já existe uma safra com esse nome para esta fazenda.")
    ),
    security(("api_jwt" = []))
)]
pub async fn update(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminGestor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateHarvestPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let harvest = app_state.harvest_service.update(id, &payload).await?;
    Ok((StatusCode::OK, Json(harvest)))
}

// DELETE /harvests/{id}
#[utoipa::path(
    delete,
    path = "/harvests/{id}",
    tag = "Harvests",
    params(("id" = Uuid, Path, description = "ID da safra")),
    responses(
        (status = 204, description = "Safra removida com sucesso."),
        (status = 404, description = "Safra não encontrada.")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminGestor>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.harvest_service.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
