// src/handlers/farms.rs

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
    middleware::auth::AuthenticatedUser,
    models::farm::{CreateFarmPayload, UpdateFarmPayload},
};

// Fazendas não têm restrição de papel: basta estar autenticado.

// POST /farms
#[utoipa::path(
    post,
    path = "/farms",
    tag = "Farms",
    request_body = CreateFarmPayload,
    responses(
        (status = 201, description = "Fazenda criada com sucesso.", body = crate::models::farm::Farm),
        (status = 400, description = "A soma das áreas agricultável e de vegetação não pode ser maior que a área total."),
        (status = 404, description = "Produtor não encontrado.")
    ),
    security(("api_jwt" = []))
)]
pub async fn create(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Json(payload): Json<CreateFarmPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let farm = app_state.farm_service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(farm)))
}

// GET /farms
#[utoipa::path(
    get,
    path = "/farms",
    tag = "Farms",
    params(PaginationParams),
    responses(
        (status = 200, description = "Lista retornada com sucesso.",
         body = crate::common::pagination::Paginated<crate::models::farm::FarmWithRelations>)
    ),
    security(("api_jwt" = []))
)]
pub async fn find_all(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = app_state.farm_service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(page)))
}

// GET /farms/{id}
#[utoipa::path(
    get,
    path = "/farms/{id}",
    tag = "Farms",
    params(("id" = Uuid, Path, description = "ID da fazenda")),
    responses(
        (status = 200, description = "Fazenda encontrada com sucesso.",
         body = crate::models::farm::FarmWithRelations),
        (status = 404, description = "Fazenda não encontrada.")
    ),
    security(("api_jwt" = []))
)]
pub async fn find_one(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let farm = app_state.farm_service.find_one(id).await?;
    Ok((StatusCode::OK, Json(farm)))
}

// PUT /farms/{id}
#[utoipa::path(
    put,
    path = "/farms/{id}",
    tag = "Farms",
    params(("id" = Uuid, Path, description = "ID da fazenda")),
    request_body = UpdateFarmPayload,
    responses(
        (status = 200, description = "Fazenda atualizada com sucesso.", body = crate::models::farm::Farm),
        (status = 400, description = "Dados inválidos."),
        (status = 404, description = "Fazenda não encontrada. || Produtor não encontrado.")
    ),
    security(("api_jwt" = []))
)]
pub async fn update(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateFarmPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let farm = app_state.farm_service.update(id, &payload).await?;
    Ok((StatusCode::OK, Json(farm)))
}

// DELETE /farms/{id}
#[utoipa::path(
    delete,
    path = "/farms/{id}",
    tag = "Farms",
    params(("id" = Uuid, Path, description = "ID da fazenda")),
    responses(
        (status = 204, description = "Fazenda removida com sucesso."),
        (status = 404, description = "Fazenda não encontrada.")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.farm_service.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
