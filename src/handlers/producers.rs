// src/handlers/producers.rs

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
    middleware::rbac::{AdminGestor, AdminOnly, RequireRole},
    models::producer::{CreateProducerPayload, UpdateProducerPayload},
};

// POST /producers
#[utoipa::path(
    post,
    path = "/producers",
    tag = "Producers",
    request_body = CreateProducerPayload,
    responses(
        (status = 201, description = "Produtor criado com sucesso.", body = crate::models::producer::Producer),
        (status = 400, description = "Dados inválidos."),
        (status = 409, description = "Já existe um produtor com esse documento (CPF ou CNPJ).")
    ),
    security(("api_jwt" = []))
)]
pub async fn create(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminGestor>,
    Json(payload): Json<CreateProducerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let producer = app_state.producer_service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(producer)))
}

// GET /producers
#[utoipa::path(
    get,
    path = "/producers",
    tag = "Producers",
    params(PaginationParams),
    responses(
        (status = 200, description = "Lista retornada com sucesso.",
         body = crate::common::pagination::Paginated<crate::models::producer::ProducerWithFarms>)
    ),
    security(("api_jwt" = []))
)]
pub async fn find_all(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = app_state.producer_service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(page)))
}

// GET /producers/{id}
#[utoipa::path(
    get,
    path = "/producers/{id}",
    tag = "Producers",
    params(("id" = Uuid, Path, description = "ID do produtor")),
    responses(
        (status = 200, description = "Produtor encontrado com sucesso.",
         body = crate::models::producer::ProducerWithFarms),
        (status = 404, description = "Produtor não encontrado.")
    ),
    security(("api_jwt" = []))
)]
pub async fn find_one(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminGestor>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let producer = app_state.producer_service.find_one(id).await?;
    Ok((StatusCode::OK, Json(producer)))
}

// PUT /producers/{id}
#[utoipa::path(
    put,
    path = "/producers/{id}",
    tag = "Producers",
    params(("id" = Uuid, Path, description = "ID do produtor")),
    request_body = UpdateProducerPayload,
    responses(
        (status = 200, description = "Produtor atualizado com sucesso.",
         body = crate::models::producer::Producer),
        (status = 400, description = "Dados inválidos."),
        (status = 404, description = "Produtor não encontrado.")
    ),
    security(("api_jwt" = []))
)]
pub async fn update(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminGestor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProducerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let producer = app_state.producer_service.update(id, &payload).await?;
    Ok((StatusCode::OK, Json(producer)))
}

// DELETE /producers/{id}
#[utoipa::path(
    delete,
    path = "/producers/{id}",
    tag = "Producers",
    params(("id" = Uuid, Path, description = "ID do produtor")),
    responses(
        (status = 204, description = "Produtor removido com sucesso."),
        (status = 404, description = "Produtor não encontrado.")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminGestor>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.producer_service.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
