// src/handlers/health.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::{common::error::AppError, config::AppState};

// GET /health — verifica se o banco responde antes de dizer que está tudo bem.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Aplicação e banco de dados saudáveis."),
        (status = 500, description = "Banco de dados indisponível.")
    )
)]
pub async fn check(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    sqlx::query("SELECT 1").execute(&app_state.db_pool).await?;

    Ok(Json(json!({
        "status": "ok",
        "info": {
            "database": { "status": "up" }
        }
    })))
}
