// src/handlers/metrics.rs

use axum::{extract::State, http::header, response::IntoResponse};

use crate::{common::error::AppError, config::AppState};

// GET /metrics — formato de exposição em texto do Prometheus.
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Metrics",
    responses(
        (status = 200, description = "Métricas no formato de exposição do Prometheus.", body = String)
    )
)]
pub async fn exposition(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let body = app_state.metrics.render()?;
    Ok(([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body))
}
