use std::time::Instant;

use axum::{
    extract::{MatchedPath, State},
    middleware::Next,
    response::Response,
};

use crate::config::AppState;

// Registra duração, total e requisições em andamento por método e rota.
// A rota usada como label é o padrão casado (ex.: /farms/{id}), não a URL
// crua, para não explodir a cardinalidade.
pub async fn track_metrics(
    State(app_state): State<AppState>,
    request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    app_state
        .metrics
        .http_requests_in_progress
        .with_label_values(&[&method, &route])
        .inc();

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed().as_secs_f64();
    let code = response.status().as_u16().to_string();

    app_state
        .metrics
        .http_request_duration_seconds
        .with_label_values(&[&method, &route, &code])
        .observe(elapsed);
    app_state
        .metrics
        .http_requests_total
        .with_label_values(&[&method, &route, &code])
        .inc();
    app_state
        .metrics
        .http_requests_in_progress
        .with_label_values(&[&method, &route])
        .dec();

    response
}
