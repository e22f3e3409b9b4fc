// src/metrics.rs

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder,
};

use crate::common::error::AppError;

// Métricas HTTP expostas em /metrics. Vivem no AppState em vez de em
// estáticos globais.
#[derive(Clone)]
pub struct AppMetrics {
    registry: Registry,
    pub http_request_duration_seconds: HistogramVec,
    pub http_requests_total: IntCounterVec,
    pub http_requests_in_progress: IntGaugeVec,
}

impl AppMetrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "Duration of HTTP requests in seconds",
            )
            .buckets(vec![0.1, 0.5, 1.0, 1.5, 2.0, 5.0]),
            &["method", "route", "code"],
        )?;

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "route", "code"],
        )?;

        let http_requests_in_progress = IntGaugeVec::new(
            Opts::new(
                "http_requests_in_progress",
                "Number of HTTP requests in progress",
            ),
            &["method", "route"],
        )?;

        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_progress.clone()))?;

        Ok(Self {
            registry,
            http_request_duration_seconds,
            http_requests_total,
            http_requests_in_progress,
        })
    }

    // Corpo do endpoint /metrics, no formato de exposição em texto.
    pub fn render(&self) -> Result<String, AppError> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(|e| anyhow::anyhow!("Falha ao codificar métricas: {}", e))?;
        let body = String::from_utf8(buffer)
            .map_err(|e| anyhow::anyhow!("Métricas com UTF-8 inválido: {}", e))?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_recorded_series() {
        let metrics = AppMetrics::new().unwrap();
        metrics
            .http_requests_total
            .with_label_values(&["GET", "/farms", "200"])
            .inc();
        metrics
            .http_request_duration_seconds
            .with_label_values(&["GET", "/farms", "200"])
            .observe(0.3);

        let body = metrics.render().unwrap();
        assert!(body.contains("http_requests_total"));
        assert!(body.contains("http_request_duration_seconds_bucket"));
        assert!(body.contains("route=\"/farms\""));
    }

    #[test]
    fn gauge_tracks_in_progress_requests() {
        let metrics = AppMetrics::new().unwrap();
        let gauge = metrics
            .http_requests_in_progress
            .with_label_values(&["GET", "/health"]);
        gauge.inc();
        assert_eq!(gauge.get(), 1);
        gauge.dec();
        assert_eq!(gauge.get(), 0);
    }
}
