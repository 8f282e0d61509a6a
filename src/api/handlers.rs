//! HTTP API handlers.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::{error, info, warn};

use super::response::{CalculationResponse, HealthResponse};
use crate::average::{mean, ValidatedRequest};
use crate::error::AverageError;
use crate::metrics;

/// Readiness message served at `/`.
pub const READY_MESSAGE: &str = "El Servicio de Promedio está listo para producción";

/// Application state shared with handlers.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Prometheus handle, when a recorder has been installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state without a metrics exporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a Prometheus handle for `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Average handler: validates the body, computes the mean, shapes the envelope.
pub async fn calculate_average(
    request: Result<ValidatedRequest, AverageError>,
) -> Result<Json<CalculationResponse>, AverageError> {
    let ValidatedRequest(request) = request.inspect_err(metrics::inc_rejected)?;

    let _timer = metrics::timer_calculation();
    let average = mean(&request.numbers).map_err(|err| {
        match err {
            AverageError::NonFiniteResult { .. } => {
                error!(error = %err, count = request.numbers.len(), "Average is not representable");
            }
            _ => warn!(error = %err, numbers = ?request.numbers, "Average calculation failed"),
        }
        metrics::inc_rejected(&err);
        err
    })?;

    info!(average, count = request.numbers.len(), "Average calculated");
    metrics::record_input_size(request.numbers.len());
    metrics::inc_calculated();

    Ok(Json(CalculationResponse::average(average)))
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::healthy())
}

/// Root handler - plain-text readiness string.
pub async fn root() -> &'static str {
    READY_MESSAGE
}

/// Prometheus exposition, or 404 when no recorder is installed.
pub async fn metrics_export(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
