//! HTTP API route definitions.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::error;

use super::handlers::{calculate_average, health, metrics_export, root, AppState};
use super::response::CalculationResponse;
use crate::error::MSG_INTERNAL;
use crate::metrics;

/// Create the API router, with request tracing and fault recovery applied.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/average", post(calculate_average))
        .route("/health", get(health));

    let router = Router::new()
        .route("/", get(root))
        .route("/metrics", get(metrics_export))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    recover_faults(router)
}

/// Wrap `router` so that a panicking handler yields the opaque 500 envelope.
pub fn recover_faults(router: Router) -> Router {
    router.layer(CatchPanicLayer::custom(handle_panic))
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    error!(panic = %detail, "Recovered from panic while handling request");
    metrics::inc_internal_fault();

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(CalculationResponse::error(MSG_INTERNAL)),
    )
        .into_response()
}
