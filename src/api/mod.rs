//! HTTP API: average calculation, health, readiness and metrics endpoints.

pub mod handlers;
pub mod response;
pub mod routes;

pub use handlers::AppState;
pub use routes::{create_router, recover_faults};
