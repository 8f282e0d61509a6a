//! HTTP service computing the arithmetic mean of a list of numbers.
//!
//! A request flows through three stages:
//!
//! ```text
//! POST /api/v1/average {"numbers": [2, 4, 6]}
//!   -> validator   (JSON shape, non-empty, every element > 0)   400 on failure
//!   -> calculator  (left-to-right f64 sum / count)              400 on failure
//!   -> envelope    {"average": 4.0}                             200
//! ```
//!
//! Panics anywhere in a handler are turned into an opaque 500 by a single
//! recovery layer applied when the router is assembled.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types and their HTTP mapping
//! - [`average`]: Request validation and the mean itself
//! - [`api`]: HTTP routes, handlers and response envelopes
//! - [`telemetry`]: Logging setup
//! - [`metrics`]: Prometheus counters and histograms
//! - [`utils`]: Utility functions

pub mod api;
pub mod average;
pub mod config;
pub mod error;
pub mod metrics;
pub mod telemetry;
pub mod utils;

pub use config::Config;
pub use error::{AverageError, Result, ServiceError};

/// Name reported by the health endpoint.
pub const SERVICE_NAME: &str = "average-service";
