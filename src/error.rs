//! Unified error types for the average service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::response::CalculationResponse;

/// Message returned when the body cannot be bound to a calculation request.
pub const MSG_MALFORMED_INPUT: &str = "JSON inválido o campo 'numbers' faltante";
/// Message returned for an empty `numbers` array.
pub const MSG_EMPTY_ARRAY: &str = "El arreglo debe tener al menos un número";
/// Message returned when an element is zero or negative.
pub const MSG_NON_POSITIVE: &str = "Todos los números deben ser mayores que cero";
/// Message returned by the calculator when handed an empty sequence.
pub const MSG_EMPTY_INPUT: &str = "el arreglo de números no puede estar vacío";
/// Opaque message returned for any unexpected fault.
pub const MSG_INTERNAL: &str = "error interno del servidor";

/// Startup and process-level errors.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Logging could not be initialised.
    #[error("logging error: {0}")]
    Logging(String),

    /// Metrics recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

/// A declared rule on the `numbers` field that the payload broke.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// The array had no elements.
    Empty,
    /// An element was zero or negative.
    NonPositive {
        /// Position of the first offending element.
        index: usize,
        /// The offending value.
        value: f64,
    },
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Constraint::Empty => write!(f, "numbers must not be empty"),
            Constraint::NonPositive { index, value } => {
                write!(f, "numbers[{index}] = {value} is not greater than zero")
            }
        }
    }
}

/// Errors raised while handling a single calculation request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AverageError {
    /// Body is not JSON, or `numbers` is missing or has the wrong shape.
    #[error("malformed input: {reason}")]
    MalformedInput {
        /// Parser detail, kept for logs only.
        reason: String,
    },

    /// Field present but fails a declared rule.
    #[error("constraint violation: {0}")]
    ConstraintViolation(Constraint),

    /// The calculator was handed an empty sequence.
    #[error("empty input")]
    EmptyInput,

    /// The sum overflowed, so the mean is not a finite number.
    #[error("average is not finite: {value}")]
    NonFiniteResult {
        /// The value the division produced.
        value: f64,
    },
}

impl AverageError {
    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AverageError::NonFiniteResult { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Client-facing message placed in the error envelope.
    pub fn public_message(&self) -> &'static str {
        match self {
            AverageError::MalformedInput { .. } => MSG_MALFORMED_INPUT,
            AverageError::ConstraintViolation(Constraint::Empty) => MSG_EMPTY_ARRAY,
            AverageError::ConstraintViolation(Constraint::NonPositive { .. }) => MSG_NON_POSITIVE,
            AverageError::EmptyInput => MSG_EMPTY_INPUT,
            AverageError::NonFiniteResult { .. } => MSG_INTERNAL,
        }
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AverageError::MalformedInput { .. } => "malformed_input",
            AverageError::ConstraintViolation(_) => "constraint_violation",
            AverageError::EmptyInput => "empty_input",
            AverageError::NonFiniteResult { .. } => "internal_fault",
        }
    }
}

impl IntoResponse for AverageError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(CalculationResponse::error(self.public_message())),
        )
            .into_response()
    }
}

/// Convenient Result type alias for startup code.
pub type Result<T> = std::result::Result<T, ServiceError>;
