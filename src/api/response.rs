//! JSON envelopes returned by the API.

use serde::{Deserialize, Serialize};

/// Envelope for the average endpoint: carries either a result or an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CalculationResponse {
    /// Successful calculation.
    Success {
        /// Arithmetic mean of the submitted numbers.
        average: f64,
    },
    /// Rejected or failed request.
    Failure {
        /// Human-readable message.
        error: String,
    },
}

impl CalculationResponse {
    /// Build a success envelope.
    pub fn average(value: f64) -> Self {
        Self::Success { average: value }
    }

    /// Build an error envelope.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Failure {
            error: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "healthy".
    pub status: String,
    /// Service name.
    pub service: String,
}

impl HealthResponse {
    /// The fixed payload reported by the health endpoint.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            service: crate::SERVICE_NAME.to_string(),
        }
    }
}
