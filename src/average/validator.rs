//! Validation of inbound calculation requests.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::{Map, Value};
use tracing::info;

use super::types::CalculationRequest;
use crate::error::{AverageError, Constraint};

/// Parse and validate a raw request body.
///
/// The body must be a JSON object whose `numbers` field is a non-empty array
/// of numbers, each greater than zero. Other fields are ignored.
pub fn validate(body: &[u8]) -> Result<CalculationRequest, AverageError> {
    let request = parse(body).inspect_err(|err| {
        info!(error = %err, "Rejected malformed calculation request");
    })?;

    check_constraints(&request.numbers).map_err(|constraint| {
        info!(
            violation = %constraint,
            numbers = ?request.numbers,
            "Calculation request failed validation"
        );
        AverageError::ConstraintViolation(constraint)
    })?;

    Ok(request)
}

fn parse(body: &[u8]) -> Result<CalculationRequest, AverageError> {
    let mut object: Map<String, Value> =
        serde_json::from_slice(body).map_err(|e| malformed(e.to_string()))?;

    let numbers = match object.remove("numbers") {
        None | Some(Value::Null) => return Err(malformed("missing field `numbers`")),
        Some(value) => serde_json::from_value::<Vec<f64>>(value)
            .map_err(|e| malformed(format!("numbers: {e}")))?,
    };

    Ok(CalculationRequest { numbers })
}

fn check_constraints(numbers: &[f64]) -> Result<(), Constraint> {
    if numbers.is_empty() {
        return Err(Constraint::Empty);
    }

    match numbers.iter().position(|n| *n <= 0.0) {
        Some(index) => Err(Constraint::NonPositive {
            index,
            value: numbers[index],
        }),
        None => Ok(()),
    }
}

fn malformed(reason: impl Into<String>) -> AverageError {
    AverageError::MalformedInput {
        reason: reason.into(),
    }
}

/// Extractor yielding a request that already passed [`validate`].
///
/// Rejections are returned as [`AverageError`], which renders the error
/// envelope directly. The content type is not checked.
#[derive(Debug, Clone)]
pub struct ValidatedRequest(pub CalculationRequest);

#[async_trait]
impl<S> FromRequest<S> for ValidatedRequest
where
    S: Send + Sync,
{
    type Rejection = AverageError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|rejection| {
            info!(error = %rejection.body_text(), "Failed to read request body");
            malformed(rejection.body_text())
        })?;

        validate(&body).map(ValidatedRequest)
    }
}
