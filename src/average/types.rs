//! Request types for the average endpoint.

/// A request that has passed validation.
///
/// `numbers` is guaranteed non-empty and every element is greater than zero.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRequest {
    /// Values to average, in the order they were received.
    pub numbers: Vec<f64>,
}
