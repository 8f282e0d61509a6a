//! Arithmetic mean.

use crate::error::AverageError;

/// Compute the arithmetic mean of `numbers`.
///
/// Values are accumulated left to right with plain `f64` addition, so the
/// result can differ in the last bits from an order-independent sum. A sum
/// that overflows to infinity is reported as [`AverageError::NonFiniteResult`].
pub fn mean(numbers: &[f64]) -> Result<f64, AverageError> {
    if numbers.is_empty() {
        return Err(AverageError::EmptyInput);
    }

    let sum = numbers.iter().fold(0.0_f64, |acc, n| acc + n);
    let average = sum / numbers.len() as f64;
    if !average.is_finite() {
        return Err(AverageError::NonFiniteResult { value: average });
    }

    Ok(average)
}
