//! Request validation and the average calculation itself.

pub mod calculator;
pub mod types;
pub mod validator;

pub use calculator::mean;
pub use types::CalculationRequest;
pub use validator::{validate, ValidatedRequest};
