//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors raised at the boundary of the pricing engine
//!
//! The closed-form evaluator itself never fails: singular inputs (T = 0 or
//! σ = 0) produce NaN or infinite values that propagate to the caller. The
//! variants below are raised by the opt-in checks that callers run before
//! evaluating (option type parsing, parameter validation, axis construction).

use thiserror::Error;

/// Categorised pricing errors.
///
/// # Variants
/// - `InvalidArgument`: Unrecognised option type, metric or parameter, or
///   an inconsistent request
/// - `NumericSingularity`: A parameter that appears as a divisor is zero or negative
/// - `InvalidAxis`: A surface axis is empty, non-finite or out of domain
///
/// # Examples
/// ```
/// use greeks_core::types::PricingError;
///
/// let err = PricingError::InvalidArgument("option type must be Call or Put, got 'X'".to_string());
/// assert_eq!(
///     format!("{}", err),
///     "Invalid argument: option type must be Call or Put, got 'X'"
/// );
///
/// let err = PricingError::NumericSingularity { parameter: "expiry".to_string(), value: 0.0 };
/// assert!(err.is_singularity());
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PricingError {
    /// Invalid argument (unknown option type, metric, parameter name, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A divisor parameter (expiry or volatility) is not strictly positive.
    #[error("Numeric singularity: {parameter} = {value} must be strictly positive")]
    NumericSingularity {
        /// Name of the offending parameter
        parameter: String,
        /// The offending value
        value: f64,
    },

    /// Invalid surface axis definition.
    #[error("Invalid axis: {0}")]
    InvalidAxis(String),
}

impl PricingError {
    /// Builds a `NumericSingularity` error for the named parameter.
    pub fn singularity(parameter: impl Into<String>, value: f64) -> Self {
        PricingError::NumericSingularity {
            parameter: parameter.into(),
            value,
        }
    }

    /// Returns true for `NumericSingularity`.
    pub fn is_singularity(&self) -> bool {
        matches!(self, PricingError::NumericSingularity { .. })
    }
}
