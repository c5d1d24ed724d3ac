//! Core error types.
//!
//! This module provides:
//! - `error`: Structured error types for evaluator inputs and surface construction
//!
//! # Re-exports
//!
//! - [`PricingError`] from `error`

pub mod error;

pub use error::PricingError;
