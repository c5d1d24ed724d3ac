//! Mathematical building blocks.
//!
//! This module provides:
//! - `distributions`: standard normal CDF and PDF, scalar and element-wise
//! - `field`: the [`Field`] trait unifying `f64` and `ndarray` arrays
//!
//! # Re-exports
//!
//! - [`norm_cdf`], [`norm_pdf`], [`norm_cdf_array`], [`norm_pdf_array`] from `distributions`
//! - [`Field`] from `field`

pub mod distributions;
pub mod field;

pub use distributions::{norm_cdf, norm_cdf_array, norm_pdf, norm_pdf_array};
pub use field::Field;
