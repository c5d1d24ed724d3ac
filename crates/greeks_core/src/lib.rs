//! # greeks_core: Numeric Foundation for the Greeks Surface Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! greeks_core is the bottom layer of the workspace, providing:
//! - Standard normal CDF/PDF, scalar and element-wise (`math::distributions`)
//! - The scalar-or-array numeric trait the pricing formula is written against (`math::field`)
//! - Error taxonomy: `PricingError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other workspace crates, with minimal external dependencies:
//! - ndarray: n-dimensional arrays for the vectorised path
//! - statrs: error function for the normal CDF
//! - thiserror: error derives
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use greeks_core::math::distributions::{norm_cdf, norm_pdf};
//! use greeks_core::math::Field;
//! use ndarray::array;
//!
//! assert_eq!(norm_cdf(0.0), 0.5);
//! assert!((norm_pdf(0.0) - 0.398_942_280_401_432_7).abs() < 1e-15);
//!
//! // The same operation over a whole array
//! let xs = array![[-1.0, 0.0], [1.0, 2.0]];
//! let cdf = xs.norm_cdf();
//! assert_eq!(cdf.dim(), (2, 2));
//! assert_eq!(cdf[[0, 1]], 0.5);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `PricingError`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
