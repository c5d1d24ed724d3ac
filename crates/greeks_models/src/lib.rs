//! # Greeks Models (L2: Business Logic)
//!
//! Closed-form Black-Scholes pricing and Greeks, at a single market point and
//! across two-dimensional parameter grids.
//!
//! This crate provides:
//! - Market parameters, option types and pricing results (`analytical`)
//! - One generic Black-Scholes formula evaluated over `f64` or whole arrays
//! - Parameter axes, meshes and metric surfaces for visualisation (`surface`)
//!
//! ## Design Principles
//!
//! - **One formula, two paths**: the scalar and vectorised evaluators share
//!   `analytical::evaluate`, generic over [`greeks_core::math::Field`]
//! - **Pure evaluation**: no shared state, no I/O, singular inputs propagate
//!   as NaN/∞ rather than failing
//! - **Validation at the boundary**: option-type parsing and axis
//!   construction reject bad input before anything is computed
//!
//! ## Usage
//!
//! ```rust
//! use greeks_models::analytical::{evaluate, MarketParams, OptionType};
//! use greeks_models::surface::{Axis, AxisParameter, EvaluationMode, Metric, SurfaceGrid};
//!
//! let base = MarketParams::new(34.03, 40.0, 0.0412, 30.0 / 365.0, 0.35);
//! let call = evaluate(&base, OptionType::Call);
//! assert!((call.price - 0.0906).abs() < 1e-3);
//!
//! let spots = Axis::linspace(AxisParameter::Spot, 20.0, 60.0, 41).unwrap();
//! let vols = Axis::linspace(AxisParameter::Volatility, 0.05, 1.0, 20).unwrap();
//! let grid = SurfaceGrid::spot_volatility(spots, vols, base).unwrap();
//!
//! let surface = grid.evaluate(OptionType::Put, EvaluationMode::Vectorized);
//! assert_eq!(surface.metric(Metric::Price).dim(), (20, 41));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod surface;
