//! Analytical pricing formulas for European options.
//!
//! This module provides the closed-form Black-Scholes model:
//! - Market inputs (`MarketParams`) and the option side (`OptionType`)
//! - Price, d1/d2 and analytical Greeks (Delta, Gamma, Vega, Theta, Rho)
//!   bundled in `PricingResult`
//!
//! ## Design Principles
//!
//! - **Generic over `V: Field`**: one formula serves `f64` points and
//!   element-wise `ndarray` meshes
//! - **No hidden guards**: T = 0 or σ = 0 flows through as NaN/∞; use
//!   [`MarketParams::validate`] when a hard error is wanted
//! - **Canonical units**: theta per year, vega and rho per unit move

pub mod black_scholes;

// Re-export main types at module level
pub use black_scholes::{evaluate, evaluate_named, MarketParams, OptionType, PricingResult};
