//! Command implementations for the `greeks` CLI

pub mod price;
pub mod surface;
