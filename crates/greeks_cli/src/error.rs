//! Error types for the CLI.

use greeks_core::types::PricingError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `greeks` commands
#[derive(Debug, Error)]
pub enum CliError {
    /// Rejected pricing input
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading or writing failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialisation failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialisation failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
