//! CLI configuration management
//!
//! Handles loading configuration from TOML files, environment variables and
//! command-line arguments.
//!
//! ```toml
//! log_level = "info"
//! output_format = "table"
//!
//! [market]
//! spot = 34.03
//! strike = 40.0
//! rate = 0.0412
//! expiry = 0.0821917808219178
//! volatility = 0.35
//!
//! [surface]
//! points = 50
//! spot_range = [0.5, 1.5]
//! volatility_range = [0.05, 1.0]
//! max_days = 365
//! mode = "auto"
//! ```

use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use greeks_models::analytical::MarketParams;
use greeks_models::surface::{EvaluationMode, DAYS_PER_YEAR};

/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "GREEKS_LOG_LEVEL";
/// Environment variable overriding the output format
pub const ENV_OUTPUT_FORMAT: &str = "GREEKS_OUTPUT_FORMAT";
/// Environment variable overriding the surface resolution
pub const ENV_SURFACE_POINTS: &str = "GREEKS_SURFACE_POINTS";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json, csv")]
    InvalidOutputFormat(String),

    #[error("Invalid market parameters: {0}")]
    InvalidMarket(String),

    #[error("Invalid surface settings: {0}")]
    InvalidSurface(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// How command results are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Console table
    #[default]
    Table,
    /// JSON document
    Json,
    /// Long-format CSV
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ConfigError::InvalidOutputFormat(s.to_string())),
        }
    }
}

impl OutputFormat {
    /// File extension for file-backed formats
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            OutputFormat::Table => None,
            OutputFormat::Json => Some("json"),
            OutputFormat::Csv => Some("csv"),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Market point priced by `price` and held fixed by `surface`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarketSection {
    /// Spot price
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Risk-free rate, continuously compounded
    pub rate: f64,
    /// Time to expiry in years
    pub expiry: f64,
    /// Volatility
    pub volatility: f64,
}

impl Default for MarketSection {
    fn default() -> Self {
        Self {
            spot: 34.03,
            strike: 40.0,
            rate: 0.0412,
            expiry: 30.0 / DAYS_PER_YEAR,
            volatility: 0.35,
        }
    }
}

impl MarketSection {
    /// Market parameters for the evaluator
    pub fn params(&self) -> MarketParams {
        MarketParams::new(self.spot, self.strike, self.rate, self.expiry, self.volatility)
    }
}

/// Surface resolution and ranges
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SurfaceSection {
    /// Points per axis
    pub points: usize,
    /// Spot range as multiples of the strike
    pub spot_range: [f64; 2],
    /// Volatility range
    pub volatility_range: [f64; 2],
    /// Longest expiry in days; the expiry axis starts at one day
    pub max_days: u32,
    /// Evaluation strategy
    #[serde(deserialize_with = "deserialize_mode")]
    pub mode: EvaluationMode,
}

impl Default for SurfaceSection {
    fn default() -> Self {
        Self {
            points: 50,
            spot_range: [0.5, 1.5],
            volatility_range: [0.05, 1.0],
            max_days: 365,
            mode: EvaluationMode::Auto,
        }
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Output format
    #[serde(deserialize_with = "deserialize_output_format")]
    pub output_format: OutputFormat,
    /// Market point
    pub market: MarketSection,
    /// Surface settings
    pub surface: SurfaceSection,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_output_format<'de, D>(deserializer: D) -> Result<OutputFormat, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    OutputFormat::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_mode<'de, D>(deserializer: D) -> Result<EvaluationMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    EvaluationMode::from_str(&s).map_err(serde::de::Error::custom)
}

impl CliConfig {
    /// Apply environment variable overrides, leaving unset variables alone
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(log_level) = std::env::var(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&log_level)?;
        }

        if let Ok(format) = std::env::var(ENV_OUTPUT_FORMAT) {
            self.output_format = OutputFormat::from_str(&format)?;
        }

        if let Ok(points) = std::env::var(ENV_SURFACE_POINTS) {
            self.surface.points = points.trim().parse().map_err(|_| {
                ConfigError::EnvError(format!(
                    "{} must be a positive integer, got '{}'",
                    ENV_SURFACE_POINTS, points
                ))
            })?;
        }

        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.market
            .params()
            .validate()
            .map_err(|e| ConfigError::InvalidMarket(e.to_string()))?;

        let surface = &self.surface;
        if surface.points == 0 {
            return Err(ConfigError::InvalidSurface(
                "points must be at least 1".to_string(),
            ));
        }
        check_range("spot_range", surface.spot_range)?;
        check_range("volatility_range", surface.volatility_range)?;
        if surface.max_days == 0 {
            return Err(ConfigError::InvalidSurface(
                "max_days must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        if let Some(format) = &cli.output_format {
            self.output_format = OutputFormat::from_str(format)?;
        }
        if let Some(points) = cli.points {
            self.surface.points = points;
        }
        if let Some(mode) = &cli.mode {
            self.surface.mode = EvaluationMode::from_str(mode)
                .map_err(|e| ConfigError::InvalidSurface(e.to_string()))?;
        }

        let market = &mut self.market;
        if let Some(spot) = cli.spot {
            market.spot = spot;
        }
        if let Some(strike) = cli.strike {
            market.strike = strike;
        }
        if let Some(rate) = cli.rate {
            market.rate = rate;
        }
        if let Some(expiry) = cli.expiry {
            market.expiry = expiry;
        }
        if let Some(days) = cli.days {
            market.expiry = days / DAYS_PER_YEAR;
        }
        if let Some(volatility) = cli.volatility {
            market.volatility = volatility;
        }

        Ok(())
    }
}

fn check_range(name: &str, [start, end]: [f64; 2]) -> Result<(), ConfigError> {
    if !(start.is_finite() && end.is_finite()) || start <= 0.0 || start >= end {
        return Err(ConfigError::InvalidSurface(format!(
            "{} must satisfy 0 < start < end, got [{}, {}]",
            name, start, end
        )));
    }
    Ok(())
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Output format override
    pub output_format: Option<String>,
    /// Surface points override
    pub points: Option<usize>,
    /// Evaluation mode override
    pub mode: Option<String>,
    /// Spot override
    pub spot: Option<f64>,
    /// Strike override
    pub strike: Option<f64>,
    /// Rate override
    pub rate: Option<f64>,
    /// Expiry override in years
    pub expiry: Option<f64>,
    /// Expiry override in days, applied after `expiry`
    pub days: Option<f64>,
    /// Volatility override
    pub volatility: Option<f64>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    let mut config = if let Some(config_path) = &cli.config_file {
        CliConfig::from_file(config_path)?
    } else {
        CliConfig::default()
    };

    config.apply_env()?;
    config.merge_with_cli(cli)?;
    config.validate()?;
    Ok(config)
}
