//! Greeks CLI - Black-Scholes Pricing and Greeks Surfaces
//!
//! This is the operational entry point for the Greeks surface engine.
//!
//! # Commands
//!
//! - `greeks price` - Price and Greeks at a single market point
//! - `greeks surface --grid spot-vol|spot-expiry` - Evaluate and export a
//!   Greeks surface
//!
//! # Configuration
//!
//! Settings are merged with priority CLI arguments > environment variables
//! (`GREEKS_LOG_LEVEL`, `GREEKS_OUTPUT_FORMAT`, `GREEKS_SURFACE_POINTS`) >
//! TOML config file > defaults. `RUST_LOG` overrides the log filter entirely.
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate wires configuration, logging
//! and output formats around the evaluator in `greeks_models`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod display;
mod error;
mod export;

pub use error::{CliError, Result};

use config::{build_config, CliArgs};

/// Black-Scholes pricing and Greeks surface CLI
#[derive(Parser)]
#[command(name = "greeks")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output format (table, json, csv)
    #[arg(short, long, global = true)]
    format: Option<String>,

    #[command(flatten)]
    market: MarketArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Market point overrides
#[derive(Args)]
struct MarketArgs {
    /// Spot price
    #[arg(long, global = true)]
    spot: Option<f64>,

    /// Strike price
    #[arg(long, global = true)]
    strike: Option<f64>,

    /// Risk-free rate (e.g. 0.0412)
    #[arg(long, global = true)]
    rate: Option<f64>,

    /// Time to expiry in years
    #[arg(long, global = true, conflicts_with = "days")]
    expiry: Option<f64>,

    /// Time to expiry in calendar days
    #[arg(long, global = true)]
    days: Option<f64>,

    /// Volatility (e.g. 0.35)
    #[arg(long, global = true)]
    volatility: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Price and Greeks at a single market point
    Price {
        /// Option side (call, put, both)
        #[arg(short = 't', long, default_value = "both")]
        option: String,
    },

    /// Evaluate a Greeks surface over two market parameters
    Surface {
        /// Option side (call, put)
        #[arg(short = 't', long, default_value = "call")]
        option: String,

        /// Grid configuration (spot-vol, spot-expiry)
        #[arg(short, long, default_value = "spot-vol")]
        grid: String,

        /// Points per axis
        #[arg(short, long)]
        points: Option<usize>,

        /// Evaluation mode (vectorized, parallel, auto)
        #[arg(short, long)]
        mode: Option<String>,

        /// Output file or directory; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export theta per day and vega/rho per 1%
        #[arg(long)]
        display_units: bool,
    },
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        let (points, mode) = match &self.command {
            Commands::Surface { points, mode, .. } => (*points, mode.clone()),
            Commands::Price { .. } => (None, None),
        };

        CliArgs {
            config_file: self.config.clone(),
            log_level: self.log_level.clone(),
            output_format: self.format.clone(),
            points,
            mode,
            spot: self.market.spot,
            strike: self.market.strike,
            rate: self.market.rate,
            expiry: self.market.expiry,
            days: self.market.days,
            volatility: self.market.volatility,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
    }

    let config = build_config(&cli.config_args())?;

    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_filter_str()
    };
    init_tracing(level);

    info!(
        log_level = %level,
        output_format = %config.output_format,
        "Greeks CLI v{}",
        env!("CARGO_PKG_VERSION")
    );

    match cli.command {
        Commands::Price { option } => commands::price::run(&config, &option),
        Commands::Surface {
            option,
            grid,
            output,
            display_units,
            ..
        } => commands::surface::run(&config, &option, &grid, output.as_deref(), display_units),
    }
}
