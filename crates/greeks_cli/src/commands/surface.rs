//! Surface command implementation
//!
//! Evaluates price and Greeks over a spot × volatility or spot × expiry grid
//! and exports the metric map.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{info, warn};

use greeks_models::analytical::OptionType;
use greeks_models::surface::{Axis, AxisParameter, GreeksSurface, SurfaceGrid};

use crate::config::{CliConfig, OutputFormat};
use crate::display::format_surface_summary;
use crate::export::{default_file_name, write_csv, write_json, write_surface_file};
use crate::{CliError, Result};

/// Which parameter varies alongside spot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridKind {
    /// Spot along columns, volatility along rows
    SpotVolatility,
    /// Spot along columns, expiry along rows
    SpotExpiry,
}

impl FromStr for GridKind {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "spot-vol" | "spot-volatility" => Ok(GridKind::SpotVolatility),
            "spot-expiry" | "spot-time" => Ok(GridKind::SpotExpiry),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown grid: {}. Supported: spot-vol, spot-expiry",
                other
            ))),
        }
    }
}

impl fmt::Display for GridKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridKind::SpotVolatility => write!(f, "spot-vol"),
            GridKind::SpotExpiry => write!(f, "spot-expiry"),
        }
    }
}

/// Builds the grid described by the configuration.
///
/// The spot axis spans `spot_range` multiples of the strike; the expiry axis
/// starts one day out so no cell has `T = 0`.
pub fn build_grid(config: &CliConfig, kind: GridKind) -> Result<SurfaceGrid> {
    let base = config.market.params();
    let surface = &config.surface;
    let [spot_lo, spot_hi] = surface.spot_range;

    let spots = Axis::linspace(
        AxisParameter::Spot,
        spot_lo * base.strike,
        spot_hi * base.strike,
        surface.points,
    )?;

    let grid = match kind {
        GridKind::SpotVolatility => {
            let [vol_lo, vol_hi] = surface.volatility_range;
            let vols = Axis::linspace(AxisParameter::Volatility, vol_lo, vol_hi, surface.points)?;
            SurfaceGrid::spot_volatility(spots, vols, base)?
        }
        GridKind::SpotExpiry => {
            let expiries = Axis::days_to_expiry(surface.max_days, surface.points)?;
            SurfaceGrid::spot_expiry(spots, expiries, base)?
        }
    };

    Ok(grid)
}

fn resolve_output_path(surface: &GreeksSurface, format: OutputFormat, output: &Path) -> PathBuf {
    match default_file_name(surface, format) {
        Some(name) if output.is_dir() => output.join(name),
        _ => output.to_path_buf(),
    }
}

/// Run the surface command
pub fn run(
    config: &CliConfig,
    option: &str,
    grid: &str,
    output: Option<&Path>,
    display_units: bool,
) -> Result<()> {
    let option_type = option.parse::<OptionType>()?;
    let kind = grid.parse::<GridKind>()?;
    config.market.params().validate()?;

    let format = config.output_format;
    if format == OutputFormat::Table && output.is_some() {
        return Err(CliError::InvalidArgument(
            "--output needs --format json or csv; table output goes to the console".to_string(),
        ));
    }

    info!(
        option = %option_type,
        grid = %kind,
        points = config.surface.points,
        mode = %config.surface.mode,
        "Building Greeks surface"
    );

    let surface = build_grid(config, kind)?.evaluate(option_type, config.surface.mode);

    let non_finite = surface.non_finite_cells();
    if non_finite > 0 {
        warn!(non_finite, "Surface contains non-finite cells");
    }

    match (format, output) {
        (OutputFormat::Table, _) => print!("{}", format_surface_summary(&surface)),
        (_, Some(path)) => {
            let path = resolve_output_path(&surface, format, path);
            write_surface_file(&surface, format, display_units, &path)?;
        }
        (OutputFormat::Json, None) => {
            write_json(&surface, display_units, io::stdout().lock())?;
            println!();
        }
        (OutputFormat::Csv, None) => write_csv(&surface, display_units, io::stdout().lock())?,
    }

    info!("Surface complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use greeks_models::surface::{EvaluationMode, Metric};

    fn small_config() -> CliConfig {
        let mut config = CliConfig::default();
        config.surface.points = 6;
        config
    }

    #[test]
    fn test_grid_kind_parsing() {
        assert_eq!("spot-vol".parse::<GridKind>().unwrap(), GridKind::SpotVolatility);
        assert_eq!("Spot-Expiry".parse::<GridKind>().unwrap(), GridKind::SpotExpiry);
        assert!(matches!(
            "spot-rate".parse::<GridKind>(),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_spot_volatility_grid_from_defaults() {
        let grid = build_grid(&small_config(), GridKind::SpotVolatility).unwrap();
        assert_eq!(grid.shape(), (6, 6));
        assert_eq!(grid.axis1().values()[0], 20.0);
        assert_eq!(grid.axis1().values()[5], 60.0);
        assert_eq!(grid.axis2().values()[0], 0.05);
        assert_eq!(grid.axis2().values()[5], 1.0);
        assert_eq!(grid.base().expiry, 30.0 / 365.0);
    }

    #[test]
    fn test_spot_expiry_grid_starts_at_one_day() {
        let grid = build_grid(&small_config(), GridKind::SpotExpiry).unwrap();
        assert_eq!(grid.axis2().parameter(), AxisParameter::Expiry);
        assert_eq!(grid.axis2().values()[0], 1.0 / 365.0);
        assert_eq!(grid.axis2().values()[5], 1.0);

        let surface = grid.evaluate(OptionType::Call, EvaluationMode::Auto);
        assert_eq!(surface.non_finite_cells(), 0);
        assert_eq!(surface.metric(Metric::Theta).dim(), (6, 6));
    }

    #[test]
    fn test_run_rejects_bad_option() {
        let err = run(&small_config(), "X", "spot-vol", None, false).unwrap_err();
        assert!(matches!(err, CliError::Pricing(_)));
    }

    #[test]
    fn test_run_rejects_table_with_output_path() {
        let config = small_config();
        assert_eq!(config.output_format, OutputFormat::Table);

        let path = std::env::temp_dir().join("greeks_table_surface.txt");
        let err = run(&config, "call", "spot-vol", Some(&path), false).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_run_rejects_bad_grid() {
        let err = run(&small_config(), "call", "rate-vol", None, false).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}
