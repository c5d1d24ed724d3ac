//! Display-unit Greeks.
//!
//! The evaluator reports theta per year and vega/rho per unit change. For
//! presentation these are rescaled to per-day theta and per-1% vega and rho.
//! The rescaling produces new values; the evaluator's results are only
//! borrowed.

use ndarray::Array2;

use greeks_models::analytical::{OptionType, PricingResult};
use greeks_models::surface::{GreeksSurface, Metric, DAYS_PER_YEAR};

/// Vega and rho are shown per one percentage point.
pub const PERCENT: f64 = 100.0;

/// Factor applied to a raw metric to obtain its display value.
pub fn display_scale(metric: Metric) -> f64 {
    match metric {
        Metric::Theta => 1.0 / DAYS_PER_YEAR,
        Metric::Vega | Metric::Rho => 1.0 / PERCENT,
        Metric::Price | Metric::Delta | Metric::Gamma => 1.0,
    }
}

/// Human-facing unit of a metric.
pub fn display_unit(metric: Metric) -> &'static str {
    match metric {
        Metric::Theta => "per day",
        Metric::Vega | Metric::Rho => "per 1%",
        Metric::Price | Metric::Delta | Metric::Gamma => "",
    }
}

/// Price and Greeks in display units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayGreeks {
    pub price: f64,
    pub delta: f64,
    pub gamma: f64,
    /// Per 1% volatility
    pub vega: f64,
    /// Per calendar day
    pub theta: f64,
    /// Per 1% rate
    pub rho: f64,
}

impl From<&PricingResult> for DisplayGreeks {
    fn from(result: &PricingResult) -> Self {
        let scaled = |metric: Metric| metric.select(result) * display_scale(metric);
        Self {
            price: scaled(Metric::Price),
            delta: scaled(Metric::Delta),
            gamma: scaled(Metric::Gamma),
            vega: scaled(Metric::Vega),
            theta: scaled(Metric::Theta),
            rho: scaled(Metric::Rho),
        }
    }
}

impl DisplayGreeks {
    /// Value of one metric.
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Price => self.price,
            Metric::Delta => self.delta,
            Metric::Gamma => self.gamma,
            Metric::Vega => self.vega,
            Metric::Theta => self.theta,
            Metric::Rho => self.rho,
        }
    }
}

/// One metric of a surface in display units.
pub fn display_surface(surface: &GreeksSurface, metric: Metric) -> Array2<f64> {
    let scale = display_scale(metric);
    surface.metric(metric).mapv(|value| value * scale)
}

/// Console table with one column per option side.
pub fn format_table(rows: &[(OptionType, DisplayGreeks)]) -> String {
    let mut out = format!("{:<8} {:<9}", "Metric", "Unit");
    for (option_type, _) in rows {
        out.push_str(&format!(" {:>14}", option_type.to_string()));
    }
    out.push('\n');
    out.push_str(&"-".repeat(18 + 15 * rows.len()));
    out.push('\n');

    for metric in Metric::ALL {
        out.push_str(&format!("{:<8} {:<9}", metric.name(), display_unit(metric)));
        for (_, greeks) in rows {
            out.push_str(&format!(" {:>14.6}", greeks.get(metric)));
        }
        out.push('\n');
    }

    out
}

/// Smallest and largest finite value; NaN when no value is finite.
fn finite_range(values: &Array2<f64>) -> (f64, f64) {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |range, v| match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        })
        .unwrap_or((f64::NAN, f64::NAN))
}

/// Per-metric range of a surface in display units.
///
/// Ranges cover finite cells only; a trailing line counts the cells that are
/// not finite.
pub fn format_surface_summary(surface: &GreeksSurface) -> String {
    let (rows, cols) = surface.shape();

    let mut out = format!(
        "{} surface over {} x {} ({} x {})\n",
        surface.option_type(),
        surface.axis1().parameter(),
        surface.axis2().parameter(),
        cols,
        rows
    );
    out.push_str(&format!(
        "{:<8} {:<9} {:>14} {:>14}\n",
        "Metric", "Unit", "Min", "Max"
    ));
    out.push_str(&"-".repeat(48));
    out.push('\n');

    for metric in Metric::ALL {
        let (min, max) = finite_range(&display_surface(surface, metric));
        out.push_str(&format!(
            "{:<8} {:<9} {:>14.6} {:>14.6}\n",
            metric.name(),
            display_unit(metric),
            min,
            max
        ));
    }

    let non_finite = surface.non_finite_cells();
    if non_finite > 0 {
        out.push_str(&format!("non-finite cells: {}\n", non_finite));
    }

    out
}
