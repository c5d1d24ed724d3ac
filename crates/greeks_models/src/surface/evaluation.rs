//! Surface evaluation.
//!
//! Two behaviour-equivalent strategies turn a [`SurfaceGrid`] into a
//! [`GreeksSurface`]:
//! - `Vectorized`: the generic Black-Scholes formula runs once over the mesh
//!   arrays, element by element
//! - `Parallel`: the scalar formula runs per cell on a Rayon parallel iterator
//!
//! Cells are independent, so neither strategy imposes an evaluation order.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;
use tracing::debug;

use greeks_core::types::PricingError;

use super::axis::Axis;
use super::grid::SurfaceGrid;
use super::metric::Metric;
use crate::analytical::{evaluate, OptionType, PricingResult};

/// Cell count from which `EvaluationMode::Auto` switches to `Parallel`.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 16_384;

/// Strategy used to evaluate a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EvaluationMode {
    /// Array-wide element-wise evaluation of the mesh
    #[default]
    Vectorized,
    /// Parallel map of the scalar evaluator over cells
    Parallel,
    /// `Parallel` for grids of at least [`DEFAULT_PARALLEL_THRESHOLD`] cells,
    /// `Vectorized` otherwise
    Auto,
}

impl EvaluationMode {
    /// Resolves `Auto` for a grid of `cells` cells.
    #[inline]
    pub fn resolve(self, cells: usize) -> EvaluationMode {
        match self {
            EvaluationMode::Auto if cells >= DEFAULT_PARALLEL_THRESHOLD => EvaluationMode::Parallel,
            EvaluationMode::Auto => EvaluationMode::Vectorized,
            mode => mode,
        }
    }
}

impl FromStr for EvaluationMode {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vectorized" | "vectorised" => Ok(EvaluationMode::Vectorized),
            "parallel" => Ok(EvaluationMode::Parallel),
            "auto" => Ok(EvaluationMode::Auto),
            _ => Err(PricingError::InvalidArgument(format!(
                "unknown evaluation mode '{}', expected vectorized, parallel or auto",
                s
            ))),
        }
    }
}

impl fmt::Display for EvaluationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationMode::Vectorized => write!(f, "vectorized"),
            EvaluationMode::Parallel => write!(f, "parallel"),
            EvaluationMode::Auto => write!(f, "auto"),
        }
    }
}

/// Price and Greeks over every cell of a grid.
///
/// Every metric array has the grid's shape `(axis2.len(), axis1.len())` and is
/// index-aligned with [`SurfaceGrid::cell`].
#[derive(Debug, Clone)]
pub struct GreeksSurface {
    grid: SurfaceGrid,
    option_type: OptionType,
    result: PricingResult<Array2<f64>>,
}

impl SurfaceGrid {
    /// Evaluates price and Greeks on every cell.
    ///
    /// Singular cells cannot occur on grids built through the validated
    /// constructors; any NaN/∞ that still appears is kept in place.
    ///
    /// # Examples
    /// ```
    /// use greeks_models::analytical::{MarketParams, OptionType};
    /// use greeks_models::surface::{Axis, AxisParameter, EvaluationMode, Metric, SurfaceGrid};
    ///
    /// let base = MarketParams::new(100.0, 100.0, 0.05, 1.0, 0.2);
    /// let spots = Axis::linspace(AxisParameter::Spot, 80.0, 120.0, 9).unwrap();
    /// let vols = Axis::linspace(AxisParameter::Volatility, 0.1, 0.5, 5).unwrap();
    /// let grid = SurfaceGrid::spot_volatility(spots, vols, base).unwrap();
    ///
    /// let fast = grid.evaluate(OptionType::Call, EvaluationMode::Vectorized);
    /// let wide = grid.evaluate(OptionType::Call, EvaluationMode::Parallel);
    /// assert_eq!(fast.metric(Metric::Gamma), wide.metric(Metric::Gamma));
    /// ```
    pub fn evaluate(&self, option_type: OptionType, mode: EvaluationMode) -> GreeksSurface {
        let (rows, cols) = self.shape();
        let mode = mode.resolve(self.len());
        debug!(rows, cols, option = %option_type, mode = %mode, "evaluating Greeks surface");

        let result = match mode {
            EvaluationMode::Parallel => evaluate_cells(self, option_type),
            EvaluationMode::Vectorized | EvaluationMode::Auto => evaluate(&self.mesh(), option_type),
        };

        let surface = GreeksSurface {
            grid: self.clone(),
            option_type,
            result,
        };

        let non_finite = surface.non_finite_cells();
        if non_finite > 0 {
            debug!(non_finite, "surface contains non-finite cells");
        }

        surface
    }
}

/// Scalar evaluator mapped over cells in parallel, then gathered per metric.
fn evaluate_cells(grid: &SurfaceGrid, option_type: OptionType) -> PricingResult<Array2<f64>> {
    let (rows, cols) = grid.shape();

    let cells: Vec<PricingResult<f64>> = (0..rows * cols)
        .into_par_iter()
        .map(|index| evaluate(&grid.cell_at(index / cols, index % cols), option_type))
        .collect();

    let gather = |field: fn(&PricingResult<f64>) -> f64| {
        Array2::from_shape_fn((rows, cols), |(row, col)| field(&cells[row * cols + col]))
    };

    PricingResult {
        d1: gather(|r| r.d1),
        d2: gather(|r| r.d2),
        price: gather(|r| r.price),
        delta: gather(|r| r.delta),
        gamma: gather(|r| r.gamma),
        vega: gather(|r| r.vega),
        theta: gather(|r| r.theta),
        rho: gather(|r| r.rho),
    }
}

impl GreeksSurface {
    /// Option side the surface was evaluated for.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// The evaluated grid.
    #[inline]
    pub fn grid(&self) -> &SurfaceGrid {
        &self.grid
    }

    /// Axis varying along columns.
    #[inline]
    pub fn axis1(&self) -> &Axis {
        self.grid.axis1()
    }

    /// Axis varying along rows.
    #[inline]
    pub fn axis2(&self) -> &Axis {
        self.grid.axis2()
    }

    /// `(axis2.len(), axis1.len())`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.grid.shape()
    }

    /// One metric over the whole grid.
    pub fn metric(&self, metric: Metric) -> ArrayView2<'_, f64> {
        metric.select(&self.result).view()
    }

    /// Metric name to surface, for every metric.
    pub fn metrics(&self) -> BTreeMap<Metric, ArrayView2<'_, f64>> {
        Metric::ALL
            .into_iter()
            .map(|metric| (metric, self.metric(metric)))
            .collect()
    }

    /// Full result of one cell, or `None` outside the grid.
    pub fn at(&self, row: usize, col: usize) -> Option<PricingResult<f64>> {
        let (rows, cols) = self.shape();
        if row >= rows || col >= cols {
            return None;
        }

        let r = &self.result;
        let idx = [row, col];
        Some(PricingResult {
            d1: r.d1[idx],
            d2: r.d2[idx],
            price: r.price[idx],
            delta: r.delta[idx],
            gamma: r.gamma[idx],
            vega: r.vega[idx],
            theta: r.theta[idx],
            rho: r.rho[idx],
        })
    }

    /// Struct-of-arrays result.
    #[inline]
    pub fn result(&self) -> &PricingResult<Array2<f64>> {
        &self.result
    }

    /// Consumes the surface, returning the struct-of-arrays result.
    pub fn into_result(self) -> PricingResult<Array2<f64>> {
        self.result
    }

    /// Number of cells where any metric is NaN or infinite.
    pub fn non_finite_cells(&self) -> usize {
        let (rows, cols) = self.shape();
        let mut count = 0;
        for row in 0..rows {
            for col in 0..cols {
                if Metric::ALL
                    .iter()
                    .any(|m| !m.select(&self.result)[[row, col]].is_finite())
                {
                    count += 1;
                }
            }
        }
        count
    }
}
