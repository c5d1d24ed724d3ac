//! Parameter meshes for surface evaluation.

use ndarray::Array2;

use greeks_core::types::PricingError;

use super::axis::{Axis, AxisParameter};
use crate::analytical::MarketParams;

/// Cartesian mesh of two axes over a set of fixed market parameters.
///
/// Cell `(row, col)` takes its axis-1 value from `axis1[col]`, its axis-2
/// value from `axis2[row]`, and every other parameter from `base`. The mesh
/// shape is therefore `(axis2.len(), axis1.len())`.
///
/// # Memory Layout
///
/// ```text
///             axis1[0]   axis1[1]   ...   axis1[n1-1]
/// axis2[0]    (0, 0)     (0, 1)     ...   (0, n1-1)
/// axis2[1]    (1, 0)     (1, 1)     ...   (1, n1-1)
/// ...
/// ```
///
/// # Examples
/// ```
/// use greeks_models::analytical::MarketParams;
/// use greeks_models::surface::{Axis, AxisParameter, SurfaceGrid};
///
/// let base = MarketParams::new(34.03, 40.0, 0.0412, 30.0 / 365.0, 0.35);
/// let spots = Axis::linspace(AxisParameter::Spot, 20.0, 60.0, 5).unwrap();
/// let expiries = Axis::days_to_expiry(365, 4).unwrap();
///
/// let grid = SurfaceGrid::spot_expiry(spots, expiries, base).unwrap();
/// assert_eq!(grid.shape(), (4, 5));
///
/// let cell = grid.cell(3, 1).unwrap();
/// assert_eq!(cell.spot, 30.0);
/// assert_eq!(cell.expiry, 1.0);
/// assert_eq!(cell.volatility, 0.35);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceGrid {
    axis1: Axis,
    axis2: Axis,
    base: MarketParams<f64>,
}

impl SurfaceGrid {
    /// Creates a grid from two axes and the fixed parameters.
    ///
    /// The fields of `base` named by the axes are ignored; every other field
    /// must be admissible for its parameter.
    ///
    /// # Errors
    /// - `PricingError::InvalidArgument` if both axes vary the same parameter
    /// - `PricingError::InvalidAxis` / `PricingError::NumericSingularity` if a
    ///   fixed parameter is out of domain
    pub fn new(axis1: Axis, axis2: Axis, base: MarketParams<f64>) -> Result<Self, PricingError> {
        if axis1.parameter() == axis2.parameter() {
            return Err(PricingError::InvalidArgument(format!(
                "both surface axes vary {}",
                axis1.parameter()
            )));
        }

        for parameter in AxisParameter::ALL {
            if parameter != axis1.parameter() && parameter != axis2.parameter() {
                parameter.check(parameter.get(&base))?;
            }
        }

        Ok(Self { axis1, axis2, base })
    }

    /// Spot along axis 1, volatility along axis 2, expiry held fixed.
    ///
    /// # Errors
    /// `PricingError::InvalidArgument` if the axes vary other parameters,
    /// otherwise as [`SurfaceGrid::new`].
    pub fn spot_volatility(
        spots: Axis,
        volatilities: Axis,
        base: MarketParams<f64>,
    ) -> Result<Self, PricingError> {
        expect_parameter(&spots, AxisParameter::Spot)?;
        expect_parameter(&volatilities, AxisParameter::Volatility)?;
        Self::new(spots, volatilities, base)
    }

    /// Spot along axis 1, expiry along axis 2, volatility held fixed.
    ///
    /// # Errors
    /// `PricingError::InvalidArgument` if the axes vary other parameters,
    /// otherwise as [`SurfaceGrid::new`].
    pub fn spot_expiry(
        spots: Axis,
        expiries: Axis,
        base: MarketParams<f64>,
    ) -> Result<Self, PricingError> {
        expect_parameter(&spots, AxisParameter::Spot)?;
        expect_parameter(&expiries, AxisParameter::Expiry)?;
        Self::new(spots, expiries, base)
    }

    /// Axis varying along columns.
    #[inline]
    pub fn axis1(&self) -> &Axis {
        &self.axis1
    }

    /// Axis varying along rows.
    #[inline]
    pub fn axis2(&self) -> &Axis {
        &self.axis2
    }

    /// Fixed parameters.
    #[inline]
    pub fn base(&self) -> &MarketParams<f64> {
        &self.base
    }

    /// Parameters held constant across the grid.
    pub fn fixed_parameters(&self) -> Vec<AxisParameter> {
        AxisParameter::ALL
            .into_iter()
            .filter(|&p| p != self.axis1.parameter() && p != self.axis2.parameter())
            .collect()
    }

    /// `(rows, cols) = (axis2.len(), axis1.len())`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.axis2.len(), self.axis1.len())
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.axis1.len() * self.axis2.len()
    }

    /// Always false; grids have at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Market parameters of one cell, or `None` outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<MarketParams<f64>> {
        let (rows, cols) = self.shape();
        (row < rows && col < cols).then(|| self.cell_at(row, col))
    }

    /// Full mesh: one array per parameter, each shaped like the grid.
    ///
    /// Fixed parameters are broadcast to the full shape so the mesh can be fed
    /// straight into the element-wise evaluator.
    pub fn mesh(&self) -> MarketParams<Array2<f64>> {
        let field = |parameter: AxisParameter| {
            Array2::from_shape_fn(self.shape(), |(row, col)| self.value_at(parameter, row, col))
        };

        MarketParams::new(
            field(AxisParameter::Spot),
            field(AxisParameter::Strike),
            field(AxisParameter::Rate),
            field(AxisParameter::Expiry),
            field(AxisParameter::Volatility),
        )
    }

    pub(crate) fn cell_at(&self, row: usize, col: usize) -> MarketParams<f64> {
        MarketParams::new(
            self.value_at(AxisParameter::Spot, row, col),
            self.value_at(AxisParameter::Strike, row, col),
            self.value_at(AxisParameter::Rate, row, col),
            self.value_at(AxisParameter::Expiry, row, col),
            self.value_at(AxisParameter::Volatility, row, col),
        )
    }

    #[inline]
    fn value_at(&self, parameter: AxisParameter, row: usize, col: usize) -> f64 {
        if parameter == self.axis1.parameter() {
            self.axis1.values()[col]
        } else if parameter == self.axis2.parameter() {
            self.axis2.values()[row]
        } else {
            parameter.get(&self.base)
        }
    }
}

fn expect_parameter(axis: &Axis, expected: AxisParameter) -> Result<(), PricingError> {
    if axis.parameter() != expected {
        return Err(PricingError::InvalidArgument(format!(
            "expected a {} axis, got {}",
            expected,
            axis.parameter()
        )));
    }
    Ok(())
}
