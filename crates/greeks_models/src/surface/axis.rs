//! Surface axes.
//!
//! An [`Axis`] is an ordered list of values for one market parameter. Two axes
//! over different parameters span a [`super::SurfaceGrid`].
//!
//! Axis construction is where singular inputs are kept out of a surface:
//! expiry and volatility values must be strictly positive, which is why the
//! default expiry axis starts at one day rather than zero.

use std::fmt;
use std::str::FromStr;

use greeks_core::types::PricingError;

use crate::analytical::MarketParams;

/// Days per year used to convert calendar days to year fractions.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// The market parameter an axis varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AxisParameter {
    /// Spot price (S)
    Spot,
    /// Strike price (K)
    Strike,
    /// Risk-free rate (r)
    Rate,
    /// Time to expiry in years (T)
    Expiry,
    /// Volatility (σ)
    Volatility,
}

impl AxisParameter {
    /// All parameters, in `MarketParams` field order.
    pub const ALL: [AxisParameter; 5] = [
        AxisParameter::Spot,
        AxisParameter::Strike,
        AxisParameter::Rate,
        AxisParameter::Expiry,
        AxisParameter::Volatility,
    ];

    /// Field name, as used in exports.
    pub fn name(&self) -> &'static str {
        match self {
            AxisParameter::Spot => "spot",
            AxisParameter::Strike => "strike",
            AxisParameter::Rate => "rate",
            AxisParameter::Expiry => "expiry",
            AxisParameter::Volatility => "volatility",
        }
    }

    /// Conventional symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            AxisParameter::Spot => "S",
            AxisParameter::Strike => "K",
            AxisParameter::Rate => "r",
            AxisParameter::Expiry => "T",
            AxisParameter::Volatility => "σ",
        }
    }

    /// Reads this parameter from a set of market parameters.
    pub fn get<V>(&self, params: &MarketParams<V>) -> V
    where
        V: Clone,
    {
        match self {
            AxisParameter::Spot => params.spot.clone(),
            AxisParameter::Strike => params.strike.clone(),
            AxisParameter::Rate => params.rate.clone(),
            AxisParameter::Expiry => params.expiry.clone(),
            AxisParameter::Volatility => params.volatility.clone(),
        }
    }

    /// Checks that `value` is admissible for this parameter.
    ///
    /// # Errors
    /// - `PricingError::InvalidAxis` for non-finite values and for
    ///   non-positive spot or strike
    /// - `PricingError::NumericSingularity` for non-positive expiry or
    ///   volatility
    pub fn check(&self, value: f64) -> Result<(), PricingError> {
        if !value.is_finite() {
            return Err(PricingError::InvalidAxis(format!(
                "{} values must be finite, got {}",
                self.name(),
                value
            )));
        }

        match self {
            AxisParameter::Spot | AxisParameter::Strike if value <= 0.0 => {
                Err(PricingError::InvalidAxis(format!(
                    "{} values must be strictly positive, got {}",
                    self.name(),
                    value
                )))
            }
            AxisParameter::Expiry | AxisParameter::Volatility if value <= 0.0 => {
                Err(PricingError::singularity(self.name(), value))
            }
            _ => Ok(()),
        }
    }
}

impl FromStr for AxisParameter {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spot" | "s" => Ok(AxisParameter::Spot),
            "strike" | "k" => Ok(AxisParameter::Strike),
            "rate" | "r" => Ok(AxisParameter::Rate),
            "expiry" | "t" => Ok(AxisParameter::Expiry),
            "volatility" | "vol" | "sigma" | "σ" => Ok(AxisParameter::Volatility),
            _ => Err(PricingError::InvalidArgument(format!(
                "unknown market parameter '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for AxisParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Ordered values of one varying market parameter.
///
/// # Invariants
/// - At least one value
/// - Every value passes [`AxisParameter::check`]
///
/// # Examples
/// ```
/// use greeks_models::surface::{Axis, AxisParameter};
///
/// let spots = Axis::linspace(AxisParameter::Spot, 20.0, 60.0, 5).unwrap();
/// assert_eq!(spots.values(), &[20.0, 30.0, 40.0, 50.0, 60.0]);
///
/// // Zero volatility would make σ√T vanish
/// assert!(Axis::linspace(AxisParameter::Volatility, 0.0, 1.0, 5).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Axis {
    parameter: AxisParameter,
    values: Vec<f64>,
}

impl Axis {
    /// Creates an axis from explicit values.
    ///
    /// # Errors
    /// - `PricingError::InvalidAxis` if `values` is empty or any value is
    ///   non-finite or out of domain
    /// - `PricingError::NumericSingularity` if an expiry or volatility value
    ///   is not strictly positive
    pub fn new(parameter: AxisParameter, values: Vec<f64>) -> Result<Self, PricingError> {
        if values.is_empty() {
            return Err(PricingError::InvalidAxis(format!(
                "{} axis has no values",
                parameter.name()
            )));
        }
        for &value in &values {
            parameter.check(value)?;
        }

        Ok(Self { parameter, values })
    }

    /// Creates `points` evenly spaced values from `start` to `end` inclusive.
    ///
    /// A single point yields `[start]`. The last value is exactly `end`.
    ///
    /// # Errors
    /// Same as [`Axis::new`], plus `PricingError::InvalidAxis` when
    /// `points == 0`.
    pub fn linspace(
        parameter: AxisParameter,
        start: f64,
        end: f64,
        points: usize,
    ) -> Result<Self, PricingError> {
        if points == 0 {
            return Err(PricingError::InvalidAxis(format!(
                "{} axis needs at least one point",
                parameter.name()
            )));
        }

        let values = if points == 1 {
            vec![start]
        } else {
            let step = (end - start) / (points - 1) as f64;
            let mut values: Vec<f64> = (0..points).map(|i| start + step * i as f64).collect();
            values[points - 1] = end;
            values
        };

        Self::new(parameter, values)
    }

    /// Expiry axis in years, from one day up to `max_days` days.
    ///
    /// # Examples
    /// ```
    /// use greeks_models::surface::Axis;
    ///
    /// let expiries = Axis::days_to_expiry(365, 3).unwrap();
    /// assert_eq!(expiries.values()[0], 1.0 / 365.0);
    /// assert_eq!(expiries.values()[2], 1.0);
    /// ```
    pub fn days_to_expiry(max_days: u32, points: usize) -> Result<Self, PricingError> {
        if max_days == 0 {
            return Err(PricingError::singularity("expiry", 0.0));
        }

        Self::linspace(
            AxisParameter::Expiry,
            1.0 / DAYS_PER_YEAR,
            f64::from(max_days) / DAYS_PER_YEAR,
            points,
        )
    }

    /// The parameter this axis varies.
    #[inline]
    pub fn parameter(&self) -> AxisParameter {
        self.parameter
    }

    /// Axis values, in order.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; axes are never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ==========================================================
    // AxisParameter tests
    // ==========================================================

    #[test]
    fn test_parameter_parsing() {
        assert_eq!("spot".parse::<AxisParameter>().unwrap(), AxisParameter::Spot);
        assert_eq!("S".parse::<AxisParameter>().unwrap(), AxisParameter::Spot);
        assert_eq!("K".parse::<AxisParameter>().unwrap(), AxisParameter::Strike);
        assert_eq!("r".parse::<AxisParameter>().unwrap(), AxisParameter::Rate);
        assert_eq!("T".parse::<AxisParameter>().unwrap(), AxisParameter::Expiry);
        assert_eq!("sigma".parse::<AxisParameter>().unwrap(), AxisParameter::Volatility);
        assert_eq!("Volatility".parse::<AxisParameter>().unwrap(), AxisParameter::Volatility);
        assert!("dividend".parse::<AxisParameter>().is_err());
    }

    #[test]
    fn test_parameter_get() {
        let params = MarketParams::new(1.0, 2.0, 3.0, 4.0, 5.0);
        let read: Vec<f64> = AxisParameter::ALL.iter().map(|p| p.get(&params)).collect();
        assert_eq!(read, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_parameter_check() {
        assert!(AxisParameter::Rate.check(-0.01).is_ok());
        assert!(AxisParameter::Rate.check(0.0).is_ok());
        assert!(AxisParameter::Rate.check(f64::NAN).is_err());

        assert!(matches!(
            AxisParameter::Spot.check(0.0),
            Err(PricingError::InvalidAxis(_))
        ));
        assert!(AxisParameter::Expiry.check(0.0).unwrap_err().is_singularity());
        assert!(AxisParameter::Volatility.check(-0.2).unwrap_err().is_singularity());
        assert!(AxisParameter::Volatility.check(0.2).is_ok());
    }

    // ==========================================================
    // Axis construction tests
    // ==========================================================

    #[test]
    fn test_linspace_endpoints() {
        let axis = Axis::linspace(AxisParameter::Volatility, 0.05, 1.0, 20).unwrap();
        assert_eq!(axis.len(), 20);
        assert_eq!(axis.values()[0], 0.05);
        assert_eq!(axis.values()[19], 1.0);
        assert_relative_eq!(axis.values()[1] - axis.values()[0], 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_linspace_single_point() {
        let axis = Axis::linspace(AxisParameter::Spot, 42.0, 99.0, 1).unwrap();
        assert_eq!(axis.values(), &[42.0]);
    }

    #[test]
    fn test_linspace_descending() {
        let axis = Axis::linspace(AxisParameter::Strike, 60.0, 20.0, 3).unwrap();
        assert_eq!(axis.values(), &[60.0, 40.0, 20.0]);
    }

    #[test]
    fn test_linspace_zero_points_rejected() {
        assert!(matches!(
            Axis::linspace(AxisParameter::Spot, 1.0, 2.0, 0),
            Err(PricingError::InvalidAxis(_))
        ));
    }

    #[test]
    fn test_empty_axis_rejected() {
        assert!(matches!(
            Axis::new(AxisParameter::Rate, vec![]),
            Err(PricingError::InvalidAxis(_))
        ));
    }

    #[test]
    fn test_expiry_axis_excludes_zero() {
        let err = Axis::linspace(AxisParameter::Expiry, 0.0, 1.0, 10).unwrap_err();
        assert_eq!(err, PricingError::singularity("expiry", 0.0));
    }

    #[test]
    fn test_days_to_expiry_starts_at_one_day() {
        let axis = Axis::days_to_expiry(730, 50).unwrap();
        assert_eq!(axis.parameter(), AxisParameter::Expiry);
        assert_eq!(axis.values()[0], 1.0 / 365.0);
        assert_eq!(axis.values()[49], 2.0);
        assert!(axis.values().iter().all(|&t| t > 0.0));
    }

    #[test]
    fn test_days_to_expiry_zero_days_rejected() {
        assert!(Axis::days_to_expiry(0, 10).unwrap_err().is_singularity());
    }
}
