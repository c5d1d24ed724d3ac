//! Metric selectors for surfaces.

use std::fmt;
use std::str::FromStr;

use greeks_core::types::PricingError;

use crate::analytical::PricingResult;

/// One plottable output of the evaluator.
///
/// Ordered as displayed: price first, then the Greeks by order of the
/// derivative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Metric {
    /// Option value
    Price,
    /// ∂V/∂S
    Delta,
    /// ∂²V/∂S²
    Gamma,
    /// ∂V/∂σ
    Vega,
    /// ∂V/∂t
    Theta,
    /// ∂V/∂r
    Rho,
}

impl Metric {
    /// All metrics in display order.
    pub const ALL: [Metric; 6] = [
        Metric::Price,
        Metric::Delta,
        Metric::Gamma,
        Metric::Vega,
        Metric::Theta,
        Metric::Rho,
    ];

    /// Lowercase metric name.
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Price => "price",
            Metric::Delta => "delta",
            Metric::Gamma => "gamma",
            Metric::Vega => "vega",
            Metric::Theta => "theta",
            Metric::Rho => "rho",
        }
    }

    /// Borrows the field of `result` this metric refers to.
    ///
    /// # Examples
    /// ```
    /// use greeks_models::analytical::{evaluate, MarketParams, OptionType};
    /// use greeks_models::surface::Metric;
    ///
    /// let result = evaluate(&MarketParams::new(100.0, 100.0, 0.05, 1.0, 0.2), OptionType::Call);
    /// assert_eq!(*Metric::Vega.select(&result), result.vega);
    /// ```
    pub fn select<'a, V>(&self, result: &'a PricingResult<V>) -> &'a V {
        match self {
            Metric::Price => &result.price,
            Metric::Delta => &result.delta,
            Metric::Gamma => &result.gamma,
            Metric::Vega => &result.vega,
            Metric::Theta => &result.theta,
            Metric::Rho => &result.rho,
        }
    }
}

impl FromStr for Metric {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Metric::ALL
            .into_iter()
            .find(|metric| metric.name() == lowered)
            .ok_or_else(|| {
                PricingError::InvalidArgument(format!(
                    "unknown metric '{}', expected one of price, delta, gamma, vega, theta, rho",
                    s
                ))
            })
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for metric in Metric::ALL {
            assert_eq!(metric.name().parse::<Metric>().unwrap(), metric);
            assert_eq!(metric.to_string(), metric.name());
        }
        assert_eq!("GAMMA".parse::<Metric>().unwrap(), Metric::Gamma);
    }

    #[test]
    fn test_unknown_metric() {
        assert!(matches!(
            "vanna".parse::<Metric>(),
            Err(PricingError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_order_matches_display_order() {
        let mut sorted = Metric::ALL;
        sorted.sort();
        assert_eq!(sorted, Metric::ALL);
    }

    #[test]
    fn test_select_fields() {
        let result = PricingResult {
            d1: 0.0,
            d2: 0.0,
            price: 1.0,
            delta: 2.0,
            gamma: 3.0,
            vega: 4.0,
            theta: 5.0,
            rho: 6.0,
        };
        let selected: Vec<f64> = Metric::ALL.iter().map(|m| *m.select(&result)).collect();
        assert_eq!(selected, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }
}
