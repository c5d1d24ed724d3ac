//! Standard normal distribution functions.
//!
//! This module provides:
//! - `norm_cdf`: Cumulative distribution function (CDF), N(x)
//! - `norm_pdf`: Probability density function (PDF), n(x)
//! - `norm_cdf_array` / `norm_pdf_array`: the same functions applied element-wise
//!   to an array of any dimension, preserving its shape
//!
//! The CDF is built on the error function from `statrs`. Its absolute error is
//! about 1e-11 (N(1) is off by 1.4e-11), well below any pricing tolerance. N(0)
//! is exactly 0.5, N(-x) + N(x) = 1 holds to rounding, and the tails saturate
//! to 0 and 1 without any explicit clamping. NaN inputs propagate to NaN
//! outputs.

use ndarray::{Array, ArrayBase, Data, Dimension};
use statrs::function::erf::erf;

/// Square root of 2.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// 1 / sqrt(2 * pi)
pub const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1).
///
/// # Mathematical Definition
/// N(x) = (1/2) * (1 + erf(x / sqrt(2)))
///
/// # Arguments
/// * `x` - Input value
///
/// # Returns
/// The probability P(X <= x), in range [0, 1].
///
/// # Examples
/// ```
/// use greeks_core::math::distributions::norm_cdf;
///
/// assert_eq!(norm_cdf(0.0), 0.5);
/// assert!(norm_cdf(-3.0) < 0.01);
/// assert!(norm_cdf(3.0) > 0.99);
/// assert!(norm_cdf(f64::NAN).is_nan());
/// ```
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / SQRT_2))
}

/// Standard normal probability density function.
///
/// # Mathematical Definition
/// n(x) = (1 / sqrt(2π)) * exp(-x² / 2)
///
/// # Arguments
/// * `x` - Input value
///
/// # Returns
/// The density value n(x), in range (0, 1/sqrt(2π)].
///
/// # Examples
/// ```
/// use greeks_core::math::distributions::norm_pdf;
///
/// // n(0) = 1 / sqrt(2π) ≈ 0.3989
/// assert!((norm_pdf(0.0) - 0.3989422804).abs() < 1e-10);
///
/// // n(1) = exp(-0.5) / sqrt(2π) ≈ 0.2420
/// assert!((norm_pdf(1.0) - 0.2419707245).abs() < 1e-10);
/// ```
#[inline]
pub fn norm_pdf(x: f64) -> f64 {
    FRAC_1_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Applies [`norm_cdf`] to every element of `x`.
///
/// The output has the same shape as the input. Elements are evaluated
/// independently.
///
/// # Examples
/// ```
/// use greeks_core::math::distributions::norm_cdf_array;
/// use ndarray::array;
///
/// let cdf = norm_cdf_array(&array![-1.0, 0.0, 1.0]);
/// assert_eq!(cdf.len(), 3);
/// assert_eq!(cdf[1], 0.5);
/// ```
pub fn norm_cdf_array<S, D>(x: &ArrayBase<S, D>) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    x.mapv(norm_cdf)
}

/// Applies [`norm_pdf`] to every element of `x`.
///
/// The output has the same shape as the input.
pub fn norm_pdf_array<S, D>(x: &ArrayBase<S, D>) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    x.mapv(norm_pdf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array3};

    // ==========================================================
    // norm_cdf tests
    // ==========================================================

    #[test]
    fn test_norm_cdf_at_zero() {
        assert_eq!(norm_cdf(0.0), 0.5);
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        // N(-x) + N(x) = 1 for all x
        let test_values = [-3.0, -2.0, -1.0, -0.5, 0.0, 0.5, 1.0, 2.0, 3.0];
        for x in test_values {
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_norm_cdf_reference_values() {
        // statrs erf carries ~1e-11 absolute error
        assert_relative_eq!(norm_cdf(1.0), 0.8413447460685429, epsilon = 1e-10);
        assert_relative_eq!(norm_cdf(-1.0), 0.15865525393145707, epsilon = 1e-10);
        assert_relative_eq!(norm_cdf(2.0), 0.9772498680518208, epsilon = 1e-10);
        assert_relative_eq!(norm_cdf(-2.0), 0.022750131948179195, epsilon = 1e-10);
        assert_relative_eq!(norm_cdf(3.0), 0.9986501019683699, epsilon = 1e-10);
    }

    #[test]
    fn test_norm_cdf_extreme_values() {
        let cdf_large_pos = norm_cdf(8.0);
        assert!(cdf_large_pos > 0.999999);
        assert!(cdf_large_pos <= 1.0);

        let cdf_large_neg = norm_cdf(-8.0);
        assert!(cdf_large_neg < 0.000001);
        assert!(cdf_large_neg >= 0.0);

        // Saturation, no clamping involved
        assert_eq!(norm_cdf(40.0), 1.0);
        assert_eq!(norm_cdf(-40.0), 0.0);
        assert_eq!(norm_cdf(f64::INFINITY), 1.0);
        assert_eq!(norm_cdf(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_norm_cdf_monotonic() {
        let values: Vec<f64> = (-50..=50).map(|i| i as f64 * 0.1).collect();
        for pair in values.windows(2) {
            assert!(
                norm_cdf(pair[1]) > norm_cdf(pair[0]),
                "CDF not monotonic at x = {}",
                pair[0]
            );
        }
    }

    #[test]
    fn test_norm_cdf_nan_propagates() {
        assert!(norm_cdf(f64::NAN).is_nan());
    }

    // ==========================================================
    // norm_pdf tests
    // ==========================================================

    #[test]
    fn test_norm_pdf_at_zero() {
        let expected = 1.0 / (2.0 * std::f64::consts::PI).sqrt();
        assert_relative_eq!(norm_pdf(0.0), expected, epsilon = 1e-16);
        assert_eq!(norm_pdf(0.0), FRAC_1_SQRT_2PI);
    }

    #[test]
    fn test_norm_pdf_symmetry() {
        for x in [0.5, 1.0, 1.5, 2.0, 2.5, 3.0] {
            assert_eq!(norm_pdf(x), norm_pdf(-x));
        }
    }

    #[test]
    fn test_norm_pdf_reference_values() {
        assert_relative_eq!(norm_pdf(1.0), 0.24197072451914337, epsilon = 1e-15);
        assert_relative_eq!(norm_pdf(2.0), 0.05399096651318806, epsilon = 1e-15);
        assert_relative_eq!(norm_pdf(3.0), 0.004431848411938008, epsilon = 1e-15);
    }

    #[test]
    fn test_norm_pdf_maximum_at_zero() {
        let pdf_0 = norm_pdf(0.0);
        for x in [-0.1, 0.1, -1.0, 1.0, -2.0, 2.0] {
            assert!(pdf_0 > norm_pdf(x), "PDF(0) not greater than PDF({})", x);
        }
    }

    #[test]
    fn test_norm_pdf_approaches_zero() {
        assert!(norm_pdf(5.0) < 1e-5);
        assert!(norm_pdf(8.0) < 1e-12);
        assert_eq!(norm_pdf(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_norm_pdf_nan_propagates() {
        assert!(norm_pdf(f64::NAN).is_nan());
    }

    #[test]
    fn test_cdf_pdf_relationship() {
        // Central difference of the CDF approximates the PDF
        let h = 1e-5;
        for x in [-2.0, -1.0, 0.0, 1.0, 2.0] {
            let numerical_derivative = (norm_cdf(x + h) - norm_cdf(x - h)) / (2.0 * h);
            assert_relative_eq!(numerical_derivative, norm_pdf(x), epsilon = 1e-8);
        }
    }

    // ==========================================================
    // Element-wise tests
    // ==========================================================

    #[test]
    fn test_array_preserves_shape() {
        let x = Array3::from_shape_fn((2, 3, 4), |(i, j, k)| i as f64 - j as f64 + 0.25 * k as f64);
        assert_eq!(norm_cdf_array(&x).shape(), x.shape());
        assert_eq!(norm_pdf_array(&x).shape(), x.shape());
    }

    #[test]
    fn test_array_matches_scalar() {
        let x = array![[-2.5, -0.3, 0.0], [0.7, 1.9, 4.2]];
        let cdf = norm_cdf_array(&x);
        let pdf = norm_pdf_array(&x);
        for ((idx, &xi), (&c, &p)) in x.indexed_iter().zip(cdf.iter().zip(pdf.iter())) {
            assert_eq!(c, norm_cdf(xi), "cdf mismatch at {:?}", idx);
            assert_eq!(p, norm_pdf(xi), "pdf mismatch at {:?}", idx);
        }
    }

    #[test]
    fn test_array_nan_is_isolated() {
        let x = array![0.0, f64::NAN, 1.0];
        let cdf = norm_cdf_array(&x);
        assert_eq!(cdf[0], 0.5);
        assert!(cdf[1].is_nan());
        assert_relative_eq!(cdf[2], 0.8413447460685429, epsilon = 1e-10);
    }

    #[test]
    fn test_array_view_input() {
        let x = array![[0.0, 1.0], [2.0, 3.0]];
        let column = x.column(0);
        let cdf = norm_cdf_array(&column);
        assert_eq!(cdf.len(), 2);
        assert_eq!(cdf[0], 0.5);
    }

    // ==========================================================
    // Property-based tests
    // ==========================================================

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn test_cdf_in_unit_interval(x in -50.0f64..50.0) {
                let p = norm_cdf(x);
                prop_assert!((0.0..=1.0).contains(&p));
            }

            #[test]
            fn test_cdf_symmetry_property(x in -8.0f64..8.0) {
                prop_assert!((norm_cdf(x) + norm_cdf(-x) - 1.0).abs() < 1e-14);
            }

            #[test]
            fn test_pdf_bounded_by_peak(x in -50.0f64..50.0) {
                let d = norm_pdf(x);
                prop_assert!(d >= 0.0);
                prop_assert!(d <= FRAC_1_SQRT_2PI);
            }
        }
    }
}
