//! Scalar-or-array numeric abstraction.
//!
//! The closed-form pricing formulas are written once against [`Field`] and
//! then evaluated either on plain `f64` values (a single market point) or on
//! `ndarray` arrays (a whole parameter mesh, element by element).
//!
//! ## Contract
//!
//! - Binary operators combine two values of the same kind. For arrays both
//!   operands must have the same shape; the mesh builder guarantees this.
//! - Operators with an `f64` right-hand side apply the scalar to every element.
//! - Transcendental methods are element-wise and never panic: NaN and
//!   infinities propagate.
//!
//! Scalar literals must be written with an explicit `_f64` suffix inside
//! generic code, otherwise the `Mul<Self>`/`Mul<f64>` candidates are ambiguous.

use std::ops::{Add, Div, Mul, Neg, Sub};

use ndarray::{Array, Dimension};

use super::distributions::{norm_cdf, norm_cdf_array, norm_pdf, norm_pdf_array};

/// Numeric values the pricing formulas can be evaluated over.
///
/// Implemented for `f64` and for owned `ndarray` arrays of `f64` of any
/// dimension.
///
/// # Examples
/// ```
/// use greeks_core::math::Field;
/// use ndarray::array;
///
/// fn discount<V: Field>(rate: &V, time: &V) -> V {
///     (-(rate.clone() * time.clone())).exp()
/// }
///
/// let scalar = discount(&0.05, &1.0);
/// assert!((scalar - 0.951229).abs() < 1e-5);
///
/// let grid = discount(&array![0.05, 0.05], &array![1.0, 2.0]);
/// assert_eq!(grid[0], scalar);
/// ```
pub trait Field:
    Clone
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Add<f64, Output = Self>
    + Sub<f64, Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
{
    /// Natural logarithm.
    fn ln(&self) -> Self;

    /// Exponential function.
    fn exp(&self) -> Self;

    /// Square root.
    fn sqrt(&self) -> Self;

    /// Standard normal CDF, N(x).
    fn norm_cdf(&self) -> Self;

    /// Standard normal PDF, n(x).
    fn norm_pdf(&self) -> Self;
}

impl Field for f64 {
    #[inline]
    fn ln(&self) -> Self {
        f64::ln(*self)
    }

    #[inline]
    fn exp(&self) -> Self {
        f64::exp(*self)
    }

    #[inline]
    fn sqrt(&self) -> Self {
        f64::sqrt(*self)
    }

    #[inline]
    fn norm_cdf(&self) -> Self {
        norm_cdf(*self)
    }

    #[inline]
    fn norm_pdf(&self) -> Self {
        norm_pdf(*self)
    }
}

impl<D: Dimension> Field for Array<f64, D> {
    fn ln(&self) -> Self {
        self.mapv(f64::ln)
    }

    fn exp(&self) -> Self {
        self.mapv(f64::exp)
    }

    fn sqrt(&self) -> Self {
        self.mapv(f64::sqrt)
    }

    fn norm_cdf(&self) -> Self {
        norm_cdf_array(self)
    }

    fn norm_pdf(&self) -> Self {
        norm_pdf_array(self)
    }
}
