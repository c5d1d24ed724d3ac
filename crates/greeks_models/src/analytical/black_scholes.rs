//! Black-Scholes pricing model for European options.
//!
//! This module provides closed-form pricing and analytical Greeks for
//! European calls and puts, evaluated either at one market point (`f64`) or
//! over a whole parameter mesh (`ndarray` arrays) by the same generic code.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use std::fmt;
use std::str::FromStr;

use greeks_core::math::Field;
use greeks_core::types::PricingError;

/// Market inputs for one Black-Scholes evaluation.
///
/// With `V = f64` this is a single market point. With `V = Array2<f64>` every
/// field holds one value per mesh cell and all fields share the same shape.
///
/// # Domain
/// - `spot`, `strike`: strictly positive
/// - `rate`: any real, negative rates included
/// - `expiry` (years), `volatility` (annualised): strictly positive; zero
///   makes σ√T vanish and the Greeks NaN or infinite
///
/// # Examples
/// ```
/// use greeks_models::analytical::MarketParams;
///
/// let params = MarketParams::new(100.0, 100.0, 0.05, 1.0, 0.2);
/// assert!(params.validate().is_ok());
///
/// let expired = MarketParams { expiry: 0.0, ..params };
/// assert!(expired.validate().unwrap_err().is_singularity());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketParams<V = f64> {
    /// Spot price (S)
    pub spot: V,
    /// Strike price (K)
    pub strike: V,
    /// Risk-free interest rate, continuously compounded (r)
    pub rate: V,
    /// Time to expiry in years (T)
    pub expiry: V,
    /// Annualised volatility (σ)
    pub volatility: V,
}

impl<V> MarketParams<V> {
    /// Creates market parameters from (S, K, r, T, σ).
    pub fn new(spot: V, strike: V, rate: V, expiry: V, volatility: V) -> Self {
        Self {
            spot,
            strike,
            rate,
            expiry,
            volatility,
        }
    }
}

impl MarketParams<f64> {
    /// Checks the evaluator's preconditions.
    ///
    /// The evaluator never calls this itself. Callers that want a hard error
    /// instead of NaN/∞ output run it first.
    ///
    /// # Errors
    /// - `PricingError::NumericSingularity` if expiry or volatility is not
    ///   strictly positive
    /// - `PricingError::InvalidArgument` if spot or strike is not strictly
    ///   positive, or any field is not finite
    pub fn validate(&self) -> Result<(), PricingError> {
        let fields = [
            ("spot", self.spot),
            ("strike", self.strike),
            ("rate", self.rate),
            ("expiry", self.expiry),
            ("volatility", self.volatility),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(PricingError::InvalidArgument(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }

        if self.spot <= 0.0 {
            return Err(PricingError::InvalidArgument(format!(
                "spot must be strictly positive, got {}",
                self.spot
            )));
        }
        if self.strike <= 0.0 {
            return Err(PricingError::InvalidArgument(format!(
                "strike must be strictly positive, got {}",
                self.strike
            )));
        }
        if self.expiry <= 0.0 {
            return Err(PricingError::singularity("expiry", self.expiry));
        }
        if self.volatility <= 0.0 {
            return Err(PricingError::singularity("volatility", self.volatility));
        }

        Ok(())
    }

    /// Discount factor e^(-rT).
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.expiry).exp()
    }

    /// Right-hand side of put-call parity, S - K·e^(-rT).
    ///
    /// For any non-singular input, `call.price - put.price` equals this value
    /// to floating-point precision.
    #[inline]
    pub fn forward_parity(&self) -> f64 {
        self.spot - self.strike * self.discount_factor()
    }
}

/// Option side.
///
/// Parsed case-insensitively from `"call"` or `"put"`; any other string is
/// rejected with `PricingError::InvalidArgument`.
///
/// # Examples
/// ```
/// use greeks_models::analytical::OptionType;
///
/// assert_eq!("CALL".parse::<OptionType>().unwrap(), OptionType::Call);
/// assert_eq!("put".parse::<OptionType>().unwrap(), OptionType::Put);
/// assert!("X".parse::<OptionType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy at the strike
    Call,
    /// Right to sell at the strike
    Put,
}

impl OptionType {
    /// Both option types, calls first.
    pub const ALL: [OptionType; 2] = [OptionType::Call, OptionType::Put];

    /// Returns true for calls.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Lowercase name, as accepted by `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            _ => Err(PricingError::InvalidArgument(format!(
                "option type must be Call or Put, got '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

/// Black-Scholes price, intermediates and Greeks.
///
/// A pure function of its `MarketParams` and `OptionType`. Units are
/// canonical: theta per year, vega per unit of volatility, rho per unit of
/// rate. Display rescalings (per day, per 1%) belong to the presentation
/// layer and work on copies.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult<V = f64> {
    /// d₁
    pub d1: V,
    /// d₂ = d₁ - σ√T
    pub d2: V,
    /// Option value
    pub price: V,
    /// ∂V/∂S
    pub delta: V,
    /// ∂²V/∂S², identical for calls and puts
    pub gamma: V,
    /// ∂V/∂σ, identical for calls and puts
    pub vega: V,
    /// ∂V/∂t, per year (usually negative)
    pub theta: V,
    /// ∂V/∂r
    pub rho: V,
}

/// Evaluates the Black-Scholes price and Greeks.
///
/// Works on single points (`V = f64`) and, element-wise, on arrays of a
/// common shape. Inputs are not checked: T = 0 or σ = 0 yields NaN or
/// infinite values rather than an error.
///
/// # Examples
/// ```
/// use greeks_models::analytical::{evaluate, MarketParams, OptionType};
/// use ndarray::array;
///
/// let point = MarketParams::new(100.0, 100.0, 0.05, 1.0, 0.2);
/// let call = evaluate(&point, OptionType::Call);
/// assert!((call.price - 10.4506).abs() < 1e-3);
///
/// // Same formula over a 1x2 mesh of volatilities
/// let mesh = MarketParams::new(
///     array![[100.0, 100.0]],
///     array![[100.0, 100.0]],
///     array![[0.05, 0.05]],
///     array![[1.0, 1.0]],
///     array![[0.2, 0.3]],
/// );
/// let calls = evaluate(&mesh, OptionType::Call);
/// assert_eq!(calls.price[[0, 0]], call.price);
/// assert!(calls.price[[0, 1]] > call.price);
/// ```
pub fn evaluate<V: Field>(params: &MarketParams<V>, option_type: OptionType) -> PricingResult<V> {
    let MarketParams {
        spot,
        strike,
        rate,
        expiry,
        volatility,
    } = params;

    let sqrt_t = expiry.sqrt();
    let vol_sqrt_t = volatility.clone() * sqrt_t.clone();

    // d1 = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    let log_moneyness = (spot.clone() / strike.clone()).ln();
    let drift = (rate.clone() + volatility.clone() * volatility.clone() * 0.5_f64) * expiry.clone();
    let d1 = (log_moneyness + drift) / vol_sqrt_t.clone();
    let d2 = d1.clone() - vol_sqrt_t.clone();

    // K·e^(-rT)
    let discounted_strike = strike.clone() * (-(rate.clone() * expiry.clone())).exp();
    let pdf_d1 = d1.norm_pdf();

    // Shared by both sides: -(S·n(d₁)·σ)/(2√T)
    let time_decay =
        -(spot.clone() * pdf_d1.clone() * volatility.clone()) / (sqrt_t.clone() * 2.0_f64);
    let gamma = pdf_d1.clone() / (spot.clone() * vol_sqrt_t);
    let vega = spot.clone() * pdf_d1 * sqrt_t;

    let (price, delta, theta, rho) = match option_type {
        OptionType::Call => {
            let n_d1 = d1.norm_cdf();
            let n_d2 = d2.norm_cdf();
            let price = spot.clone() * n_d1.clone() - discounted_strike.clone() * n_d2.clone();
            let theta = time_decay - rate.clone() * discounted_strike.clone() * n_d2.clone();
            let rho = discounted_strike * expiry.clone() * n_d2;
            (price, n_d1, theta, rho)
        }
        OptionType::Put => {
            let n_minus_d1 = (-d1.clone()).norm_cdf();
            let n_minus_d2 = (-d2.clone()).norm_cdf();
            let price = discounted_strike.clone() * n_minus_d2.clone() - spot.clone() * n_minus_d1;
            let delta = d1.norm_cdf() - 1.0_f64;
            let theta = time_decay + rate.clone() * discounted_strike.clone() * n_minus_d2.clone();
            let rho = -(discounted_strike * expiry.clone() * n_minus_d2);
            (price, delta, theta, rho)
        }
    };

    PricingResult {
        d1,
        d2,
        price,
        delta,
        gamma,
        vega,
        theta,
        rho,
    }
}

/// Parses the option type by name, then evaluates.
///
/// # Errors
/// - `PricingError::InvalidArgument` if `option_type` is neither Call nor
///   Put (case-insensitive). Nothing is computed in that case.
///
/// # Examples
/// ```
/// use greeks_models::analytical::{evaluate_named, MarketParams};
///
/// let params = MarketParams::new(100.0, 100.0, 0.05, 1.0, 0.2);
/// assert!(evaluate_named(&params, "Put").is_ok());
/// assert!(evaluate_named(&params, "X").is_err());
/// ```
pub fn evaluate_named<V: Field>(
    params: &MarketParams<V>,
    option_type: &str,
) -> Result<PricingResult<V>, PricingError> {
    let option_type = option_type.parse::<OptionType>()?;
    Ok(evaluate(params, option_type))
}
