//! Option contract parameters and selectors.
//!
//! This module provides:
//! - [`OptionType`]: call or put, parsable from `"call"` / `"put"`
//! - [`ExerciseStyle`]: European or American exercise
//! - [`OptionParams`]: validated market and contract inputs

use std::fmt;
use std::str::FromStr;

use quant_core::PricingError;

/// Option payoff side.
///
/// # Examples
/// ```
/// use quant_options::OptionType;
///
/// let call: OptionType = "Call".parse().unwrap();
/// assert_eq!(call, OptionType::Call);
/// assert_eq!(call.payoff(110.0, 100.0), 10.0);
/// assert!("straddle".parse::<OptionType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy at the strike
    Call,
    /// Right to sell at the strike
    Put,
}

impl OptionType {
    /// Intrinsic value of the option at underlying price `spot`.
    ///
    /// - Call: max(S - K, 0)
    /// - Put: max(K - S, 0)
    #[inline]
    pub fn payoff(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            _ => Err(PricingError::domain(
                "option_type",
                f64::NAN,
                format!("unknown option type '{}', expected 'call' or 'put'", s),
            )),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

/// Option exercise style.
///
/// # Variants
/// - `European`: Exercise only at expiry
/// - `American`: Exercise at any time up to expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExerciseStyle {
    /// European style: exercise only at expiry.
    #[default]
    European,
    /// American style: exercise at any time before expiry.
    American,
}

impl ExerciseStyle {
    /// Returns `true` if early exercise is allowed.
    #[inline]
    pub fn allows_early_exercise(&self) -> bool {
        matches!(self, ExerciseStyle::American)
    }
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseStyle::European => write!(f, "European"),
            ExerciseStyle::American => write!(f, "American"),
        }
    }
}

/// Market and contract inputs for a single vanilla option.
///
/// Construction validates the domain shared by every pricer:
/// - spot and strike strictly positive and finite
/// - volatility non-negative and finite
/// - expiry non-negative and finite (years)
/// - rate and dividend yield finite
///
/// Engines that need stricter bounds (for example `σ > 0`) check them
/// themselves.
///
/// # Examples
/// ```
/// use quant_options::OptionParams;
///
/// let params = OptionParams::new(100.0, 95.0, 0.25, 0.03, 0.5)
///     .unwrap()
///     .with_dividend_yield(0.01)
///     .unwrap();
/// assert_eq!(params.dividend_yield(), 0.01);
///
/// assert!(OptionParams::new(100.0, 95.0, -0.25, 0.03, 0.5).is_err());
/// ```
///
/// Deserialization runs the same checks as [`OptionParams::new`]; an omitted
/// `dividend_yield` defaults to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawOptionParams"))]
pub struct OptionParams {
    spot: f64,
    strike: f64,
    volatility: f64,
    rate: f64,
    dividend_yield: f64,
    expiry: f64,
}

impl OptionParams {
    /// Creates validated parameters with a zero dividend yield.
    ///
    /// # Arguments
    /// * `spot` - Underlying price S (> 0)
    /// * `strike` - Strike price K (> 0)
    /// * `volatility` - Annualised volatility σ (≥ 0)
    /// * `rate` - Continuously compounded risk-free rate r
    /// * `expiry` - Time to expiry T in years (≥ 0)
    ///
    /// # Errors
    /// `PricingError::Domain` naming the first offending parameter.
    pub fn new(
        spot: f64,
        strike: f64,
        volatility: f64,
        rate: f64,
        expiry: f64,
    ) -> Result<Self, PricingError> {
        ensure_positive("spot", spot)?;
        ensure_positive("strike", strike)?;
        ensure_non_negative("volatility", volatility)?;
        ensure_finite("rate", rate)?;
        ensure_non_negative("expiry", expiry)?;

        Ok(Self {
            spot,
            strike,
            volatility,
            rate,
            dividend_yield: 0.0,
            expiry,
        })
    }

    /// Sets the continuous dividend (carry) yield q.
    pub fn with_dividend_yield(mut self, dividend_yield: f64) -> Result<Self, PricingError> {
        ensure_finite("dividend_yield", dividend_yield)?;
        self.dividend_yield = dividend_yield;
        Ok(self)
    }

    /// Returns the spot price S.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the strike K.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the volatility σ.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the risk-free rate r.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the dividend yield q.
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Returns the time to expiry T in years.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Intrinsic value at the current spot.
    #[inline]
    pub fn intrinsic(&self, option_type: OptionType) -> f64 {
        option_type.payoff(self.spot, self.strike)
    }
}

/// Unchecked wire form of [`OptionParams`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawOptionParams {
    spot: f64,
    strike: f64,
    volatility: f64,
    rate: f64,
    #[serde(default)]
    dividend_yield: f64,
    expiry: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawOptionParams> for OptionParams {
    type Error = PricingError;

    fn try_from(raw: RawOptionParams) -> Result<Self, Self::Error> {
        OptionParams::new(raw.spot, raw.strike, raw.volatility, raw.rate, raw.expiry)?
            .with_dividend_yield(raw.dividend_yield)
    }
}

fn ensure_finite(parameter: &str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::domain(parameter, value, "must be finite"))
    }
}

fn ensure_positive(parameter: &str, value: f64) -> Result<(), PricingError> {
    ensure_finite(parameter, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::domain(parameter, value, "must be positive"))
    }
}

fn ensure_non_negative(parameter: &str, value: f64) -> Result<(), PricingError> {
    ensure_finite(parameter, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(PricingError::domain(parameter, value, "must be non-negative"))
    }
}
