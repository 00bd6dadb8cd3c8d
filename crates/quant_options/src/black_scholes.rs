//! Black-Scholes pricing model for European options.
//!
//! This module provides the Black-Scholes model with a continuous dividend
//! (carry) yield, closed-form prices and analytic Greeks.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! ## Limiting Cases
//!
//! - `T = 0`: prices collapse to intrinsic value, d₁ takes its limit
//!   (±∞, or 0 at the money), delta becomes a step function and the
//!   remaining Greeks are zero
//! - `σ = 0, T > 0`: d₁ is undefined and every formula returns
//!   `PricingError::ArithmeticDegeneracy`
//!
//! The free functions (`black_scholes_call`, `bs_gamma`, ...) keep the
//! argument orders of the external call surface. Note that Greeks take
//! `(S, K, σ, r, q, T)` while prices take `(S, K, σ, r, T, q)`.

use quant_core::math::distributions::{norm_cdf, norm_pdf};
use quant_core::PricingError;

use crate::params::{ExerciseStyle, OptionParams, OptionType};

/// First-order sensitivities plus gamma for one side of an option.
///
/// Theta is quoted per year as ∂V/∂t (calendar time), so it is usually
/// negative for long positions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂σ
    pub vega: f64,
    /// ∂V/∂t, per year
    pub theta: f64,
    /// ∂V/∂r
    pub rho: f64,
}

/// Intermediate quantities shared by every formula for one parameter set.
#[derive(Debug, Clone, Copy)]
struct Terms {
    d1: f64,
    d2: f64,
    sqrt_t: f64,
    /// e^(-rT)
    df_rate: f64,
    /// e^(-qT)
    df_carry: f64,
}

/// Black-Scholes model for European option pricing.
///
/// # Examples
/// ```
/// use quant_options::{BlackScholes, OptionParams, OptionType};
///
/// let params = OptionParams::new(100.0, 100.0, 0.2, 0.05, 1.0).unwrap();
/// let bs = BlackScholes::new(params);
///
/// let call = bs.price(OptionType::Call).unwrap();
/// let put = bs.price(OptionType::Put).unwrap();
///
/// // Put-call parity: C - P = S - K·e^(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    params: OptionParams,
}

impl BlackScholes {
    /// Creates a model for already validated parameters.
    pub fn new(params: OptionParams) -> Self {
        Self { params }
    }

    /// Returns the contract parameters.
    #[inline]
    pub fn params(&self) -> &OptionParams {
        &self.params
    }

    /// Returns `None` at expiry, where the limiting forms apply.
    fn terms(&self) -> Result<Option<Terms>, PricingError> {
        let p = &self.params;
        let t = p.expiry();
        if t == 0.0 {
            return Ok(None);
        }

        let sqrt_t = t.sqrt();
        let vol_sqrt_t = p.volatility() * sqrt_t;
        if vol_sqrt_t == 0.0 {
            return Err(PricingError::degenerate(format!(
                "σ√T is zero (σ = {}, T = {}): d1 is undefined before expiry",
                p.volatility(),
                t
            )));
        }

        let drift = (p.rate() - p.dividend_yield() + 0.5 * p.volatility() * p.volatility()) * t;
        let d1 = ((p.spot() / p.strike()).ln() + drift) / vol_sqrt_t;
        if !d1.is_finite() {
            return Err(PricingError::degenerate(format!(
                "d1 is not finite (σ√T = {:e})",
                vol_sqrt_t
            )));
        }

        Ok(Some(Terms {
            d1,
            d2: d1 - vol_sqrt_t,
            sqrt_t,
            df_rate: (-p.rate() * t).exp(),
            df_carry: (-p.dividend_yield() * t).exp(),
        }))
    }

    /// Limit of d₁ as T → 0.
    fn d1_at_expiry(&self) -> f64 {
        let (s, k) = (self.params.spot(), self.params.strike());
        if s > k {
            f64::INFINITY
        } else if s < k {
            f64::NEG_INFINITY
        } else {
            0.0
        }
    }

    /// Computes the standardised moneyness d₁.
    ///
    /// d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
    ///
    /// At expiry returns +∞ (S > K), -∞ (S < K) or 0 (S = K).
    pub fn d1(&self) -> Result<f64, PricingError> {
        Ok(match self.terms()? {
            Some(t) => t.d1,
            None => self.d1_at_expiry(),
        })
    }

    /// Computes d₂ = d₁ - σ√T.
    pub fn d2(&self) -> Result<f64, PricingError> {
        Ok(match self.terms()? {
            Some(t) => t.d2,
            None => self.d1_at_expiry(),
        })
    }

    /// Computes the option price.
    ///
    /// # Returns
    /// The theoretical price, or intrinsic value at expiry.
    pub fn price(&self, option_type: OptionType) -> Result<f64, PricingError> {
        Ok(match self.terms()? {
            Some(t) => self.price_from(&t, option_type),
            None => self.params.intrinsic(option_type),
        })
    }

    /// Prices with an explicit exercise style.
    ///
    /// # Errors
    /// - `PricingError::UnsupportedExercise` for American exercise, which has
    ///   no closed form here; use [`crate::BinomialLattice`] instead
    pub fn price_option(
        &self,
        option_type: OptionType,
        style: ExerciseStyle,
    ) -> Result<f64, PricingError> {
        if style.allows_early_exercise() {
            return Err(PricingError::UnsupportedExercise(format!(
                "{} exercise is not supported by the Black-Scholes model",
                style
            )));
        }
        self.price(option_type)
    }

    /// Computes Delta (∂V/∂S).
    ///
    /// - Call Delta = e^(-qT)·N(d₁)
    /// - Put Delta = e^(-qT)·(N(d₁) - 1)
    pub fn delta(&self, option_type: OptionType) -> Result<f64, PricingError> {
        Ok(match self.terms()? {
            Some(t) => self.delta_from(&t, option_type),
            None => self.delta_at_expiry(option_type),
        })
    }

    /// Computes Gamma (∂²V/∂S²), shared by calls and puts.
    ///
    /// Gamma = e^(-qT)·φ(d₁) / (S·σ·√T)
    pub fn gamma(&self) -> Result<f64, PricingError> {
        Ok(self.terms()?.map_or(0.0, |t| self.gamma_from(&t)))
    }

    /// Computes Vega (∂V/∂σ), shared by calls and puts.
    ///
    /// Vega = S·e^(-qT)·φ(d₁)·√T
    pub fn vega(&self) -> Result<f64, PricingError> {
        Ok(self.terms()?.map_or(0.0, |t| self.vega_from(&t)))
    }

    /// Computes Theta (∂V/∂t) per year.
    ///
    /// - Call Theta = -S·e^(-qT)·φ(d₁)·σ/(2√T) - r·K·e^(-rT)·N(d₂) + q·S·e^(-qT)·N(d₁)
    /// - Put Theta = -S·e^(-qT)·φ(d₁)·σ/(2√T) + r·K·e^(-rT)·N(-d₂) - q·S·e^(-qT)·N(-d₁)
    pub fn theta(&self, option_type: OptionType) -> Result<f64, PricingError> {
        Ok(self
            .terms()?
            .map_or(0.0, |t| self.theta_from(&t, option_type)))
    }

    /// Computes Rho (∂V/∂r).
    ///
    /// - Call Rho = K·T·e^(-rT)·N(d₂)
    /// - Put Rho = -K·T·e^(-rT)·N(-d₂)
    pub fn rho(&self, option_type: OptionType) -> Result<f64, PricingError> {
        Ok(self
            .terms()?
            .map_or(0.0, |t| self.rho_from(&t, option_type)))
    }

    /// Computes all Greeks from a single evaluation of d₁ and d₂.
    ///
    /// # Examples
    /// ```
    /// use quant_options::{BlackScholes, OptionParams, OptionType};
    ///
    /// let params = OptionParams::new(100.0, 100.0, 0.2, 0.05, 1.0).unwrap();
    /// let greeks = BlackScholes::new(params).greeks(OptionType::Call).unwrap();
    ///
    /// assert!(greeks.delta > 0.5 && greeks.delta < 1.0);
    /// assert!(greeks.gamma > 0.0);
    /// assert!(greeks.theta < 0.0);
    /// ```
    pub fn greeks(&self, option_type: OptionType) -> Result<Greeks, PricingError> {
        Ok(match self.terms()? {
            Some(t) => Greeks {
                delta: self.delta_from(&t, option_type),
                gamma: self.gamma_from(&t),
                vega: self.vega_from(&t),
                theta: self.theta_from(&t, option_type),
                rho: self.rho_from(&t, option_type),
            },
            None => Greeks {
                delta: self.delta_at_expiry(option_type),
                ..Greeks::default()
            },
        })
    }

    fn price_from(&self, t: &Terms, option_type: OptionType) -> f64 {
        let forward_spot = self.params.spot() * t.df_carry;
        let discounted_strike = self.params.strike() * t.df_rate;
        match option_type {
            OptionType::Call => forward_spot * norm_cdf(t.d1) - discounted_strike * norm_cdf(t.d2),
            OptionType::Put => discounted_strike * norm_cdf(-t.d2) - forward_spot * norm_cdf(-t.d1),
        }
    }

    fn delta_from(&self, t: &Terms, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => t.df_carry * norm_cdf(t.d1),
            OptionType::Put => t.df_carry * (norm_cdf(t.d1) - 1.0),
        }
    }

    fn delta_at_expiry(&self, option_type: OptionType) -> f64 {
        let (s, k) = (self.params.spot(), self.params.strike());
        match option_type {
            OptionType::Call if s > k => 1.0,
            OptionType::Put if s < k => -1.0,
            _ => 0.0,
        }
    }

    fn gamma_from(&self, t: &Terms) -> f64 {
        let p = &self.params;
        t.df_carry * norm_pdf(t.d1) / (p.spot() * p.volatility() * t.sqrt_t)
    }

    fn vega_from(&self, t: &Terms) -> f64 {
        self.params.spot() * t.df_carry * norm_pdf(t.d1) * t.sqrt_t
    }

    fn theta_from(&self, t: &Terms, option_type: OptionType) -> f64 {
        let p = &self.params;
        let forward_spot = p.spot() * t.df_carry;
        let discounted_strike = p.strike() * t.df_rate;

        // Common diffusion term: -S·e^(-qT)·φ(d₁)·σ/(2√T)
        let decay = -forward_spot * norm_pdf(t.d1) * p.volatility() / (2.0 * t.sqrt_t);

        match option_type {
            OptionType::Call => {
                decay - p.rate() * discounted_strike * norm_cdf(t.d2)
                    + p.dividend_yield() * forward_spot * norm_cdf(t.d1)
            }
            OptionType::Put => {
                decay + p.rate() * discounted_strike * norm_cdf(-t.d2)
                    - p.dividend_yield() * forward_spot * norm_cdf(-t.d1)
            }
        }
    }

    fn rho_from(&self, t: &Terms, option_type: OptionType) -> f64 {
        let p = &self.params;
        let factor = rho_factor(p.strike(), p.rate(), p.expiry());
        match option_type {
            OptionType::Call => factor * norm_cdf(t.d2),
            OptionType::Put => -factor * norm_cdf(-t.d2),
        }
    }
}

/// Common rho factor K·T·e^(-rT).
///
/// Call rho is this factor times N(d₂); put rho is minus it times N(-d₂).
#[inline]
pub fn rho_factor(strike: f64, rate: f64, expiry: f64) -> f64 {
    strike * expiry * (-rate * expiry).exp()
}

fn model(
    spot: f64,
    strike: f64,
    volatility: f64,
    rate: f64,
    expiry: f64,
    dividend_yield: f64,
) -> Result<BlackScholes, PricingError> {
    let params =
        OptionParams::new(spot, strike, volatility, rate, expiry)?.with_dividend_yield(dividend_yield)?;
    Ok(BlackScholes::new(params))
}

/// Standardised moneyness d₁ for `(S, K, σ, r, T, q)`.
pub fn black_scholes_x(
    spot: f64,
    strike: f64,
    volatility: f64,
    rate: f64,
    expiry: f64,
    dividend_yield: f64,
) -> Result<f64, PricingError> {
    model(spot, strike, volatility, rate, expiry, dividend_yield)?.d1()
}

/// European call price for `(S, K, σ, r, T, q)`.
///
/// # Examples
/// ```
/// use quant_options::black_scholes_call;
///
/// let price = black_scholes_call(100.0, 100.0, 0.2, 0.05, 1.0, 0.0).unwrap();
/// assert!((price - 10.4506).abs() < 1e-4);
///
/// // At expiry the price is intrinsic value
/// assert_eq!(black_scholes_call(110.0, 100.0, 0.2, 0.05, 0.0, 0.0).unwrap(), 10.0);
/// ```
pub fn black_scholes_call(
    spot: f64,
    strike: f64,
    volatility: f64,
    rate: f64,
    expiry: f64,
    dividend_yield: f64,
) -> Result<f64, PricingError> {
    model(spot, strike, volatility, rate, expiry, dividend_yield)?.price(OptionType::Call)
}

/// European put price for `(S, K, σ, r, T, q)`.
pub fn black_scholes_put(
    spot: f64,
    strike: f64,
    volatility: f64,
    rate: f64,
    expiry: f64,
    dividend_yield: f64,
) -> Result<f64, PricingError> {
    model(spot, strike, volatility, rate, expiry, dividend_yield)?.price(OptionType::Put)
}

/// Standard normal density at d₁ for `(S, K, σ, r, T)` with zero dividend yield.
pub fn norm_pdf_at_d1(
    spot: f64,
    strike: f64,
    volatility: f64,
    rate: f64,
    expiry: f64,
) -> Result<f64, PricingError> {
    let d1 = model(spot, strike, volatility, rate, expiry, 0.0)?.d1()?;
    Ok(norm_pdf(d1))
}

/// Call delta for `(S, K, σ, r, q, T)`.
pub fn bs_call_delta(
    spot: f64,
    strike: f64,
    volatility: f64,
    rate: f64,
    dividend_yield: f64,
    expiry: f64,
) -> Result<f64, PricingError> {
    model(spot, strike, volatility, rate, expiry, dividend_yield)?.delta(OptionType::Call)
}

/// Put delta for `(S, K, σ, r, q, T)`.
pub fn bs_put_delta(
    spot: f64,
    strike: f64,
    volatility: f64,
    rate: f64,
    dividend_yield: f64,
    expiry: f64,
) -> Result<f64, PricingError> {
    model(spot, strike, volatility, rate, expiry, dividend_yield)?.delta(OptionType::Put)
}

/// Gamma for `(S, K, σ, r, q, T)`.
pub fn bs_gamma(
    spot: f64,
    strike: f64,
    volatility: f64,
    rate: f64,
    dividend_yield: f64,
    expiry: f64,
) -> Result<f64, PricingError> {
    model(spot, strike, volatility, rate, expiry, dividend_yield)?.gamma()
}

/// Vega for `(S, K, σ, r, q, T)`.
pub fn bs_vega(
    spot: f64,
    strike: f64,
    volatility: f64,
    rate: f64,
    dividend_yield: f64,
    expiry: f64,
) -> Result<f64, PricingError> {
    model(spot, strike, volatility, rate, expiry, dividend_yield)?.vega()
}

/// Call theta per year for `(S, K, σ, r, q, T)`.
pub fn bs_call_theta(
    spot: f64,
    strike: f64,
    volatility: f64,
    rate: f64,
    dividend_yield: f64,
    expiry: f64,
) -> Result<f64, PricingError> {
    model(spot, strike, volatility, rate, expiry, dividend_yield)?.theta(OptionType::Call)
}

/// Put theta per year for `(S, K, σ, r, q, T)`.
pub fn bs_put_theta(
    spot: f64,
    strike: f64,
    volatility: f64,
    rate: f64,
    dividend_yield: f64,
    expiry: f64,
) -> Result<f64, PricingError> {
    model(spot, strike, volatility, rate, expiry, dividend_yield)?.theta(OptionType::Put)
}

/// Call rho for `(S, K, σ, r, T)` with zero dividend yield.
pub fn bs_call_rho(
    spot: f64,
    strike: f64,
    volatility: f64,
    rate: f64,
    expiry: f64,
) -> Result<f64, PricingError> {
    model(spot, strike, volatility, rate, expiry, 0.0)?.rho(OptionType::Call)
}

/// Put rho for `(S, K, σ, r, T)` with zero dividend yield.
pub fn bs_put_rho(
    spot: f64,
    strike: f64,
    volatility: f64,
    rate: f64,
    expiry: f64,
) -> Result<f64, PricingError> {
    model(spot, strike, volatility, rate, expiry, 0.0)?.rho(OptionType::Put)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn atm() -> BlackScholes {
        BlackScholes::new(OptionParams::new(100.0, 100.0, 0.2, 0.05, 1.0).unwrap())
    }

    // ==========================================================
    // d1/d2 Tests
    // ==========================================================

    #[test]
    fn test_d1_d2_atm() {
        // d1 = (0 + (0.05 + 0.02)·1) / 0.2 = 0.35
        let bs = atm();
        assert_relative_eq!(bs.d1().unwrap(), 0.35, epsilon = 1e-12);
        assert_relative_eq!(bs.d2().unwrap(), 0.15, epsilon = 1e-12);
    }

    #[test]
    fn test_d1_with_dividend_yield() {
        let d1 = black_scholes_x(100.0, 100.0, 0.2, 0.05, 1.0, 0.02).unwrap();
        assert_relative_eq!(d1, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_d1_expiry_limits() {
        assert_eq!(black_scholes_x(110.0, 100.0, 0.2, 0.05, 0.0, 0.0).unwrap(), f64::INFINITY);
        assert_eq!(
            black_scholes_x(90.0, 100.0, 0.2, 0.05, 0.0, 0.0).unwrap(),
            f64::NEG_INFINITY
        );
        assert_eq!(black_scholes_x(100.0, 100.0, 0.2, 0.05, 0.0, 0.0).unwrap(), 0.0);
    }

    // ==========================================================
    // Price Tests
    // ==========================================================

    #[test]
    fn test_reference_prices() {
        let call = black_scholes_call(100.0, 100.0, 0.2, 0.05, 1.0, 0.0).unwrap();
        let put = black_scholes_put(100.0, 100.0, 0.2, 0.05, 1.0, 0.0).unwrap();
        assert_abs_diff_eq!(call, 10.4506, epsilon = 1e-4);
        assert_abs_diff_eq!(put, 5.5735, epsilon = 1e-4);
        assert_relative_eq!(call, 10.450583572185565, max_relative = 1e-10);
        assert_relative_eq!(put, 5.573526022256971, max_relative = 1e-10);
    }

    #[test]
    fn test_put_call_parity_with_dividends() {
        let cases = [
            (100.0, 100.0, 0.2, 0.05, 0.02, 1.0),
            (100.0, 110.0, 0.25, 0.03, 0.0, 0.5),
            (50.0, 40.0, 0.4, 0.01, 0.0, 2.0),
            (80.0, 120.0, 0.6, -0.01, 0.04, 3.0),
        ];
        for (s, k, sigma, r, q, t) in cases {
            let call = black_scholes_call(s, k, sigma, r, t, q).unwrap();
            let put = black_scholes_put(s, k, sigma, r, t, q).unwrap();
            let forward_diff = s * (-q * t).exp() - k * (-r * t).exp();
            assert_relative_eq!(call - put, forward_diff, max_relative = 1e-9, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_expiry_returns_intrinsic() {
        assert_eq!(black_scholes_call(120.0, 100.0, 0.3, 0.05, 0.0, 0.0).unwrap(), 20.0);
        assert_eq!(black_scholes_put(120.0, 100.0, 0.3, 0.05, 0.0, 0.0).unwrap(), 0.0);
        assert_eq!(black_scholes_put(80.0, 100.0, 0.3, 0.05, 0.0, 0.0).unwrap(), 20.0);
    }

    #[test]
    fn test_zero_volatility_before_expiry_is_degenerate() {
        let err = black_scholes_call(100.0, 100.0, 0.0, 0.05, 1.0, 0.0).unwrap_err();
        assert!(matches!(err, PricingError::ArithmeticDegeneracy(_)));

        let err = bs_gamma(100.0, 100.0, 0.0, 0.05, 0.0, 1.0).unwrap_err();
        assert!(matches!(err, PricingError::ArithmeticDegeneracy(_)));
    }

    #[test]
    fn test_zero_volatility_at_expiry_is_fine() {
        assert_eq!(black_scholes_call(110.0, 100.0, 0.0, 0.05, 0.0, 0.0).unwrap(), 10.0);
        assert_eq!(bs_vega(110.0, 100.0, 0.0, 0.05, 0.0, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_domain_errors() {
        assert!(black_scholes_call(100.0, 100.0, -0.2, 0.05, 1.0, 0.0)
            .unwrap_err()
            .is_domain());
        assert!(black_scholes_put(100.0, 100.0, 0.2, 0.05, -1.0, 0.0)
            .unwrap_err()
            .is_domain());
        assert!(bs_call_delta(-1.0, 100.0, 0.2, 0.05, 0.0, 1.0)
            .unwrap_err()
            .is_domain());
    }

    #[test]
    fn test_price_option_rejects_american() {
        let bs = atm();
        assert!(bs.price_option(OptionType::Call, ExerciseStyle::European).is_ok());
        match bs.price_option(OptionType::Put, ExerciseStyle::American) {
            Err(PricingError::UnsupportedExercise(msg)) => assert!(msg.contains("American")),
            other => panic!("Expected UnsupportedExercise, got {:?}", other),
        }
    }

    // ==========================================================
    // Greeks Tests
    // ==========================================================

    #[test]
    fn test_atm_greeks_reference_values() {
        let g = atm().greeks(OptionType::Call).unwrap();
        assert_relative_eq!(g.delta, 0.6368306511756191, max_relative = 1e-9);
        assert_relative_eq!(g.gamma, 0.018762017345846895, max_relative = 1e-9);
        assert_relative_eq!(g.vega, 37.52403469169379, max_relative = 1e-9);
        assert_relative_eq!(g.theta, -6.414027546438197, max_relative = 1e-8);
        assert_relative_eq!(g.rho, 53.232481545376345, max_relative = 1e-8);
    }

    #[test]
    fn test_greeks_bundle_matches_individual_calls() {
        let bs = BlackScholes::new(
            OptionParams::new(100.0, 110.0, 0.25, 0.03, 0.5)
                .unwrap()
                .with_dividend_yield(0.01)
                .unwrap(),
        );
        for ty in [OptionType::Call, OptionType::Put] {
            let g = bs.greeks(ty).unwrap();
            assert_eq!(g.delta, bs.delta(ty).unwrap());
            assert_eq!(g.gamma, bs.gamma().unwrap());
            assert_eq!(g.vega, bs.vega().unwrap());
            assert_eq!(g.theta, bs.theta(ty).unwrap());
            assert_eq!(g.rho, bs.rho(ty).unwrap());
        }
    }

    #[test]
    fn test_delta_relationship() {
        // Call delta - put delta = e^(-qT)
        let (s, k, sigma, r, q, t) = (100.0, 100.0, 0.2, 0.05, 0.02, 1.0);
        let call = bs_call_delta(s, k, sigma, r, q, t).unwrap();
        let put = bs_put_delta(s, k, sigma, r, q, t).unwrap();
        assert_relative_eq!(call - put, (-q * t).exp(), epsilon = 1e-14);
    }

    #[test]
    fn test_greeks_at_expiry() {
        let itm = BlackScholes::new(OptionParams::new(110.0, 100.0, 0.2, 0.05, 0.0).unwrap());
        let g = itm.greeks(OptionType::Call).unwrap();
        assert_eq!(
            g,
            Greeks {
                delta: 1.0,
                ..Greeks::default()
            }
        );
        assert_eq!(itm.delta(OptionType::Put).unwrap(), 0.0);

        let otm = BlackScholes::new(OptionParams::new(90.0, 100.0, 0.2, 0.05, 0.0).unwrap());
        assert_eq!(otm.delta(OptionType::Call).unwrap(), 0.0);
        assert_eq!(otm.delta(OptionType::Put).unwrap(), -1.0);
        assert_eq!(otm.theta(OptionType::Put).unwrap(), 0.0);
        assert_eq!(otm.rho(OptionType::Put).unwrap(), 0.0);
    }

    #[test]
    fn test_call_theta_negative_near_atm() {
        for k in [95.0, 100.0, 105.0] {
            assert!(bs_call_theta(100.0, k, 0.2, 0.05, 0.0, 1.0).unwrap() < 0.0);
        }
    }

    #[test]
    fn test_rho_scalars_use_rho_factor() {
        let d2 = atm().d2().unwrap();
        let factor = rho_factor(100.0, 0.05, 1.0);
        assert_relative_eq!(
            bs_call_rho(100.0, 100.0, 0.2, 0.05, 1.0).unwrap(),
            factor * norm_cdf(d2),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            bs_put_rho(100.0, 100.0, 0.2, 0.05, 1.0).unwrap(),
            -factor * norm_cdf(-d2),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_rho_factor() {
        assert_relative_eq!(rho_factor(100.0, 0.05, 2.0), 200.0 * (-0.1_f64).exp(), epsilon = 1e-12);
        assert_eq!(rho_factor(100.0, 0.05, 0.0), 0.0);
    }

    #[test]
    fn test_norm_pdf_at_d1() {
        let expected = norm_pdf(0.35);
        assert_relative_eq!(
            norm_pdf_at_d1(100.0, 100.0, 0.2, 0.05, 1.0).unwrap(),
            expected,
            epsilon = 1e-14
        );
        assert_eq!(norm_pdf_at_d1(110.0, 100.0, 0.2, 0.05, 0.0).unwrap(), 0.0);
    }

    // ==========================================================
    // Property-based tests
    // ==========================================================

    mod proptests {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn test_put_call_parity(
                s in 10.0f64..500.0,
                k in 10.0f64..500.0,
                sigma in 0.05f64..1.0,
                r in -0.02f64..0.15,
                q in 0.0f64..0.08,
                t in 0.05f64..5.0,
            ) {
                let call = black_scholes_call(s, k, sigma, r, t, q).unwrap();
                let put = black_scholes_put(s, k, sigma, r, t, q).unwrap();
                let forward_diff = s * (-q * t).exp() - k * (-r * t).exp();
                let scale = s.max(k);
                prop_assert!((call - put - forward_diff).abs() <= 1e-9 * scale);
            }

            #[test]
            fn test_gamma_vega_non_negative(
                s in 10.0f64..500.0,
                k in 10.0f64..500.0,
                sigma in 0.05f64..1.0,
                t in 0.05f64..5.0,
            ) {
                prop_assert!(bs_gamma(s, k, sigma, 0.03, 0.01, t).unwrap() >= 0.0);
                prop_assert!(bs_vega(s, k, sigma, 0.03, 0.01, t).unwrap() >= 0.0);
            }

            #[test]
            fn test_prices_within_no_arbitrage_bounds(
                s in 10.0f64..500.0,
                k in 10.0f64..500.0,
                sigma in 0.05f64..1.0,
                t in 0.05f64..5.0,
            ) {
                let call = black_scholes_call(s, k, sigma, 0.05, t, 0.0).unwrap();
                prop_assert!(call >= (s - k * (-0.05 * t).exp()).max(0.0) - 1e-9);
                prop_assert!(call <= s + 1e-9);
            }
        }
    }
}
