//! Cox-Ross-Rubinstein binomial lattice for European and American options.
//!
//! The lattice discretises `[0, T]` into `N` steps of length Δt = T/N and
//! builds a recombining tree with
//!
//! - up factor u = e^(σ√Δt), down factor d = 1/u
//! - risk-neutral probability p = (e^((r - q)Δt) - d) / (u - d)
//!
//! Terminal payoffs are rolled back with the one-step discount e^(-rΔt).
//! American exercise compares continuation against intrinsic value at every
//! node of every layer. Only two layers of length N + 1 are alive at any
//! time, so memory is O(N) while work is O(N²).

use quant_core::{LatticeSettings, PricingError};
use tracing::trace;

use crate::params::{ExerciseStyle, OptionParams, OptionType};

/// Binomial lattice pricer.
///
/// # Examples
/// ```
/// use quant_options::{BinomialLattice, ExerciseStyle, OptionParams, OptionType};
///
/// let params = OptionParams::new(100.0, 100.0, 0.2, 0.05, 1.0).unwrap();
/// let lattice = BinomialLattice::new(params, 200).unwrap();
///
/// let european = lattice.price(OptionType::Put, ExerciseStyle::European).unwrap();
/// let american = lattice.price(OptionType::Put, ExerciseStyle::American).unwrap();
/// assert!(american >= european);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialLattice {
    params: OptionParams,
    steps: usize,
}

/// Per-step quantities of a calibrated lattice.
#[derive(Debug, Clone, Copy)]
struct StepFactors {
    /// σ√Δt, so that u = e^(log_up)
    log_up: f64,
    up: f64,
    down: f64,
    probability: f64,
    discount: f64,
}

impl BinomialLattice {
    /// Creates a lattice with `steps` time steps.
    ///
    /// # Errors
    /// `PricingError::Domain` if `steps < 1`, `σ ≤ 0` or `T ≤ 0`.
    pub fn new(params: OptionParams, steps: usize) -> Result<Self, PricingError> {
        if steps < 1 {
            return Err(PricingError::domain("steps", steps as f64, "must be at least 1"));
        }
        if params.volatility() <= 0.0 {
            return Err(PricingError::domain(
                "volatility",
                params.volatility(),
                "must be positive for a lattice",
            ));
        }
        if params.expiry() <= 0.0 {
            return Err(PricingError::domain(
                "expiry",
                params.expiry(),
                "must be positive for a lattice",
            ));
        }
        Ok(Self { params, steps })
    }

    /// Creates a lattice using the configured default step count.
    pub fn with_settings(
        params: OptionParams,
        settings: &LatticeSettings,
    ) -> Result<Self, PricingError> {
        Self::new(params, settings.default_steps)
    }

    /// Returns the number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    fn factors(&self) -> Result<StepFactors, PricingError> {
        let p = &self.params;
        let dt = p.expiry() / self.steps as f64;
        let log_up = p.volatility() * dt.sqrt();
        let up = log_up.exp();
        let down = 1.0 / up;
        let growth = ((p.rate() - p.dividend_yield()) * dt).exp();
        let probability = (growth - down) / (up - down);

        trace!(steps = self.steps, up, down, probability, "Calibrated binomial lattice");

        let arbitrage_free = probability > 0.0 && probability < 1.0;
        if !arbitrage_free {
            return Err(PricingError::degenerate(format!(
                "risk-neutral probability {} outside (0, 1) with u = {}, d = {}; \
                 increase the step count",
                probability, up, down
            )));
        }

        Ok(StepFactors {
            log_up,
            up,
            down,
            probability,
            discount: (-p.rate() * dt).exp(),
        })
    }

    /// Prices the option by backward induction.
    ///
    /// # Errors
    /// `PricingError::ArithmeticDegeneracy` if the calibrated probability
    /// leaves (0, 1).
    pub fn price(&self, option_type: OptionType, style: ExerciseStyle) -> Result<f64, PricingError> {
        let f = self.factors()?;
        let n = self.steps;
        let spot = self.params.spot();
        let strike = self.params.strike();

        // Underlying at layer j, node k: S·u^k·d^(j-k) = S·e^((2k - j)·σ√Δt)
        let node_price = |j: usize, k: usize| spot * ((2.0 * k as f64 - j as f64) * f.log_up).exp();

        let mut values: Vec<f64> = (0..=n)
            .map(|k| option_type.payoff(node_price(n, k), strike))
            .collect();
        let mut next = vec![0.0; n + 1];

        let p_up = f.discount * f.probability;
        let p_down = f.discount * (1.0 - f.probability);
        let early_exercise = style.allows_early_exercise();

        for j in (0..n).rev() {
            for k in 0..=j {
                let continuation = p_up * values[k + 1] + p_down * values[k];
                next[k] = if early_exercise {
                    continuation.max(option_type.payoff(node_price(j, k), strike))
                } else {
                    continuation
                };
            }
            std::mem::swap(&mut values, &mut next);
        }

        trace!(
            up = f.up,
            down = f.down,
            value = values[0],
            "Binomial induction complete"
        );
        Ok(values[0])
    }
}

fn lattice(
    spot: f64,
    strike: f64,
    volatility: f64,
    rate: f64,
    steps: usize,
    expiry: f64,
) -> Result<BinomialLattice, PricingError> {
    BinomialLattice::new(OptionParams::new(spot, strike, volatility, rate, expiry)?, steps)
}

/// European option price on an `N`-step lattice for `(S, K, σ, r, N, T, type)`.
///
/// # Examples
/// ```
/// use quant_options::{binomial_eu_option, OptionType};
///
/// let price = binomial_eu_option(100.0, 100.0, 0.2, 0.05, 500, 1.0, OptionType::Call).unwrap();
/// assert!((price - 10.4506).abs() < 1e-2);
/// ```
pub fn binomial_eu_option(
    spot: f64,
    strike: f64,
    volatility: f64,
    rate: f64,
    steps: usize,
    expiry: f64,
    option_type: OptionType,
) -> Result<f64, PricingError> {
    lattice(spot, strike, volatility, rate, steps, expiry)?
        .price(option_type, ExerciseStyle::European)
}

/// American option price on an `N`-step lattice for `(S, K, σ, r, N, T, type)`.
pub fn binomial_us_option(
    spot: f64,
    strike: f64,
    volatility: f64,
    rate: f64,
    steps: usize,
    expiry: f64,
    option_type: OptionType,
) -> Result<f64, PricingError> {
    lattice(spot, strike, volatility, rate, steps, expiry)?
        .price(option_type, ExerciseStyle::American)
}
