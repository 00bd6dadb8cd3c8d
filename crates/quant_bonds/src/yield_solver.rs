//! Yield-to-maturity (internal rate of return) solver.
//!
//! Finds the annual nominal yield `y` with
//! `price_from_yield(cashflows, y, m) = price`.
//!
//! The search runs on the periodic rate r = y/m. Newton-Raphson with a
//! central finite-difference derivative of the discounting primitive is
//! tried first from the caller's seed. If it fails, Brent's method is run
//! over a sequence of widening brackets. Brent stops on bracket width as
//! well as on residual, so a root whose price residual is still above
//! tolerance is finished with Newton steps before it is accepted. Every
//! stage is bounded by the solver configuration, and a failure reports the
//! best estimate seen.

use quant_core::math::solvers::{BrentSolver, NewtonRaphsonSolver, RootResult, SolverConfig};
use quant_core::{KernelConfig, PricingError, SolverError};
use tracing::{debug, warn};

use crate::checks;
use crate::pricing::discount_schedule;

/// Half-width of the central difference on the periodic rate.
const DERIVATIVE_STEP: f64 = 1e-6;

/// Seed used when the caller's guess is unusable.
const FALLBACK_ANNUAL_SEED: f64 = 0.05;

/// Annual-yield brackets tried by the Brent fallback, after one centred on the seed.
const FALLBACK_BRACKETS: [(f64, f64); 3] = [(-0.1, 0.5), (-0.2, 1.0), (-0.5, 2.0)];

/// Root finder that produced a [`YieldResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverMethod {
    /// Newton-Raphson from the seed
    NewtonRaphson,
    /// Brent's method after the Newton stage failed, finished with Newton
    /// steps when the bracket closed before the price tolerance was met
    Brent,
}

/// Result of a yield calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct YieldResult {
    /// Annual nominal yield (periodic yield × m).
    pub annual_yield: f64,
    /// Yield per compounding period.
    pub periodic_yield: f64,
    /// Iterations spent across every stage, including failed ones.
    pub iterations: usize,
    /// Model price minus target price at the solution.
    pub residual: f64,
    /// Stage that converged.
    pub method: SolverMethod,
}

/// Yield-to-maturity solver.
///
/// # Examples
/// ```
/// use quant_bonds::{build_bond_cashflows, price_from_yield, YieldSolver};
///
/// let flows = build_bond_cashflows(100.0, 0.06, 10, 2).unwrap();
/// let price = price_from_yield(&flows, 0.045, 2).unwrap();
///
/// let result = YieldSolver::default().solve(&flows, price, 2, 0.05).unwrap();
/// assert!((result.annual_yield - 0.045).abs() < 1e-9);
/// assert!(result.residual.abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct YieldSolver {
    config: SolverConfig,
}

impl YieldSolver {
    /// Creates a solver with the given tolerance (in price units) and
    /// iteration budget per stage.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Creates a solver from the kernel configuration.
    pub fn from_config(config: &KernelConfig) -> Self {
        Self::new(config.solver)
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves for the yield that reprices `cashflows` to `price`.
    ///
    /// # Arguments
    ///
    /// * `cashflows` - Per-period amounts, first entry one period away
    /// * `price` - Target price (> 0)
    /// * `m` - Compounding frequency per year
    /// * `seed` - Initial guess for the annual yield
    ///
    /// # Errors
    ///
    /// * `PricingError::Domain` - empty schedule, non-finite flows, `m = 0`
    ///   or non-positive price
    /// * `PricingError::ConvergenceFailure` - no stage reached the price
    ///   tolerance; `iterations` sums the work of every stage
    pub fn solve(
        &self,
        cashflows: &[f64],
        price: f64,
        m: u32,
        seed: f64,
    ) -> Result<YieldResult, PricingError> {
        let periods_per_year = checks::frequency(m)?;
        if cashflows.is_empty() {
            return Err(PricingError::domain(
                "cashflows",
                0.0,
                "schedule must contain at least one period",
            ));
        }
        if let Some(bad) = cashflows.iter().find(|cf| !cf.is_finite()) {
            return Err(PricingError::domain("cashflows", *bad, "amounts must be finite"));
        }
        checks::positive("price", price)?;

        let objective = |rate: f64| {
            if rate <= -1.0 {
                f64::NAN
            } else {
                discount_schedule(cashflows, rate) - price
            }
        };

        let mut periodic_seed = seed / periods_per_year;
        if !periodic_seed.is_finite() || periodic_seed <= -0.9 {
            periodic_seed = FALLBACK_ANNUAL_SEED / periods_per_year;
        }

        debug!(
            periods = cashflows.len(),
            price,
            frequency = m,
            seed = periodic_seed * periods_per_year,
            "Solving for yield"
        );

        let newton = NewtonRaphsonSolver::new(self.config);
        let newton_err = match newton.find_root_numeric(&objective, periodic_seed, DERIVATIVE_STEP) {
            Ok(root) => {
                return Ok(self.converged(root, 0, periods_per_year, SolverMethod::NewtonRaphson))
            }
            Err(err) => err,
        };

        warn!(error = %newton_err, "Newton-Raphson yield search failed, falling back to Brent");

        let mut spent = newton_err.iterations();
        let mut best = Failure::from_solver_error(&newton_err, periodic_seed, &objective);
        let brent = BrentSolver::new(self.config);
        let centred = (periodic_seed - 0.1 / periods_per_year, periodic_seed + 0.1 / periods_per_year);
        let brackets = std::iter::once(centred).chain(
            FALLBACK_BRACKETS
                .iter()
                .map(|&(lo, hi)| (lo / periods_per_year, hi / periods_per_year)),
        );

        for (lo, hi) in brackets {
            let root = match brent.find_root(&objective, lo.max(-0.99), hi) {
                Ok(root) => root,
                Err(err) => {
                    spent += err.iterations();
                    best = best.better(Failure::from_solver_error(&err, lo, &objective));
                    continue;
                }
            };
            if root.residual.abs() < self.config.tolerance {
                return Ok(self.converged(root, spent, periods_per_year, SolverMethod::Brent));
            }

            // The bracket closed in rate before the price residual met tolerance
            spent += root.iterations;
            best = best.better(Failure {
                estimate: root.root,
                residual: root.residual,
            });
            match newton.find_root_numeric(&objective, root.root, DERIVATIVE_STEP) {
                Ok(polished) => {
                    return Ok(self.converged(polished, spent, periods_per_year, SolverMethod::Brent))
                }
                Err(err) => {
                    spent += err.iterations();
                    best = best.better(Failure::from_solver_error(&err, root.root, &objective));
                }
            }
        }

        warn!(
            iterations = spent,
            last_estimate = best.estimate * periods_per_year,
            residual = best.residual,
            "Yield search did not converge"
        );
        Err(PricingError::ConvergenceFailure {
            iterations: spent,
            last_estimate: best.estimate * periods_per_year,
            residual: best.residual,
        })
    }

    fn converged(
        &self,
        root: RootResult,
        prior_iterations: usize,
        periods_per_year: f64,
        method: SolverMethod,
    ) -> YieldResult {
        let result = YieldResult {
            annual_yield: root.root * periods_per_year,
            periodic_yield: root.root,
            iterations: prior_iterations + root.iterations,
            residual: root.residual,
            method,
        };
        debug!(
            annual_yield = result.annual_yield,
            iterations = result.iterations,
            residual = result.residual,
            method = ?result.method,
            "Yield search converged"
        );
        result
    }
}

/// Best periodic-rate estimate from a failed stage.
#[derive(Debug, Clone, Copy)]
struct Failure {
    estimate: f64,
    residual: f64,
}

impl Failure {
    fn from_solver_error<F>(err: &SolverError, fallback: f64, objective: &F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        match *err {
            SolverError::MaxIterationsExceeded {
                last_estimate,
                residual,
                ..
            } => Self {
                estimate: last_estimate,
                residual,
            },
            SolverError::DerivativeNearZero { x, .. } => Self {
                estimate: x,
                residual: objective(x),
            },
            _ => Self {
                estimate: fallback,
                residual: objective(fallback),
            },
        }
    }

    /// Keeps whichever estimate has the smaller finite residual.
    fn better(self, other: Self) -> Self {
        if !self.residual.is_finite() {
            return other;
        }
        if other.residual.is_finite() && other.residual.abs() < self.residual.abs() {
            other
        } else {
            self
        }
    }
}

/// Annual nominal yield that reprices `cashflows` to `price`.
///
/// Uses [`YieldSolver`] with the default configuration (price tolerance
/// 1e-8, 100 iterations per stage).
///
/// # Examples
/// ```
/// use quant_bonds::{build_bond_cashflows, internal_rate_of_return};
///
/// // A bond priced at par yields its coupon
/// let flows = build_bond_cashflows(1000.0, 0.06, 5, 1).unwrap();
/// let irr = internal_rate_of_return(&flows, 1000.0, 1, 0.06).unwrap();
/// assert!((irr - 0.06).abs() < 1e-10);
/// ```
pub fn internal_rate_of_return(
    cashflows: &[f64],
    price: f64,
    m: u32,
    seed: f64,
) -> Result<f64, PricingError> {
    YieldSolver::default()
        .solve(cashflows, price, m, seed)
        .map(|result| result.annual_yield)
}

/// Effective annual yield (1 + y/m)^m - 1 of a nominal yield.
///
/// # Examples
/// ```
/// use quant_bonds::effective_annual_yield;
///
/// let effective = effective_annual_yield(0.06, 2).unwrap();
/// assert!((effective - 0.0609).abs() < 1e-12);
/// ```
pub fn effective_annual_yield(nominal_yield: f64, m: u32) -> Result<f64, PricingError> {
    let rate = checks::periodic_rate(nominal_yield, m)?;
    Ok((1.0 + rate).powf(f64::from(m)) - 1.0)
}
