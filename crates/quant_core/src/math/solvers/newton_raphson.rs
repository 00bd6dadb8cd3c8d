//! Newton-Raphson root-finding solver.

use super::{RootResult, SolverConfig};
use crate::types::SolverError;

/// Smallest derivative magnitude accepted before a Newton step.
const DERIVATIVE_FLOOR: f64 = 1e-30;

/// Newton-Raphson root finder.
///
/// Uses Newton's method: `x_{n+1} = x_n - f(x_n) / f'(x_n)` for fast
/// quadratic convergence on smooth functions.
///
/// # Convergence
///
/// Newton-Raphson converges quadratically near a root. It may fail if:
/// - The derivative is near zero
/// - The initial guess is far from the root
/// - The function has discontinuities
///
/// # Example
///
/// ```
/// use quant_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
///
/// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
///
/// let f = |x: f64| x * x - 2.0;
/// let f_prime = |x: f64| 2.0 * x;
///
/// let result = solver.find_root(f, f_prime, 1.0).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-8);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver {
    /// Solver configuration
    config: SolverConfig,
}

impl NewtonRaphsonSolver {
    /// Create a new Newton-Raphson solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Find a root of `f` using explicit derivative `f_prime`.
    ///
    /// # Arguments
    ///
    /// * `f` - Function to find root of
    /// * `f_prime` - Derivative of f
    /// * `x0` - Initial guess
    ///
    /// # Returns
    ///
    /// * `Ok(RootResult)` - Root where `|f(x)| < tolerance`
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge; carries
    ///   the last estimate and its residual
    /// * `Err(SolverError::DerivativeNearZero)` - Derivative too small
    /// * `Err(SolverError::NumericalInstability)` - Iterate became non-finite
    ///
    /// # Example
    ///
    /// ```
    /// use quant_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
    ///
    /// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
    ///
    /// // Solve x³ - x - 2 = 0
    /// let f = |x: f64| x * x * x - x - 2.0;
    /// let f_prime = |x: f64| 3.0 * x * x - 1.0;
    ///
    /// let result = solver.find_root(f, f_prime, 1.5).unwrap();
    /// assert!(f(result.root).abs() < 1e-8);
    /// ```
    pub fn find_root<F, G>(&self, f: F, f_prime: G, x0: f64) -> Result<RootResult, SolverError>
    where
        F: Fn(f64) -> f64,
        G: Fn(f64) -> f64,
    {
        let mut x = x0;

        for iteration in 0..self.config.max_iterations {
            let f_val = f(x);

            // Check for convergence
            if f_val.abs() < self.config.tolerance {
                return Ok(RootResult {
                    root: x,
                    iterations: iteration,
                    residual: f_val,
                });
            }

            let f_prime_val = f_prime(x);

            if f_prime_val.is_nan() || f_prime_val.abs() < DERIVATIVE_FLOOR {
                return Err(SolverError::DerivativeNearZero {
                    x,
                    iterations: iteration,
                });
            }

            x -= f_val / f_prime_val;

            if !x.is_finite() {
                return Err(SolverError::NumericalInstability {
                    reason: "Newton iteration produced non-finite value".to_string(),
                    iterations: iteration + 1,
                });
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
            last_estimate: x,
            residual: f(x),
        })
    }

    /// Find a root of `f` with the derivative estimated by central differences.
    ///
    /// `f'(x) ≈ (f(x + h) - f(x - h)) / 2h`
    ///
    /// # Arguments
    ///
    /// * `f` - Function to find root of
    /// * `x0` - Initial guess
    /// * `step` - Finite-difference half-width `h` (must be positive)
    ///
    /// # Example
    ///
    /// ```
    /// use quant_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
    ///
    /// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
    /// let result = solver.find_root_numeric(|x: f64| x.exp() - 2.0, 0.5, 1e-6).unwrap();
    /// assert!((result.root - 2.0_f64.ln()).abs() < 1e-8);
    /// ```
    pub fn find_root_numeric<F>(&self, f: F, x0: f64, step: f64) -> Result<RootResult, SolverError>
    where
        F: Fn(f64) -> f64,
    {
        let f_prime = |x: f64| (f(x + step) - f(x - step)) / (2.0 * step);
        self.find_root(&f, f_prime, x0)
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}
