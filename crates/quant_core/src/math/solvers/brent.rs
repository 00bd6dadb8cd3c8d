//! Brent's method root-finding solver.

use super::{RootResult, SolverConfig};
use crate::types::SolverError;

/// Brent's method root finder.
///
/// Combines bisection, secant, and inverse quadratic interpolation for
/// robust root finding without requiring derivatives. Guaranteed to
/// converge for continuous functions with a valid bracket.
///
/// # Algorithm
///
/// Brent's method switches between:
/// - **Bisection**: Guaranteed progress, slower convergence
/// - **Secant method**: Faster convergence using linear approximation
/// - **Inverse quadratic interpolation**: Even faster when applicable
///
/// # Example
///
/// ```
/// use quant_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
///
/// // Solve x³ - x - 2 = 0 in bracket [1, 2]
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let result = solver.find_root(f, 1.0, 2.0).unwrap();
/// assert!(f(result.root).abs() < 1e-8);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver {
    /// Solver configuration
    config: SolverConfig,
}

impl BrentSolver {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Find a root of `f` in the bracket [a, b].
    ///
    /// Requires that `f(a)` and `f(b)` have opposite signs (a valid bracket).
    ///
    /// # Returns
    ///
    /// * `Ok(RootResult)` - Root where `|f(x)| < tolerance` or the bracket
    ///   has shrunk below tolerance
    /// * `Err(SolverError::NoBracket)` - `f(a)` and `f(b)` have same sign
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    pub fn find_root<F>(&self, f: F, a: f64, b: f64) -> Result<RootResult, SolverError>
    where
        F: Fn(f64) -> f64,
    {
        let mut a = a;
        let mut b = b;
        let mut fa = f(a);
        let mut fb = f(b);

        if fa.is_nan() || fb.is_nan() || fa * fb > 0.0 {
            return Err(SolverError::NoBracket { a, b });
        }

        // Ensure |f(a)| >= |f(b)| so that b is the best estimate
        if fa.abs() < fb.abs() {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut fa, &mut fb);
        }

        let mut c = a;
        let mut fc = fa;
        let mut d = b - a;
        let mut e = d;
        let tol = self.config.tolerance;

        for iteration in 0..self.config.max_iterations {
            let m = 0.5 * (c - b);

            if fb.abs() < tol || m.abs() <= tol {
                return Ok(RootResult {
                    root: b,
                    iterations: iteration,
                    residual: fb,
                });
            }

            let mut use_bisection = true;

            if e.abs() >= tol && fa.abs() > fb.abs() {
                let s = fb / fa;
                let (p, q) = if a == c {
                    // Secant step
                    (2.0 * m * s, 1.0 - s)
                } else {
                    // Inverse quadratic interpolation
                    let q = fa / fc;
                    let r = fb / fc;
                    (
                        s * (2.0 * m * q * (q - r) - (b - a) * (r - 1.0)),
                        (q - 1.0) * (r - 1.0) * (s - 1.0),
                    )
                };
                let (p, q) = if p > 0.0 { (p, -q) } else { (-p, q) };

                if 2.0 * p < (3.0 * m * q - (tol * q).abs()).min((e * q).abs()) {
                    e = d;
                    d = p / q;
                    use_bisection = false;
                }
            }

            if use_bisection {
                d = m;
                e = m;
            }

            a = b;
            fa = fb;

            b += if d.abs() > tol { d } else { tol.copysign(m) };
            fb = f(b);

            // Keep the root bracketed between b and c
            if (fb > 0.0) == (fc > 0.0) {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }

            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
            last_estimate: b,
            residual: fb,
        })
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}
