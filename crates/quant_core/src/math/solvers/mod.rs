//! Root-finding solvers for numerical computation.
//!
//! This module provides root-finding algorithms for financial applications
//! such as yield-to-maturity calculation.
//!
//! ## Available Solvers
//!
//! - [`NewtonRaphsonSolver`]: Fast quadratic convergence using derivatives,
//!   either explicit or estimated by central differences
//! - [`BrentSolver`]: Robust bracketing method without derivative requirement
//!
//! ## Configuration
//!
//! Solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: Convergence tolerance on `|f(x)|` (default: 1e-8)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! Iteration state (estimate, residual, count) lives in local variables of
//! each call, so a solver value can be shared freely between threads.
//!
//! ## Examples
//!
//! ```
//! use quant_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
//!
//! // Solve x² - 2 = 0 (find √2)
//! let solver = NewtonRaphsonSolver::new(SolverConfig::default());
//!
//! let f = |x: f64| x * x - 2.0;
//! let f_prime = |x: f64| 2.0 * x;
//!
//! let result = solver.find_root(f, f_prime, 1.0).unwrap();
//! assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-8);
//! ```

mod brent;
mod config;
mod newton_raphson;

// Re-export public types at module level
pub use brent::BrentSolver;
pub use config::SolverConfig;
pub use newton_raphson::NewtonRaphsonSolver;

/// Outcome of a successful root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootResult {
    /// The root estimate.
    pub root: f64,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Function value at the root estimate.
    pub residual: f64,
}
