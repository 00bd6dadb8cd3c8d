//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from option and bond valuation
//! - `SolverError`: Errors from root-finding solvers
//!
//! Every public operation in the workspace returns `Result<_, PricingError>`.
//! Solver failures convert into `PricingError` through `From`, so `?` works
//! across the boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Categorised pricing errors.
///
/// # Variants
/// - `Domain`: An input lies outside the mathematical domain of the operation
/// - `ArithmeticDegeneracy`: Valid inputs produced an ill-defined intermediate
/// - `ConvergenceFailure`: An iterative solver exhausted its iteration budget
/// - `UnsupportedExercise`: A model was asked for an exercise style it cannot price
///
/// # Examples
/// ```
/// use quant_core::types::PricingError;
///
/// let err = PricingError::domain("volatility", -0.2, "must be non-negative");
/// assert_eq!(
///     format!("{}", err),
///     "Domain error: volatility = -0.2 (must be non-negative)"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[derive(Serialize, Deserialize)]
pub enum PricingError {
    /// Input outside the operation's domain.
    #[error("Domain error: {parameter} = {value} ({reason})")]
    Domain {
        /// Name of the offending parameter
        parameter: String,
        /// The rejected value
        value: f64,
        /// Constraint that was violated
        reason: String,
    },

    /// Degenerate intermediate such as a zero divisor or an invalid probability.
    #[error("Arithmetic degeneracy: {0}")]
    ArithmeticDegeneracy(String),

    /// Iterative solver did not converge.
    #[error(
        "Failed to converge after {iterations} iterations \
         (last estimate {last_estimate}, residual {residual:e})"
    )]
    ConvergenceFailure {
        /// Number of iterations attempted
        iterations: usize,
        /// Last iterate produced by the solver
        last_estimate: f64,
        /// Objective value at the last iterate
        residual: f64,
    },

    /// Exercise style not supported by the pricing model.
    #[error("Unsupported exercise: {0}")]
    UnsupportedExercise(String),
}

impl PricingError {
    /// Create a domain error.
    ///
    /// # Arguments
    /// * `parameter` - Name of the offending parameter
    /// * `value` - The rejected value
    /// * `reason` - Constraint that was violated
    pub fn domain(parameter: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        PricingError::Domain {
            parameter: parameter.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Create an arithmetic degeneracy error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        PricingError::ArithmeticDegeneracy(message.into())
    }

    /// Returns `true` for [`PricingError::Domain`].
    pub fn is_domain(&self) -> bool {
        matches!(self, PricingError::Domain { .. })
    }
}

/// Root-finding solver errors.
///
/// # Variants
/// - `MaxIterationsExceeded`: Solver failed to converge within iteration limit
/// - `DerivativeNearZero`: Derivative too small for Newton-Raphson
/// - `NoBracket`: Function values at bracket endpoints have same sign
/// - `NumericalInstability`: General numerical instability
///
/// # Examples
/// ```
/// use quant_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded {
///     iterations: 100,
///     last_estimate: 0.05,
///     residual: 1e-3,
/// };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[derive(Serialize, Deserialize)]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
        /// Last iterate produced by the solver
        last_estimate: f64,
        /// Objective value at the last iterate
        residual: f64,
    },

    /// Derivative near zero (division by zero risk in Newton-Raphson).
    #[error("Derivative near zero at x = {x}")]
    DerivativeNearZero {
        /// The x value where derivative was near zero
        x: f64,
        /// Iterations completed before the failing step
        iterations: usize,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {reason}")]
    NumericalInstability {
        /// What went wrong
        reason: String,
        /// Iterations completed, including the one that failed
        iterations: usize,
    },
}

impl SolverError {
    /// Iterations the solver spent before failing.
    ///
    /// Zero for [`SolverError::NoBracket`], which fails before iterating.
    pub fn iterations(&self) -> usize {
        match self {
            SolverError::MaxIterationsExceeded { iterations, .. }
            | SolverError::DerivativeNearZero { iterations, .. }
            | SolverError::NumericalInstability { iterations, .. } => *iterations,
            SolverError::NoBracket { .. } => 0,
        }
    }
}

impl From<SolverError> for PricingError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::MaxIterationsExceeded {
                iterations,
                last_estimate,
                residual,
            } => PricingError::ConvergenceFailure {
                iterations,
                last_estimate,
                residual,
            },
            other => PricingError::ArithmeticDegeneracy(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================
    // PricingError tests
    // ==========================================================

    #[test]
    fn test_domain_display() {
        let err = PricingError::domain("strike", 0.0, "must be positive");
        assert_eq!(
            format!("{}", err),
            "Domain error: strike = 0 (must be positive)"
        );
        assert!(err.is_domain());
    }

    #[test]
    fn test_degenerate_display() {
        let err = PricingError::degenerate("risk-neutral probability 1.2 outside (0, 1)");
        assert!(format!("{}", err).starts_with("Arithmetic degeneracy:"));
        assert!(!err.is_domain());
    }

    #[test]
    fn test_convergence_failure_display() {
        let err = PricingError::ConvergenceFailure {
            iterations: 100,
            last_estimate: 0.05,
            residual: 1.5e-3,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("100 iterations"));
        assert!(msg.contains("0.05"));
    }

    #[test]
    fn test_unsupported_exercise_display() {
        let err = PricingError::UnsupportedExercise("American".to_string());
        assert_eq!(format!("{}", err), "Unsupported exercise: American");
    }

    #[test]
    fn test_pricing_error_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
        assert_error(&PricingError::degenerate("x"));
    }

    // ==========================================================
    // SolverError tests
    // ==========================================================

    #[test]
    fn test_solver_error_display() {
        let err = SolverError::NoBracket { a: 0.0, b: 1.0 };
        assert_eq!(format!("{}", err), "No bracket: f(0) and f(1) have same sign");

        let err = SolverError::DerivativeNearZero {
            x: 0.5,
            iterations: 3,
        };
        assert!(format!("{}", err).contains("0.5"));
    }

    #[test]
    fn test_solver_error_iterations() {
        let exhausted = SolverError::MaxIterationsExceeded {
            iterations: 100,
            last_estimate: 0.05,
            residual: 1e-3,
        };
        assert_eq!(exhausted.iterations(), 100);
        assert_eq!(
            SolverError::DerivativeNearZero {
                x: 0.5,
                iterations: 3
            }
            .iterations(),
            3
        );
        assert_eq!(SolverError::NoBracket { a: 0.0, b: 1.0 }.iterations(), 0);
    }

    // ==========================================================
    // From<SolverError> for PricingError tests
    // ==========================================================

    #[test]
    fn test_max_iterations_maps_to_convergence_failure() {
        let err: PricingError = SolverError::MaxIterationsExceeded {
            iterations: 7,
            last_estimate: 0.031,
            residual: -2e-4,
        }
        .into();

        assert_eq!(
            err,
            PricingError::ConvergenceFailure {
                iterations: 7,
                last_estimate: 0.031,
                residual: -2e-4,
            }
        );
    }

    #[test]
    fn test_other_solver_errors_map_to_degeneracy() {
        let err: PricingError = SolverError::NoBracket { a: -0.1, b: 0.5 }.into();
        match err {
            PricingError::ArithmeticDegeneracy(msg) => assert!(msg.contains("No bracket")),
            other => panic!("Expected ArithmeticDegeneracy, got {:?}", other),
        }
    }
}
