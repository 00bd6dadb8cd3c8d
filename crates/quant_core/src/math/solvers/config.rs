//! Solver configuration types.

use serde::{Deserialize, Serialize};

/// Configuration for root-finding algorithms.
///
/// Provides common settings shared across all solver implementations,
/// including convergence tolerance and iteration limits.
///
/// # Example
///
/// ```
/// use quant_core::math::solvers::SolverConfig;
///
/// // Use default configuration
/// let config = SolverConfig::default();
/// assert!(config.tolerance <= 1e-8);
/// assert!(config.max_iterations >= 50);
///
/// // Custom configuration
/// let custom = SolverConfig {
///     tolerance: 1e-12,
///     max_iterations: 200,
/// };
/// assert!(custom.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Convergence tolerance for root finding.
    ///
    /// The solver stops when `|f(x)| < tolerance`.
    pub tolerance: f64,

    /// Maximum number of iterations before giving up.
    ///
    /// If the solver doesn't converge within this limit,
    /// it returns `SolverError::MaxIterationsExceeded`.
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    /// Default values:
    /// - `tolerance`: 1e-8
    /// - `max_iterations`: 100
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_iterations: 100,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with specified values.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use quant_core::math::solvers::SolverConfig;
    ///
    /// let config = SolverConfig::new(1e-12, 200);
    /// assert_eq!(config.max_iterations, 200);
    /// ```
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        assert!(tolerance > 0.0, "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Create a configuration with high precision settings.
    ///
    /// Uses tighter tolerance (1e-12) and more iterations (500).
    pub fn high_precision() -> Self {
        Self {
            tolerance: 1e-12,
            max_iterations: 500,
        }
    }

    /// Create a configuration optimised for fast convergence.
    ///
    /// Uses relaxed tolerance (1e-6) and fewer iterations (50).
    pub fn fast() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 50,
        }
    }

    /// Checks the configuration without panicking.
    ///
    /// Used for configurations that arrive through deserialisation,
    /// where [`SolverConfig::new`]'s assertions never ran.
    pub fn validate(&self) -> Result<(), String> {
        if self.tolerance <= 0.0 || !self.tolerance.is_finite() {
            return Err(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            ));
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0".to_string());
        }
        Ok(())
    }
}
