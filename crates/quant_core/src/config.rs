//! Kernel configuration management
//!
//! Handles loading solver and lattice settings from TOML documents. Every
//! section and field is optional; anything left out takes its default.
//!
//! ```toml
//! [solver]
//! tolerance = 1e-8
//! max_iterations = 100
//!
//! [lattice]
//! default_steps = 500
//! ```

use crate::math::solvers::SolverConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Configuration file error: {path}: {source}")]
    FileError {
        /// Path that failed to load
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid TOML or has wrongly typed fields.
    #[error("Configuration parse error: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A value parsed but is outside its valid range.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Binomial lattice settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeSettings {
    /// Number of time steps used when a caller does not choose one.
    pub default_steps: usize,
}

impl Default for LatticeSettings {
    fn default() -> Self {
        Self { default_steps: 500 }
    }
}

/// Kernel configuration structure
///
/// # Example
///
/// ```
/// use quant_core::KernelConfig;
///
/// let config = KernelConfig::from_toml_str("[lattice]\ndefault_steps = 1000\n").unwrap();
/// assert_eq!(config.lattice.default_steps, 1000);
/// assert_eq!(config.solver.max_iterations, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Root-finder settings used by the yield solver
    pub solver: SolverConfig,
    /// Binomial lattice settings
    pub lattice: LatticeSettings,
}

impl KernelConfig {
    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: KernelConfig = toml::from_str(contents)?;
        config.validate()?;
        debug!(
            tolerance = config.solver.tolerance,
            max_iterations = config.solver.max_iterations,
            default_steps = config.lattice.default_steps,
            "Loaded kernel configuration"
        );
        Ok(config)
    }

    /// Load and validate a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Reading kernel configuration file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::FileError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.solver.validate().map_err(ConfigError::InvalidValue)?;
        if self.lattice.default_steps == 0 {
            return Err(ConfigError::InvalidValue(
                "lattice.default_steps must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}
