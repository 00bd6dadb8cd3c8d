//! # quant_core: Numerical Foundation for the Pricing Kernel
//!
//! ## Layer 1 (Foundation) Role
//!
//! quant_core is the bottom layer of the kernel, providing:
//! - Standard normal density and distribution functions (`math::distributions`)
//! - Root-finding solvers with bounded iteration (`math::solvers`)
//! - The error taxonomy shared by both engines (`types::error`)
//! - TOML-loadable kernel configuration (`config`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other quant_* crates, with minimal external dependencies:
//! - statrs: double-precision complementary error function
//! - thiserror: error derives
//! - serde / toml: configuration loading
//! - tracing: diagnostic events (no subscriber is installed here)
//!
//! ## Usage Examples
//!
//! ```rust
//! use quant_core::math::distributions::{norm_cdf, norm_pdf};
//! use quant_core::math::solvers::{BrentSolver, SolverConfig};
//!
//! assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
//! assert!((norm_pdf(0.0) - 0.398_942_280_401_432_7).abs() < 1e-15);
//!
//! let solver = BrentSolver::new(SolverConfig::default());
//! let result = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
//! assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-8);
//! ```
//!
//! Error and configuration types always derive `Serialize`/`Deserialize`;
//! the engine crates gate their own derives behind a `serde` feature.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod math;
pub mod types;

pub use config::{ConfigError, KernelConfig, LatticeSettings};
pub use types::{PricingError, SolverError};
