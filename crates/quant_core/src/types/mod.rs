//! Core types shared by the pricing engines.
//!
//! This module provides:
//! - `error`: Structured error types for pricing and solver operations
//!
//! # Re-exports
//!
//! For convenience, [`PricingError`] and [`SolverError`] are re-exported at
//! this module level.

pub mod error;

// Re-export commonly used types at module level
pub use error::{PricingError, SolverError};
