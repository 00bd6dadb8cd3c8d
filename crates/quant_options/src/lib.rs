//! # quant_options: Option Valuation Engine (L2)
//!
//! Closed-form Black-Scholes pricing with analytic Greeks, a Cox-Ross-Rubinstein
//! binomial lattice for European and American exercise, and conversion between
//! forward prices and implied yields.
//!
//! This crate provides:
//! - Contract parameters and selectors (`params`)
//! - The Black-Scholes analytic engine (`black_scholes`)
//! - The binomial lattice engine (`lattice`)
//! - Forward/yield conversion (`forward`)
//!
//! ## Design Principles
//!
//! - **Pure functions**: every call is independent and allocates only what it
//!   returns; all public types are `Send + Sync`
//! - **Typed failures**: invalid inputs surface as
//!   [`PricingError`](quant_core::PricingError) instead of NaN or panics
//! - **Independent lattice**: the lattice never touches the normal distribution
//!
//! ## Usage Examples
//!
//! ```rust
//! use quant_options::{binomial_eu_option, black_scholes_call, OptionType};
//!
//! let analytic = black_scholes_call(100.0, 100.0, 0.2, 0.05, 1.0, 0.0).unwrap();
//! let lattice = binomial_eu_option(100.0, 100.0, 0.2, 0.05, 500, 1.0, OptionType::Call).unwrap();
//! assert!((analytic - 10.4506).abs() < 1e-4);
//! assert!((lattice - analytic).abs() < 1e-2);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialize/Deserialize derives on parameter and result types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod black_scholes;
pub mod forward;
pub mod lattice;
pub mod params;

pub use black_scholes::{
    black_scholes_call, black_scholes_put, black_scholes_x, bs_call_delta, bs_call_rho,
    bs_call_theta, bs_gamma, bs_put_delta, bs_put_rho, bs_put_theta, bs_vega, norm_pdf_at_d1,
    rho_factor, BlackScholes, Greeks,
};
pub use forward::{carry_from_forward, forward_from_yield, yield_from_forward};
pub use lattice::{binomial_eu_option, binomial_us_option, BinomialLattice};
pub use params::{ExerciseStyle, OptionParams, OptionType};
