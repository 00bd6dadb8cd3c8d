//! # quant_bonds: Fixed-Income Valuation Engine (L2)
//!
//! Level-coupon cash-flow schedules, periodic-compounding yield pricing,
//! accrued interest with clean/dirty prices, and a yield-to-maturity solver.
//!
//! This crate provides:
//! - Cash-flow schedule construction (`cashflows`)
//! - Yield-based pricers and forward value (`pricing`)
//! - Accrued interest and clean/dirty prices between coupon dates (`accrual`)
//! - Yield-to-maturity with a Newton-Raphson/Brent solver (`yield_solver`)
//!
//! ## Design Principles
//!
//! - **Single discounting primitive**: every yield pricer reduces to
//!   [`price_from_yield`] so closed forms and schedules agree
//! - **Periodic compounding**: a yield `y` at frequency `m` discounts one
//!   period by `1 + y/m`
//! - **Bounded search**: the yield solver never loops past its configured
//!   iteration budget and reports the best estimate on failure
//!
//! ## Usage Examples
//!
//! ```rust
//! use quant_bonds::{build_bond_cashflows, internal_rate_of_return, price_from_yield};
//!
//! let flows = build_bond_cashflows(1000.0, 0.06, 7, 2).unwrap();
//! let price = price_from_yield(&flows, 0.05, 2).unwrap();
//! assert!(price > 1000.0);
//!
//! let ytm = internal_rate_of_return(&flows, price, 2, 0.06).unwrap();
//! assert!((ytm - 0.05).abs() < 1e-9);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialize/Deserialize derives on solver results

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod accrual;
pub mod cashflows;
mod checks;
pub mod pricing;
pub mod yield_solver;

pub use accrual::{
    accrued_interest, clean_coupon_price, clean_coupon_price_from_years, dirty_coupon_price,
    dirty_coupon_price_from_years, settlement_position,
};
pub use cashflows::build_bond_cashflows;
pub use pricing::{
    coupon_bond_price, forward_value, present_value, price_from_yield, zero_coupon_price,
};
pub use yield_solver::{
    effective_annual_yield, internal_rate_of_return, SolverMethod, YieldResult, YieldSolver,
};
