//! Mathematical building blocks shared by the valuation engines.
//!
//! - [`distributions`]: standard normal PDF and CDF
//! - [`solvers`]: Newton-Raphson and Brent root finders

pub mod distributions;
pub mod solvers;
