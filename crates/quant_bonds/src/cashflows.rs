//! Level-coupon cash-flow schedules.
//!
//! A schedule is a plain `Vec<f64>` of per-period amounts. Entry `i - 1`
//! is paid at the end of period `i`, each period lasting `1/m` years.

use quant_core::PricingError;

use crate::checks;

/// Builds the schedule of a level-coupon bond.
///
/// Produces `years · m` entries of `par · coupon_rate / m`; the final entry
/// also repays `par`. A zero-coupon bond is `coupon_rate = 0`.
///
/// # Errors
/// `PricingError::Domain` if `m = 0`, `years = 0`, `par ≤ 0` or
/// `coupon_rate < 0`.
///
/// # Examples
/// ```
/// use quant_bonds::build_bond_cashflows;
///
/// let flows = build_bond_cashflows(100.0, 0.05, 5, 2).unwrap();
/// assert_eq!(flows.len(), 10);
/// assert_eq!(flows[0], 2.5);
/// assert_eq!(flows[9], 102.5);
/// ```
pub fn build_bond_cashflows(
    par: f64,
    coupon_rate: f64,
    years: u32,
    m: u32,
) -> Result<Vec<f64>, PricingError> {
    checks::frequency(m)?;
    if years == 0 {
        return Err(PricingError::domain("years", 0.0, "must be at least 1"));
    }
    let periods = years.checked_mul(m).ok_or_else(|| {
        PricingError::domain("years", f64::from(years), "years · frequency overflows")
    })?;
    level_coupon_schedule(par, coupon_rate, m, periods)
}

/// Schedule of `periods` level coupons at frequency `m`, with par at the end.
pub(crate) fn level_coupon_schedule(
    par: f64,
    coupon_rate: f64,
    m: u32,
    periods: u32,
) -> Result<Vec<f64>, PricingError> {
    let m = checks::frequency(m)?;
    checks::positive("par", par)?;
    checks::non_negative("coupon_rate", coupon_rate)?;
    if periods == 0 {
        return Err(PricingError::domain("periods", 0.0, "must be at least 1"));
    }

    let coupon = par * coupon_rate / m;
    let mut flows = vec![coupon; periods as usize];
    if let Some(last) = flows.last_mut() {
        *last += par;
    }
    Ok(flows)
}
