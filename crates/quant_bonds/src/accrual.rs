//! Accrued interest and clean/dirty price conventions.
//!
//! Settlement falls a fraction α ∈ [0, 1) of the way through the current
//! coupon period. With `n` coupons remaining, cash flow `k` is `k - α`
//! periods away, so
//!
//! dirty = Σ cfₖ / (1 + y/m)^(k - α) = price_from_yield(schedule) · (1 + y/m)^α
//!
//! and clean = dirty - accrued, where accrued = par · c/m · α.

use quant_core::PricingError;

use crate::cashflows::level_coupon_schedule;
use crate::checks;
use crate::pricing::{discount_schedule, PERIOD_TOLERANCE};

/// Coupon accrued since the last payment date.
///
/// par · coupon_rate / m · fraction, with fraction ∈ [0, 1).
///
/// # Examples
/// ```
/// use quant_bonds::accrued_interest;
///
/// assert!((accrued_interest(1000.0, 0.06, 2, 0.5).unwrap() - 15.0).abs() < 1e-12);
/// assert!(accrued_interest(1000.0, 0.06, 2, 1.0).is_err());
/// ```
pub fn accrued_interest(par: f64, coupon_rate: f64, m: u32, fraction: f64) -> Result<f64, PricingError> {
    let m = checks::frequency(m)?;
    checks::positive("par", par)?;
    checks::non_negative("coupon_rate", coupon_rate)?;
    checks::accrual_fraction(fraction)?;
    Ok(par * coupon_rate / m * fraction)
}

/// Dirty (full) price with `periods_remaining` coupons left and a fraction
/// `fraction` of the current period elapsed.
pub fn dirty_coupon_price(
    par: f64,
    coupon_rate: f64,
    annual_yield: f64,
    periods_remaining: u32,
    m: u32,
    fraction: f64,
) -> Result<f64, PricingError> {
    checks::accrual_fraction(fraction)?;
    let rate = checks::periodic_rate(annual_yield, m)?;
    let flows = level_coupon_schedule(par, coupon_rate, m, periods_remaining)?;
    Ok(discount_schedule(&flows, rate) * (1.0 + rate).powf(fraction))
}

/// Clean price: dirty price less accrued interest.
///
/// # Examples
/// ```
/// use quant_bonds::{accrued_interest, clean_coupon_price, dirty_coupon_price};
///
/// let dirty = dirty_coupon_price(1000.0, 0.06, 0.05, 8, 2, 0.5).unwrap();
/// let clean = clean_coupon_price(1000.0, 0.06, 0.05, 8, 2, 0.5).unwrap();
/// let accrued = accrued_interest(1000.0, 0.06, 2, 0.5).unwrap();
/// assert!((dirty - clean - accrued).abs() < 1e-9);
/// ```
pub fn clean_coupon_price(
    par: f64,
    coupon_rate: f64,
    annual_yield: f64,
    periods_remaining: u32,
    m: u32,
    fraction: f64,
) -> Result<f64, PricingError> {
    let dirty = dirty_coupon_price(par, coupon_rate, annual_yield, periods_remaining, m, fraction)?;
    Ok(dirty - accrued_interest(par, coupon_rate, m, fraction)?)
}

/// Remaining periods and elapsed fraction implied by a maturity in years.
///
/// n = ⌈T·m⌉ and α = 1 - frac(T·m), with α = 0 when T·m is whole.
///
/// # Examples
/// ```
/// use quant_bonds::settlement_position;
///
/// assert_eq!(settlement_position(3.75, 2).unwrap(), (8, 0.5));
/// assert_eq!(settlement_position(5.0, 2).unwrap(), (10, 0.0));
/// ```
pub fn settlement_position(years_to_maturity: f64, m: u32) -> Result<(u32, f64), PricingError> {
    let m = checks::frequency(m)?;
    checks::positive("years_to_maturity", years_to_maturity)?;

    let periods = years_to_maturity * m;
    if periods > f64::from(u32::MAX) {
        return Err(PricingError::domain(
            "years_to_maturity",
            years_to_maturity,
            "too many coupon periods",
        ));
    }

    let nearest = periods.round();
    if (periods - nearest).abs() <= PERIOD_TOLERANCE && nearest >= 1.0 {
        return Ok((nearest as u32, 0.0));
    }

    let whole = periods.floor();
    Ok((periods.ceil() as u32, 1.0 - (periods - whole)))
}

/// Dirty price for a maturity given in years.
///
/// Agrees with [`dirty_coupon_price`] at the position returned by
/// [`settlement_position`].
pub fn dirty_coupon_price_from_years(
    par: f64,
    coupon_rate: f64,
    annual_yield: f64,
    years_to_maturity: f64,
    m: u32,
) -> Result<f64, PricingError> {
    let (periods, fraction) = settlement_position(years_to_maturity, m)?;
    dirty_coupon_price(par, coupon_rate, annual_yield, periods, m, fraction)
}

/// Clean price for a maturity given in years.
pub fn clean_coupon_price_from_years(
    par: f64,
    coupon_rate: f64,
    annual_yield: f64,
    years_to_maturity: f64,
    m: u32,
) -> Result<f64, PricingError> {
    let (periods, fraction) = settlement_position(years_to_maturity, m)?;
    clean_coupon_price(par, coupon_rate, annual_yield, periods, m, fraction)
}
