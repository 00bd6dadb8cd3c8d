//! Yield-based bond pricing.
//!
//! All pricers here use periodic compounding at frequency `m`: a cash flow
//! due at the end of period `i` is discounted by `(1 + y/m)^i`.
//! [`price_from_yield`] is the single discounting primitive; the closed
//! forms below agree with it to rounding.

use quant_core::PricingError;

use crate::cashflows::level_coupon_schedule;
use crate::checks;

/// Tolerance when deciding that `T · m` is a whole number of periods.
pub(crate) const PERIOD_TOLERANCE: f64 = 1e-9;

/// Present value Σ cfᵢ / (1 + y/m)^i for i = 1..n.
///
/// # Errors
/// `PricingError::Domain` for an empty schedule, `m = 0` or a periodic rate
/// at or below -100%.
///
/// # Examples
/// ```
/// use quant_bonds::{build_bond_cashflows, price_from_yield};
///
/// let flows = build_bond_cashflows(100.0, 0.05, 5, 2).unwrap();
/// let price = price_from_yield(&flows, 0.05, 2).unwrap();
/// assert!((price - 100.0).abs() < 1e-10);
/// ```
pub fn price_from_yield(cashflows: &[f64], annual_yield: f64, m: u32) -> Result<f64, PricingError> {
    if cashflows.is_empty() {
        return Err(PricingError::domain(
            "cashflows",
            0.0,
            "schedule must contain at least one period",
        ));
    }
    let rate = checks::periodic_rate(annual_yield, m)?;
    Ok(discount_schedule(cashflows, rate))
}

/// Discounts a schedule at a periodic rate already known to exceed -1.
pub(crate) fn discount_schedule(cashflows: &[f64], periodic_rate: f64) -> f64 {
    let growth = 1.0 + periodic_rate;
    let mut compound = 1.0;
    let mut pv = 0.0;
    for cf in cashflows {
        compound *= growth;
        pv += cf / compound;
    }
    pv
}

/// Present value of a bond described either by its level coupon or by an
/// explicit schedule.
///
/// With `same_cashflows = true` only `cashflows[0]` is read, as the coupon
/// paid every period, and the annuity closed form is used:
///
/// PV = c·(1 - (1+r)^-n)/r + par·(1+r)^-n, or c·n + par when r = 0,
///
/// where r = y/m and n = years·m.
///
/// Otherwise the schedule is discounted as given, and `par` is added at
/// period n when the schedule holds fewer than n entries.
///
/// # Examples
/// ```
/// use quant_bonds::present_value;
///
/// // 6% semiannual coupon on 1000 par, 5 years, yield 5%
/// let pv = present_value(&[30.0], 0.05, 1000.0, 5, 2, true).unwrap();
/// assert!((pv - 1043.7603196548546).abs() < 1e-9);
/// ```
pub fn present_value(
    cashflows: &[f64],
    annual_yield: f64,
    par: f64,
    years: u32,
    m: u32,
    same_cashflows: bool,
) -> Result<f64, PricingError> {
    let rate = checks::periodic_rate(annual_yield, m)?;
    let periods = years.checked_mul(m).ok_or_else(|| {
        PricingError::domain("years", f64::from(years), "years · frequency overflows")
    })?;
    let n = f64::from(periods);

    if same_cashflows {
        let coupon = match cashflows.first() {
            Some(&c) if periods > 0 => c,
            _ => {
                return Err(PricingError::domain(
                    "cashflows",
                    cashflows.len() as f64,
                    "level-coupon form needs a coupon and at least one period",
                ))
            }
        };
        let df_n = (1.0 + rate).powf(-n);
        let annuity = if rate == 0.0 { n } else { (1.0 - df_n) / rate };
        return Ok(coupon * annuity + par * df_n);
    }

    if cashflows.is_empty() && periods == 0 {
        return Err(PricingError::domain(
            "cashflows",
            0.0,
            "schedule must contain at least one period",
        ));
    }

    let mut pv = discount_schedule(cashflows, rate);
    if cashflows.len() < periods as usize {
        pv += par * (1.0 + rate).powf(-n);
    }
    Ok(pv)
}

/// Zero-coupon bond price par / (1 + y/m)^(m·T).
///
/// `T` may be fractional; no schedule is built.
pub fn zero_coupon_price(par: f64, annual_yield: f64, years: f64, m: u32) -> Result<f64, PricingError> {
    checks::positive("par", par)?;
    checks::non_negative("years", years)?;
    let rate = checks::periodic_rate(annual_yield, m)?;
    Ok(par / (1.0 + rate).powf(f64::from(m) * years))
}

/// Level-coupon bond price, identical to discounting the built schedule.
///
/// # Errors
/// `PricingError::Domain` unless `T · m` is a positive whole number of periods.
///
/// # Examples
/// ```
/// use quant_bonds::coupon_bond_price;
///
/// // Coupon equal to yield prices at par
/// let price = coupon_bond_price(1000.0, 0.05, 0.05, 10.0, 2).unwrap();
/// assert!((price - 1000.0).abs() < 1e-9);
/// ```
pub fn coupon_bond_price(
    par: f64,
    coupon_rate: f64,
    annual_yield: f64,
    years: f64,
    m: u32,
) -> Result<f64, PricingError> {
    let periods = whole_periods(years, m)?;
    let flows = level_coupon_schedule(par, coupon_rate, m, periods)?;
    price_from_yield(&flows, annual_yield, m)
}

/// Forward value price · (1 + y)^T of a quoted price.
///
/// # Examples
/// ```
/// use quant_bonds::forward_value;
///
/// assert!((forward_value(100.0, 0.05, 2.0).unwrap() - 110.25).abs() < 1e-12);
/// ```
pub fn forward_value(price: f64, annual_yield: f64, years: f64) -> Result<f64, PricingError> {
    if !price.is_finite() {
        return Err(PricingError::domain("price", price, "must be finite"));
    }
    checks::non_negative("years", years)?;
    checks::periodic_rate(annual_yield, 1)?;
    Ok(price * (1.0 + annual_yield).powf(years))
}

/// Converts `T · m` into a whole period count.
fn whole_periods(years: f64, m: u32) -> Result<u32, PricingError> {
    let m = checks::frequency(m)?;
    checks::positive("years", years)?;
    let periods = years * m;
    let rounded = periods.round();
    if (periods - rounded).abs() > PERIOD_TOLERANCE || rounded < 1.0 {
        return Err(PricingError::domain(
            "years",
            years,
            "maturity must be a positive whole number of coupon periods",
        ));
    }
    if rounded > f64::from(u32::MAX) {
        return Err(PricingError::domain("years", years, "too many coupon periods"));
    }
    Ok(rounded as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_bond_cashflows;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    // ==========================================================
    // Discounting primitive
    // ==========================================================

    #[test]
    fn test_price_from_yield_manual_sum() {
        let flows = [10.0, 10.0, 1010.0];
        let manual = 10.0 / 1.05 + 10.0 / 1.05_f64.powi(2) + 1010.0 / 1.05_f64.powi(3);
        assert_relative_eq!(price_from_yield(&flows, 0.05, 1).unwrap(), manual, epsilon = 1e-12);
    }

    #[test]
    fn test_price_from_yield_zero_rate_is_sum() {
        let flows = build_bond_cashflows(100.0, 0.05, 5, 2).unwrap();
        assert_relative_eq!(price_from_yield(&flows, 0.0, 2).unwrap(), 125.0, epsilon = 1e-12);
    }

    #[test]
    fn test_price_from_yield_domain() {
        assert!(price_from_yield(&[], 0.05, 2).unwrap_err().is_domain());
        assert!(price_from_yield(&[100.0], 0.05, 0).unwrap_err().is_domain());
        assert!(price_from_yield(&[100.0], -2.0, 2).unwrap_err().is_domain());
        assert!(price_from_yield(&[100.0], f64::NAN, 2).unwrap_err().is_domain());
    }

    #[test]
    fn test_price_decreases_with_yield() {
        let flows = build_bond_cashflows(100.0, 0.05, 10, 2).unwrap();
        let mut last = f64::INFINITY;
        for y in [0.0, 0.02, 0.05, 0.08, 0.15] {
            let p = price_from_yield(&flows, y, 2).unwrap();
            assert!(p < last);
            last = p;
        }
    }

    // ==========================================================
    // present_value
    // ==========================================================

    #[test]
    fn test_par_bond_prices_at_par() {
        let par = 1000.0;
        let y = 0.05;
        for m in [1, 2, 4, 12] {
            for years in [1, 5, 30] {
                let coupon = par * y / f64::from(m);
                let pv = present_value(&[coupon], y, par, years, m, true).unwrap();
                assert_abs_diff_eq!(pv, par, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_premium_and_discount_semiannual() {
        let pv = present_value(&[30.0], 0.05, 1000.0, 5, 2, true).unwrap();
        assert_abs_diff_eq!(pv, 1043.7603196548546, epsilon = 1e-9);

        let pv = present_value(&[15.0], 0.05, 1000.0, 5, 2, true).unwrap();
        assert_abs_diff_eq!(pv, 912.479360690291, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_yield_level_coupon() {
        let pv = present_value(&[40.0], 0.0, 1000.0, 3, 1, true).unwrap();
        assert_abs_diff_eq!(pv, 1120.0, epsilon = 1e-12);
    }

    #[test]
    fn test_annual_premium_and_discount() {
        let low = present_value(&[80.0], 0.07, 1000.0, 10, 1, true).unwrap();
        let high = present_value(&[80.0], 0.09, 1000.0, 10, 1, true).unwrap();
        assert_abs_diff_eq!(low, 1070.235815409326, epsilon = 1e-9);
        assert_abs_diff_eq!(high, 935.8234229884099, epsilon = 1e-9);
    }

    #[test]
    fn test_general_path_matches_primitive() {
        let flows = [10.0, 10.0, 1010.0];
        let pv = present_value(&flows, 0.05, 0.0, 3, 1, false).unwrap();
        assert_relative_eq!(pv, price_from_yield(&flows, 0.05, 1).unwrap(), epsilon = 1e-12);
    }

    #[test]
    fn test_redemption_added_when_schedule_short() {
        let pv = present_value(&[], 0.05, 1000.0, 3, 1, false).unwrap();
        assert_abs_diff_eq!(pv, 1000.0 / 1.05_f64.powi(3), epsilon = 1e-12);
    }

    #[test]
    fn test_level_form_matches_schedule() {
        let flows = build_bond_cashflows(1000.0, 0.06, 7, 4).unwrap();
        let closed = present_value(&[15.0], 0.045, 1000.0, 7, 4, true).unwrap();
        assert_relative_eq!(closed, price_from_yield(&flows, 0.045, 4).unwrap(), epsilon = 1e-9);
    }

    #[test]
    fn test_present_value_domain() {
        assert!(present_value(&[10.0], 0.05, 1000.0, 5, 0, true).unwrap_err().is_domain());
        assert!(present_value(&[10.0], -2.0, 1000.0, 5, 1, true).unwrap_err().is_domain());
        assert!(present_value(&[], 0.05, 1000.0, 5, 1, true).unwrap_err().is_domain());
        assert!(present_value(&[], 0.05, 1000.0, 0, 1, false).unwrap_err().is_domain());
    }

    // ==========================================================
    // Closed forms
    // ==========================================================

    #[test]
    fn test_zero_coupon_price_textbook() {
        let expected = 1000.0 / 1.03_f64.powf(10.0);
        assert_relative_eq!(zero_coupon_price(1000.0, 0.06, 5.0, 2).unwrap(), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_coupon_matches_schedule() {
        let flows = build_bond_cashflows(1000.0, 0.0, 5, 2).unwrap();
        assert_relative_eq!(
            zero_coupon_price(1000.0, 0.06, 5.0, 2).unwrap(),
            price_from_yield(&flows, 0.06, 2).unwrap(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_coupon_bond_premium_discount() {
        let premium = coupon_bond_price(1000.0, 0.07, 0.05, 7.0, 2).unwrap();
        let discount = coupon_bond_price(1000.0, 0.03, 0.05, 7.0, 2).unwrap();
        assert!(premium > 1000.0);
        assert!(discount < 1000.0);
    }

    #[test]
    fn test_coupon_bond_half_year_maturity() {
        // One semiannual period: (par + coupon) / (1 + y/2)
        let price = coupon_bond_price(100.0, 0.04, 0.06, 0.5, 2).unwrap();
        assert_relative_eq!(price, 102.0 / 1.03, epsilon = 1e-12);
    }

    #[test]
    fn test_coupon_bond_requires_whole_periods() {
        assert!(coupon_bond_price(100.0, 0.05, 0.05, 2.3, 2).unwrap_err().is_domain());
        assert!(coupon_bond_price(100.0, 0.05, 0.05, 0.0, 2).unwrap_err().is_domain());
    }

    #[test]
    fn test_forward_value() {
        assert_relative_eq!(forward_value(950.0, 0.05, 2.0).unwrap(), 950.0 * 1.1025, epsilon = 1e-9);
        assert_eq!(forward_value(1234.56, 0.0, 5.0).unwrap(), 1234.56);
        assert_eq!(forward_value(1234.56, 0.2, 0.0).unwrap(), 1234.56);
        assert!(forward_value(100.0, 0.05, -1.0).unwrap_err().is_domain());
        assert!(forward_value(100.0, -1.5, 1.0).unwrap_err().is_domain());
    }

    #[test]
    fn test_forward_value_monotonic() {
        let f_low = forward_value(1000.0, 0.02, 3.0).unwrap();
        let f_high = forward_value(1000.0, 0.08, 3.0).unwrap();
        let f_long = forward_value(1000.0, 0.02, 5.0).unwrap();
        assert!(f_low < f_high);
        assert!(f_low < f_long);
    }
}
