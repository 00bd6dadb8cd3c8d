//! Argument validation shared by the bond pricers.

use quant_core::PricingError;

pub(crate) fn frequency(m: u32) -> Result<f64, PricingError> {
    if m == 0 {
        return Err(PricingError::domain(
            "frequency",
            0.0,
            "compounding frequency must be at least 1",
        ));
    }
    Ok(f64::from(m))
}

pub(crate) fn positive(parameter: &str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::domain(parameter, value, "must be positive and finite"))
    }
}

pub(crate) fn non_negative(parameter: &str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PricingError::domain(parameter, value, "must be non-negative and finite"))
    }
}

/// Periodic rate y/m, rejecting rates at or below -100% per period.
pub(crate) fn periodic_rate(annual_yield: f64, m: u32) -> Result<f64, PricingError> {
    let m = frequency(m)?;
    if !annual_yield.is_finite() {
        return Err(PricingError::domain("yield", annual_yield, "must be finite"));
    }
    let rate = annual_yield / m;
    if rate <= -1.0 {
        return Err(PricingError::domain(
            "yield",
            annual_yield,
            "periodic rate must exceed -100%",
        ));
    }
    Ok(rate)
}

/// Fraction of the current coupon period already elapsed, in [0, 1).
pub(crate) fn accrual_fraction(fraction: f64) -> Result<(), PricingError> {
    if (0.0..1.0).contains(&fraction) {
        Ok(())
    } else {
        Err(PricingError::domain(
            "fraction",
            fraction,
            "accrual fraction must lie in [0, 1)",
        ))
    }
}
