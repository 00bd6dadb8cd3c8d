//! Conversion between forward prices and continuously compounded yields.
//!
//! F = S·e^((y - c)·T), where `y` is the financing yield and `c` the carry
//! (dividend) yield. The inversions below recover either side of the
//! exponent from an observed forward.

use quant_core::PricingError;

fn check_spot_forward(spot: f64, forward: f64) -> Result<(), PricingError> {
    if !(spot.is_finite() && spot > 0.0) {
        return Err(PricingError::domain("spot", spot, "must be positive and finite"));
    }
    if !(forward.is_finite() && forward > 0.0) {
        return Err(PricingError::domain(
            "forward",
            forward,
            "must be positive and finite",
        ));
    }
    Ok(())
}

fn check_inversion_expiry(expiry: f64) -> Result<(), PricingError> {
    if expiry.is_finite() && expiry > 0.0 {
        Ok(())
    } else {
        Err(PricingError::domain(
            "expiry",
            expiry,
            "must be positive to imply a yield",
        ))
    }
}

/// Forward price S·e^((yield - carry)·T).
///
/// # Examples
/// ```
/// use quant_options::forward_from_yield;
///
/// let f = forward_from_yield(100.0, 0.05, 1.0, 0.02).unwrap();
/// assert!((f - 100.0 * 0.03_f64.exp()).abs() < 1e-12);
/// ```
pub fn forward_from_yield(
    spot: f64,
    yield_rate: f64,
    expiry: f64,
    carry: f64,
) -> Result<f64, PricingError> {
    if !(spot.is_finite() && spot > 0.0) {
        return Err(PricingError::domain("spot", spot, "must be positive and finite"));
    }
    if !(expiry.is_finite() && expiry >= 0.0) {
        return Err(PricingError::domain("expiry", expiry, "must be non-negative"));
    }
    Ok(spot * ((yield_rate - carry) * expiry).exp())
}

/// Implied yield `known_rate + ln(F/S)/T`.
///
/// `known_rate` is the carry used to build the forward, which makes this the
/// exact inverse of [`forward_from_yield`].
///
/// # Examples
/// ```
/// use quant_options::{forward_from_yield, yield_from_forward};
///
/// let f = forward_from_yield(100.0, 0.05, 2.0, 0.01).unwrap();
/// let y = yield_from_forward(100.0, f, 0.01, 2.0).unwrap();
/// assert!((y - 0.05).abs() < 1e-12);
/// ```
pub fn yield_from_forward(
    spot: f64,
    forward: f64,
    known_rate: f64,
    expiry: f64,
) -> Result<f64, PricingError> {
    check_spot_forward(spot, forward)?;
    check_inversion_expiry(expiry)?;
    Ok(known_rate + (forward / spot).ln() / expiry)
}

/// Implied carry (dividend) yield `rate - ln(F/S)/T` given the financing rate.
pub fn carry_from_forward(
    spot: f64,
    forward: f64,
    rate: f64,
    expiry: f64,
) -> Result<f64, PricingError> {
    check_spot_forward(spot, forward)?;
    check_inversion_expiry(expiry)?;
    Ok(rate - (forward / spot).ln() / expiry)
}
