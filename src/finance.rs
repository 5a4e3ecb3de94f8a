//! General functions related to finance.
use crate::units::{Dimensionless, Year};

/// Calculates the annuity factor for a given lifetime and discount rate.
///
/// The annuity factor is the present value of receiving one unit of money every year over the
/// lifetime of an asset. Dividing a capital cost by it gives the equivalent annual cost, i.e. it
/// is the reciprocal of the capital recovery factor.
///
/// The lifetime does not have to be a whole number of years. The result stays accurate for
/// discount rates so small that `1 + discount_rate` rounds to one.
pub fn annuity_factor(lifetime: Year, discount_rate: Dimensionless) -> Dimensionless {
    if lifetime == Year(0.0) {
        return Dimensionless(0.0);
    }
    if discount_rate == Dimensionless(0.0) {
        return Dimensionless(lifetime.value());
    }

    // 1 - (1 + r)^-n, without cancellation for small r
    let rate = discount_rate.0;
    let undiscounted_share = -(-lifetime.value() * rate.ln_1p()).exp_m1();
    Dimensionless(undiscounted_share / rate)
}
