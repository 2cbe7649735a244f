//! Standard normal distribution: Hastings approximation of the cumulative
//! distribution function and the exact density.
//!
//! See Abramowitz & Stegun 26.2.17, absolute error below `1e-6`.

use crate::common::numeric::round_to;
use crate::error::PricingError;
use std::f64::consts::PI;
use tracing::warn;

const HASTINGS_P: f64 = 0.2316419;
/// `1 / sqrt(2 pi)` truncated as in the published table
const HASTINGS_D: f64 = 0.3989423;
const HASTINGS_B: [f64; 5] = [0.3193815, -0.3565638, 1.781478, -1.821256, 1.330274];

/// Decimal places kept by [`cdf`] and [`std_cdf`].
pub const CDF_DECIMALS: u32 = 5;

/// P(Z <= x) for a standard normal Z, unrounded.
///
/// The tail `P(Z <= -|x|)` is approximated and mirrored for positive `x`.
pub fn cdf_approx(x: f64) -> f64 {
    let t = 1.0 / (1.0 + HASTINGS_P * x.abs());
    let d = HASTINGS_D * (-x * x / 2.0).exp();
    let [b1, b2, b3, b4, b5] = HASTINGS_B;
    let prob = d * t * (b1 + t * (b2 + t * (b3 + t * (b4 + t * b5))));
    if x > 0.0 {
        1.0 - prob
    } else {
        prob
    }
}

/// Gaussian cdf with the given mean and standard deviation, rounded to
/// [`CDF_DECIMALS`] places (half away from zero).
///
/// A zero standard deviation yields the step function at `mean`.
pub fn cdf(z: f64, mean: f64, stddev: f64) -> Result<f64, PricingError> {
    if stddev < 0.0 {
        warn!(stddev, "rejected negative standard deviation");
        return Err(PricingError::NegativeStdDev(stddev));
    }
    if stddev == 0.0 {
        return Ok(if z < mean { 0.0 } else { 1.0 });
    }
    Ok(round_to(cdf_approx((z - mean) / stddev), CDF_DECIMALS))
}

/// `cdf(z, 0, 1)`, which cannot fail.
pub fn std_cdf(z: f64) -> f64 {
    round_to(cdf_approx(z), CDF_DECIMALS)
}

/// Standard normal density.
pub fn pdf(x: f64) -> f64 {
    (-x.powi(2) / 2.0).exp() / (2.0 * PI).sqrt()
}
