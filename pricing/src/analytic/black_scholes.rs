use crate::analytic::normal::{cdf_approx, pdf, std_cdf};
use crate::common::models::OptionParameters;
use crate::common::numeric::{round_to, settle, Bound};
use crate::config::EngineConfig;
use crate::error::PricingError;
use serde::Serialize;
use tracing::debug;

pub trait OptionPrice {
    type Params;
    fn put(&self, params: &Self::Params) -> f64;
    fn call(&self, params: &Self::Params) -> f64;
}

/// First-order sensitivities plus gamma.
pub trait OptionGreeks: OptionPrice {
    fn call_delta(&self, params: &Self::Params) -> f64;
    fn put_delta(&self, params: &Self::Params) -> f64;
    fn gamma(&self, params: &Self::Params) -> f64;
    fn vega(&self, params: &Self::Params) -> f64;
    fn call_theta(&self, params: &Self::Params) -> f64;
    fn put_theta(&self, params: &Self::Params) -> f64;
    fn call_rho(&self, params: &Self::Params) -> f64;
    fn put_rho(&self, params: &Self::Params) -> f64;
}

/// `(ln(S/K) + (r + sigma^2 / 2) * T) / (sigma * sqrt(T))`
pub fn d1(dp: &OptionParameters) -> f64 {
    let sigma_exp = dp.vola() * dp.time_to_expiration().sqrt();
    ((dp.asset_price() / dp.strike()).ln()
        + (dp.rfr() + dp.vola().powi(2) / 2.0) * dp.time_to_expiration())
        / sigma_exp
}

/// `d1 - sigma * sqrt(T)`
pub fn d2(dp: &OptionParameters) -> f64 {
    d1(dp) - dp.vola() * dp.time_to_expiration().sqrt()
}

/// European Put and Call option prices and Greeks for stocks without dividends.
/// https://en.wikipedia.org/wiki/Black-Scholes_model
///
/// Outputs never leave the finite range: whenever a formula degenerates
/// (zero term, zero volatility, zero price or strike) the affected output is `0`.
/// Delta, gamma, vega, theta and rho are additionally clamped to their
/// textbook sign.
#[derive(Clone, Debug, Default)]
pub struct BlackScholesMerton {
    config: EngineConfig,
}

impl BlackScholesMerton {
    pub fn with_config(config: EngineConfig) -> Result<Self, PricingError> {
        config.validate()?;
        debug!(?config, "black-scholes engine configured");
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// All ten outputs for the same parameter snapshot.
    pub fn evaluate(&self, dp: &OptionParameters) -> Valuation {
        Valuation {
            call: self.call(dp),
            put: self.put(dp),
            call_delta: self.call_delta(dp),
            put_delta: self.put_delta(dp),
            gamma: self.gamma(dp),
            vega: self.vega(dp),
            call_theta: self.call_theta(dp),
            put_theta: self.put_theta(dp),
            call_rho: self.call_rho(dp),
            put_rho: self.put_rho(dp),
        }
    }

    fn quote(&self, raw: f64) -> f64 {
        round_to(settle(raw, Bound::Unbounded), self.config.price_decimals)
    }

    /// `-S * phi(d1) * sigma / (2 * sqrt(T))`, the time decay of the asset leg.
    fn asset_decay(dp: &OptionParameters, phi: f64) -> f64 {
        -(dp.asset_price() * phi * dp.vola()) / (2.0 * dp.time_to_expiration().sqrt())
    }

    /// `r * K * exp(-rT) * N(d2)`, the carry of the discounted strike.
    fn strike_carry(dp: &OptionParameters, d2: f64) -> f64 {
        dp.rfr() * dp.discounted_strike() * cdf_approx(d2)
    }
}

impl OptionPrice for BlackScholesMerton {
    type Params = OptionParameters;

    fn call(&self, dp: &OptionParameters) -> f64 {
        let d1 = d1(dp);
        let d2 = d2(dp);
        self.quote(std_cdf(d1) * dp.asset_price() - std_cdf(d2) * dp.discounted_strike())
    }

    fn put(&self, dp: &OptionParameters) -> f64 {
        let d1 = d1(dp);
        let d2 = d2(dp);
        self.quote(std_cdf(-d2) * dp.discounted_strike() - std_cdf(-d1) * dp.asset_price())
    }
}

impl OptionGreeks for BlackScholesMerton {
    fn call_delta(&self, dp: &OptionParameters) -> f64 {
        settle(std_cdf(d1(dp)), Bound::NonNegative)
    }

    fn put_delta(&self, dp: &OptionParameters) -> f64 {
        settle(std_cdf(d1(dp)) - 1.0, Bound::NonPositive)
    }

    fn gamma(&self, dp: &OptionParameters) -> f64 {
        let phi = pdf(d1(dp));
        settle(
            phi / (dp.asset_price() * dp.vola() * dp.time_to_expiration().sqrt()),
            Bound::NonNegative,
        )
    }

    fn vega(&self, dp: &OptionParameters) -> f64 {
        let phi = pdf(d1(dp));
        settle(
            dp.asset_price() * phi * dp.time_to_expiration().sqrt() / self.config.percent_scale,
            Bound::NonNegative,
        )
    }

    fn call_theta(&self, dp: &OptionParameters) -> f64 {
        let phi = pdf(d1(dp));
        let decay = Self::asset_decay(dp, phi);
        let carry = Self::strike_carry(dp, d2(dp));
        settle((decay - carry) / self.config.days_per_year, Bound::NonPositive)
    }

    fn put_theta(&self, dp: &OptionParameters) -> f64 {
        let phi = pdf(d1(dp));
        let decay = Self::asset_decay(dp, phi);
        let carry = Self::strike_carry(dp, d2(dp));
        settle((decay + carry) / self.config.days_per_year, Bound::NonPositive)
    }

    fn call_rho(&self, dp: &OptionParameters) -> f64 {
        let nd2 = cdf_approx(d2(dp));
        settle(
            dp.time_to_expiration() * dp.discounted_strike() * nd2 / self.config.percent_scale,
            Bound::NonNegative,
        )
    }

    fn put_rho(&self, dp: &OptionParameters) -> f64 {
        let nnd2 = cdf_approx(-d2(dp));
        settle(
            -dp.time_to_expiration() * dp.discounted_strike() * nnd2 / self.config.percent_scale,
            Bound::NonPositive,
        )
    }
}

/// Prices and Greeks of one option, as produced by [`BlackScholesMerton::evaluate`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Valuation {
    pub call: f64,
    pub put: f64,
    pub call_delta: f64,
    pub put_delta: f64,
    pub gamma: f64,
    pub vega: f64,
    pub call_theta: f64,
    pub put_theta: f64,
    pub call_rho: f64,
    pub put_rho: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    const TOLERANCE: f64 = 1e-9;

    fn at_the_money() -> OptionParameters {
        OptionParameters::new(100.0, 100.0, 0.05, 0.2, 1.0)
    }

    #[test]
    fn d1_d2() {
        let dp = at_the_money();
        assert_approx_eq!(d1(&dp), 0.35, 1e-12);
        assert_approx_eq!(d2(&dp), 0.15, 1e-12);
    }

    #[test]
    fn european_call() {
        let bsm = BlackScholesMerton::default();
        assert_eq!(bsm.call(&at_the_money()), 10.45);

        let dp = OptionParameters::new(300.0, 250.0, 0.03, 0.15, 1.0);
        assert_eq!(bsm.call(&dp), 58.82);

        let dp = OptionParameters::new(90.0, 100.0, 0.01, 0.3, 0.5);
        assert_eq!(bsm.call(&dp), 4.13);
    }

    #[test]
    fn european_put() {
        let bsm = BlackScholesMerton::default();
        assert_eq!(bsm.put(&at_the_money()), 5.57);

        let dp = OptionParameters::new(300.0, 250.0, 0.03, 0.15, 1.0);
        assert_eq!(bsm.put(&dp), 1.43);

        let dp = OptionParameters::new(90.0, 100.0, 0.01, 0.3, 0.5);
        assert_eq!(bsm.put(&dp), 13.63);
    }

    #[test]
    fn european_put_call_parity() {
        let bsm = BlackScholesMerton::default();
        let dp = at_the_money();
        let put_call_parity = bsm.call(&dp) - bsm.put(&dp);
        assert_approx_eq!(
            put_call_parity,
            dp.asset_price() - dp.discounted_strike(),
            0.01
        );
    }

    #[test]
    fn greeks_at_the_money() {
        let bsm = BlackScholesMerton::default();
        let dp = at_the_money();

        assert_eq!(bsm.call_delta(&dp), 0.63683);
        assert_approx_eq!(bsm.put_delta(&dp), -0.36317, TOLERANCE);
        assert_approx_eq!(bsm.gamma(&dp), 0.018762017345846895, TOLERANCE);
        assert_approx_eq!(bsm.vega(&dp), 0.3752403469169379, TOLERANCE);
        assert_approx_eq!(bsm.call_theta(&dp), -0.01757268008593017, TOLERANCE);
        assert_approx_eq!(bsm.put_theta(&dp), -0.0029884348136280737, TOLERANCE);
        assert_approx_eq!(bsm.call_rho(&dp), 0.5323249524390264, TOLERANCE);
        assert_approx_eq!(bsm.put_rho(&dp), -0.41890447206168757, TOLERANCE);
    }

    #[test]
    fn deep_in_the_money_put_theta_is_clamped() {
        let bsm = BlackScholesMerton::default();
        let dp = OptionParameters::new(300.0, 250.0, 0.03, 0.15, 1.0);
        assert_eq!(bsm.put_theta(&dp), 0.0);
        assert_approx_eq!(bsm.call_theta(&dp), -0.02624355979329413, TOLERANCE);
    }

    #[test]
    fn all_zero_parameters() {
        let bsm = BlackScholesMerton::default();
        let dp = OptionParameters::new(0.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(bsm.put(&dp), 0.00);
        assert_eq!(
            bsm.evaluate(&dp),
            Valuation {
                call: 0.0,
                put: 0.0,
                call_delta: 0.0,
                put_delta: 0.0,
                gamma: 0.0,
                vega: 0.0,
                call_theta: 0.0,
                put_theta: 0.0,
                call_rho: 0.0,
                put_rho: 0.0,
            }
        );
    }

    #[test]
    fn zero_volatility_degenerates_to_forward() {
        let bsm = BlackScholesMerton::default();
        let dp = OptionParameters::new(100.0, 100.0, 0.05, 0.0, 1.0);
        let v = bsm.evaluate(&dp);

        assert_eq!(v.call, 4.88);
        assert_eq!(v.put, 0.0);
        assert_eq!(v.call_delta, 1.0);
        assert_eq!(v.put_delta, 0.0);
        assert_eq!(v.gamma, 0.0);
        assert_eq!(v.vega, 0.0);
        assert_approx_eq!(v.call_theta, -0.013030540061653616, TOLERANCE);
        assert_eq!(v.put_theta, 0.0);
        assert_approx_eq!(v.call_rho, 0.951229424500714, TOLERANCE);
        assert_eq!(v.put_rho, 0.0);
    }

    #[test]
    fn zero_term_is_intrinsic_value() {
        let bsm = BlackScholesMerton::default();
        let dp = OptionParameters::new(100.0, 90.0, 0.05, 0.2, 0.0);
        let v = bsm.evaluate(&dp);

        assert_eq!(v.call, 10.0);
        assert_eq!(v.put, 0.0);
        assert_eq!(v.gamma, 0.0);
        assert_eq!(v.call_theta, 0.0);
        assert_eq!(v.put_theta, 0.0);
        assert_eq!(v.call_rho, 0.0);

        let at_expiry = OptionParameters::new(100.0, 100.0, 0.05, 0.2, 0.0);
        assert_eq!(bsm.call(&at_expiry), 0.0);
        assert_eq!(bsm.call_delta(&at_expiry), 0.0);
    }

    #[test]
    fn zero_strike() {
        let bsm = BlackScholesMerton::default();
        let dp = OptionParameters::new(100.0, 0.0, 0.05, 0.2, 1.0);
        assert_eq!(bsm.call(&dp), 100.0);
        assert_eq!(bsm.put(&dp), 0.0);
        assert_eq!(bsm.gamma(&dp), 0.0);
    }

    #[test]
    fn huge_prices_are_not_rounded_to_infinity() {
        let expensive_asset = OptionParameters::new(1e307, 1.0, 0.0, 0.2, 1.0);
        let expensive_strike = OptionParameters::new(1.0, 1e307, 0.0, 0.2, 1.0);

        for price_decimals in [2, 10] {
            let bsm = BlackScholesMerton::with_config(EngineConfig {
                price_decimals,
                ..EngineConfig::default()
            })
            .unwrap();
            assert_eq!(bsm.call(&expensive_asset), 1e307);
            assert_eq!(bsm.put(&expensive_strike), 1e307);
        }
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let bsm = BlackScholesMerton::default();
        let dp = OptionParameters::new(87.5, 92.0, 0.031, 0.37, 0.75);
        let first = bsm.evaluate(&dp);
        let second = bsm.evaluate(&dp);
        assert_eq!(first.call.to_bits(), second.call.to_bits());
        assert_eq!(first.gamma.to_bits(), second.gamma.to_bits());
        assert_eq!(first.put_theta.to_bits(), second.put_theta.to_bits());
        assert_eq!(first, second);
    }

    #[test]
    fn evaluate_matches_single_outputs() {
        let bsm = BlackScholesMerton::default();
        let dp = OptionParameters::new(90.0, 100.0, 0.01, 0.3, 0.5);
        let v = bsm.evaluate(&dp);
        assert_eq!(v.call, bsm.call(&dp));
        assert_eq!(v.put_delta, bsm.put_delta(&dp));
        assert_eq!(v.vega, bsm.vega(&dp));
        assert_eq!(v.put_rho, bsm.put_rho(&dp));
    }

    #[test]
    fn configured_conventions() {
        let dp = at_the_money();
        let default = BlackScholesMerton::default();
        let bsm = BlackScholesMerton::with_config(EngineConfig {
            price_decimals: 4,
            days_per_year: 252.0,
            percent_scale: 1.0,
        })
        .unwrap();

        assert_eq!(bsm.call(&dp), 10.4503);
        assert_approx_eq!(
            bsm.call_theta(&dp),
            default.call_theta(&dp) * 365.0 / 252.0,
            TOLERANCE
        );
        assert_approx_eq!(bsm.vega(&dp), default.vega(&dp) * 100.0, TOLERANCE);
        assert_approx_eq!(bsm.call_rho(&dp), default.call_rho(&dp) * 100.0, TOLERANCE);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = EngineConfig {
            days_per_year: 0.0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            BlackScholesMerton::with_config(config),
            Err(PricingError::InvalidConfig(_))
        ));
    }
}
