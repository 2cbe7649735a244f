use crate::error::PricingError;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

const MAX_PRICE_DECIMALS: u32 = 10;

/// Conventions applied by [`crate::BlackScholesMerton`] when it scales and rounds
/// its outputs. The defaults reproduce the usual quoting: prices in cents,
/// theta per calendar day, vega and rho per percentage point.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Decimal places of call and put prices
    #[serde(default = "default_price_decimals")]
    pub price_decimals: u32,

    /// Divisor turning the annual theta into a daily one
    #[serde(default = "default_days_per_year")]
    pub days_per_year: f64,

    /// Divisor turning vega and rho into per-percentage-point figures
    #[serde(default = "default_percent_scale")]
    pub percent_scale: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            price_decimals: default_price_decimals(),
            days_per_year: default_days_per_year(),
            percent_scale: default_percent_scale(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document. Missing keys fall back to the defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, PricingError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        debug!(?config, "loaded engine config");
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PricingError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), PricingError> {
        if self.price_decimals > MAX_PRICE_DECIMALS {
            return Err(PricingError::InvalidConfig(format!(
                "price_decimals must be at most {}, got {}",
                MAX_PRICE_DECIMALS, self.price_decimals
            )));
        }
        if !(self.days_per_year.is_finite() && self.days_per_year > 0.0) {
            return Err(PricingError::InvalidConfig(format!(
                "days_per_year must be positive, got {}",
                self.days_per_year
            )));
        }
        if !(self.percent_scale.is_finite() && self.percent_scale > 0.0) {
            return Err(PricingError::InvalidConfig(format!(
                "percent_scale must be positive, got {}",
                self.percent_scale
            )));
        }
        Ok(())
    }
}

fn default_price_decimals() -> u32 {
    2
}

fn default_days_per_year() -> f64 {
    365.0
}

fn default_percent_scale() -> f64 {
    100.0
}
