use serde::{Deserialize, Serialize};

/// Market inputs of a single European option.
///
/// Every field is floored at zero: negative (and NaN) inputs are replaced by `0.0`
/// on construction and on every mutation, never rejected.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawOptionParameters")]
pub struct OptionParameters {
    /// the asset's price at time t
    asset_price: f64,
    /// the strike or exercise price of the asset
    strike: f64,
    /// the annualized, continuously compounded risk-free interest rate
    rfr: f64,
    /// the annualized standard deviation of the stock's log-returns
    vola: f64,
    /// (T - t) in years, where T is the time of the option's expiration and t is the current time
    time_to_expiration: f64,
}

/// Unchecked wire shape; converted through [`OptionParameters::new`] so that
/// deserialized values are clamped as well.
#[derive(Deserialize)]
struct RawOptionParameters {
    asset_price: f64,
    strike: f64,
    rfr: f64,
    vola: f64,
    time_to_expiration: f64,
}

impl From<RawOptionParameters> for OptionParameters {
    fn from(raw: RawOptionParameters) -> Self {
        Self::new(
            raw.asset_price,
            raw.strike,
            raw.rfr,
            raw.vola,
            raw.time_to_expiration,
        )
    }
}

fn floor_at_zero(value: f64) -> f64 {
    value.max(0.0)
}

impl OptionParameters {
    pub fn new(asset_price: f64, strike: f64, rfr: f64, vola: f64, time_to_expiration: f64) -> Self {
        Self {
            asset_price: floor_at_zero(asset_price),
            strike: floor_at_zero(strike),
            rfr: floor_at_zero(rfr),
            vola: floor_at_zero(vola),
            time_to_expiration: floor_at_zero(time_to_expiration),
        }
    }

    pub fn asset_price(&self) -> f64 {
        self.asset_price
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    pub fn rfr(&self) -> f64 {
        self.rfr
    }

    pub fn vola(&self) -> f64 {
        self.vola
    }

    pub fn time_to_expiration(&self) -> f64 {
        self.time_to_expiration
    }

    pub fn set_asset_price(&mut self, asset_price: f64) -> &mut Self {
        self.asset_price = floor_at_zero(asset_price);
        self
    }

    pub fn set_strike(&mut self, strike: f64) -> &mut Self {
        self.strike = floor_at_zero(strike);
        self
    }

    pub fn set_rfr(&mut self, rfr: f64) -> &mut Self {
        self.rfr = floor_at_zero(rfr);
        self
    }

    pub fn set_vola(&mut self, vola: f64) -> &mut Self {
        self.vola = floor_at_zero(vola);
        self
    }

    pub fn set_time_to_expiration(&mut self, time_to_expiration: f64) -> &mut Self {
        self.time_to_expiration = floor_at_zero(time_to_expiration);
        self
    }

    /// The strike discounted to today, `K * exp(-r * T)`.
    pub fn discounted_strike(&self) -> f64 {
        self.strike * (-self.rfr * self.time_to_expiration).exp()
    }
}
