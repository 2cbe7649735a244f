use tracing::trace;

/// Sign convention enforced on a computed output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// clamp to `>= 0`
    NonNegative,
    /// clamp to `<= 0`
    NonPositive,
    /// no sign clamp (prices)
    Unbounded,
}

/// Round half away from zero to `decimals` places, i.e. `round(v * 10^n) / 10^n`.
///
/// Values too large to scale carry no fraction and are returned as they are.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10_f64.powi(decimals as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}

/// Replace a non-finite raw value by zero, then apply the sign clamp.
///
/// Division by a zero term or volatility and `ln` of a non-positive moneyness
/// all end up here, so no output of the engine is ever NaN or infinite.
pub fn settle(raw: f64, bound: Bound) -> f64 {
    if !raw.is_finite() {
        trace!(raw, "non-finite output replaced with zero");
        return 0.0;
    }
    match bound {
        Bound::NonNegative => raw.max(0.0),
        Bound::NonPositive => raw.min(0.0),
        Bound::Unbounded => raw,
    }
}
