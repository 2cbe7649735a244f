//! Closed-form prices and sensitivities of European options in the
//! Black-Scholes-Merton model.
//!
//! ```
//! use pricing::analytic::black_scholes::{BlackScholesMerton, OptionGreeks, OptionPrice};
//! use pricing::common::models::OptionParameters;
//!
//! let params = OptionParameters::new(100.0, 100.0, 0.05, 0.2, 1.0);
//! let model = BlackScholesMerton::default();
//! assert_eq!(model.call(&params), 10.45);
//! assert_eq!(model.put(&params), 5.57);
//! assert!(model.gamma(&params) > 0.0);
//! ```

pub mod analytic;
pub mod common;
pub mod config;
pub mod error;

pub use analytic::black_scholes::{BlackScholesMerton, OptionGreeks, OptionPrice, Valuation};
pub use common::models::OptionParameters;
pub use config::EngineConfig;
pub use error::PricingError;
