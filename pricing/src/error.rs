use thiserror::Error;

#[derive(Error, Debug)]
pub enum PricingError {
    #[error("the standard deviation must be nonnegative, got {0}")]
    NegativeStdDev(f64),
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
    #[error("malformed engine configuration")]
    ConfigParse(#[from] toml::de::Error),
    #[error("cannot read engine configuration")]
    Io(#[from] std::io::Error),
}
