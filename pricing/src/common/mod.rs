pub mod models;
pub mod numeric;
