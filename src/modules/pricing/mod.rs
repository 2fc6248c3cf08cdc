// Fee-inclusive pricing

pub mod models;
pub mod services;

pub use models::{FeeLine, FeeModel, PricingResult};
pub use services::FeeCalculator;
