use std::env;

use rust_decimal::Decimal;

use crate::core::money::Cents;
use crate::core::{AppError, Result};
use crate::modules::pricing::models::{
    DocumentationFee, FeeModel, ProcessingFee, DOCUMENTATION_FEE_LABEL, PROCESSING_FEE_LABEL,
};

pub mod server;

pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub stripe: StripeConfig,
    pub checkout: CheckoutConfig,
    pub fees: FeeModel,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Public origin the success/cancel URLs are built against
    pub public_base_url: String,

    /// Smallest charge the gateway accepts
    pub minimum_charge_cents: Cents,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            server: ServerConfig::from_env()?,
            stripe: StripeConfig {
                secret_key: env::var("STRIPE_SECRET_KEY")
                    .map_err(|_| AppError::Configuration("STRIPE_SECRET_KEY not set".to_string()))?,
                base_url: env::var("STRIPE_BASE_URL")
                    .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
            },
            checkout: CheckoutConfig {
                public_base_url: env::var("PUBLIC_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:8888".to_string()),
                minimum_charge_cents: parse_cents("MINIMUM_CHARGE_CENTS", 50)?,
            },
            fees: fee_model_from_env()?,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.stripe.secret_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "STRIPE_SECRET_KEY cannot be empty".to_string(),
            ));
        }

        if self.checkout.minimum_charge_cents <= 0 {
            return Err(AppError::Configuration(
                "Minimum charge must be greater than 0".to_string(),
            ));
        }

        self.fees.validate()
    }
}

/// Build the canonical fee model from the environment, defaulting to the
/// card model (2.9% + 30c processing, 0.4% documentation capped at $2).
/// Setting DOCUMENTATION_FEE_CAP_CENTS=0 removes the cap.
fn fee_model_from_env() -> Result<FeeModel> {
    let cap = parse_cents("DOCUMENTATION_FEE_CAP_CENTS", 200)?;

    Ok(FeeModel {
        processing: ProcessingFee {
            label: PROCESSING_FEE_LABEL.to_string(),
            rate: parse_rate("PROCESSING_FEE_RATE", Decimal::new(29, 3))?,
            fixed_cents: parse_cents("PROCESSING_FEE_FIXED_CENTS", 30)?,
        },
        documentation: DocumentationFee {
            label: DOCUMENTATION_FEE_LABEL.to_string(),
            rate: parse_rate("DOCUMENTATION_FEE_RATE", Decimal::new(4, 3))?,
            cap_cents: if cap == 0 { None } else { Some(cap) },
        },
    })
}

fn parse_rate(var: &str, default: Decimal) -> Result<Decimal> {
    match env::var(var) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}", var))),
        Err(_) => Ok(default),
    }
}

fn parse_cents(var: &str, default: Cents) -> Result<Cents> {
    match env::var(var) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}", var))),
        Err(_) => Ok(default),
    }
}
