use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Net or gross amount is negative or not representable in cents
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// A cart line item violates its invariants
    #[error("Invalid cart item: {0}")]
    InvalidCartItem(String),

    /// Fee configuration is unsolvable (rates sum to >= 1) or malformed
    #[error("Invalid fee model: {0}")]
    InvalidFeeModel(String),

    /// Malformed request structure
    #[error("{0}")]
    Validation(String),

    /// Payment gateway errors
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string(),
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidAmount(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCartItem(_) => StatusCode::BAD_REQUEST,
            // A bad fee model is a deployment defect, not a client error
            AppError::InvalidFeeModel(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Gateway(_) => StatusCode::BAD_GATEWAY,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::HttpClient(_) => StatusCode::BAD_GATEWAY,
            AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Helper functions for common error scenarios
impl AppError {
    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        AppError::InvalidAmount(msg.into())
    }

    pub fn invalid_cart_item(msg: impl Into<String>) -> Self {
        AppError::InvalidCartItem(msg.into())
    }

    pub fn invalid_fee_model(msg: impl Into<String>) -> Self {
        AppError::InvalidFeeModel(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn gateway(msg: impl Into<String>) -> Self {
        AppError::Gateway(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
