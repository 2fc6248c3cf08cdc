use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::money::Cents;
use crate::core::Result;

/// Checkout gateway trait: create a hosted payment session and query it back
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    /// Create a hosted checkout session and return its redirect URL
    async fn create_session(&self, request: SessionRequest) -> Result<HostedSession>;

    /// Retrieve a session by id after the customer returns from the hosted page
    async fn retrieve_session(&self, session_id: &str) -> Result<SessionDetails>;

    /// Get gateway name
    fn name(&self) -> &str;
}

/// A single line on the hosted checkout page: a cart item or a synthetic fee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionLineItem {
    /// Display label, truncated to the gateway's limit by the caller
    pub name: String,

    /// Price per unit in cents
    pub unit_amount_cents: Cents,

    /// Number of units
    pub quantity: u32,

    /// Product metadata forwarded to the gateway (item id, part number)
    pub metadata: Vec<(String, String)>,
}

/// Session creation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRequest {
    pub line_items: Vec<SessionLineItem>,

    /// Prefill the payer email on the hosted page (optional)
    pub customer_email: Option<String>,

    /// Where the gateway sends the customer after payment
    pub success_url: String,

    /// Where the gateway sends the customer on cancel
    pub cancel_url: String,

    /// Ask the hosted page to collect a phone number
    pub collect_phone_number: bool,

    /// Have the gateway issue an invoice PDF for the charge
    pub invoice_creation: bool,
}

/// A created hosted session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostedSession {
    /// Gateway session reference
    pub id: String,

    /// Redirect target for the customer's browser
    pub url: String,
}

/// Session state as reported by the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDetails {
    /// Gateway payment status, e.g. "paid", "unpaid"
    pub payment_status: String,

    /// Total the customer was charged
    pub amount_total_cents: Cents,

    /// Settlement currency
    pub currency: String,

    /// Email the customer entered on the hosted page, when available
    pub customer_email: Option<String>,

    /// Session expiry, when the gateway reports one
    pub expires_at: Option<DateTime<Utc>>,
}
