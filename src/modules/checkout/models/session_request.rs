use serde::{Deserialize, Serialize};

use crate::core::money::Cents;
use crate::modules::cart::models::CartItem;

/// Body of `POST /checkout/sessions`.
///
/// Two shapes are accepted: a cart of line items to price fee-inclusively, or
/// a flat gross amount the caller already solved for. Untagged so the
/// storefront keeps posting the same JSON it always has.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CreateSessionRequest {
    Cart(CartCheckout),
    Amount(AmountCheckout),
}

/// Cart checkout: the business nets the listed prices, fees are added on top
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCheckout {
    pub items: Vec<CartItem>,

    #[serde(default)]
    pub customer_email: Option<String>,
}

/// Flat-amount checkout: charge exactly this gross, a single line item
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountCheckout {
    pub amount_cents: Cents,

    #[serde(default)]
    pub customer_email: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// Success body of `POST /checkout/sessions`
#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    /// Hosted checkout page the browser should be redirected to
    pub url: String,
}

/// Body of `GET /checkout/sessions/{id}`
#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub ok: bool,
    pub payment_status: String,
    pub amount_total: Cents,
    pub currency: String,
    pub customer_email: Option<String>,
}
