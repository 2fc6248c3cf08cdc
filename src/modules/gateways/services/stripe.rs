use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;

use super::gateway_trait::{CheckoutGateway, HostedSession, SessionDetails, SessionRequest};
use crate::core::error::{AppError, Result};
use crate::core::money;

/// Stripe Checkout API client
///
/// Speaks the form-encoded Checkout Sessions API. One request per operation;
/// failures surface to the caller untouched.
pub struct StripeClient {
    client: Client,
    secret_key: String,
    base_url: String,
}

impl StripeClient {
    pub fn new(secret_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            secret_key,
            base_url,
        }
    }
}

#[async_trait]
impl CheckoutGateway for StripeClient {
    async fn create_session(&self, request: SessionRequest) -> Result<HostedSession> {
        // Checkout Sessions API: https://docs.stripe.com/api/checkout/sessions/create
        let url = format!("{}/v1/checkout/sessions", self.base_url);

        let mut params: Vec<(String, String)> = vec![
            ("mode".to_string(), "payment".to_string()),
            ("success_url".to_string(), request.success_url),
            ("cancel_url".to_string(), request.cancel_url),
            (
                "billing_address_collection".to_string(),
                "auto".to_string(),
            ),
        ];

        if let Some(email) = request.customer_email {
            params.push(("customer_email".to_string(), email));
        }

        if request.collect_phone_number {
            params.push((
                "phone_number_collection[enabled]".to_string(),
                "true".to_string(),
            ));
        }

        if request.invoice_creation {
            params.push(("invoice_creation[enabled]".to_string(), "true".to_string()));
        }

        for (i, item) in request.line_items.iter().enumerate() {
            params.push((
                format!("line_items[{}][quantity]", i),
                item.quantity.to_string(),
            ));
            params.push((
                format!("line_items[{}][price_data][currency]", i),
                money::CURRENCY.to_string(),
            ));
            params.push((
                format!("line_items[{}][price_data][unit_amount]", i),
                item.unit_amount_cents.to_string(),
            ));
            params.push((
                format!("line_items[{}][price_data][product_data][name]", i),
                item.name.clone(),
            ));
            for (key, value) in &item.metadata {
                params.push((
                    format!("line_items[{}][price_data][product_data][metadata][{}]", i, key),
                    value.clone(),
                ));
            }
        }

        #[derive(Deserialize)]
        struct StripeSession {
            id: String,
            url: Option<String>,
        }

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::Gateway(format!("Stripe API error: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(AppError::Gateway(format!(
                "Stripe API error {}: {}",
                status, error_body
            )));
        }

        let session: StripeSession = response
            .json()
            .await
            .map_err(|e| AppError::Gateway(format!("Failed to parse Stripe response: {}", e)))?;

        let redirect_url = session
            .url
            .ok_or_else(|| AppError::gateway("Stripe session has no redirect URL"))?;

        Ok(HostedSession {
            id: session.id,
            url: redirect_url,
        })
    }

    async fn retrieve_session(&self, session_id: &str) -> Result<SessionDetails> {
        let url = format!("{}/v1/checkout/sessions/{}", self.base_url, session_id);

        #[derive(Deserialize)]
        struct CustomerDetails {
            email: Option<String>,
        }

        #[derive(Deserialize)]
        struct StripeSession {
            payment_status: String,
            amount_total: Option<i64>,
            currency: Option<String>,
            customer_details: Option<CustomerDetails>,
            expires_at: Option<i64>,
        }

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| AppError::Gateway(format!("Stripe API error: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(AppError::Gateway(format!(
                "Stripe API error {}: {}",
                status, error_body
            )));
        }

        let session: StripeSession = response
            .json()
            .await
            .map_err(|e| AppError::Gateway(format!("Failed to parse Stripe response: {}", e)))?;

        Ok(SessionDetails {
            payment_status: session.payment_status,
            amount_total_cents: session.amount_total.unwrap_or(0),
            currency: session.currency.unwrap_or_else(|| money::CURRENCY.to_string()),
            customer_email: session.customer_details.and_then(|d| d.email),
            expires_at: session
                .expires_at
                .and_then(|ts| DateTime::from_timestamp(ts, 0)),
        })
    }

    fn name(&self) -> &str {
        "stripe"
    }
}
