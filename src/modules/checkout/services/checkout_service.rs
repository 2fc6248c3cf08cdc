use std::sync::Arc;

use tracing::{debug, info};

use crate::core::money::{self, Cents};
use crate::core::{AppError, Result};
use crate::modules::cart::models::CartItem;
use crate::modules::checkout::models::{
    AmountCheckout, CartCheckout, CreateSessionRequest, CreateSessionResponse,
    SessionStatusResponse,
};
use crate::modules::gateways::services::{
    CheckoutGateway, SessionLineItem, SessionRequest,
};
use crate::modules::pricing::models::FeeModel;
use crate::modules::pricing::services::FeeCalculator;

/// Hosted checkout pages cut product names off past this length
const MAX_LINE_ITEM_NAME: usize = 100;

/// Fallback description for flat-amount charges
const DEFAULT_SERVICE_NAME: &str = "FleetForge Service";

/// Service for turning priced carts and flat amounts into hosted checkout
/// sessions
pub struct CheckoutService {
    calculator: FeeCalculator,
    fee_model: FeeModel,
    gateway: Arc<dyn CheckoutGateway>,
    public_base_url: String,
    minimum_charge_cents: Cents,
}

impl CheckoutService {
    pub fn new(
        fee_model: FeeModel,
        gateway: Arc<dyn CheckoutGateway>,
        public_base_url: impl Into<String>,
        minimum_charge_cents: Cents,
    ) -> Self {
        Self {
            calculator: FeeCalculator::new(),
            fee_model,
            gateway,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            minimum_charge_cents,
        }
    }

    /// Create a hosted checkout session for either request shape
    pub async fn create_session(
        &self,
        request: CreateSessionRequest,
    ) -> Result<CreateSessionResponse> {
        match request {
            CreateSessionRequest::Cart(cart) => self.create_cart_session(cart).await,
            CreateSessionRequest::Amount(amount) => self.create_amount_session(amount).await,
        }
    }

    /// Cart checkout: the customer pays listed prices plus itemized fees so
    /// the business nets the cart subtotal
    async fn create_cart_session(&self, request: CartCheckout) -> Result<CreateSessionResponse> {
        if request.items.is_empty() {
            return Err(AppError::validation("Cart is empty"));
        }

        let pricing = self
            .calculator
            .gross_from_cart(&request.items, &self.fee_model)?;
        self.ensure_minimum_charge(pricing.gross_cents)?;

        let mut line_items = Vec::with_capacity(request.items.len() + pricing.fees.len());
        for item in &request.items {
            line_items.push(self.cart_line_item(item)?);
        }

        // One synthetic line per fee component; components that round to
        // zero are left off the receipt
        for fee in &pricing.fees {
            if fee.amount_cents > 0 {
                line_items.push(SessionLineItem {
                    name: fee.label.clone(),
                    unit_amount_cents: fee.amount_cents,
                    quantity: 1,
                    metadata: Vec::new(),
                });
            }
        }

        let session = self
            .gateway
            .create_session(SessionRequest {
                line_items,
                customer_email: request.customer_email,
                success_url: format!(
                    "{}/checkout-success?session_id={{CHECKOUT_SESSION_ID}}",
                    self.public_base_url
                ),
                cancel_url: format!("{}/cart", self.public_base_url),
                collect_phone_number: true,
                invoice_creation: true,
            })
            .await?;

        info!(
            gateway = %self.gateway.name(),
            session_id = %session.id,
            gross = pricing.gross_cents,
            net = pricing.net_cents,
            "created cart checkout session"
        );

        Ok(CreateSessionResponse { url: session.url })
    }

    /// Flat-amount checkout: the gross is already fixed by the caller, the
    /// fees come out of it
    async fn create_amount_session(
        &self,
        request: AmountCheckout,
    ) -> Result<CreateSessionResponse> {
        self.ensure_minimum_charge(request.amount_cents)?;

        // Display-only settlement estimate for the business records
        let estimate = self
            .calculator
            .breakdown_for_gross(request.amount_cents, &self.fee_model)?;
        debug!(
            gross = estimate.gross_cents,
            net = estimate.net_cents,
            "estimated settlement for flat charge"
        );

        let description = request
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string());

        let session = self
            .gateway
            .create_session(SessionRequest {
                line_items: vec![SessionLineItem {
                    name: truncate_name(&description),
                    unit_amount_cents: request.amount_cents,
                    quantity: 1,
                    metadata: Vec::new(),
                }],
                customer_email: request.customer_email,
                success_url: format!(
                    "{}/success?session_id={{CHECKOUT_SESSION_ID}}",
                    self.public_base_url
                ),
                cancel_url: format!("{}/checkout", self.public_base_url),
                collect_phone_number: false,
                invoice_creation: true,
            })
            .await?;

        info!(
            gateway = %self.gateway.name(),
            session_id = %session.id,
            gross = request.amount_cents,
            "created flat-amount checkout session"
        );

        Ok(CreateSessionResponse { url: session.url })
    }

    /// Query a session after the customer returns from the hosted page
    pub async fn session_status(&self, session_id: &str) -> Result<SessionStatusResponse> {
        if session_id.trim().is_empty() {
            return Err(AppError::validation("Missing session_id"));
        }

        let details = self.gateway.retrieve_session(session_id).await?;

        Ok(SessionStatusResponse {
            ok: true,
            payment_status: details.payment_status,
            amount_total: details.amount_total_cents,
            currency: details.currency,
            customer_email: details.customer_email,
        })
    }

    fn cart_line_item(&self, item: &CartItem) -> Result<SessionLineItem> {
        let unit_amount_cents = money::dollars_to_cents(item.unit_price)?;

        let mut metadata = Vec::new();
        if !item.id.is_empty() {
            metadata.push(("id".to_string(), item.id.clone()));
        }
        if let Some(part) = &item.part_number {
            metadata.push(("partNumber".to_string(), part.clone()));
        }

        Ok(SessionLineItem {
            name: truncate_name(&item.display_name()),
            unit_amount_cents,
            quantity: item.quantity,
            metadata,
        })
    }

    fn ensure_minimum_charge(&self, gross_cents: Cents) -> Result<()> {
        if gross_cents < self.minimum_charge_cents {
            return Err(AppError::invalid_amount(format!(
                "charge of {} is below the gateway minimum of {}",
                money::format_usd(gross_cents),
                money::format_usd(self.minimum_charge_cents)
            )));
        }
        Ok(())
    }
}

fn truncate_name(name: &str) -> String {
    name.chars().take(MAX_LINE_ITEM_NAME).collect()
}
