// A cart line item: a part or service the customer intends to buy.
//
// Unit prices arrive as decimal dollar amounts from the storefront and are
// converted to integer cents at the pricing boundary. The item id is stable
// across quantity changes (ex: "intl-headlight-right") and is what keeps a
// cart free of duplicate entries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money::{self, Cents};
use crate::core::{AppError, Result};

/// A single entry in a shopping cart
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Stable unique id within a cart. Bodies from older storefront builds
    /// omit it, so it defaults to empty on the wire.
    #[serde(default)]
    pub id: String,

    /// Display label
    pub name: String,

    /// Price per unit in dollars
    #[serde(alias = "price")]
    pub unit_price: Decimal,

    /// Number of units
    pub quantity: u32,

    /// Manufacturer part number, when the item is a part rather than a service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
}

impl CartItem {
    /// Create a cart item with validation
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
        part_number: Option<String>,
    ) -> Result<Self> {
        let item = Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            quantity,
            part_number,
        };
        item.validate()?;
        Ok(item)
    }

    /// Validate the item invariants: non-empty name, positive price,
    /// quantity of at least one
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid_cart_item("item name cannot be empty"));
        }

        if self.unit_price <= Decimal::ZERO {
            return Err(AppError::invalid_cart_item(format!(
                "unit price must be positive, got {}",
                self.unit_price
            )));
        }

        if self.quantity < 1 {
            return Err(AppError::invalid_cart_item(format!(
                "quantity must be at least 1, got {}",
                self.quantity
            )));
        }

        Ok(())
    }

    /// Line subtotal in cents: unit price times quantity, rounded to the
    /// nearest cent before summation to avoid drift across lines
    pub fn subtotal_cents(&self) -> Result<Cents> {
        money::dollars_to_cents(self.unit_price * Decimal::from(self.quantity))
    }

    /// Label used on the hosted checkout page, with the part number folded in
    pub fn display_name(&self) -> String {
        match &self.part_number {
            Some(part) if !part.trim().is_empty() => format!("{} (Part # {})", self.name, part),
            _ => self.name.clone(),
        }
    }
}
