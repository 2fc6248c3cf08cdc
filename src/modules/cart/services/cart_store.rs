use std::sync::RwLock;

use tracing::debug;

use crate::core::{AppError, Result};
use crate::modules::cart::models::CartItem;

/// Quantities are clamped to this per line; the storefront has no use for
/// more than 99 of one part in a single order
pub const MAX_QUANTITY: u32 = 99;

/// The cart collaborator: an ordered set of line items keyed by id.
///
/// The calculator only ever reads a snapshot via `items()`; mutation happens
/// through the other operations in response to storefront actions.
pub trait CartStore: Send + Sync {
    /// Immutable snapshot of the cart contents, in insertion order
    fn items(&self) -> Vec<CartItem>;

    /// Add an item. Adding an id already in the cart increments its quantity
    /// instead of duplicating the entry.
    fn add_item(&self, item: CartItem, quantity: u32) -> Result<()>;

    /// Set the quantity of an existing line; unknown ids are ignored
    fn set_quantity(&self, id: &str, quantity: u32);

    /// Remove a line; unknown ids are ignored
    fn remove_item(&self, id: &str);

    /// Empty the cart, e.g. after a completed purchase
    fn clear(&self);
}

fn clamp_quantity(quantity: u32) -> u32 {
    quantity.clamp(1, MAX_QUANTITY)
}

/// In-memory cart, one per browsing session
pub struct MemoryCartStore {
    items: RwLock<Vec<CartItem>>,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryCartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore for MemoryCartStore {
    fn items(&self) -> Vec<CartItem> {
        self.items.read().expect("cart lock poisoned").clone()
    }

    fn add_item(&self, mut item: CartItem, quantity: u32) -> Result<()> {
        item.quantity = clamp_quantity(quantity);
        item.validate()?;

        if item.id.trim().is_empty() {
            return Err(AppError::invalid_cart_item("item id cannot be empty"));
        }

        let mut items = self.items.write().expect("cart lock poisoned");
        if let Some(existing) = items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = clamp_quantity(existing.quantity + item.quantity);
            debug!(id = %item.id, quantity = existing.quantity, "incremented cart line");
        } else {
            debug!(id = %item.id, quantity = item.quantity, "added cart line");
            items.push(item);
        }

        Ok(())
    }

    fn set_quantity(&self, id: &str, quantity: u32) {
        let mut items = self.items.write().expect("cart lock poisoned");
        if let Some(existing) = items.iter_mut().find(|i| i.id == id) {
            existing.quantity = clamp_quantity(quantity);
        }
    }

    fn remove_item(&self, id: &str) {
        let mut items = self.items.write().expect("cart lock poisoned");
        items.retain(|i| i.id != id);
    }

    fn clear(&self) {
        self.items.write().expect("cart lock poisoned").clear();
    }
}
