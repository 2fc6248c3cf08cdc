// Shopping cart

pub mod models;
pub mod services;

pub use models::CartItem;
pub use services::{CartStore, MemoryCartStore};
