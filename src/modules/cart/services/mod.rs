pub mod cart_store;

pub use cart_store::{CartStore, MemoryCartStore, MAX_QUANTITY};
