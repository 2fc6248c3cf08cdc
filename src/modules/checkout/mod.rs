// Checkout sessions

pub mod controllers;
pub mod models;
pub mod services;

pub use controllers::configure;
pub use models::{CreateSessionRequest, CreateSessionResponse, SessionStatusResponse};
pub use services::CheckoutService;
