pub mod gateway_trait;
pub mod stripe;

pub use gateway_trait::{
    CheckoutGateway, HostedSession, SessionDetails, SessionLineItem, SessionRequest,
};
pub use stripe::StripeClient;
