pub mod services;

pub use services::{
    CheckoutGateway, HostedSession, SessionDetails, SessionLineItem, SessionRequest, StripeClient,
};
