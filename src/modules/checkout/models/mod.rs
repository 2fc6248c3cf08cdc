mod session_request;

pub use session_request::{
    AmountCheckout, CartCheckout, CreateSessionRequest, CreateSessionResponse,
    SessionStatusResponse,
};
