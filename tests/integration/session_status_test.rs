// Integration tests for GET /checkout/sessions/{id}
//
// The status endpoint keeps the `{ok: ...}` envelope in both directions so
// the storefront success page can branch on a single field.

use std::sync::Arc;

use actix_web::{web, App};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::json;

use fleetforge_checkout::core::error::{AppError, Result};
use fleetforge_checkout::modules::checkout::{self, CheckoutService};
use fleetforge_checkout::modules::gateways::services::{
    CheckoutGateway, HostedSession, SessionDetails, SessionRequest,
};
use fleetforge_checkout::modules::pricing::models::FeeModel;

/// Gateway double with a scripted session lookup
struct MockGateway {
    session: Option<SessionDetails>,
}

#[async_trait]
impl CheckoutGateway for MockGateway {
    async fn create_session(&self, _request: SessionRequest) -> Result<HostedSession> {
        Err(AppError::gateway("not scripted"))
    }

    async fn retrieve_session(&self, session_id: &str) -> Result<SessionDetails> {
        self.session
            .clone()
            .ok_or_else(|| AppError::gateway(format!("No such checkout session: {}", session_id)))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

fn spawn_app(session: Option<SessionDetails>) -> actix_test::TestServer {
    let service = Arc::new(CheckoutService::new(
        FeeModel::card_default(),
        Arc::new(MockGateway { session }) as Arc<dyn CheckoutGateway>,
        "https://fleetforgetrucks.com",
        50,
    ));

    actix_test::start(move || {
        App::new()
            .app_data(web::Data::new(service.clone()))
            .configure(checkout::configure)
    })
}

fn paid_session() -> SessionDetails {
    SessionDetails {
        payment_status: "paid".to_string(),
        amount_total_cents: 10_383,
        currency: "usd".to_string(),
        customer_email: Some("driver@example.com".to_string()),
        expires_at: Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).single(),
    }
}

#[actix_web::test]
async fn test_paid_session_status() {
    let srv = spawn_app(Some(paid_session()));

    let mut resp = srv.get("/checkout/sessions/cs_test_123").send().await.unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "ok": true,
            "payment_status": "paid",
            "amount_total": 10383,
            "currency": "usd",
            "customer_email": "driver@example.com"
        })
    );
}

#[actix_web::test]
async fn test_unpaid_session_status_passes_through() {
    let mut session = paid_session();
    session.payment_status = "unpaid".to_string();
    session.customer_email = None;
    let srv = spawn_app(Some(session));

    let mut resp = srv.get("/checkout/sessions/cs_test_123").send().await.unwrap();

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(body["payment_status"], "unpaid");
    assert_eq!(body["customer_email"], serde_json::Value::Null);
}

#[actix_web::test]
async fn test_unknown_session_keeps_error_envelope() {
    let srv = spawn_app(None);

    let mut resp = srv.get("/checkout/sessions/cs_missing").send().await.unwrap();

    assert_eq!(resp.status().as_u16(), 502);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], false);
    assert!(body["error"].as_str().unwrap().contains("cs_missing"));
}

#[actix_web::test]
async fn test_blank_session_id_is_rejected() {
    let service = CheckoutService::new(
        FeeModel::card_default(),
        Arc::new(MockGateway { session: None }) as Arc<dyn CheckoutGateway>,
        "https://fleetforgetrucks.com",
        50,
    );

    let err = service.session_status("   ").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(err.to_string(), "Missing session_id");
}
