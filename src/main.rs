use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fleetforge_checkout::config::Config;
use fleetforge_checkout::core::error::AppError;
use fleetforge_checkout::middleware::RequestId;
use fleetforge_checkout::modules::checkout::{self, CheckoutService};
use fleetforge_checkout::modules::gateways::StripeClient;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fleetforge_checkout=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting FleetForge Checkout Service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let gateway = Arc::new(StripeClient::new(
        config.stripe.secret_key.clone(),
        config.stripe.base_url.clone(),
    ));

    let checkout_service = Arc::new(CheckoutService::new(
        config.fees.clone(),
        gateway,
        config.checkout.public_base_url.clone(),
        config.checkout.minimum_charge_cents,
    ));

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(RequestId)
            .wrap(Cors::permissive())
            .app_data(web::Data::new(checkout_service.clone()))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::Validation(err.to_string()).into()
            }))
            .route("/health", web::get().to(health_check))
            .configure(checkout::configure)
    })
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "fleetforge-checkout"
    }))
}
