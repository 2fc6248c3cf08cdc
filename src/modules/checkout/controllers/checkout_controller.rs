use std::sync::Arc;

use actix_web::{error::ResponseError, web, HttpResponse};

use crate::core::error::AppError;
use crate::modules::checkout::models::CreateSessionRequest;
use crate::modules::checkout::services::checkout_service::CheckoutService;

/// Create a hosted checkout session
/// POST /checkout/sessions
pub async fn create_session(
    service: web::Data<Arc<CheckoutService>>,
    request: web::Json<CreateSessionRequest>,
) -> Result<HttpResponse, AppError> {
    let response = service.create_session(request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Query a session after the customer returns from the hosted page
/// GET /checkout/sessions/{id}
///
/// This endpoint keeps the `{ok: ...}` envelope on errors too, so the
/// storefront can branch on one field.
pub async fn get_session(
    service: web::Data<Arc<CheckoutService>>,
    path: web::Path<String>,
) -> HttpResponse {
    match service.session_status(&path.into_inner()).await {
        Ok(status) => HttpResponse::Ok().json(status),
        Err(err) => HttpResponse::build(err.status_code()).json(serde_json::json!({
            "ok": false,
            "error": err.to_string(),
        })),
    }
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(serde_json::json!({
        "error": "Method Not Allowed",
    }))
}

/// Configure checkout routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/checkout")
            .service(
                web::resource("/sessions")
                    .route(web::post().to(create_session))
                    .default_service(web::route().to(method_not_allowed)),
            )
            .service(
                web::resource("/sessions/{id}")
                    .route(web::get().to(get_session))
                    .default_service(web::route().to(method_not_allowed)),
            ),
    );
}
