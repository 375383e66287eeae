use actix_web::{get, HttpResponse, Responder};
use serde_json::json;

/// Liveness check. Needs no credential.
#[get("/status")]
pub async fn status() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok"
    }))
}
