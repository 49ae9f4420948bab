use actix_web::web::{get, resource};
use actix_web::{HttpResponse, Resource, Responder};
use serde_json::json;

async fn process() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub fn configure_routes() -> Resource {
    resource("/api/health").route(get().to(process))
}
