use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;

use crate::repository::http::HttpRepository;
use crate::services::order_services as order_services_service;

#[derive(Deserialize)]
struct LookupQueryParams {
    #[serde(default)]
    q: String,
}

#[get("/equipment/lookup")]
/// Equipment suggestions for the order-service form, matched by tipping number.
pub async fn api_equipment_lookup(
    params: web::Query<LookupQueryParams>,
    repo: web::Data<HttpRepository>,
) -> impl Responder {
    match order_services_service::lookup_equipment(repo.get_ref(), &params.q).await {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => {
            log::error!("Failed to look up equipment: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
