use std::collections::HashMap;

use actix_web::http::header;
use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::FlashMessage;

use crate::domain::types::ExportFormat;
use crate::listing::Resource;
use crate::repository::http::HttpRepository;
use crate::resources::{Equipments, Movements, OrderServices};
use crate::routes::redirect;
use crate::services::listing::export_report;

/// Forwards the backend report for the filtered set of `R`.
async fn export<R: Resource>(repo: &HttpRepository, params: &HashMap<String, String>) -> HttpResponse {
    let list_url = format!("/{}", R::NAME);
    let format = match params
        .get("format")
        .map(|raw| raw.parse::<ExportFormat>())
        .unwrap_or(Ok(ExportFormat::Csv))
    {
        Ok(format) => format,
        Err(err) => {
            log::warn!("Rejected export format: {err}");
            FlashMessage::error("Unknown report format.").send();
            return redirect(&list_url);
        }
    };

    match export_report::<R, _>(repo, params, format).await {
        Ok(bytes) => HttpResponse::Ok()
            .content_type(format.content_type())
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}.{format}\"", R::NAME),
            ))
            .body(bytes),
        Err(_) => {
            FlashMessage::error("Could not generate the report.").send();
            redirect(&list_url)
        }
    }
}

#[get("/equipment/export")]
pub async fn export_equipment(
    params: web::Query<HashMap<String, String>>,
    repo: web::Data<HttpRepository>,
) -> impl Responder {
    export::<Equipments>(repo.get_ref(), &params).await
}

#[get("/movements/export")]
pub async fn export_movements(
    params: web::Query<HashMap<String, String>>,
    repo: web::Data<HttpRepository>,
) -> impl Responder {
    export::<Movements>(repo.get_ref(), &params).await
}

#[get("/order-services/export")]
pub async fn export_order_services(
    params: web::Query<HashMap<String, String>>,
    repo: web::Data<HttpRepository>,
) -> impl Responder {
    export::<OrderServices>(repo.get_ref(), &params).await
}
