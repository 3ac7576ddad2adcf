//! Equipment list, register/edit forms and the batch selection.

use std::collections::HashMap;

use actix_session::Session;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::types::RecordId;
use crate::dto::forms::{EquipmentFormOptions, FormPage};
use crate::forms::equipment::EquipmentForm;
use crate::models::config::ServerConfig;
use crate::repository::http::HttpRepository;
use crate::resources::Equipments;
use crate::routes::{
    base_context, load_selection, redirect, render_template, render_template_with_status,
    store_selection, with_query,
};
use crate::services::listing::{find_listed, load_list_page};
use crate::services::{ServiceError, equipment as equipment_service};

const FORM_TEMPLATE: &str = "equipment/form.html";

#[get("/equipment")]
pub async fn show_equipment(
    params: web::Query<HashMap<String, String>>,
    repo: web::Data<HttpRepository>,
    server_config: web::Data<ServerConfig>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let options = equipment_service::load_filter_options(repo.get_ref()).await;
    let data = load_list_page::<Equipments, _>(
        repo.get_ref(),
        &params,
        server_config.page_size,
        load_selection(&session),
        options,
    )
    .await;

    let mut context = base_context(&flash_messages, &data.notices, "equipment");
    context.insert("list", &data);
    render_template(&tera, "equipment/index.html", &context)
}

fn render_form(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    page: &FormPage<EquipmentForm, EquipmentFormOptions>,
    action: &str,
    status: StatusCode,
) -> HttpResponse {
    let mut context = base_context(flash_messages, &[], "equipment");
    context.insert("page", page);
    context.insert("action", action);
    render_template_with_status(tera, FORM_TEMPLATE, &context, status)
}

#[get("/equipment/new")]
pub async fn new_equipment(
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match equipment_service::load_form_options(repo.get_ref()).await {
        Ok(options) => render_form(
            &tera,
            &flash_messages,
            &FormPage::new(EquipmentForm::default(), options),
            "/equipment/add",
            StatusCode::OK,
        ),
        Err(_) => {
            FlashMessage::error("Could not load the equipment form.").send();
            redirect("/equipment")
        }
    }
}

#[post("/equipment/add")]
pub async fn add_equipment(
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<EquipmentForm>,
) -> impl Responder {
    match equipment_service::create_equipment(repo.get_ref(), form.clone()).await {
        Ok(()) => {
            FlashMessage::success("Equipment registered.").send();
            redirect("/equipment")
        }
        Err(ServiceError::Form(err)) => {
            let options = equipment_service::load_form_options(repo.get_ref())
                .await
                .unwrap_or_default();
            let page = FormPage::new(form, options).with_errors(err.field_errors());
            render_form(
                &tera,
                &flash_messages,
                &page,
                "/equipment/add",
                StatusCode::UNPROCESSABLE_ENTITY,
            )
        }
        Err(err) => {
            log::error!("Failed to register equipment: {err}");
            FlashMessage::error("Could not register the equipment.").send();
            redirect("/equipment")
        }
    }
}

#[get("/equipment/{id}/edit")]
pub async fn edit_equipment(
    req: HttpRequest,
    id: web::Path<String>,
    params: web::Query<HashMap<String, String>>,
    repo: web::Data<HttpRepository>,
    server_config: web::Data<ServerConfig>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let list_url = with_query("/equipment", req.query_string());
    let Ok(id) = RecordId::new(id.into_inner()) else {
        FlashMessage::error("Equipment not found.").send();
        return redirect(&list_url);
    };

    let equipment =
        find_listed::<Equipments, _>(repo.get_ref(), &params, server_config.page_size, &id).await;
    let equipment = match equipment {
        Ok(equipment) => equipment,
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Equipment not found.").send();
            return redirect(&list_url);
        }
        Err(_) => {
            FlashMessage::error("Could not load the equipment.").send();
            return redirect(&list_url);
        }
    };

    match equipment_service::load_form_options(repo.get_ref()).await {
        Ok(options) => {
            let action = with_query(&format!("/equipment/{id}/save"), req.query_string());
            render_form(
                &tera,
                &flash_messages,
                &FormPage::new(EquipmentForm::from(&equipment), options),
                &action,
                StatusCode::OK,
            )
        }
        Err(_) => {
            FlashMessage::error("Could not load the equipment form.").send();
            redirect(&list_url)
        }
    }
}

#[post("/equipment/{id}/save")]
pub async fn save_equipment(
    req: HttpRequest,
    id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<EquipmentForm>,
) -> impl Responder {
    let list_url = with_query("/equipment", req.query_string());
    let Ok(id) = RecordId::new(id.into_inner()) else {
        FlashMessage::error("Equipment not found.").send();
        return redirect(&list_url);
    };
    let action = with_query(&format!("/equipment/{id}/save"), req.query_string());

    match equipment_service::update_equipment(repo.get_ref(), id, form.clone()).await {
        Ok(()) => {
            FlashMessage::success("Equipment updated.").send();
            redirect(&list_url)
        }
        Err(ServiceError::Form(err)) => {
            let options = equipment_service::load_form_options(repo.get_ref())
                .await
                .unwrap_or_default();
            let page = FormPage::new(form, options).with_errors(err.field_errors());
            render_form(
                &tera,
                &flash_messages,
                &page,
                &action,
                StatusCode::UNPROCESSABLE_ENTITY,
            )
        }
        Err(err) => {
            log::error!("Failed to update equipment: {err}");
            FlashMessage::error("Could not update the equipment.").send();
            redirect(&list_url)
        }
    }
}

#[post("/equipment/{id}/select")]
/// Toggles one row in the batch selection and returns to the list.
pub async fn toggle_equipment_selection(
    req: HttpRequest,
    id: web::Path<String>,
    session: Session,
) -> impl Responder {
    match RecordId::new(id.into_inner()) {
        Ok(id) => {
            let mut selection = load_selection(&session);
            selection.toggle(id);
            store_selection(&session, &selection);
        }
        Err(err) => log::warn!("Ignoring selection of invalid id: {err}"),
    }
    redirect(&with_query("/equipment", req.query_string()))
}

#[post("/equipment/selection/clear")]
pub async fn clear_equipment_selection(req: HttpRequest, session: Session) -> impl Responder {
    let mut selection = load_selection(&session);
    selection.clear();
    store_selection(&session, &selection);
    redirect(&with_query("/equipment", req.query_string()))
}
