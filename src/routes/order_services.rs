use std::collections::HashMap;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::types::RecordId;
use crate::dto::forms::{FormPage, OrderServiceFormOptions};
use crate::forms::order_services::OrderServiceForm;
use crate::listing::selection::Selection;
use crate::models::config::ServerConfig;
use crate::repository::http::HttpRepository;
use crate::resources::OrderServices;
use crate::routes::{
    base_context, redirect, render_template, render_template_with_status, with_query,
};
use crate::services::listing::{find_listed, load_list_page};
use crate::services::{ServiceError, order_services as order_services_service};

#[get("/order-services")]
pub async fn show_order_services(
    params: web::Query<HashMap<String, String>>,
    repo: web::Data<HttpRepository>,
    server_config: web::Data<ServerConfig>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let options = order_services_service::load_filter_options(repo.get_ref()).await;
    let data = load_list_page::<OrderServices, _>(
        repo.get_ref(),
        &params,
        server_config.page_size,
        Selection::new(),
        options,
    )
    .await;

    let mut context = base_context(&flash_messages, &data.notices, "order_services");
    context.insert("list", &data);
    render_template(&tera, "order_services/index.html", &context)
}

fn render_form(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    page: &FormPage<OrderServiceForm, OrderServiceFormOptions>,
    action: &str,
    status: StatusCode,
) -> HttpResponse {
    let mut context = base_context(flash_messages, &[], "order_services");
    context.insert("page", page);
    context.insert("action", action);
    render_template_with_status(tera, "order_services/form.html", &context, status)
}

/// Re-renders a rejected submission, or flashes and redirects for backend
/// failures.
fn handle_save_error(
    err: ServiceError,
    form: OrderServiceForm,
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    action: &str,
    back_to: &str,
) -> HttpResponse {
    match err {
        ServiceError::Form(err) => {
            let page = FormPage::new(form, order_services_service::load_form_options())
                .with_errors(err.field_errors());
            render_form(
                tera,
                flash_messages,
                &page,
                action,
                StatusCode::UNPROCESSABLE_ENTITY,
            )
        }
        err => {
            log::error!("Failed to save order service: {err}");
            FlashMessage::error("Could not save the order service.").send();
            redirect(back_to)
        }
    }
}

#[get("/order-services/new")]
pub async fn new_order_service(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_form(
        &tera,
        &flash_messages,
        &FormPage::new(
            OrderServiceForm::default(),
            order_services_service::load_form_options(),
        ),
        "/order-services/add",
        StatusCode::OK,
    )
}

#[post("/order-services/add")]
pub async fn add_order_service(
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<OrderServiceForm>,
) -> impl Responder {
    match order_services_service::create_order_service(repo.get_ref(), form.clone()).await {
        Ok(()) => {
            FlashMessage::success("Order service opened.").send();
            redirect("/order-services")
        }
        Err(err) => handle_save_error(
            err,
            form,
            &tera,
            &flash_messages,
            "/order-services/add",
            "/order-services",
        ),
    }
}

#[get("/order-services/{id}/edit")]
pub async fn edit_order_service(
    req: HttpRequest,
    id: web::Path<String>,
    params: web::Query<HashMap<String, String>>,
    repo: web::Data<HttpRepository>,
    server_config: web::Data<ServerConfig>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let list_url = with_query("/order-services", req.query_string());
    let Ok(id) = RecordId::new(id.into_inner()) else {
        FlashMessage::error("Order service not found.").send();
        return redirect(&list_url);
    };

    match find_listed::<OrderServices, _>(repo.get_ref(), &params, server_config.page_size, &id)
        .await
    {
        Ok(ticket) => {
            let action = with_query(&format!("/order-services/{id}/save"), req.query_string());
            let mut context = base_context(&flash_messages, &[], "order_services");
            context.insert("equipment", &ticket.equipment);
            context.insert(
                "page",
                &FormPage::new(
                    OrderServiceForm::from(&ticket),
                    order_services_service::load_form_options(),
                ),
            );
            context.insert("action", &action);
            render_template(&tera, "order_services/form.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Order service not found.").send();
            redirect(&list_url)
        }
        Err(_) => {
            FlashMessage::error("Could not load the order service.").send();
            redirect(&list_url)
        }
    }
}

#[post("/order-services/{id}/save")]
pub async fn save_order_service(
    req: HttpRequest,
    id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<OrderServiceForm>,
) -> impl Responder {
    let list_url = with_query("/order-services", req.query_string());
    let Ok(id) = RecordId::new(id.into_inner()) else {
        FlashMessage::error("Order service not found.").send();
        return redirect(&list_url);
    };
    let action = with_query(&format!("/order-services/{id}/save"), req.query_string());

    match order_services_service::update_order_service(repo.get_ref(), id, form.clone()).await {
        Ok(()) => {
            FlashMessage::success("Order service updated.").send();
            redirect(&list_url)
        }
        Err(err) => handle_save_error(err, form, &tera, &flash_messages, &action, &list_url),
    }
}
