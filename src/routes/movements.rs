use std::collections::HashMap;

use actix_session::Session;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::types::RecordId;
use crate::dto::forms::{FormPage, MovementFormOptions};
use crate::forms::movements::MovementForm;
use crate::listing::controller::EMPTY_SELECTION_MESSAGE;
use crate::listing::selection::{Selection, SelectionError};
use crate::models::config::ServerConfig;
use crate::repository::http::HttpRepository;
use crate::resources::Movements;
use crate::routes::{
    base_context, load_selection, redirect, render_template, render_template_with_status,
    store_selection, with_query,
};
use crate::services::listing::load_list_page;
use crate::services::{ServiceError, movements as movements_service};

#[get("/movements")]
pub async fn show_movements(
    params: web::Query<HashMap<String, String>>,
    repo: web::Data<HttpRepository>,
    server_config: web::Data<ServerConfig>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let options = movements_service::load_filter_options(repo.get_ref()).await;
    let data = load_list_page::<Movements, _>(
        repo.get_ref(),
        &params,
        server_config.page_size,
        Selection::new(),
        options,
    )
    .await;

    let mut context = base_context(&flash_messages, &data.notices, "movements");
    context.insert("list", &data);
    render_template(&tera, "movements/index.html", &context)
}

fn render_form(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    page: &FormPage<MovementForm, MovementFormOptions>,
    selection: &Selection,
    status: StatusCode,
) -> HttpResponse {
    let mut context = base_context(flash_messages, &[], "movements");
    context.insert("page", page);
    context.insert("selected", &selection.iter().collect::<Vec<_>>());
    render_template_with_status(tera, "movements/form.html", &context, status)
}

#[get("/movements/new")]
/// Batch movement form for the equipment currently selected.
pub async fn new_movement(
    repo: web::Data<HttpRepository>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let selection = load_selection(&session);
    if selection.require_non_empty().is_err() {
        FlashMessage::error(EMPTY_SELECTION_MESSAGE).send();
        return redirect("/equipment");
    }

    match movements_service::load_form_options(repo.get_ref()).await {
        Ok(options) => render_form(
            &tera,
            &flash_messages,
            &FormPage::new(MovementForm::default(), options),
            &selection,
            StatusCode::OK,
        ),
        Err(_) => {
            FlashMessage::error("Could not load the movement form.").send();
            redirect("/equipment")
        }
    }
}

#[post("/movements/add")]
pub async fn add_movement(
    repo: web::Data<HttpRepository>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<MovementForm>,
) -> impl Responder {
    let mut selection = load_selection(&session);

    match movements_service::create_movement(repo.get_ref(), &selection, form.clone()).await {
        Ok(()) => {
            selection.clear();
            store_selection(&session, &selection);
            FlashMessage::success("Movement registered.").send();
            redirect("/movements")
        }
        Err(ServiceError::Selection(SelectionError::Empty)) => {
            FlashMessage::error(EMPTY_SELECTION_MESSAGE).send();
            redirect("/equipment")
        }
        Err(ServiceError::Form(err)) => {
            let options = movements_service::load_form_options(repo.get_ref())
                .await
                .unwrap_or_default();
            let page = FormPage::new(form, options).with_errors(err.field_errors());
            render_form(
                &tera,
                &flash_messages,
                &page,
                &selection,
                StatusCode::UNPROCESSABLE_ENTITY,
            )
        }
        Err(err) => {
            log::error!("Failed to register movement: {err}");
            FlashMessage::error("Could not register the movement.").send();
            redirect("/movements/new")
        }
    }
}

#[post("/movements/{id}/delete")]
pub async fn delete_movement(
    req: HttpRequest,
    id: web::Path<String>,
    repo: web::Data<HttpRepository>,
) -> impl Responder {
    let list_url = with_query("/movements", req.query_string());
    let Ok(id) = RecordId::new(id.into_inner()) else {
        FlashMessage::error("Movement not found.").send();
        return redirect(&list_url);
    };

    match movements_service::delete_movement(repo.get_ref(), &id).await {
        Ok(()) => FlashMessage::success("Movement deleted.").send(),
        Err(_) => FlashMessage::error("Could not delete the movement.").send(),
    }
    redirect(&list_url)
}
