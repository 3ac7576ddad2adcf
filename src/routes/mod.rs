//! HTTP handlers and the helpers they share.

use std::collections::HashMap;

use actix_session::Session;
use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera, Value};

use crate::domain::movement::kind_label;

use crate::listing::selection::Selection;
use crate::listing::{Notice, NoticeLevel};

pub mod api;
pub mod equipment;
pub mod export;
pub mod main;
pub mod movements;
pub mod order_services;

/// Session key holding the equipment selected for a batch movement.
pub const SELECTION_KEY: &str = "equipment_selection";

/// Maps flash levels to Bootstrap alert classes.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        Level::Info | Level::Debug => "info",
    }
}

pub fn notice_level_to_str(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Error => "danger",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Success => "success",
        NoticeLevel::Info => "info",
    }
}

/// Context every page starts from: the pending alerts and the active menu
/// entry.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    notices: &[Notice],
    current_page: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content().to_string(), alert_level_to_str(&f.level())))
        .chain(
            notices
                .iter()
                .map(|n| (n.message.clone(), notice_level_to_str(n.level))),
        )
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

/// Tera filter rendering a movement kind code as its label.
pub fn movement_kind_filter(
    value: &Value,
    _args: &HashMap<String, Value>,
) -> tera::Result<Value> {
    let kind = value
        .as_i64()
        .and_then(|kind| i32::try_from(kind).ok())
        .ok_or_else(|| tera::Error::msg(format!("movement kind must be an integer, got {value}")))?;
    Ok(Value::String(kind_label(kind).to_string()))
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    render_template_with_status(tera, template, context, StatusCode::OK)
}

pub fn render_template_with_status(
    tera: &Tera,
    template: &str,
    context: &Context,
    status: StatusCode,
) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// `path` with `query` appended when there is one.
pub fn with_query(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

/// Selection stored in the session; unreadable state counts as empty.
pub fn load_selection(session: &Session) -> Selection {
    match session.get::<Selection>(SELECTION_KEY) {
        Ok(selection) => selection.unwrap_or_default(),
        Err(err) => {
            log::warn!("Discarding unreadable selection: {err}");
            Selection::new()
        }
    }
}

pub fn store_selection(session: &Session, selection: &Selection) {
    if let Err(err) = session.insert(SELECTION_KEY, selection) {
        log::error!("Failed to store selection: {err}");
    }
}
