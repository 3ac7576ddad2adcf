#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::http::HttpRepository;
#[cfg(feature = "server")]
use crate::routes::api::api_equipment_lookup;
#[cfg(feature = "server")]
use crate::routes::equipment::{
    add_equipment, clear_equipment_selection, edit_equipment, new_equipment, save_equipment,
    show_equipment, toggle_equipment_selection,
};
#[cfg(feature = "server")]
use crate::routes::export::{export_equipment, export_movements, export_order_services};
#[cfg(feature = "server")]
use crate::routes::main::show_index;
#[cfg(feature = "server")]
use crate::routes::movement_kind_filter;
#[cfg(feature = "server")]
use crate::routes::movements::{add_movement, delete_movement, new_movement, show_movements};
#[cfg(feature = "server")]
use crate::routes::order_services::{
    add_order_service, edit_order_service, new_order_service, save_order_service,
    show_order_services,
};

pub mod domain;
pub mod dto;
pub mod forms;
pub mod listing;
#[cfg(feature = "server")]
pub mod models;
pub mod pagination;
pub mod repository;
pub mod resources;
#[cfg(feature = "server")]
pub mod routes;
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let repo = HttpRepository::new(&server_config.backend_url, &server_config.workstations_url)
        .map_err(|e| std::io::Error::other(format!("Failed to build backend client: {e}")))?;

    // Keys and stores for sessions and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let mut tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;
    tera.register_filter("movement_kind", movement_kind_filter);

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Serving on {}:{} against {}",
        bind_address.0,
        bind_address.1,
        server_config.backend_url
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(web::scope("/api").service(api_equipment_lookup))
            .service(show_index)
            // Static segments first so `export`/`new` never match `{id}`.
            .service(export_equipment)
            .service(export_movements)
            .service(export_order_services)
            .service(show_equipment)
            .service(new_equipment)
            .service(add_equipment)
            .service(clear_equipment_selection)
            .service(edit_equipment)
            .service(save_equipment)
            .service(toggle_equipment_selection)
            .service(show_movements)
            .service(new_movement)
            .service(add_movement)
            .service(delete_movement)
            .service(show_order_services)
            .service(new_order_service)
            .service(add_order_service)
            .service(edit_order_service)
            .service(save_order_service)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
