use std::collections::HashMap;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::{FlashMessagesFramework, Level};
use serde_json::json;
use tera::Tera;

use asset_control::listing::NoticeLevel;
use asset_control::repository::http::HttpRepository;
use asset_control::routes::main::show_index;
use asset_control::routes::movements::new_movement;
use asset_control::routes::{
    alert_level_to_str, movement_kind_filter, notice_level_to_str, redirect, with_query,
};

#[::core::prelude::v1::test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[::core::prelude::v1::test]
fn test_notice_level_to_str_mappings() {
    assert_eq!(notice_level_to_str(NoticeLevel::Error), "danger");
    assert_eq!(notice_level_to_str(NoticeLevel::Warning), "warning");
    assert_eq!(notice_level_to_str(NoticeLevel::Success), "success");
    assert_eq!(notice_level_to_str(NoticeLevel::Info), "info");
}

#[::core::prelude::v1::test]
fn with_query_only_adds_separator_when_needed() {
    assert_eq!(with_query("/equipment", ""), "/equipment");
    assert_eq!(
        with_query("/equipment", "type=3&page=2"),
        "/equipment?type=3&page=2"
    );
}

#[::core::prelude::v1::test]
fn redirect_is_see_other() {
    let response = redirect("/movements");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/movements");
}

#[::core::prelude::v1::test]
fn movement_kind_filter_renders_labels() {
    let args = HashMap::new();

    assert_eq!(movement_kind_filter(&json!(1), &args).unwrap(), json!("Loan"));
    assert_eq!(movement_kind_filter(&json!(9), &args).unwrap(), json!("Other"));
    assert!(movement_kind_filter(&json!("1"), &args).is_err());
}

#[actix_web::test]
async fn index_redirects_to_equipment() {
    let app = test::init_service(App::new().service(show_index)).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/equipment");
}

#[actix_web::test]
async fn movement_form_without_selection_goes_back_to_equipment() {
    let key = Key::from(&[7u8; 64]);
    let messages = FlashMessagesFramework::builder(CookieMessageStore::builder(key.clone()).build())
        .build();
    let repo = HttpRepository::new("http://127.0.0.1:9", "http://127.0.0.1:9").unwrap();
    let app = test::init_service(
        App::new()
            .wrap(messages)
            .wrap(SessionMiddleware::new(CookieSessionStore::default(), key))
            .app_data(web::Data::new(repo))
            .app_data(web::Data::new(Tera::default()))
            .service(new_movement),
    )
    .await;

    let req = test::TestRequest::get().uri("/movements/new").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/equipment");
}
