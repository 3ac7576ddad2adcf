use actix_web::{Responder, get};

use crate::routes::redirect;

#[get("/")]
/// The equipment list is the landing page.
pub async fn show_index() -> impl Responder {
    redirect("/equipment")
}
