use super::store;
use crate::db::Database;
use crate::error::{respond_with, ServiceError};
use actix_web::{web, HttpResponse, Responder};
use common::model::site::Site;

pub(crate) async fn process(db: web::Data<Database>, id: web::Path<String>) -> impl Responder {
    match get_site(&db, &id) {
        Ok(site) => HttpResponse::Ok().json(site),
        Err(e) => respond_with("Failed to retrieve site", e),
    }
}

fn get_site(db: &Database, id: &str) -> Result<Site, ServiceError> {
    let conn = db.open()?;
    store::find_site(&conn, id)
}
