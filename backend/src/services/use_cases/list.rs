use super::store;
use crate::db::Database;
use crate::error::{respond_with, ServiceError};
use actix_web::{web, HttpResponse, Responder};
use common::model::use_case::UseCaseDetail;

pub(crate) async fn process(db: web::Data<Database>) -> impl Responder {
    match list_use_cases(&db) {
        Ok(use_cases) => HttpResponse::Ok().json(use_cases),
        Err(e) => respond_with("Failed to list use cases", e),
    }
}

fn list_use_cases(db: &Database) -> Result<Vec<UseCaseDetail>, ServiceError> {
    let conn = db.open()?;
    store::list_details(&conn)
}
