use super::store;
use crate::db::Database;
use crate::error::{respond_with, ServiceError};
use actix_web::{web, HttpResponse, Responder};
use common::model::use_case::UseCaseDetail;

pub(crate) async fn process(db: web::Data<Database>, id: web::Path<i64>) -> impl Responder {
    match get_use_case(&db, id.into_inner()) {
        Ok(use_case) => HttpResponse::Ok().json(use_case),
        Err(e) => respond_with("Failed to retrieve use case", e),
    }
}

fn get_use_case(db: &Database, id: i64) -> Result<UseCaseDetail, ServiceError> {
    let conn = db.open()?;
    store::find_detail(&conn, id)
}
