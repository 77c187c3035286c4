//! `GET /api/policies`: every policy, global ones (no `site_id`) included.

use super::store;
use crate::db::Database;
use crate::error::respond_with;
use actix_web::{web, HttpResponse, Responder};

pub(crate) async fn process(db: web::Data<Database>) -> impl Responder {
    match db.open().and_then(|conn| store::list_policies(&conn)) {
        Ok(policies) => HttpResponse::Ok().json(policies),
        Err(e) => respond_with("Failed to list policies", e),
    }
}
