//! `DELETE /api/policies/{id}`.

use super::store;
use crate::db::Database;
use crate::error::respond_with;
use crate::events::DataEvents;
use actix_web::{web, HttpResponse, Responder};
use common::events::DataEvent;
use serde_json::json;

/// # Returns
/// - `200 OK` with `{ "deleted": id }`.
/// - `404 Not Found` for an unknown id.
pub(crate) async fn process(
    db: web::Data<Database>,
    events: web::Data<DataEvents>,
    id: web::Path<i64>,
) -> impl Responder {
    let id = id.into_inner();
    match db.open().and_then(|conn| store::delete_policy(&conn, id)) {
        Ok(()) => {
            events.publish(DataEvent::PoliciesChanged);
            HttpResponse::Ok().json(json!({ "deleted": id }))
        }
        Err(e) => respond_with("Failed to delete policy", e),
    }
}
