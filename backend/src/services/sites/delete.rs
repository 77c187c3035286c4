use super::store;
use crate::db::Database;
use crate::error::{respond_with, ServiceError};
use crate::events::DataEvents;
use actix_web::{web, HttpResponse, Responder};
use common::events::DataEvent;
use log::info;
use serde_json::json;

/// Removing a site cascades to the policies scoped to it.
pub(crate) async fn process(
    db: web::Data<Database>,
    events: web::Data<DataEvents>,
    id: web::Path<String>,
) -> impl Responder {
    match delete_site(&db, &id) {
        Ok(()) => {
            events.publish(DataEvent::SitesChanged);
            events.publish(DataEvent::PoliciesChanged);
            HttpResponse::Ok().json(json!({ "deleted": id.as_str() }))
        }
        Err(e) => respond_with("Failed to delete site", e),
    }
}

fn delete_site(db: &Database, id: &str) -> Result<(), ServiceError> {
    let conn = db.open()?;
    store::delete_site(&conn, id)?;
    info!("Deleted site {}", id);
    Ok(())
}
