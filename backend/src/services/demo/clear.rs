//! # Demo Data Clear
//!
//! `POST /api/demo/clear` removes sites, policies, users and role assignments
//! in one transaction. Library rows, roles and permissions stay. Clients are
//! told through a `data_cleared` event.

use super::scenarios::clear_planning_data;
use crate::db::Database;
use crate::error::{respond_with, ServiceError};
use crate::events::DataEvents;
use actix_web::{web, HttpResponse, Responder};
use common::events::DataEvent;
use log::info;
use serde_json::json;

/// # Returns
/// - `200 OK` with `{ "cleared": true }`.
/// - `500 Internal Server Error` when the store fails; nothing is removed then.
pub(crate) async fn process(db: web::Data<Database>, events: web::Data<DataEvents>) -> impl Responder {
    match clear(&db) {
        Ok(()) => {
            events.publish(DataEvent::DataCleared);
            HttpResponse::Ok().json(json!({ "cleared": true }))
        }
        Err(e) => respond_with("Failed to clear demo data", e),
    }
}

fn clear(db: &Database) -> Result<(), ServiceError> {
    let mut conn = db.open()?;
    let tx = conn.transaction()?;
    clear_planning_data(&tx)?;
    tx.commit()?;
    info!("Cleared sites, policies, users and role assignments");
    Ok(())
}
