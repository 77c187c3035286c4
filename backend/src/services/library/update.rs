//! # Library Item Update
//!
//! Serves `PUT /api/library/{category}/{id}` as a partial merge. Default rows
//! may be edited; their `is_custom` flag, id and category never change.

use super::{parse_category, store};
use crate::db::Database;
use crate::error::{respond_with, ServiceError};
use crate::events::DataEvents;
use actix_web::{web, HttpResponse, Responder};
use common::events::DataEvent;
use common::model::library::LibraryItem;
use serde_json::Value;

/// Actix web handler for `PUT /api/library/{category}/{id}`.
///
/// # Arguments
/// * `path` - Collection slug and row id.
/// * `body` - Fields to merge into the stored row.
///
/// # Returns
/// - `200 OK` with the updated `LibraryItem`.
/// - `400 Bad Request` when the merged row is invalid.
/// - `404 Not Found` when no row of that category has the id.
pub(crate) async fn process(
    db: web::Data<Database>,
    events: web::Data<DataEvents>,
    path: web::Path<(String, i64)>,
    body: web::Json<Value>,
) -> impl Responder {
    let (category, id) = path.into_inner();
    match update_library_item(&db, &category, id, body.into_inner()) {
        Ok(item) => {
            events.publish(DataEvent::LibraryChanged {
                category: item.data.category(),
            });
            HttpResponse::Ok().json(item)
        }
        Err(e) => respond_with("Failed to update library item", e),
    }
}

/// Opens a connection and applies the merge through `store::update_item`.
fn update_library_item(db: &Database, raw_category: &str, id: i64, patch: Value) -> Result<LibraryItem, ServiceError> {
    let category = parse_category(raw_category)?;
    let conn = db.open()?;
    store::update_item(&conn, category, id, patch)
}
