//! # Library Item Deletion
//!
//! Serves `DELETE /api/library/{category}/{id}`.
//!
//! ## Workflow
//!
//! 1.  **Lookup**: the row must exist in the named category (`404` otherwise).
//! 2.  **Protection**: default rows are refused with `403` and stay untouched.
//! 3.  **Delete**: inside one transaction, rows that referenced the deleted one
//!     have that reference cleared, then the row is removed.
//! 4.  **Notify**: a `library_changed` event goes out for the category.

use super::{parse_category, store};
use crate::db::Database;
use crate::error::{respond_with, ServiceError};
use crate::events::DataEvents;
use actix_web::{web, HttpResponse, Responder};
use common::events::DataEvent;
use common::model::library::LibraryCategory;
use log::info;
use serde_json::json;

/// Actix web handler for `DELETE /api/library/{category}/{id}`.
///
/// # Arguments
/// * `path` - Collection slug and row id.
///
/// # Returns
/// - `200 OK` with `{ "deleted": id }`.
/// - `403 Forbidden` for a default row.
/// - `404 Not Found` when the row does not exist.
pub(crate) async fn process(
    db: web::Data<Database>,
    events: web::Data<DataEvents>,
    path: web::Path<(String, i64)>,
) -> impl Responder {
    let (category, id) = path.into_inner();
    match delete_library_item(&db, &category, id) {
        Ok(category) => {
            events.publish(DataEvent::LibraryChanged { category });
            HttpResponse::Ok().json(json!({ "deleted": id }))
        }
        Err(e) => respond_with("Failed to delete library item", e),
    }
}

/// Returns the parsed category so the caller can publish the matching event.
fn delete_library_item(db: &Database, raw_category: &str, id: i64) -> Result<LibraryCategory, ServiceError> {
    let category = parse_category(raw_category)?;
    let conn = db.open()?;
    store::delete_item(&conn, category, id)?;
    info!("Deleted custom {} item {}", category, id);
    Ok(category)
}
