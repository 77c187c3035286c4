//! # Library Item Creation
//!
//! Serves `POST /api/library/{category}`.
//!
//! ## Workflow
//!
//! 1.  **Category**: the path slug is parsed; unknown slugs are rejected.
//! 2.  **Payload**: the body is merged over the category tag and checked for
//!     required fields. `id`, `kind`, `is_custom` and `created_at` in the body
//!     are ignored.
//! 3.  **References**: a `use_case_id` or `test_case_id` must name an existing
//!     use case or test case.
//! 4.  **Insert**: the row is stored with `is_custom = true` and a
//!     `library_changed` event is published.

use super::{parse_category, store};
use crate::db::Database;
use crate::error::{respond_with, ServiceError};
use crate::events::DataEvents;
use actix_web::{web, HttpResponse, Responder};
use common::events::DataEvent;
use common::model::library::LibraryItem;
use log::info;
use serde_json::Value;

/// Actix web handler for `POST /api/library/{category}`.
///
/// # Arguments
/// * `category` - Collection slug from the path.
/// * `body` - Category-specific fields as JSON.
///
/// # Returns
/// - `201 Created` with the stored `LibraryItem`.
/// - `400 Bad Request` for an unknown category, missing fields or a dangling reference.
pub(crate) async fn process(
    db: web::Data<Database>,
    events: web::Data<DataEvents>,
    category: web::Path<String>,
    body: web::Json<Value>,
) -> impl Responder {
    match create_library_item(&db, &category, body.into_inner()) {
        Ok(item) => {
            events.publish(DataEvent::LibraryChanged {
                category: item.data.category(),
            });
            HttpResponse::Created().json(item)
        }
        Err(e) => respond_with("Failed to create library item", e),
    }
}

/// Stores a user-supplied row. Whatever `is_custom` the caller sent, the row
/// is custom.
fn create_library_item(db: &Database, raw_category: &str, body: Value) -> Result<LibraryItem, ServiceError> {
    let category = parse_category(raw_category)?;
    let data = store::data_from_json(category, body)?;
    let conn = db.open()?;
    let item = store::insert_item(&conn, &data, true)?;
    info!("Created custom {} item {} ({})", category, item.id, item.data.label());
    Ok(item)
}
