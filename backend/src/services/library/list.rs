//! # Library Listing
//!
//! Serves `GET /api/library/{category}`: every row of one collection, default
//! and custom alike, ordered by id. Each row carries its `is_custom` flag.

use super::{parse_category, store};
use crate::db::Database;
use crate::error::{respond_with, ServiceError};
use actix_web::{web, HttpResponse, Responder};
use common::model::library::LibraryItem;

/// Actix web handler for `GET /api/library/{category}`.
///
/// # Arguments
/// * `category` - Collection slug from the path (`network_vendors`, `test_matrix`, ...).
///
/// # Returns
/// - `200 OK` with a JSON array of `LibraryItem`s.
/// - `400 Bad Request` for an unknown category.
pub(crate) async fn process(db: web::Data<Database>, category: web::Path<String>) -> impl Responder {
    match list_library(&db, &category) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(e) => respond_with("Failed to list library items", e),
    }
}

fn list_library(db: &Database, raw_category: &str) -> Result<Vec<LibraryItem>, ServiceError> {
    let category = parse_category(raw_category)?;
    let conn = db.open()?;
    store::list_items(&conn, category)
}
