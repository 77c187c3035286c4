//! # Library Service Module
//!
//! Generic create/read/update/delete over the fixed library collections
//! (vendors, device types, checklist items, use cases, test cases,
//! requirements, test-matrix entries).
//!
//! ## Sub-modules:
//! - `list`, `create`, `update`, `delete`: one handler per operation.
//! - `store`: the SQL behind them, also used by the seeder and the use-case
//!   service.

mod create;
mod delete;
mod list;
pub mod store;
mod update;

use crate::error::ServiceError;
use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;
use common::model::library::LibraryCategory;

/// The base path for all library endpoints.
const API_PATH: &str = "/api/library";

/// Configures and returns the Actix `Scope` for the library routes.
///
/// # Registered Routes:
///
/// *   **`GET /{category}`** → `list::process`: every row of the category, each
///     tagged with `is_custom`.
/// *   **`POST /{category}`** → `create::process`: validates the body against the
///     category schema and stores it with `is_custom = true`.
/// *   **`PUT /{category}/{id}`** → `update::process`: partial merge on any row.
/// *   **`DELETE /{category}/{id}`** → `delete::process`: custom rows only; default
///     rows answer `403` with `{ "error": ... }`.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/{category}", get().to(list::process))
        .route("/{category}", post().to(create::process))
        .route("/{category}/{id}", put().to(update::process))
        .route("/{category}/{id}", delete().to(delete::process))
}

fn parse_category(raw: &str) -> Result<LibraryCategory, ServiceError> {
    raw.parse().map_err(ServiceError::Validation)
}
