//! # Sites Service Module
//!
//! Planning records for every location in a NAC rollout.
//!
//! ## Sub-modules:
//! - `list`, `get`, `save`, `delete`: single-site handlers.
//! - `bulk`: template expansion for `POST /bulk`.
//! - `export`: CSV and JSON downloads.
//! - `store`, `validate`, `generate`: persistence, field checks and random
//!   sampling, shared with the demo loader.

mod bulk;
mod delete;
mod export;
pub mod generate;
mod get;
mod list;
mod save;
pub mod store;
pub mod validate;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

/// The base path for all site endpoints.
const API_PATH: &str = "/api/sites";

/// Configures and returns the Actix `Scope` for the site routes.
///
/// `/bulk` and `/export` are registered before `/{id}` so they are not taken
/// for site ids.
///
/// # Registered Routes:
///
/// *   **`GET ""`** → `list::process`: all sites, narrowed by the optional
///     `status`, `priority`, `region` and `search` query parameters.
/// *   **`POST ""`** → `save::create`: stores one site under a new id.
/// *   **`POST /bulk`** → `bulk::process`: `count` sites from a template.
/// *   **`GET /export`** → `export::process`: CSV (default) or JSON download.
/// *   **`GET /{id}`** → `get::process`.
/// *   **`PUT /{id}`** → `save::update`: partial merge.
/// *   **`DELETE /{id}`** → `delete::process`: also removes site policies.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(save::create))
        .route("/bulk", post().to(bulk::process))
        .route("/export", get().to(export::process))
        .route("/{id}", get().to(get::process))
        .route("/{id}", put().to(save::update))
        .route("/{id}", delete().to(delete::process))
}
