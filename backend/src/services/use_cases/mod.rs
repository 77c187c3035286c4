//! # Use Case Service Module
//!
//! Read-side aggregation over the use-case library rows. A use case is
//! returned together with the test cases and requirements that reference it
//! through `use_case_id`, plus its documentation links and success criteria.
//!
//! ## Sub-modules:
//! - `store`: detail assembly and the child-row tables.
//! - `list`, `get`, `create`, `attach`: one handler per operation.

mod attach;
mod create;
mod get;
mod list;
pub mod store;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

/// The base path for all use-case endpoints.
const API_PATH: &str = "/api/use-cases";

/// Configures and returns the Actix `Scope` for the use-case routes.
///
/// # Registered Routes:
///
/// *   **`GET ""`** → `list::process`: every use case with all four nested arrays.
/// *   **`POST ""`** → `create::process`: a flat record becomes a custom use case.
/// *   **`GET /{id}`** → `get::process`.
/// *   **`POST /{id}/documentation-links`** → `attach::documentation_link`.
/// *   **`POST /{id}/success-criteria`** → `attach::success_criterion`.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/{id}", get().to(get::process))
        .route("/{id}/documentation-links", post().to(attach::documentation_link))
        .route("/{id}/success-criteria", post().to(attach::success_criterion))
}
