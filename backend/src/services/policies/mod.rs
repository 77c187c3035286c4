//! # Policies Service Module
//!
//! Network access policies, either global (`site_id` null) or scoped to one
//! site. Deleting a site removes its policies through the foreign key.

mod delete;
mod list;
mod save;
pub mod store;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/policies";

/// # Registered Routes:
///
/// *   **`GET ""`** → `list::process`
/// *   **`POST ""`** → `save::create`
/// *   **`PUT /{id}`** → `save::update`: absent fields are kept; an empty
///     `site_id` makes the policy global again.
/// *   **`DELETE /{id}`** → `delete::process`
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(save::create))
        .route("/{id}", put().to(save::update))
        .route("/{id}", delete().to(delete::process))
}
