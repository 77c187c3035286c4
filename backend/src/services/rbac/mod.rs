//! # RBAC Service Module
//!
//! Roles, permissions, user accounts and the user ↔ role assignments.
//!
//! ## Sub-modules:
//! - `roles`, `permissions`, `users`, `user_roles`: handlers per resource.
//! - `store`: the SQL behind them.

mod permissions;
mod roles;
pub mod store;
mod user_roles;
mod users;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/rbac";

/// Configures and returns the Actix `Scope` for the RBAC routes.
///
/// # Registered Routes:
///
/// *   **`/roles`**, **`/permissions`**, **`/users`**: `GET` lists, `POST`
///     creates, `PUT /{id}` applies a partial update, `DELETE /{id}` removes.
///     System roles answer `403` to `PUT` and `DELETE`.
/// *   **`GET /user-roles`**: every assignment.
/// *   **`POST /user-roles`**: assigns `{ user_id, role_id }`.
/// *   **`DELETE /user-roles?user_id=&role_id=`**: removes one assignment.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/roles", get().to(roles::list))
        .route("/roles", post().to(roles::create))
        .route("/roles/{id}", put().to(roles::update))
        .route("/roles/{id}", delete().to(roles::remove))
        .route("/permissions", get().to(permissions::list))
        .route("/permissions", post().to(permissions::create))
        .route("/permissions/{id}", put().to(permissions::update))
        .route("/permissions/{id}", delete().to(permissions::remove))
        .route("/users", get().to(users::list))
        .route("/users", post().to(users::create))
        .route("/users/{id}", put().to(users::update))
        .route("/users/{id}", delete().to(users::remove))
        .route("/user-roles", get().to(user_roles::list))
        .route("/user-roles", post().to(user_roles::assign))
        .route("/user-roles", delete().to(user_roles::unassign))
}
