//! # Role Assignment Handlers
//!
//! `/api/rbac/user-roles` links users to roles. Assigning checks that both
//! sides exist; assigning the same pair twice is a conflict. Removal takes the
//! pair from the query string (`?user_id=..&role_id=..`).

use super::store;
use crate::db::Database;
use crate::error::respond_with;
use crate::events::DataEvents;
use actix_web::{web, HttpResponse, Responder};
use common::events::DataEvent;
use common::model::rbac::UserRole;
use common::requests::UserRoleQuery;
use serde_json::json;

/// `GET /api/rbac/user-roles`: every `{user_id, role_id}` pair.
pub(crate) async fn list(db: web::Data<Database>) -> impl Responder {
    match db.open().and_then(|conn| store::list_user_roles(&conn)) {
        Ok(assignments) => HttpResponse::Ok().json(assignments),
        Err(e) => respond_with("Failed to list role assignments", e),
    }
}

/// `POST /api/rbac/user-roles`.
///
/// # Returns
/// - `201 Created` with the assignment.
/// - `404 Not Found` when the user or role is missing.
/// - `409 Conflict` when the pair already exists.
pub(crate) async fn assign(
    db: web::Data<Database>,
    events: web::Data<DataEvents>,
    payload: web::Json<UserRole>,
) -> impl Responder {
    match db.open().and_then(|conn| store::assign_role(&conn, payload.into_inner())) {
        Ok(assignment) => {
            events.publish(DataEvent::RbacChanged);
            HttpResponse::Created().json(assignment)
        }
        Err(e) => respond_with("Failed to assign role", e),
    }
}

/// `DELETE /api/rbac/user-roles?user_id=..&role_id=..`.
///
/// # Returns
/// - `200 OK` with `{ "deleted": {user_id, role_id} }`.
/// - `404 Not Found` when the pair was not assigned.
pub(crate) async fn unassign(
    db: web::Data<Database>,
    events: web::Data<DataEvents>,
    query: web::Query<UserRoleQuery>,
) -> impl Responder {
    let assignment = UserRole {
        user_id: query.user_id,
        role_id: query.role_id,
    };
    match db.open().and_then(|conn| store::unassign_role(&conn, assignment)) {
        Ok(()) => {
            events.publish(DataEvent::RbacChanged);
            HttpResponse::Ok().json(json!({ "deleted": assignment }))
        }
        Err(e) => respond_with("Failed to remove role assignment", e),
    }
}
