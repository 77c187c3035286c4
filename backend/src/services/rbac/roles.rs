//! # Role Handlers
//!
//! CRUD for `/api/rbac/roles`. A role is written together with its
//! permission set in one transaction. System roles (Administrator, Project
//! Manager, Viewer) are read-only: updates and deletes answer `403`.

use super::store;
use crate::db::Database;
use crate::error::respond_with;
use crate::events::DataEvents;
use actix_web::{web, HttpResponse, Responder};
use common::events::DataEvent;
use common::model::rbac::{NewRole, RolePatch};
use log::info;
use serde_json::json;

/// `GET /api/rbac/roles`: every role with its permissions.
pub(crate) async fn list(db: web::Data<Database>) -> impl Responder {
    match db.open().and_then(|conn| store::list_roles(&conn)) {
        Ok(roles) => HttpResponse::Ok().json(roles),
        Err(e) => respond_with("Failed to list roles", e),
    }
}

/// `POST /api/rbac/roles`.
///
/// # Returns
/// - `201 Created` with the new `Role`.
/// - `400 Bad Request` when a listed permission does not exist.
/// - `409 Conflict` when the name is taken.
pub(crate) async fn create(
    db: web::Data<Database>,
    events: web::Data<DataEvents>,
    payload: web::Json<NewRole>,
) -> impl Responder {
    match db.open().and_then(|mut conn| store::insert_role(&mut conn, payload.into_inner())) {
        Ok(role) => {
            info!("Created role {} ({})", role.name, role.id);
            events.publish(DataEvent::RbacChanged);
            HttpResponse::Created().json(role)
        }
        Err(e) => respond_with("Failed to create role", e),
    }
}

/// `PUT /api/rbac/roles/{id}`.
///
/// # Arguments
/// * `id` - Role id from the path.
/// * `payload` - Optional name, description and replacement `permission_ids`.
///
/// # Returns
/// - `200 OK` with the updated `Role`.
/// - `403 Forbidden` for a system role, `404 Not Found` for an unknown id.
pub(crate) async fn update(
    db: web::Data<Database>,
    events: web::Data<DataEvents>,
    id: web::Path<i64>,
    payload: web::Json<RolePatch>,
) -> impl Responder {
    let result = db
        .open()
        .and_then(|mut conn| store::update_role(&mut conn, id.into_inner(), payload.into_inner()));
    match result {
        Ok(role) => {
            events.publish(DataEvent::RbacChanged);
            HttpResponse::Ok().json(role)
        }
        Err(e) => respond_with("Failed to update role", e),
    }
}

/// `DELETE /api/rbac/roles/{id}`. Assignments of the role go with it.
pub(crate) async fn remove(
    db: web::Data<Database>,
    events: web::Data<DataEvents>,
    id: web::Path<i64>,
) -> impl Responder {
    let id = id.into_inner();
    match db.open().and_then(|conn| store::delete_role(&conn, id)) {
        Ok(()) => {
            info!("Deleted role {}", id);
            events.publish(DataEvent::RbacChanged);
            HttpResponse::Ok().json(json!({ "deleted": id }))
        }
        Err(e) => respond_with("Failed to delete role", e),
    }
}
