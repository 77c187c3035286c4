//! # Permission Handlers
//!
//! CRUD for `/api/rbac/permissions`. Names are unique (`resource:action` by
//! convention); deleting a permission removes it from every role.

use super::store;
use crate::db::Database;
use crate::error::respond_with;
use crate::events::DataEvents;
use actix_web::{web, HttpResponse, Responder};
use common::events::DataEvent;
use common::model::rbac::{NewPermission, PermissionPatch};
use serde_json::json;

/// `GET /api/rbac/permissions`.
pub(crate) async fn list(db: web::Data<Database>) -> impl Responder {
    match db.open().and_then(|conn| store::list_permissions(&conn)) {
        Ok(permissions) => HttpResponse::Ok().json(permissions),
        Err(e) => respond_with("Failed to list permissions", e),
    }
}

/// `POST /api/rbac/permissions`.
///
/// # Returns
/// - `201 Created` with the new `Permission`.
/// - `409 Conflict` for a duplicate name.
pub(crate) async fn create(
    db: web::Data<Database>,
    events: web::Data<DataEvents>,
    payload: web::Json<NewPermission>,
) -> impl Responder {
    match db.open().and_then(|conn| store::insert_permission(&conn, payload.into_inner())) {
        Ok(permission) => {
            events.publish(DataEvent::RbacChanged);
            HttpResponse::Created().json(permission)
        }
        Err(e) => respond_with("Failed to create permission", e),
    }
}

/// `PUT /api/rbac/permissions/{id}`: partial update, `404` for an unknown id.
pub(crate) async fn update(
    db: web::Data<Database>,
    events: web::Data<DataEvents>,
    id: web::Path<i64>,
    payload: web::Json<PermissionPatch>,
) -> impl Responder {
    let result = db
        .open()
        .and_then(|conn| store::update_permission(&conn, id.into_inner(), payload.into_inner()));
    match result {
        Ok(permission) => {
            events.publish(DataEvent::RbacChanged);
            HttpResponse::Ok().json(permission)
        }
        Err(e) => respond_with("Failed to update permission", e),
    }
}

/// `DELETE /api/rbac/permissions/{id}`.
pub(crate) async fn remove(
    db: web::Data<Database>,
    events: web::Data<DataEvents>,
    id: web::Path<i64>,
) -> impl Responder {
    let id = id.into_inner();
    match db.open().and_then(|conn| store::delete_permission(&conn, id)) {
        Ok(()) => {
            events.publish(DataEvent::RbacChanged);
            HttpResponse::Ok().json(json!({ "deleted": id }))
        }
        Err(e) => respond_with("Failed to delete permission", e),
    }
}
