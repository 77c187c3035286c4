//! # User Handlers
//!
//! CRUD for `/api/rbac/users`. Emails must look like an address and are
//! unique. Users are listed with the names of the roles assigned to them.

use super::store;
use crate::db::Database;
use crate::error::respond_with;
use crate::events::DataEvents;
use actix_web::{web, HttpResponse, Responder};
use common::events::DataEvent;
use common::model::rbac::{NewUser, UserPatch};
use log::info;
use serde_json::json;

/// `GET /api/rbac/users`.
pub(crate) async fn list(db: web::Data<Database>) -> impl Responder {
    match db.open().and_then(|conn| store::list_users(&conn)) {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(e) => respond_with("Failed to list users", e),
    }
}

/// `POST /api/rbac/users`.
///
/// # Arguments
/// * `payload` - Name, email, department and active flag.
///
/// # Returns
/// - `201 Created` with the new `User`.
/// - `400 Bad Request` for a malformed email, `409 Conflict` for a duplicate one.
pub(crate) async fn create(
    db: web::Data<Database>,
    events: web::Data<DataEvents>,
    payload: web::Json<NewUser>,
) -> impl Responder {
    match db.open().and_then(|conn| store::insert_user(&conn, payload.into_inner())) {
        Ok(user) => {
            info!("Created user {} ({})", user.email, user.id);
            events.publish(DataEvent::RbacChanged);
            HttpResponse::Created().json(user)
        }
        Err(e) => respond_with("Failed to create user", e),
    }
}

/// `PUT /api/rbac/users/{id}`: partial update with the same email rules as create.
pub(crate) async fn update(
    db: web::Data<Database>,
    events: web::Data<DataEvents>,
    id: web::Path<i64>,
    payload: web::Json<UserPatch>,
) -> impl Responder {
    let result = db
        .open()
        .and_then(|conn| store::update_user(&conn, id.into_inner(), payload.into_inner()));
    match result {
        Ok(user) => {
            events.publish(DataEvent::RbacChanged);
            HttpResponse::Ok().json(user)
        }
        Err(e) => respond_with("Failed to update user", e),
    }
}

/// `DELETE /api/rbac/users/{id}`. The user's role assignments are removed too.
pub(crate) async fn remove(
    db: web::Data<Database>,
    events: web::Data<DataEvents>,
    id: web::Path<i64>,
) -> impl Responder {
    let id = id.into_inner();
    match db.open().and_then(|conn| store::delete_user(&conn, id)) {
        Ok(()) => {
            events.publish(DataEvent::RbacChanged);
            HttpResponse::Ok().json(json!({ "deleted": id }))
        }
        Err(e) => respond_with("Failed to delete user", e),
    }
}
