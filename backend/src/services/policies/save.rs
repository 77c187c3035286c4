//! # Policy Create and Update
//!
//! ## Workflow
//!
//! 1.  **Validation**: the name must not be blank; a `site_id`, when given,
//!     must name an existing site (`400` otherwise).
//! 2.  **Write**: create stores the policy enabled unless told otherwise;
//!     update merges the given fields. An empty `site_id` on update turns the
//!     policy global.
//! 3.  **Notify**: a `policies_changed` event is published.

use super::store;
use crate::db::Database;
use crate::error::{respond_with, ServiceError};
use crate::events::DataEvents;
use actix_web::{web, HttpResponse, Responder};
use common::events::DataEvent;
use common::model::policy::{NewPolicy, Policy, PolicyPatch};
use log::info;

/// Actix web handler for `POST /api/policies`.
///
/// # Arguments
/// * `payload` - Name, type, description, enabled flag and optional site.
///
/// # Returns
/// - `201 Created` with the stored `Policy`.
/// - `400 Bad Request` for a blank name or unknown site.
pub(crate) async fn create(
    db: web::Data<Database>,
    events: web::Data<DataEvents>,
    payload: web::Json<NewPolicy>,
) -> impl Responder {
    match create_policy(&db, payload.into_inner()) {
        Ok(policy) => {
            events.publish(DataEvent::PoliciesChanged);
            HttpResponse::Created().json(policy)
        }
        Err(e) => respond_with("Failed to create policy", e),
    }
}

/// Actix web handler for `PUT /api/policies/{id}`.
///
/// # Returns
/// - `200 OK` with the updated `Policy`.
/// - `404 Not Found` for an unknown id.
pub(crate) async fn update(
    db: web::Data<Database>,
    events: web::Data<DataEvents>,
    id: web::Path<i64>,
    payload: web::Json<PolicyPatch>,
) -> impl Responder {
    let result = db
        .open()
        .and_then(|conn| store::update_policy(&conn, id.into_inner(), payload.into_inner()));
    match result {
        Ok(policy) => {
            events.publish(DataEvent::PoliciesChanged);
            HttpResponse::Ok().json(policy)
        }
        Err(e) => respond_with("Failed to update policy", e),
    }
}

fn create_policy(db: &Database, policy: NewPolicy) -> Result<Policy, ServiceError> {
    let conn = db.open()?;
    let created = store::insert_policy(&conn, policy)?;
    info!("Created {} policy {} ({})", created.policy_type.as_str(), created.id, created.name);
    Ok(created)
}
