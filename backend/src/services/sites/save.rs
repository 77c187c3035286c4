//! Single-site create and update.
//!
//! Creation accepts a full or partial `Site`; missing fields take their
//! defaults and any supplied `id` is replaced. Update is a JSON merge onto
//! the stored record, followed by the same validation as creation.

use super::store;
use crate::db::Database;
use crate::error::{respond_with, ServiceError};
use crate::events::DataEvents;
use actix_web::{web, HttpResponse, Responder};
use common::events::DataEvent;
use common::model::site::Site;
use log::info;
use serde_json::Value;

pub(crate) async fn create(
    db: web::Data<Database>,
    events: web::Data<DataEvents>,
    payload: web::Json<Site>,
) -> impl Responder {
    match create_site(&db, payload.into_inner()) {
        Ok(site) => {
            events.publish(DataEvent::SitesChanged);
            HttpResponse::Created().json(site)
        }
        Err(e) => respond_with("Failed to create site", e),
    }
}

pub(crate) async fn update(
    db: web::Data<Database>,
    events: web::Data<DataEvents>,
    id: web::Path<String>,
    patch: web::Json<Value>,
) -> impl Responder {
    match update_site(&db, &id, patch.into_inner()) {
        Ok(site) => {
            events.publish(DataEvent::SitesChanged);
            HttpResponse::Ok().json(site)
        }
        Err(e) => respond_with("Failed to update site", e),
    }
}

fn create_site(db: &Database, site: Site) -> Result<Site, ServiceError> {
    let conn = db.open()?;
    let created = store::insert_site(&conn, site)?;
    info!("Created site {} ({})", created.name, created.id);
    Ok(created)
}

fn update_site(db: &Database, id: &str, patch: Value) -> Result<Site, ServiceError> {
    let conn = db.open()?;
    let updated = store::update_site(&conn, id, patch)?;
    info!("Updated site {}", id);
    Ok(updated)
}
