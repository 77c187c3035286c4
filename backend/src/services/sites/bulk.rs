//! # Bulk Site Creation
//!
//! Expands a partial site template into `count` concrete sites for
//! `POST /api/sites/bulk`.
//!
//! ## Workflow
//!
//! 1.  **Validation**: `count` must be within `1..=100`, the naming
//!     convention must contain `{n}` and the template itself (named as the
//!     first site) must pass site validation. All checks run before anything
//!     is expanded or written.
//! 2.  **Expansion**: for `i` in `1..=count` the template is cloned, named by
//!     replacing `{n}` with `i` zero-padded to two digits, and the field
//!     groups flagged in `randomize` are resampled (see `generate`).
//! 3.  **Persistence**: the batch is stored in a single transaction; a
//!     storage failure leaves no partial batch behind.

use crate::db::Database;
use crate::error::{respond_with, ServiceError};
use crate::events::DataEvents;
use crate::services::sites::{generate, store, validate};
use actix_web::{web, HttpResponse, Responder};
use common::events::DataEvent;
use common::model::site::Site;
use common::requests::BulkCreateSitesRequest;
use log::info;
use rand::Rng;

pub const MIN_COUNT: i64 = 1;
pub const MAX_COUNT: i64 = 100;
pub const PLACEHOLDER: &str = "{n}";

pub(crate) async fn process(
    db: web::Data<Database>,
    events: web::Data<DataEvents>,
    payload: web::Json<BulkCreateSitesRequest>,
) -> impl Responder {
    let result = {
        let mut rng = rand::rng();
        expand_template(&payload, &mut rng)
    };
    match result.and_then(|sites| persist(&db, sites)) {
        Ok(created) => {
            events.publish(DataEvent::SitesChanged);
            HttpResponse::Created().json(created)
        }
        Err(e) => respond_with("Failed to create sites", e),
    }
}

/// Produces the named, optionally randomized sites without touching the store.
pub fn expand_template<R: Rng + ?Sized>(
    req: &BulkCreateSitesRequest,
    rng: &mut R,
) -> Result<Vec<Site>, ServiceError> {
    if !(MIN_COUNT..=MAX_COUNT).contains(&req.count) {
        return Err(ServiceError::Validation(format!(
            "Count must be between {} and {}, got {}",
            MIN_COUNT, MAX_COUNT, req.count
        )));
    }
    if !req.naming_convention.contains(PLACEHOLDER) {
        return Err(ServiceError::Validation(format!(
            "Naming convention must contain the {} placeholder",
            PLACEHOLDER
        )));
    }

    let mut first = req.template.clone();
    first.name = site_name(&req.naming_convention, MIN_COUNT);
    validate::validate_site(&first)?;

    let sites = (1..=req.count)
        .map(|i| {
            let mut site = req.template.clone();
            site.id = String::new();
            site.name = site_name(&req.naming_convention, i);
            generate::randomize(&mut site, &req.randomize, rng);
            site
        })
        .collect();
    Ok(sites)
}

pub fn site_name(convention: &str, sequence: i64) -> String {
    convention.replace(PLACEHOLDER, &format!("{:02}", sequence))
}

fn persist(db: &Database, sites: Vec<Site>) -> Result<Vec<Site>, ServiceError> {
    let mut conn = db.open()?;
    let created = store::insert_sites(&mut conn, sites)
        .map_err(|e| match e {
            ServiceError::Validation(_) => e,
            other => ServiceError::Internal(format!("Failed to create sites: {}", other)),
        })?;
    info!("Bulk created {} sites", created.len());
    Ok(created)
}
