use super::store;
use crate::db::Database;
use crate::error::{respond_with, ServiceError};
use actix_web::{web, HttpResponse, Responder};
use common::model::site::Site;
use common::requests::SiteFilter;

pub(crate) async fn process(db: web::Data<Database>, filter: web::Query<SiteFilter>) -> impl Responder {
    match list_sites(&db, &filter) {
        Ok(sites) => HttpResponse::Ok().json(sites),
        Err(e) => respond_with("Failed to list sites", e),
    }
}

pub(crate) fn list_sites(db: &Database, filter: &SiteFilter) -> Result<Vec<Site>, ServiceError> {
    let conn = db.open()?;
    let sites = store::list_sites(&conn)?;
    Ok(sites.into_iter().filter(|site| filter.matches(site)).collect())
}
