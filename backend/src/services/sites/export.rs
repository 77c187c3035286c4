//! # Site Export
//!
//! `GET /api/sites/export?format=csv|json` returns the (optionally filtered)
//! site list as a download. The CSV carries one header row and the scalar
//! planning columns; nested infrastructure stays in the JSON export.

use super::list::list_sites;
use crate::db::Database;
use crate::error::{respond_with, ServiceError};
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Responder};
use common::model::site::Site;
use common::requests::{ExportFormat, ExportQuery};

pub const CSV_COLUMNS: [&str; 14] = [
    "id",
    "name",
    "region",
    "country",
    "state",
    "site_type",
    "status",
    "priority",
    "phase",
    "users",
    "devices",
    "progress",
    "start_date",
    "target_date",
];

pub(crate) async fn process(db: web::Data<Database>, query: web::Query<ExportQuery>) -> impl Responder {
    let result = list_sites(&db, &query.filter()).and_then(|sites| match query.format {
        ExportFormat::Csv => sites_to_csv(&sites).map(|body| (body, "text/csv; charset=utf-8", "sites.csv")),
        ExportFormat::Json => serde_json::to_vec_pretty(&sites)
            .map(|body| (body, "application/json", "sites.json"))
            .map_err(ServiceError::from),
    });

    match result {
        Ok((body, content_type, filename)) => HttpResponse::Ok()
            .content_type(content_type)
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(filename.to_string())],
            })
            .body(body),
        Err(e) => respond_with("Failed to export sites", e),
    }
}

pub fn sites_to_csv(sites: &[Site]) -> Result<Vec<u8>, ServiceError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record(CSV_COLUMNS)
        .map_err(|e| ServiceError::Internal(format!("CSV write failed: {}", e)))?;

    for site in sites {
        let date = |d: Option<chrono::NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
        writer
            .write_record([
                site.id.clone(),
                site.name.clone(),
                site.region.as_str().to_string(),
                site.country.clone(),
                site.state.clone(),
                site.site_type.as_str().to_string(),
                site.status.as_str().to_string(),
                site.priority.as_str().to_string(),
                site.phase.clone(),
                site.users.to_string(),
                site.devices.to_string(),
                site.progress.to_string(),
                date(site.start_date),
                date(site.target_date),
            ])
            .map_err(|e| ServiceError::Internal(format!("CSV write failed: {}", e)))?;
    }

    writer
        .into_inner()
        .map_err(|e| ServiceError::Internal(format!("CSV flush failed: {}", e)))
}
