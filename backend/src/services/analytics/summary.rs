use crate::db::Database;
use crate::error::{respond_with, ServiceError};
use crate::services::sites::store::list_sites;
use actix_web::{web, HttpResponse, Responder};
use common::model::analytics::{AnalyticsSummary, LibraryCounts};
use common::model::library::LibraryCategory;
use common::model::site::Site;
use rusqlite::Connection;

pub(crate) async fn process(db: web::Data<Database>) -> impl Responder {
    match db.open().and_then(|conn| summarize(&conn)) {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => respond_with("Failed to build analytics summary", e),
    }
}

pub fn summarize(conn: &Connection) -> Result<AnalyticsSummary, ServiceError> {
    let sites = list_sites(conn)?;
    let mut summary = summarize_sites(&sites);

    let count = |sql: &str| -> Result<u32, ServiceError> {
        Ok(conn.query_row(sql, [], |row| row.get(0))?)
    };
    summary.total_accounts = count("SELECT COUNT(*) FROM users")?;
    summary.total_policies = count("SELECT COUNT(*) FROM policies")?;
    summary.enabled_policies = count("SELECT COUNT(*) FROM policies WHERE enabled = 1")?;

    for category in LibraryCategory::ALL {
        summary.library.insert(category, LibraryCounts::default());
    }
    let mut stmt =
        conn.prepare("SELECT category, is_custom, COUNT(*) FROM library_items GROUP BY category, is_custom")?;
    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, bool>(1)?, row.get::<_, u32>(2)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    for (category, is_custom, n) in rows {
        let category: LibraryCategory = category.parse().map_err(ServiceError::Internal)?;
        let counts = summary.library.entry(category).or_default();
        if is_custom {
            counts.custom += n;
        } else {
            counts.default += n;
        }
    }

    Ok(summary)
}

/// Site-derived part of the summary. Device totals per category come from
/// the breakdowns, so they always sum to what the breakdowns record.
fn summarize_sites(sites: &[Site]) -> AnalyticsSummary {
    let mut summary = AnalyticsSummary {
        total_sites: sites.len() as u32,
        ..Default::default()
    };
    let mut progress_sum = 0u64;

    for site in sites {
        *summary.sites_by_status.entry(site.status).or_default() += 1;
        *summary.sites_by_priority.entry(site.priority).or_default() += 1;
        progress_sum += u64::from(site.progress);
        summary.total_devices += u64::from(site.devices);
        summary.total_site_users += u64::from(site.users);
        for (category, n) in &site.device_breakdown {
            *summary.devices_by_category.entry(*category).or_default() += u64::from(*n);
        }
    }

    if !sites.is_empty() {
        summary.average_progress = progress_sum as f64 / sites.len() as f64;
    }
    summary
}
