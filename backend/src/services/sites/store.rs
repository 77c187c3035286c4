use crate::error::ServiceError;
use crate::services::patch::merge_patch;
use crate::services::sites::validate::validate_site;
use chrono::Utc;
use common::model::site::Site;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use uuid::Uuid;

/// Inserts one site under a freshly generated id, ignoring any id it carried.
pub fn insert_site(conn: &Connection, mut site: Site) -> Result<Site, ServiceError> {
    validate_site(&site)?;
    site.id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO sites (id, name, data, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
        params![&site.id, &site.name, serde_json::to_string(&site)?, now],
    )?;
    Ok(site)
}

/// Inserts a batch in one transaction: either every site is stored or none.
pub fn insert_sites(conn: &mut Connection, sites: Vec<Site>) -> Result<Vec<Site>, ServiceError> {
    for site in &sites {
        validate_site(site)?;
    }
    let tx = conn.transaction()?;
    let created = sites
        .into_iter()
        .map(|site| insert_site(&tx, site))
        .collect::<Result<Vec<_>, _>>()?;
    tx.commit()?;
    Ok(created)
}

pub fn list_sites(conn: &Connection) -> Result<Vec<Site>, ServiceError> {
    let mut stmt = conn.prepare("SELECT data FROM sites ORDER BY name, created_at")?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    rows.iter()
        .map(|data| serde_json::from_str(data).map_err(ServiceError::from))
        .collect()
}

pub fn find_site(conn: &Connection, id: &str) -> Result<Site, ServiceError> {
    let data: String = conn
        .query_row("SELECT data FROM sites WHERE id = ?1", params![id], |row| row.get(0))
        .optional()?
        .ok_or_else(|| ServiceError::not_found("Site", id))?;
    Ok(serde_json::from_str(&data)?)
}

/// Merges `patch` into the stored site; the id is immutable.
pub fn update_site(conn: &Connection, id: &str, patch: Value) -> Result<Site, ServiceError> {
    let existing = find_site(conn, id)?;
    let mut value = serde_json::to_value(&existing)?;
    merge_patch(&mut value, patch, &["id"])?;
    let site: Site = serde_json::from_value(value)
        .map_err(|e| ServiceError::Validation(format!("Invalid site: {}", e)))?;
    validate_site(&site)?;

    conn.execute(
        "UPDATE sites SET name = ?1, data = ?2, updated_at = ?3 WHERE id = ?4",
        params![&site.name, serde_json::to_string(&site)?, Utc::now().to_rfc3339(), id],
    )?;
    Ok(site)
}

pub fn delete_site(conn: &Connection, id: &str) -> Result<(), ServiceError> {
    let removed = conn.execute("DELETE FROM sites WHERE id = ?1", params![id])?;
    if removed == 0 {
        return Err(ServiceError::not_found("Site", id));
    }
    Ok(())
}
