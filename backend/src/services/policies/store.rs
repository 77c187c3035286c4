use crate::error::ServiceError;
use crate::services::sites::store::find_site;
use common::model::policy::{NewPolicy, Policy, PolicyPatch};
use rusqlite::{params, Connection, OptionalExtension, Row};

const SELECT_POLICY: &str = "SELECT id, name, policy_type, description, enabled, site_id FROM policies";

fn policy_from_row(row: &Row<'_>) -> rusqlite::Result<Policy> {
    let policy_type: String = row.get(2)?;
    Ok(Policy {
        id: row.get(0)?,
        name: row.get(1)?,
        policy_type: policy_type.parse().map_err(|e: String| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, e.into())
        })?,
        description: row.get(3)?,
        enabled: row.get(4)?,
        site_id: row.get(5)?,
    })
}

fn check(conn: &Connection, name: &str, site_id: Option<&str>) -> Result<(), ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::Validation("Policy name is required".to_string()));
    }
    if let Some(site_id) = site_id {
        find_site(conn, site_id).map_err(|e| match e {
            ServiceError::NotFound { .. } => {
                ServiceError::Validation(format!("Unknown site '{}' for policy", site_id))
            }
            other => other,
        })?;
    }
    Ok(())
}

pub fn list_policies(conn: &Connection) -> Result<Vec<Policy>, ServiceError> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY id", SELECT_POLICY))?;
    let policies = stmt
        .query_map([], policy_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(policies)
}

pub fn find_policy(conn: &Connection, id: i64) -> Result<Policy, ServiceError> {
    conn.query_row(&format!("{} WHERE id = ?1", SELECT_POLICY), params![id], policy_from_row)
        .optional()?
        .ok_or_else(|| ServiceError::not_found("Policy", id))
}

pub fn insert_policy(conn: &Connection, policy: NewPolicy) -> Result<Policy, ServiceError> {
    let site_id = policy.site_id.filter(|s| !s.trim().is_empty());
    check(conn, &policy.name, site_id.as_deref())?;
    conn.execute(
        "INSERT INTO policies (name, policy_type, description, enabled, site_id) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            policy.name.trim(),
            policy.policy_type.as_str(),
            policy.description,
            policy.enabled,
            site_id
        ],
    )?;
    find_policy(conn, conn.last_insert_rowid())
}

pub fn update_policy(conn: &Connection, id: i64, patch: PolicyPatch) -> Result<Policy, ServiceError> {
    let mut policy = find_policy(conn, id)?;
    if let Some(name) = patch.name {
        policy.name = name.trim().to_string();
    }
    if let Some(policy_type) = patch.policy_type {
        policy.policy_type = policy_type;
    }
    if let Some(description) = patch.description {
        policy.description = description;
    }
    if let Some(enabled) = patch.enabled {
        policy.enabled = enabled;
    }
    if let Some(site_id) = patch.site_id {
        policy.site_id = Some(site_id).filter(|s| !s.trim().is_empty());
    }
    check(conn, &policy.name, policy.site_id.as_deref())?;

    conn.execute(
        "UPDATE policies SET name = ?1, policy_type = ?2, description = ?3, enabled = ?4, site_id = ?5 WHERE id = ?6",
        params![
            policy.name,
            policy.policy_type.as_str(),
            policy.description,
            policy.enabled,
            policy.site_id,
            id
        ],
    )?;
    Ok(policy)
}

pub fn delete_policy(conn: &Connection, id: i64) -> Result<(), ServiceError> {
    let removed = conn.execute("DELETE FROM policies WHERE id = ?1", params![id])?;
    if removed == 0 {
        return Err(ServiceError::not_found("Policy", id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_database;
    use crate::services::sites::store::{delete_site, insert_site};
    use common::model::policy::PolicyType;
    use common::model::site::Site;

    fn new_policy(name: &str, site_id: Option<String>) -> NewPolicy {
        NewPolicy {
            name: name.to_string(),
            policy_type: PolicyType::Segmentation,
            description: String::new(),
            enabled: true,
            site_id,
        }
    }

    #[test]
    fn create_update_and_delete() {
        let (_dir, db) = temp_database();
        let conn = db.open().expect("open");
        let created = insert_policy(&conn, new_policy("IoT isolation", None)).expect("insert");
        assert_eq!(created.policy_type, PolicyType::Segmentation);

        let updated = update_policy(
            &conn,
            created.id,
            PolicyPatch {
                enabled: Some(false),
                ..Default::default()
            },
        )
        .expect("update");
        assert!(!updated.enabled);
        assert_eq!(updated.name, "IoT isolation");

        delete_policy(&conn, created.id).expect("delete");
        assert!(matches!(
            find_policy(&conn, created.id),
            Err(ServiceError::NotFound { .. })
        ));
    }

    #[test]
    fn unknown_site_is_rejected() {
        let (_dir, db) = temp_database();
        let conn = db.open().expect("open");
        let err = insert_policy(&conn, new_policy("Scoped", Some("nope".to_string()))).expect_err("bad site");
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(list_policies(&conn).expect("list").is_empty());
    }

    #[test]
    fn site_policies_go_with_the_site() {
        let (_dir, db) = temp_database();
        let conn = db.open().expect("open");
        let site = insert_site(
            &conn,
            Site {
                name: "Plant 4".to_string(),
                ..Default::default()
            },
        )
        .expect("site");
        insert_policy(&conn, new_policy("Plant OT", Some(site.id.clone()))).expect("scoped");
        insert_policy(&conn, new_policy("Global guest", None)).expect("global");

        delete_site(&conn, &site.id).expect("delete site");
        let remaining = list_policies(&conn).expect("list");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Global guest");
    }
}
