use crate::error::ServiceError;
use crate::services::patch::merge_patch;
use chrono::{DateTime, Utc};
use common::model::library::{LibraryCategory, LibraryItem, LibraryItemData};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde_json::Value;

/// Fields a caller can never set through create or update.
const PROTECTED_FIELDS: [&str; 4] = ["id", "is_custom", "kind", "created_at"];

struct RawItem {
    id: i64,
    is_custom: bool,
    data: String,
    created_at: String,
}

impl RawItem {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(RawItem {
            id: row.get(0)?,
            is_custom: row.get(1)?,
            data: row.get(2)?,
            created_at: row.get(3)?,
        })
    }

    fn into_item(self) -> Result<LibraryItem, ServiceError> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| ServiceError::Internal(format!("Bad timestamp on item {}: {}", self.id, e)))?
            .with_timezone(&Utc);
        Ok(LibraryItem {
            id: self.id,
            is_custom: self.is_custom,
            created_at,
            data: serde_json::from_str(&self.data)?,
        })
    }
}

/// Builds the typed payload for `category` from a request body. The `kind`
/// tag always comes from the category, whatever the body says.
pub fn data_from_json(category: LibraryCategory, body: Value) -> Result<LibraryItemData, ServiceError> {
    let mut value = serde_json::json!({ "kind": category.as_str() });
    merge_patch(&mut value, body, &PROTECTED_FIELDS)?;
    let data: LibraryItemData = serde_json::from_value(value)
        .map_err(|e| ServiceError::Validation(format!("Invalid {} item: {}", category, e)))?;
    data.validate().map_err(ServiceError::Validation)?;
    Ok(data)
}

/// Rejects a row whose `use_case_id` or `test_case_id` does not name an
/// existing row of the referenced category.
fn check_references(conn: &Connection, data: &LibraryItemData) -> Result<(), ServiceError> {
    let reference = match data {
        LibraryItemData::TestCases(t) => t.use_case_id.map(|id| ("use_case_id", LibraryCategory::UseCases, id)),
        LibraryItemData::Requirements(r) => r.use_case_id.map(|id| ("use_case_id", LibraryCategory::UseCases, id)),
        LibraryItemData::TestMatrix(m) => m.test_case_id.map(|id| ("test_case_id", LibraryCategory::TestCases, id)),
        _ => None,
    };
    let Some((field, target, id)) = reference else {
        return Ok(());
    };
    match find_item(conn, target, id) {
        Ok(_) => Ok(()),
        Err(ServiceError::NotFound { .. }) => Err(ServiceError::Validation(format!(
            "Field '{}' references unknown {} item {}",
            field, target, id
        ))),
        Err(e) => Err(e),
    }
}

pub fn insert_item(
    conn: &Connection,
    data: &LibraryItemData,
    is_custom: bool,
) -> Result<LibraryItem, ServiceError> {
    data.validate().map_err(ServiceError::Validation)?;
    check_references(conn, data)?;
    let created_at = Utc::now();
    conn.execute(
        "INSERT INTO library_items (category, is_custom, data, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            data.category().as_str(),
            is_custom,
            serde_json::to_string(data)?,
            created_at.to_rfc3339()
        ],
    )?;
    Ok(LibraryItem {
        id: conn.last_insert_rowid(),
        is_custom,
        created_at,
        data: data.clone(),
    })
}

pub fn list_items(conn: &Connection, category: LibraryCategory) -> Result<Vec<LibraryItem>, ServiceError> {
    let mut stmt = conn.prepare(
        "SELECT id, is_custom, data, created_at FROM library_items WHERE category = ?1 ORDER BY id",
    )?;
    let rows = stmt
        .query_map(params![category.as_str()], RawItem::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    rows.into_iter().map(RawItem::into_item).collect()
}

pub fn find_item(conn: &Connection, category: LibraryCategory, id: i64) -> Result<LibraryItem, ServiceError> {
    conn.query_row(
        "SELECT id, is_custom, data, created_at FROM library_items WHERE id = ?1 AND category = ?2",
        params![id, category.as_str()],
        RawItem::from_row,
    )
    .optional()?
    .ok_or_else(|| ServiceError::not_found("Library item", id))?
    .into_item()
}

/// Merges `patch` into the stored row. Defaults and custom rows alike may be
/// edited; `id`, `is_custom` and the category never change.
pub fn update_item(
    conn: &Connection,
    category: LibraryCategory,
    id: i64,
    patch: Value,
) -> Result<LibraryItem, ServiceError> {
    let existing = find_item(conn, category, id)?;
    let mut value = serde_json::to_value(&existing.data)?;
    merge_patch(&mut value, patch, &PROTECTED_FIELDS)?;
    let data: LibraryItemData = serde_json::from_value(value)
        .map_err(|e| ServiceError::Validation(format!("Invalid {} item: {}", category, e)))?;
    data.validate().map_err(ServiceError::Validation)?;
    check_references(conn, &data)?;

    conn.execute(
        "UPDATE library_items SET data = ?1 WHERE id = ?2",
        params![serde_json::to_string(&data)?, id],
    )?;
    Ok(LibraryItem { data, ..existing })
}

/// Deletes a custom row. Default rows are rejected and left untouched.
///
/// Rows referring to the deleted one (test cases and requirements of a use
/// case, matrix entries of a test case) stay, with the reference cleared,
/// in the same transaction as the delete.
pub fn delete_item(conn: &Connection, category: LibraryCategory, id: i64) -> Result<(), ServiceError> {
    let existing = find_item(conn, category, id)?;
    if !existing.is_custom {
        return Err(ServiceError::Forbidden(format!(
            "Default {} item {} cannot be deleted",
            category, id
        )));
    }

    let tx = conn.unchecked_transaction()?;
    let (field, dependents): (&str, &[LibraryCategory]) = match category {
        LibraryCategory::UseCases => (
            "$.use_case_id",
            &[LibraryCategory::TestCases, LibraryCategory::Requirements],
        ),
        LibraryCategory::TestCases => ("$.test_case_id", &[LibraryCategory::TestMatrix]),
        _ => ("", &[]),
    };
    for dependent in dependents {
        let cleared = tx.execute(
            "UPDATE library_items SET data = json_set(data, ?1, json('null'))
             WHERE category = ?2 AND json_extract(data, ?1) = ?3",
            params![field, dependent.as_str(), id],
        )?;
        if cleared > 0 {
            log::info!("Unlinked {} {} rows from {} item {}", cleared, dependent, category, id);
        }
    }
    tx.execute(
        "DELETE FROM library_items WHERE id = ?1 AND is_custom = 1",
        params![id],
    )?;
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_database;
    use serde_json::json;

    #[test]
    fn created_rows_are_custom_even_if_body_says_otherwise() {
        let (_dir, db) = temp_database();
        let conn = db.open().expect("open");
        let data = data_from_json(
            LibraryCategory::NetworkVendors,
            json!({ "name": "Arista", "is_custom": false, "kind": "use_cases" }),
        )
        .expect("valid body");
        assert_eq!(data.category(), LibraryCategory::NetworkVendors);

        let item = insert_item(&conn, &data, true).expect("insert");
        let stored = find_item(&conn, LibraryCategory::NetworkVendors, item.id).expect("find");
        assert!(stored.is_custom);
        assert_eq!(stored.data.label(), "Arista");
    }

    #[test]
    fn default_rows_cannot_be_deleted() {
        let (_dir, db) = temp_database();
        let conn = db.open().expect("open");
        let defaults = list_items(&conn, LibraryCategory::SecurityVendors).expect("list");
        let default = defaults.iter().find(|i| !i.is_custom).expect("seeded default");

        let err = delete_item(&conn, LibraryCategory::SecurityVendors, default.id).expect_err("forbidden");
        assert!(matches!(err, ServiceError::Forbidden(_)));
        let after = list_items(&conn, LibraryCategory::SecurityVendors).expect("list");
        assert_eq!(after.len(), defaults.len());
    }

    #[test]
    fn custom_row_delete_removes_exactly_that_row() {
        let (_dir, db) = temp_database();
        let conn = db.open().expect("open");
        let before = list_items(&conn, LibraryCategory::ChecklistItems).expect("list").len();
        let data = data_from_json(LibraryCategory::ChecklistItems, json!({ "title": "Label ports" }))
            .expect("valid");
        let a = insert_item(&conn, &data, true).expect("insert a");
        let b = insert_item(&conn, &data, true).expect("insert b");

        delete_item(&conn, LibraryCategory::ChecklistItems, a.id).expect("delete");
        let remaining = list_items(&conn, LibraryCategory::ChecklistItems).expect("list");
        assert_eq!(remaining.len(), before + 1);
        assert!(remaining.iter().any(|i| i.id == b.id));
        assert!(remaining.iter().all(|i| i.id != a.id));
    }

    #[test]
    fn update_merges_fields_and_keeps_flags() {
        let (_dir, db) = temp_database();
        let conn = db.open().expect("open");
        let use_case = list_items(&conn, LibraryCategory::UseCases)
            .expect("list")
            .into_iter()
            .next()
            .expect("seeded use case");

        let updated = update_item(
            &conn,
            LibraryCategory::UseCases,
            use_case.id,
            json!({ "description": "Edited", "is_custom": true, "id": 999 }),
        )
        .expect("update");
        assert_eq!(updated.id, use_case.id);
        assert!(!updated.is_custom);
        match &updated.data {
            LibraryItemData::UseCases(u) => {
                assert_eq!(u.description, "Edited");
                assert_eq!(u.title, use_case.data.label());
            }
            other => panic!("unexpected variant {:?}", other),
        }
    }

    #[test]
    fn lookups_are_scoped_to_category() {
        let (_dir, db) = temp_database();
        let conn = db.open().expect("open");
        let vendor = list_items(&conn, LibraryCategory::NetworkVendors)
            .expect("list")
            .remove(0);
        let err = find_item(&conn, LibraryCategory::DeviceTypes, vendor.id).expect_err("wrong category");
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[test]
    fn unknown_use_case_reference_is_rejected() {
        let (_dir, db) = temp_database();
        let conn = db.open().expect("open");
        let before = list_items(&conn, LibraryCategory::TestCases).expect("list").len();
        let data = data_from_json(
            LibraryCategory::TestCases,
            json!({ "name": "Orphan", "expected_outcome": "ok", "use_case_id": 987654 }),
        )
        .expect("valid body");

        let err = insert_item(&conn, &data, true).expect_err("dangling reference");
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(list_items(&conn, LibraryCategory::TestCases).expect("list").len(), before);
    }

    #[test]
    fn reference_must_point_at_the_right_category() {
        let (_dir, db) = temp_database();
        let conn = db.open().expect("open");
        let vendor = list_items(&conn, LibraryCategory::NetworkVendors).expect("list").remove(0);
        let requirement = list_items(&conn, LibraryCategory::Requirements).expect("list").remove(0);

        let err = update_item(
            &conn,
            LibraryCategory::Requirements,
            requirement.id,
            json!({ "use_case_id": vendor.id }),
        )
        .expect_err("vendor is not a use case");
        assert!(matches!(err, ServiceError::Validation(_)));

        let matrix = data_from_json(
            LibraryCategory::TestMatrix,
            json!({ "vendor": "Cisco", "device_type": "Laptop", "test_case_id": vendor.id }),
        )
        .expect("valid body");
        assert!(matches!(
            insert_item(&conn, &matrix, true),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn deleting_custom_use_case_unlinks_its_children() {
        let (_dir, db) = temp_database();
        let conn = db.open().expect("open");
        let use_case = data_from_json(LibraryCategory::UseCases, json!({ "title": "Posture check" }))
            .expect("valid");
        let use_case = insert_item(&conn, &use_case, true).expect("insert use case");
        let test_case = data_from_json(
            LibraryCategory::TestCases,
            json!({ "name": "Non-compliant laptop", "expected_outcome": "Quarantined", "use_case_id": use_case.id }),
        )
        .expect("valid");
        let test_case = insert_item(&conn, &test_case, true).expect("insert test case");
        let requirement = data_from_json(
            LibraryCategory::Requirements,
            json!({ "title": "EDR agent", "description": "Agent on every laptop", "use_case_id": use_case.id }),
        )
        .expect("valid");
        let requirement = insert_item(&conn, &requirement, true).expect("insert requirement");

        delete_item(&conn, LibraryCategory::UseCases, use_case.id).expect("delete");

        assert!(matches!(
            find_item(&conn, LibraryCategory::UseCases, use_case.id),
            Err(ServiceError::NotFound { .. })
        ));
        match find_item(&conn, LibraryCategory::TestCases, test_case.id).expect("kept").data {
            LibraryItemData::TestCases(t) => assert_eq!(t.use_case_id, None),
            other => panic!("unexpected variant {:?}", other),
        }
        match find_item(&conn, LibraryCategory::Requirements, requirement.id).expect("kept").data {
            LibraryItemData::Requirements(r) => assert_eq!(r.use_case_id, None),
            other => panic!("unexpected variant {:?}", other),
        }
    }

    #[test]
    fn invalid_update_leaves_row_unchanged() {
        let (_dir, db) = temp_database();
        let conn = db.open().expect("open");
        let item = list_items(&conn, LibraryCategory::TestCases).expect("list").remove(0);
        let err = update_item(&conn, LibraryCategory::TestCases, item.id, json!({ "name": "" }))
            .expect_err("blank name");
        assert!(matches!(err, ServiceError::Validation(_)));
        let stored = find_item(&conn, LibraryCategory::TestCases, item.id).expect("find");
        assert_eq!(stored.data, item.data);
    }
}
