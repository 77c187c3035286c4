//! SQL behind roles, permissions, users and role assignments.
//!
//! System roles are immutable through this layer: updates and deletes
//! against them return `Forbidden` and leave the row as it was.

use crate::error::ServiceError;
use common::model::rbac::{
    NewPermission, NewRole, NewUser, Permission, PermissionPatch, Role, RolePatch, User, UserPatch,
    UserRole,
};
use regex::Regex;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};

fn required(field: &str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::Validation(format!("Field '{}' is required", field)));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ServiceError> {
    let re = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
        .map_err(|e| ServiceError::Internal(format!("Invalid email pattern: {}", e)))?;
    if !re.is_match(email) {
        return Err(ServiceError::Validation(format!("Invalid email address '{}'", email)));
    }
    Ok(())
}

// Permissions

fn permission_from_row(row: &Row<'_>) -> rusqlite::Result<Permission> {
    Ok(Permission {
        id: row.get(0)?,
        name: row.get(1)?,
        resource: row.get(2)?,
        action: row.get(3)?,
        description: row.get(4)?,
    })
}

pub fn list_permissions(conn: &Connection) -> Result<Vec<Permission>, ServiceError> {
    let mut stmt =
        conn.prepare("SELECT id, name, resource, action, description FROM permissions ORDER BY id")?;
    let permissions = stmt
        .query_map([], permission_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(permissions)
}

pub fn find_permission(conn: &Connection, id: i64) -> Result<Permission, ServiceError> {
    conn.query_row(
        "SELECT id, name, resource, action, description FROM permissions WHERE id = ?1",
        params![id],
        permission_from_row,
    )
    .optional()?
    .ok_or_else(|| ServiceError::not_found("Permission", id))
}

pub fn insert_permission(conn: &Connection, permission: NewPermission) -> Result<Permission, ServiceError> {
    required("name", &permission.name)?;
    required("resource", &permission.resource)?;
    required("action", &permission.action)?;
    conn.execute(
        "INSERT INTO permissions (name, resource, action, description) VALUES (?1, ?2, ?3, ?4)",
        params![
            permission.name.trim(),
            permission.resource.trim(),
            permission.action.trim(),
            permission.description
        ],
    )?;
    find_permission(conn, conn.last_insert_rowid())
}

pub fn update_permission(conn: &Connection, id: i64, patch: PermissionPatch) -> Result<Permission, ServiceError> {
    let mut permission = find_permission(conn, id)?;
    if let Some(name) = patch.name {
        permission.name = name.trim().to_string();
    }
    if let Some(resource) = patch.resource {
        permission.resource = resource.trim().to_string();
    }
    if let Some(action) = patch.action {
        permission.action = action.trim().to_string();
    }
    if let Some(description) = patch.description {
        permission.description = description;
    }
    required("name", &permission.name)?;
    required("resource", &permission.resource)?;
    required("action", &permission.action)?;

    conn.execute(
        "UPDATE permissions SET name = ?1, resource = ?2, action = ?3, description = ?4 WHERE id = ?5",
        params![
            permission.name,
            permission.resource,
            permission.action,
            permission.description,
            id
        ],
    )?;
    Ok(permission)
}

pub fn delete_permission(conn: &Connection, id: i64) -> Result<(), ServiceError> {
    if conn.execute("DELETE FROM permissions WHERE id = ?1", params![id])? == 0 {
        return Err(ServiceError::not_found("Permission", id));
    }
    Ok(())
}

// Roles

struct RoleRow {
    id: i64,
    name: String,
    description: String,
    is_system_role: bool,
}

fn role_row(row: &Row<'_>) -> rusqlite::Result<RoleRow> {
    Ok(RoleRow {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        is_system_role: row.get(3)?,
    })
}

fn role_permissions(conn: &Connection, role_id: i64) -> Result<Vec<Permission>, ServiceError> {
    let mut stmt = conn.prepare(
        "SELECT p.id, p.name, p.resource, p.action, p.description
         FROM permissions p JOIN role_permissions rp ON rp.permission_id = p.id
         WHERE rp.role_id = ?1 ORDER BY p.id",
    )?;
    let permissions = stmt
        .query_map(params![role_id], permission_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(permissions)
}

fn into_role(conn: &Connection, row: RoleRow) -> Result<Role, ServiceError> {
    Ok(Role {
        permissions: role_permissions(conn, row.id)?,
        id: row.id,
        name: row.name,
        description: row.description,
        is_system_role: row.is_system_role,
    })
}

pub fn list_roles(conn: &Connection) -> Result<Vec<Role>, ServiceError> {
    let mut stmt = conn.prepare("SELECT id, name, description, is_system_role FROM roles ORDER BY id")?;
    let rows = stmt.query_map([], role_row)?.collect::<Result<Vec<_>, _>>()?;
    rows.into_iter().map(|row| into_role(conn, row)).collect()
}

pub fn find_role(conn: &Connection, id: i64) -> Result<Role, ServiceError> {
    let row = conn
        .query_row(
            "SELECT id, name, description, is_system_role FROM roles WHERE id = ?1",
            params![id],
            role_row,
        )
        .optional()?
        .ok_or_else(|| ServiceError::not_found("Role", id))?;
    into_role(conn, row)
}

fn set_role_permissions(tx: &Transaction<'_>, role_id: i64, permission_ids: &[i64]) -> Result<(), ServiceError> {
    tx.execute("DELETE FROM role_permissions WHERE role_id = ?1", params![role_id])?;
    for permission_id in permission_ids {
        let exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM permissions WHERE id = ?1)",
            params![permission_id],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(ServiceError::Validation(format!("Unknown permission {}", permission_id)));
        }
        tx.execute(
            "INSERT OR IGNORE INTO role_permissions (role_id, permission_id) VALUES (?1, ?2)",
            params![role_id, permission_id],
        )?;
    }
    Ok(())
}

pub fn insert_role(conn: &mut Connection, role: NewRole) -> Result<Role, ServiceError> {
    required("name", &role.name)?;
    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO roles (name, description, is_system_role) VALUES (?1, ?2, 0)",
        params![role.name.trim(), role.description],
    )?;
    let id = tx.last_insert_rowid();
    set_role_permissions(&tx, id, &role.permission_ids)?;
    tx.commit()?;
    find_role(conn, id)
}

fn ensure_mutable(role: &Role, action: &str) -> Result<(), ServiceError> {
    if role.is_system_role {
        return Err(ServiceError::Forbidden(format!(
            "System role '{}' cannot be {}",
            role.name, action
        )));
    }
    Ok(())
}

pub fn update_role(conn: &mut Connection, id: i64, patch: RolePatch) -> Result<Role, ServiceError> {
    let existing = find_role(conn, id)?;
    ensure_mutable(&existing, "modified")?;
    let name = patch.name.map(|n| n.trim().to_string()).unwrap_or(existing.name);
    let description = patch.description.unwrap_or(existing.description);
    required("name", &name)?;

    let tx = conn.transaction()?;
    tx.execute(
        "UPDATE roles SET name = ?1, description = ?2 WHERE id = ?3",
        params![name, description, id],
    )?;
    if let Some(permission_ids) = patch.permission_ids {
        set_role_permissions(&tx, id, &permission_ids)?;
    }
    tx.commit()?;
    find_role(conn, id)
}

pub fn delete_role(conn: &Connection, id: i64) -> Result<(), ServiceError> {
    let existing = find_role(conn, id)?;
    ensure_mutable(&existing, "deleted")?;
    conn.execute("DELETE FROM roles WHERE id = ?1 AND is_system_role = 0", params![id])?;
    Ok(())
}

// Users

fn user_roles_by_name(conn: &Connection, user_id: i64) -> Result<Vec<String>, ServiceError> {
    let mut stmt = conn.prepare(
        "SELECT r.name FROM roles r JOIN user_roles ur ON ur.role_id = r.id
         WHERE ur.user_id = ?1 ORDER BY r.id",
    )?;
    let names = stmt
        .query_map(params![user_id], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(names)
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        department: row.get(3)?,
        is_active: row.get(4)?,
        roles: Vec::new(),
    })
}

pub fn list_users(conn: &Connection) -> Result<Vec<User>, ServiceError> {
    let mut stmt =
        conn.prepare("SELECT id, name, email, department, is_active FROM users ORDER BY id")?;
    let users = stmt.query_map([], user_from_row)?.collect::<Result<Vec<_>, _>>()?;
    users
        .into_iter()
        .map(|mut user| {
            user.roles = user_roles_by_name(conn, user.id)?;
            Ok(user)
        })
        .collect()
}

pub fn find_user(conn: &Connection, id: i64) -> Result<User, ServiceError> {
    let mut user = conn
        .query_row(
            "SELECT id, name, email, department, is_active FROM users WHERE id = ?1",
            params![id],
            user_from_row,
        )
        .optional()?
        .ok_or_else(|| ServiceError::not_found("User", id))?;
    user.roles = user_roles_by_name(conn, id)?;
    Ok(user)
}

pub fn insert_user(conn: &Connection, user: NewUser) -> Result<User, ServiceError> {
    required("name", &user.name)?;
    let email = user.email.trim();
    validate_email(email)?;
    conn.execute(
        "INSERT INTO users (name, email, department, is_active) VALUES (?1, ?2, ?3, ?4)",
        params![user.name.trim(), email, user.department, user.is_active],
    )?;
    find_user(conn, conn.last_insert_rowid())
}

pub fn update_user(conn: &Connection, id: i64, patch: UserPatch) -> Result<User, ServiceError> {
    let mut user = find_user(conn, id)?;
    if let Some(name) = patch.name {
        user.name = name.trim().to_string();
    }
    if let Some(email) = patch.email {
        user.email = email.trim().to_string();
    }
    if let Some(department) = patch.department {
        user.department = department;
    }
    if let Some(is_active) = patch.is_active {
        user.is_active = is_active;
    }
    required("name", &user.name)?;
    validate_email(&user.email)?;

    conn.execute(
        "UPDATE users SET name = ?1, email = ?2, department = ?3, is_active = ?4 WHERE id = ?5",
        params![user.name, user.email, user.department, user.is_active, id],
    )?;
    Ok(user)
}

pub fn delete_user(conn: &Connection, id: i64) -> Result<(), ServiceError> {
    if conn.execute("DELETE FROM users WHERE id = ?1", params![id])? == 0 {
        return Err(ServiceError::not_found("User", id));
    }
    Ok(())
}

// Assignments

pub fn list_user_roles(conn: &Connection) -> Result<Vec<UserRole>, ServiceError> {
    let mut stmt = conn.prepare("SELECT user_id, role_id FROM user_roles ORDER BY user_id, role_id")?;
    let assignments = stmt
        .query_map([], |row| {
            Ok(UserRole {
                user_id: row.get(0)?,
                role_id: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(assignments)
}

pub fn assign_role(conn: &Connection, assignment: UserRole) -> Result<UserRole, ServiceError> {
    find_user(conn, assignment.user_id)?;
    find_role(conn, assignment.role_id)?;
    conn.execute(
        "INSERT INTO user_roles (user_id, role_id) VALUES (?1, ?2)",
        params![assignment.user_id, assignment.role_id],
    )?;
    Ok(assignment)
}

pub fn unassign_role(conn: &Connection, assignment: UserRole) -> Result<(), ServiceError> {
    let removed = conn.execute(
        "DELETE FROM user_roles WHERE user_id = ?1 AND role_id = ?2",
        params![assignment.user_id, assignment.role_id],
    )?;
    if removed == 0 {
        return Err(ServiceError::not_found(
            "Role assignment",
            format!("{}/{}", assignment.user_id, assignment.role_id),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_database;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Dana".to_string(),
            email: email.to_string(),
            department: "IT".to_string(),
            is_active: true,
        }
    }

    #[test]
    fn system_roles_reject_update_and_delete() {
        let (_dir, db) = temp_database();
        let mut conn = db.open().expect("open");
        let admin = list_roles(&conn)
            .expect("roles")
            .into_iter()
            .find(|r| r.is_system_role)
            .expect("seeded system role");

        let err = update_role(
            &mut conn,
            admin.id,
            RolePatch {
                name: Some("Root".to_string()),
                ..Default::default()
            },
        )
        .expect_err("forbidden");
        assert!(matches!(err, ServiceError::Forbidden(_)));
        assert!(matches!(delete_role(&conn, admin.id), Err(ServiceError::Forbidden(_))));
        assert_eq!(find_role(&conn, admin.id).expect("still there"), admin);
    }

    #[test]
    fn administrator_holds_every_permission() {
        let (_dir, db) = temp_database();
        let conn = db.open().expect("open");
        let all = list_permissions(&conn).expect("permissions");
        assert_eq!(all.len(), 18);
        let admin = list_roles(&conn)
            .expect("roles")
            .into_iter()
            .find(|r| r.name == "Administrator")
            .expect("admin");
        assert_eq!(admin.permissions, all);
    }

    #[test]
    fn custom_role_lifecycle_and_duplicate_names() {
        let (_dir, db) = temp_database();
        let mut conn = db.open().expect("open");
        let permission = list_permissions(&conn).expect("permissions")[0].clone();
        let role = insert_role(
            &mut conn,
            NewRole {
                name: "Auditor".to_string(),
                description: String::new(),
                permission_ids: vec![permission.id],
            },
        )
        .expect("insert");
        assert_eq!(role.permissions, vec![permission]);

        let duplicate = insert_role(
            &mut conn,
            NewRole {
                name: "Auditor".to_string(),
                description: String::new(),
                permission_ids: Vec::new(),
            },
        )
        .expect_err("duplicate");
        assert!(matches!(duplicate, ServiceError::Conflict(_)));

        let updated = update_role(
            &mut conn,
            role.id,
            RolePatch {
                permission_ids: Some(Vec::new()),
                ..Default::default()
            },
        )
        .expect("update");
        assert!(updated.permissions.is_empty());

        delete_role(&conn, role.id).expect("delete");
        assert!(matches!(find_role(&conn, role.id), Err(ServiceError::NotFound { .. })));
    }

    #[test]
    fn unknown_permission_rolls_back_role_creation() {
        let (_dir, db) = temp_database();
        let mut conn = db.open().expect("open");
        let before = list_roles(&conn).expect("roles").len();
        let err = insert_role(
            &mut conn,
            NewRole {
                name: "Ghost".to_string(),
                description: String::new(),
                permission_ids: vec![9999],
            },
        )
        .expect_err("unknown permission");
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(list_roles(&conn).expect("roles").len(), before);
    }

    #[test]
    fn users_validate_email_and_list_role_names() {
        let (_dir, db) = temp_database();
        let conn = db.open().expect("open");
        assert!(matches!(
            insert_user(&conn, new_user("not-an-email")),
            Err(ServiceError::Validation(_))
        ));

        let user = insert_user(&conn, new_user("dana@example.com")).expect("user");
        let viewer = list_roles(&conn)
            .expect("roles")
            .into_iter()
            .find(|r| r.name == "Viewer")
            .expect("viewer");
        let assignment = UserRole {
            user_id: user.id,
            role_id: viewer.id,
        };
        assign_role(&conn, assignment).expect("assign");
        assert!(matches!(assign_role(&conn, assignment), Err(ServiceError::Conflict(_))));
        assert_eq!(find_user(&conn, user.id).expect("user").roles, vec!["Viewer".to_string()]);

        unassign_role(&conn, assignment).expect("unassign");
        assert!(list_user_roles(&conn).expect("assignments").is_empty());
        assert!(matches!(
            unassign_role(&conn, assignment),
            Err(ServiceError::NotFound { .. })
        ));
    }

    #[test]
    fn duplicate_email_is_a_conflict() {
        let (_dir, db) = temp_database();
        let conn = db.open().expect("open");
        insert_user(&conn, new_user("lee@example.com")).expect("first");
        let err = insert_user(&conn, new_user("lee@example.com")).expect_err("duplicate");
        assert!(matches!(err, ServiceError::Conflict(_)));
    }
}
