//! Built-in rows every store starts with: default library items (never
//! deletable), the permission catalogue and the read-only system roles.

use crate::error::ServiceError;
use crate::services::library::store::insert_item;
use common::model::library::{
    ChecklistItem, DeviceTypeItem, LibraryItemData, NetworkVendorItem, Requirement,
    SecurityVendorItem, SecurityVendorType, TestCase, TestMatrixEntry, TestResult, UseCase,
    VendorType,
};
use common::model::site::{DeviceCategory, Priority};
use log::info;
use rusqlite::{params, Connection};

const RESOURCES: [&str; 6] = ["sites", "library", "policies", "users", "roles", "demo"];
const ACTIONS: [&str; 3] = ["read", "write", "delete"];

/// System roles and the permission names they carry (`*` = all).
const SYSTEM_ROLES: [(&str, &str, &[&str]); 3] = [
    ("Administrator", "Full access to every area of the planner", &["*"]),
    (
        "Project Manager",
        "Plans sites and maintains the library",
        &[
            "sites:read",
            "sites:write",
            "library:read",
            "library:write",
            "policies:read",
            "policies:write",
            "demo:read",
        ],
    ),
    (
        "Viewer",
        "Read-only access to dashboards",
        &["sites:read", "library:read", "policies:read", "demo:read"],
    ),
];

pub fn seed_defaults(conn: &mut Connection) -> Result<(), ServiceError> {
    let tx = conn.transaction()?;

    let library_rows: i64 = tx.query_row("SELECT COUNT(*) FROM library_items", [], |row| row.get(0))?;
    if library_rows == 0 {
        let inserted = seed_library(&tx)?;
        info!("Seeded {} default library items", inserted);
    }

    let roles: i64 = tx.query_row("SELECT COUNT(*) FROM roles", [], |row| row.get(0))?;
    if roles == 0 {
        seed_rbac(&tx)?;
        info!("Seeded {} system roles", SYSTEM_ROLES.len());
    }

    tx.commit()?;
    Ok(())
}

fn seed_library(conn: &Connection) -> Result<usize, ServiceError> {
    let mut inserted = 0;

    for data in standalone_defaults() {
        insert_item(conn, &data, false)?;
        inserted += 1;
    }

    for (use_case, test_cases, requirements) in use_case_defaults() {
        let created = insert_item(conn, &LibraryItemData::UseCases(use_case), false)?;
        inserted += 1;
        for mut test_case in test_cases {
            test_case.use_case_id = Some(created.id);
            insert_item(conn, &LibraryItemData::TestCases(test_case), false)?;
            inserted += 1;
        }
        for mut requirement in requirements {
            requirement.use_case_id = Some(created.id);
            insert_item(conn, &LibraryItemData::Requirements(requirement), false)?;
            inserted += 1;
        }
    }

    Ok(inserted)
}

fn seed_rbac(conn: &Connection) -> Result<(), ServiceError> {
    for resource in RESOURCES {
        for action in ACTIONS {
            conn.execute(
                "INSERT INTO permissions (name, resource, action, description) VALUES (?1, ?2, ?3, ?4)",
                params![
                    format!("{}:{}", resource, action),
                    resource,
                    action,
                    format!("Allows {} on {}", action, resource)
                ],
            )?;
        }
    }

    for (name, description, grants) in SYSTEM_ROLES {
        conn.execute(
            "INSERT INTO roles (name, description, is_system_role) VALUES (?1, ?2, 1)",
            params![name, description],
        )?;
        let role_id = conn.last_insert_rowid();
        if grants.contains(&"*") {
            conn.execute(
                "INSERT INTO role_permissions (role_id, permission_id) SELECT ?1, id FROM permissions",
                params![role_id],
            )?;
        } else {
            for grant in grants {
                conn.execute(
                    "INSERT INTO role_permissions (role_id, permission_id)
                     SELECT ?1, id FROM permissions WHERE name = ?2",
                    params![role_id, grant],
                )?;
            }
        }
    }
    Ok(())
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn standalone_defaults() -> Vec<LibraryItemData> {
    let mut rows = Vec::new();

    for (name, vendor_type, models) in [
        ("Cisco", VendorType::Both, &["Catalyst 9300", "Catalyst 9120AX"][..]),
        ("Aruba", VendorType::Both, &["CX 6300", "AP-635"][..]),
        ("Juniper Mist", VendorType::Wireless, &["AP45", "EX4400"][..]),
        ("Extreme Networks", VendorType::Wired, &["X465", "5520"][..]),
        ("Meraki", VendorType::Both, &["MS390", "MR57"][..]),
    ] {
        rows.push(LibraryItemData::NetworkVendors(NetworkVendorItem {
            name: name.to_string(),
            vendor_type,
            models: strings(models),
            nac_integration: true,
        }));
    }

    for (name, vendor_type, integrations) in [
        ("Palo Alto Networks", SecurityVendorType::Firewall, &["User-ID", "Syslog"][..]),
        ("Fortinet", SecurityVendorType::Firewall, &["FSSO", "REST API"][..]),
        ("CrowdStrike", SecurityVendorType::Edr, &["Falcon API"][..]),
        ("Splunk", SecurityVendorType::Siem, &["HTTP Event Collector"][..]),
        ("Okta", SecurityVendorType::Identity, &["SAML", "SCIM"][..]),
        ("Microsoft Intune", SecurityVendorType::Mdm, &["Graph API compliance"][..]),
    ] {
        rows.push(LibraryItemData::SecurityVendors(SecurityVendorItem {
            name: name.to_string(),
            vendor_type,
            integrations: strings(integrations),
        }));
    }

    for (name, category, os) in [
        ("Corporate laptop", DeviceCategory::Windows, "Windows 11"),
        ("MacBook", DeviceCategory::Mac, "macOS"),
        ("iPhone", DeviceCategory::Ios, "iOS"),
        ("Network printer", DeviceCategory::Printers, "Embedded"),
        ("IP camera", DeviceCategory::Cameras, "Embedded Linux"),
        ("Desk phone", DeviceCategory::Voip, "Vendor firmware"),
        ("Infusion pump", DeviceCategory::Medical, "Vendor firmware"),
    ] {
        rows.push(LibraryItemData::DeviceTypes(DeviceTypeItem {
            name: name.to_string(),
            device_category: category,
            operating_system: os.to_string(),
            description: String::new(),
        }));
    }

    for (title, phase, required) in [
        ("Confirm switch firmware supports 802.1X", "Discovery", true),
        ("Export identity provider groups", "Discovery", true),
        ("Define VLAN and ACL mapping", "Design", true),
        ("Pilot with IT department", "Pilot", true),
        ("Enable monitor mode on access ports", "Deployment", false),
        ("Switch ports to closed mode", "Enforcement", true),
    ] {
        rows.push(LibraryItemData::ChecklistItems(ChecklistItem {
            title: title.to_string(),
            phase: phase.to_string(),
            description: String::new(),
            required,
        }));
    }

    for (vendor, device_type, result) in [
        ("Cisco", "Corporate laptop", TestResult::Passed),
        ("Aruba", "iPhone", TestResult::Passed),
        ("Meraki", "IP camera", TestResult::Partial),
        ("Extreme Networks", "Infusion pump", TestResult::NotTested),
    ] {
        rows.push(LibraryItemData::TestMatrix(TestMatrixEntry {
            vendor: vendor.to_string(),
            device_type: device_type.to_string(),
            test_case_id: None,
            result,
            notes: String::new(),
        }));
    }

    rows
}

fn use_case_defaults() -> Vec<(UseCase, Vec<TestCase>, Vec<Requirement>)> {
    vec![
        (
            UseCase {
                title: "802.1X certificate authentication".to_string(),
                category: "Authentication".to_string(),
                description: "Managed endpoints authenticate with EAP-TLS certificates.".to_string(),
                priority: Priority::Critical,
                applicable_industries: strings(&["all"]),
                applicable_goals: strings(&["zero_trust", "compliance"]),
                is_baseline: true,
            },
            vec![TestCase {
                name: "Domain laptop connects with EAP-TLS".to_string(),
                use_case_id: None,
                description: String::new(),
                steps: strings(&[
                    "Connect laptop to access port",
                    "Observe RADIUS accept in logs",
                ]),
                expected_outcome: "Laptop is placed in the corporate VLAN".to_string(),
            }],
            vec![Requirement {
                title: "Internal PKI".to_string(),
                description: "An issuing CA for device certificates".to_string(),
                justification: "EAP-TLS needs a trusted client certificate".to_string(),
                priority: Priority::High,
                use_case_id: None,
            }],
        ),
        (
            UseCase {
                title: "Guest self-registration".to_string(),
                category: "Guest Access".to_string(),
                description: "Visitors register through a captive portal.".to_string(),
                priority: Priority::Medium,
                applicable_industries: strings(&["retail", "healthcare", "education"]),
                applicable_goals: strings(&["guest_access"]),
                is_baseline: false,
            },
            vec![TestCase {
                name: "Guest registers and gets internet-only access".to_string(),
                use_case_id: None,
                description: String::new(),
                steps: strings(&["Join guest SSID", "Complete portal form"]),
                expected_outcome: "Guest reaches internet but not internal subnets".to_string(),
            }],
            Vec::new(),
        ),
        (
            UseCase {
                title: "IoT device profiling".to_string(),
                category: "Visibility".to_string(),
                description: "Headless devices are fingerprinted and segmented.".to_string(),
                priority: Priority::High,
                applicable_industries: strings(&["healthcare", "manufacturing"]),
                applicable_goals: strings(&["visibility", "segmentation"]),
                is_baseline: false,
            },
            Vec::new(),
            Vec::new(),
        ),
    ]
}
