//! Industry data sets behind the demo presets.
//!
//! `build_dataset` samples a complete, unsaved data set whose sizes match
//! the preset's target stats; `write_dataset` replaces the planning data
//! (sites, policies, user accounts and their role assignments) with it in
//! one transaction. Library rows, roles and permissions are never touched,
//! so `clear_planning_data` after a load restores the pre-load store.

use crate::error::ServiceError;
use crate::services::policies::store::insert_policy;
use crate::services::rbac::store::{assign_role, insert_user};
use crate::services::sites::generate::{self, assign_location, distribute, pick};
use crate::services::sites::store::insert_site;
use chrono::{Days, NaiveDate};
use common::model::demo::{DemoScenario, ScenarioId};
use common::model::policy::{NewPolicy, PolicyType};
use common::model::rbac::{NewUser, UserRole};
use common::model::site::{
    ChecklistEntry, DataClassification, DeviceCategory, Region, Site, SiteStatus, SiteType,
};
use common::requests::RandomizeOptions;
use rand::Rng;
use rusqlite::{params, Connection, OptionalExtension};

struct IndustryProfile {
    domain: &'static str,
    /// The first entry names the flagship site; the rest are cycled.
    site_labels: &'static [(&'static str, SiteType)],
    regions: &'static [Region],
    device_mix: &'static [(DeviceCategory, u32)],
    departments: &'static [&'static str],
    policies: &'static [(&'static str, PolicyType)],
    standards: &'static [&'static str],
    classification: DataClassification,
}

const OFFICE_MIX: &[(DeviceCategory, u32)] = &[
    (DeviceCategory::Windows, 45),
    (DeviceCategory::Mac, 15),
    (DeviceCategory::Ios, 12),
    (DeviceCategory::Android, 8),
    (DeviceCategory::Printers, 5),
    (DeviceCategory::Voip, 10),
    (DeviceCategory::Iot, 5),
];

fn profile(id: ScenarioId) -> IndustryProfile {
    match id {
        ScenarioId::Corporate => IndustryProfile {
            domain: "globalcorp.example",
            site_labels: &[
                ("Global Headquarters", SiteType::Headquarters),
                ("Regional Office", SiteType::Branch),
                ("Sales Branch", SiteType::Branch),
                ("Data Center", SiteType::Datacenter),
            ],
            regions: &[Region::NorthAmerica, Region::Europe, Region::AsiaPacific],
            device_mix: OFFICE_MIX,
            departments: &["IT", "Finance", "Sales", "Marketing", "HR", "Operations"],
            policies: &[
                ("Corporate 802.1X", PolicyType::Access),
                ("Guest internet only", PolicyType::Guest),
                ("Printer VLAN", PolicyType::Segmentation),
                ("Endpoint posture", PolicyType::Posture),
                ("SOX access review", PolicyType::Compliance),
            ],
            standards: &["SOX", "ISO 27001"],
            classification: DataClassification::Confidential,
        },
        ScenarioId::Healthcare => IndustryProfile {
            domain: "regionalhealth.example",
            site_labels: &[
                ("Main Hospital", SiteType::Campus),
                ("Clinic", SiteType::Branch),
                ("Imaging Center", SiteType::Building),
                ("Research Lab", SiteType::Department),
            ],
            regions: &[Region::NorthAmerica],
            device_mix: &[
                (DeviceCategory::Medical, 35),
                (DeviceCategory::Windows, 25),
                (DeviceCategory::Tablets, 10),
                (DeviceCategory::Ios, 8),
                (DeviceCategory::Iot, 12),
                (DeviceCategory::Printers, 5),
                (DeviceCategory::Voip, 5),
            ],
            departments: &["Clinical", "Nursing", "Radiology", "IT", "Administration"],
            policies: &[
                ("Medical device isolation", PolicyType::Segmentation),
                ("Clinician 802.1X", PolicyType::Access),
                ("Patient guest Wi-Fi", PolicyType::Guest),
                ("HIPAA audit logging", PolicyType::Compliance),
                ("Workstation posture", PolicyType::Posture),
            ],
            standards: &["HIPAA", "HITRUST"],
            classification: DataClassification::Restricted,
        },
        ScenarioId::Financial => IndustryProfile {
            domain: "finservices.example",
            site_labels: &[
                ("Headquarters", SiteType::Headquarters),
                ("Retail Branch", SiteType::Branch),
                ("Trading Floor", SiteType::Floor),
                ("Disaster Recovery Site", SiteType::Datacenter),
            ],
            regions: &[Region::NorthAmerica, Region::Europe, Region::MiddleEast],
            device_mix: &[
                (DeviceCategory::Windows, 55),
                (DeviceCategory::Mac, 5),
                (DeviceCategory::Ios, 15),
                (DeviceCategory::Voip, 12),
                (DeviceCategory::Printers, 5),
                (DeviceCategory::Kiosks, 8),
            ],
            departments: &["Trading", "Retail Banking", "Compliance", "Risk", "IT"],
            policies: &[
                ("Cardholder data segmentation", PolicyType::Segmentation),
                ("Privileged admin access", PolicyType::Access),
                ("Branch posture", PolicyType::Posture),
                ("PCI-DSS scope control", PolicyType::Compliance),
                ("Visitor access", PolicyType::Guest),
            ],
            standards: &["PCI-DSS", "SOX", "GLBA"],
            classification: DataClassification::Restricted,
        },
        ScenarioId::Education => IndustryProfile {
            domain: "stateuniversity.example",
            site_labels: &[
                ("Main Campus", SiteType::Campus),
                ("Satellite Campus", SiteType::Campus),
                ("Library", SiteType::Building),
                ("Residence Hall", SiteType::Building),
            ],
            regions: &[Region::NorthAmerica, Region::Europe],
            device_mix: &[
                (DeviceCategory::Chromeos, 25),
                (DeviceCategory::Windows, 20),
                (DeviceCategory::Mac, 15),
                (DeviceCategory::Ios, 15),
                (DeviceCategory::Android, 15),
                (DeviceCategory::Iot, 5),
                (DeviceCategory::Printers, 5),
            ],
            departments: &["Faculty", "Student Services", "Research", "IT", "Facilities"],
            policies: &[
                ("Student BYOD onboarding", PolicyType::Access),
                ("Staff and student split", PolicyType::Segmentation),
                ("Campus guest Wi-Fi", PolicyType::Guest),
                ("FERPA records access", PolicyType::Compliance),
            ],
            standards: &["FERPA"],
            classification: DataClassification::Internal,
        },
        ScenarioId::Manufacturing => IndustryProfile {
            domain: "industrialmfg.example",
            site_labels: &[
                ("Assembly Plant", SiteType::Campus),
                ("Warehouse", SiteType::Building),
                ("Engineering Office", SiteType::Branch),
            ],
            regions: &[Region::NorthAmerica, Region::Europe, Region::AsiaPacific, Region::SouthAmerica],
            device_mix: &[
                (DeviceCategory::Iot, 40),
                (DeviceCategory::Windows, 25),
                (DeviceCategory::Kiosks, 10),
                (DeviceCategory::Cameras, 10),
                (DeviceCategory::Tablets, 10),
                (DeviceCategory::Printers, 5),
            ],
            departments: &["Production", "Quality", "Engineering", "Logistics", "IT"],
            policies: &[
                ("OT network isolation", PolicyType::Segmentation),
                ("Shift kiosk lockdown", PolicyType::Access),
                ("Contractor access", PolicyType::Guest),
                ("Engineering workstation posture", PolicyType::Posture),
            ],
            standards: &["IEC 62443", "ISO 9001"],
            classification: DataClassification::Confidential,
        },
        ScenarioId::Technology => IndustryProfile {
            domain: "techco.example",
            site_labels: &[
                ("Headquarters", SiteType::Headquarters),
                ("Engineering Hub", SiteType::Branch),
                ("Remote Office", SiteType::Remote),
            ],
            regions: &[Region::NorthAmerica, Region::Europe, Region::AsiaPacific],
            device_mix: &[
                (DeviceCategory::Mac, 45),
                (DeviceCategory::Linux, 15),
                (DeviceCategory::Windows, 10),
                (DeviceCategory::Ios, 15),
                (DeviceCategory::Android, 10),
                (DeviceCategory::Iot, 5),
            ],
            departments: &["Engineering", "Product", "Design", "Sales", "IT"],
            policies: &[
                ("Zero trust device access", PolicyType::Access),
                ("Developer workstation posture", PolicyType::Posture),
                ("Lab network segmentation", PolicyType::Segmentation),
                ("SOC 2 evidence collection", PolicyType::Compliance),
            ],
            standards: &["SOC 2", "ISO 27001"],
            classification: DataClassification::Confidential,
        },
        ScenarioId::Retail => IndustryProfile {
            domain: "retailchain.example",
            site_labels: &[
                ("Corporate Office", SiteType::Headquarters),
                ("Store", SiteType::Branch),
                ("Distribution Center", SiteType::Building),
            ],
            regions: &[Region::NorthAmerica, Region::SouthAmerica],
            device_mix: &[
                (DeviceCategory::Kiosks, 30),
                (DeviceCategory::Windows, 15),
                (DeviceCategory::Cameras, 20),
                (DeviceCategory::Voip, 10),
                (DeviceCategory::Tablets, 15),
                (DeviceCategory::Printers, 10),
            ],
            departments: &["Store Operations", "Merchandising", "Loss Prevention", "IT"],
            policies: &[
                ("POS isolation", PolicyType::Segmentation),
                ("Store associate access", PolicyType::Access),
                ("Customer Wi-Fi", PolicyType::Guest),
                ("PCI scope enforcement", PolicyType::Compliance),
            ],
            standards: &["PCI-DSS"],
            classification: DataClassification::Confidential,
        },
    }
}

const FIRST_NAMES: [&str; 12] = [
    "Alex", "Sam", "Jordan", "Taylor", "Morgan", "Casey", "Riley", "Jamie", "Avery", "Quinn",
    "Robin", "Drew",
];
const LAST_NAMES: [&str; 12] = [
    "Garcia", "Chen", "Okafor", "Novak", "Silva", "Patel", "Kim", "Larsen", "Haddad", "Murphy",
    "Rossi", "Tanaka",
];
const CHECKLIST: [&str; 4] = [
    "Inventory access switches",
    "Confirm RADIUS reachability",
    "Pilot user group identified",
    "Monitor mode enabled",
];

fn base_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap_or_default()
}

/// Policy planned for a site by index into `DemoDataset::sites`, or global.
#[derive(Debug, Clone)]
pub struct PlannedPolicy {
    pub policy: NewPolicy,
    pub site_index: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct PlannedUser {
    pub user: NewUser,
    pub role: &'static str,
}

#[derive(Debug, Clone)]
pub struct DemoDataset {
    pub sites: Vec<Site>,
    pub users: Vec<PlannedUser>,
    pub policies: Vec<PlannedPolicy>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrittenCounts {
    pub sites: usize,
    pub users: usize,
    pub policies: usize,
}

/// Splits `total` into `parts` near-equal shares, larger ones first.
fn split(total: u32, parts: usize) -> Vec<u32> {
    if parts == 0 {
        return Vec::new();
    }
    let parts_u32 = parts as u32;
    (0..parts_u32)
        .map(|i| total / parts_u32 + u32::from(i < total % parts_u32))
        .collect()
}

fn progress_for<R: Rng + ?Sized>(status: SiteStatus, rng: &mut R) -> u8 {
    match status {
        SiteStatus::Planning => rng.random_range(0..=15),
        SiteStatus::OnHold => rng.random_range(10..=40),
        SiteStatus::Active => rng.random_range(20..=50),
        SiteStatus::Deployment => rng.random_range(40..=75),
        SiteStatus::Testing => rng.random_range(70..=95),
        SiteStatus::Completed => 100,
    }
}

fn build_site<R: Rng + ?Sized>(
    profile: &IndustryProfile,
    index: usize,
    users: u32,
    devices: u32,
    rng: &mut R,
) -> Site {
    let (label, site_type) = if index == 0 {
        profile.site_labels[0]
    } else {
        let rest = &profile.site_labels[1.min(profile.site_labels.len() - 1)..];
        rest[(index - 1) % rest.len()]
    };
    let name = if index == 0 {
        label.to_string()
    } else {
        format!("{} {:02}", label, index)
    };

    let status = pick(rng, &SiteStatus::ALL);
    let start_date = base_start_date()
        .checked_add_days(Days::new(rng.random_range(0..120)))
        .unwrap_or_else(base_start_date);
    let target_date = start_date
        .checked_add_days(Days::new(rng.random_range(90..240)))
        .unwrap_or(start_date);

    let mut site = Site {
        name,
        site_type,
        status,
        users,
        devices,
        device_breakdown: distribute(devices, profile.device_mix),
        progress: progress_for(status, rng),
        start_date: Some(start_date),
        target_date: Some(target_date),
        ..Default::default()
    };
    let region = pick(rng, profile.regions);
    assign_location(&mut site, region, rng);
    generate::randomize(
        &mut site,
        &RandomizeOptions {
            vendors: true,
            priority: true,
            phase: true,
            ..Default::default()
        },
        rng,
    );

    let infra = &mut site.infrastructure;
    infra.wired.switch_count = (devices / 48).max(1);
    infra.wired.dot1x = true;
    infra.wired.mab = true;
    infra.wired.poe = true;
    infra.wireless.access_points = (users / 25).max(1);
    infra.wireless.wpa3_enterprise = rng.random_bool(0.5);
    infra.wireless.guest_portal = true;
    infra.identity_provider.mfa = true;
    infra.identity_provider.sso = true;
    infra.mdm.compliance_checks = true;
    infra.radius.eap_tls = true;

    site.network.vlans = rng.random_range(4..=12);
    site.network.dhcp_scopes = site.network.vlans;
    site.network.subnets = vec![format!("10.{}.0.0/16", (index % 250) + 1)];
    site.network.dns_servers = vec!["10.0.0.53".to_string(), "10.0.1.53".to_string()];

    site.compliance.standards = profile.standards.iter().map(|s| s.to_string()).collect();
    site.compliance.data_classification = profile.classification;
    let done = usize::from(site.progress) * CHECKLIST.len() / 100;
    site.checklist = CHECKLIST
        .iter()
        .enumerate()
        .map(|(i, title)| ChecklistEntry {
            title: title.to_string(),
            completed: i < done,
        })
        .collect();
    site
}

/// Samples a data set whose counts match `scenario.stats`. Nothing is written.
pub fn build_dataset<R: Rng + ?Sized>(scenario: &DemoScenario, rng: &mut R) -> DemoDataset {
    let profile = profile(scenario.id);
    let stats = scenario.stats;
    let site_count = stats.sites as usize;

    let user_shares = split(stats.users, site_count);
    let device_shares = split(stats.devices, site_count);
    let sites = (0..site_count)
        .map(|i| build_site(&profile, i, user_shares[i], device_shares[i], rng))
        .collect();

    let users = (0..stats.users as usize)
        .map(|i| {
            let first = FIRST_NAMES[i % FIRST_NAMES.len()];
            let last = LAST_NAMES[(i / FIRST_NAMES.len()) % LAST_NAMES.len()];
            let role = match i {
                0 => "Administrator",
                i if i % 10 == 1 => "Project Manager",
                _ => "Viewer",
            };
            PlannedUser {
                user: NewUser {
                    name: format!("{} {}", first, last),
                    email: format!(
                        "{}.{}{}@{}",
                        first.to_lowercase(),
                        last.to_lowercase(),
                        i + 1,
                        profile.domain
                    ),
                    department: pick(rng, profile.departments).to_string(),
                    is_active: rng.random_bool(0.95),
                },
                role,
            }
        })
        .collect();

    let policies = (0..stats.policies as usize)
        .map(|i| {
            let (base, policy_type) = profile.policies[i % profile.policies.len()];
            let round = i / profile.policies.len();
            let site_index = (round > 0 && site_count > 0).then(|| (i * 7) % site_count);
            let name = match site_index {
                Some(s) => format!("{} (site {:02})", base, s + 1),
                None => base.to_string(),
            };
            PlannedPolicy {
                policy: NewPolicy {
                    name,
                    policy_type,
                    description: format!("{} policy for the {} rollout", policy_type.as_str(), scenario.name),
                    enabled: rng.random_bool(0.85),
                    site_id: None,
                },
                site_index,
            }
        })
        .collect();

    DemoDataset {
        sites,
        users,
        policies,
    }
}

/// Removes sites, policies, user accounts and role assignments.
pub fn clear_planning_data(conn: &Connection) -> Result<(), ServiceError> {
    conn.execute_batch(
        "DELETE FROM user_roles;
         DELETE FROM users;
         DELETE FROM policies;
         DELETE FROM sites;",
    )?;
    Ok(())
}

/// Replaces the planning data with `dataset`; all-or-nothing.
pub fn write_dataset(conn: &mut Connection, dataset: DemoDataset) -> Result<WrittenCounts, ServiceError> {
    let tx = conn.transaction()?;
    clear_planning_data(&tx)?;

    let site_ids = dataset
        .sites
        .into_iter()
        .map(|site| insert_site(&tx, site).map(|created| created.id))
        .collect::<Result<Vec<_>, _>>()?;

    let users = dataset.users.len();
    for planned in dataset.users {
        let user = insert_user(&tx, planned.user)?;
        let role_id: Option<i64> = tx
            .query_row("SELECT id FROM roles WHERE name = ?1", params![planned.role], |row| row.get(0))
            .optional()?;
        if let Some(role_id) = role_id {
            assign_role(
                &tx,
                UserRole {
                    user_id: user.id,
                    role_id,
                },
            )?;
        }
    }

    let policies = dataset.policies.len();
    for planned in dataset.policies {
        let mut policy = planned.policy;
        policy.site_id = planned.site_index.and_then(|i| site_ids.get(i).cloned());
        insert_policy(&tx, policy)?;
    }

    tx.commit()?;
    Ok(WrittenCounts {
        sites: site_ids.len(),
        users,
        policies,
    })
}
