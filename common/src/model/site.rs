use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Geographic region a site belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    #[default]
    NorthAmerica,
    SouthAmerica,
    Europe,
    MiddleEast,
    Africa,
    AsiaPacific,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::NorthAmerica,
        Region::SouthAmerica,
        Region::Europe,
        Region::MiddleEast,
        Region::Africa,
        Region::AsiaPacific,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::NorthAmerica => "north_america",
            Region::SouthAmerica => "south_america",
            Region::Europe => "europe",
            Region::MiddleEast => "middle_east",
            Region::Africa => "africa",
            Region::AsiaPacific => "asia_pacific",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteType {
    Headquarters,
    #[default]
    Branch,
    Campus,
    Department,
    Floor,
    Building,
    Datacenter,
    Remote,
}

impl SiteType {
    pub const ALL: [SiteType; 8] = [
        SiteType::Headquarters,
        SiteType::Branch,
        SiteType::Campus,
        SiteType::Department,
        SiteType::Floor,
        SiteType::Building,
        SiteType::Datacenter,
        SiteType::Remote,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SiteType::Headquarters => "headquarters",
            SiteType::Branch => "branch",
            SiteType::Campus => "campus",
            SiteType::Department => "department",
            SiteType::Floor => "floor",
            SiteType::Building => "building",
            SiteType::Datacenter => "datacenter",
            SiteType::Remote => "remote",
        }
    }
}

/// Where a site is in its rollout lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteStatus {
    #[default]
    Planning,
    Active,
    Deployment,
    Testing,
    Completed,
    OnHold,
}

impl SiteStatus {
    pub const ALL: [SiteStatus; 6] = [
        SiteStatus::Planning,
        SiteStatus::Active,
        SiteStatus::Deployment,
        SiteStatus::Testing,
        SiteStatus::Completed,
        SiteStatus::OnHold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SiteStatus::Planning => "planning",
            SiteStatus::Active => "active",
            SiteStatus::Deployment => "deployment",
            SiteStatus::Testing => "testing",
            SiteStatus::Completed => "completed",
            SiteStatus::OnHold => "on_hold",
        }
    }
}

/// Priority scale shared by sites, risks, use cases and requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataClassification {
    Public,
    #[default]
    Internal,
    Confidential,
    Restricted,
}

/// The fixed set of device categories tracked per site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceCategory {
    Windows,
    Mac,
    Linux,
    Ios,
    Android,
    Iot,
    Medical,
    Printers,
    Cameras,
    Voip,
    Kiosks,
    Tablets,
    Chromeos,
    Other,
}

impl DeviceCategory {
    pub const ALL: [DeviceCategory; 14] = [
        DeviceCategory::Windows,
        DeviceCategory::Mac,
        DeviceCategory::Linux,
        DeviceCategory::Ios,
        DeviceCategory::Android,
        DeviceCategory::Iot,
        DeviceCategory::Medical,
        DeviceCategory::Printers,
        DeviceCategory::Cameras,
        DeviceCategory::Voip,
        DeviceCategory::Kiosks,
        DeviceCategory::Tablets,
        DeviceCategory::Chromeos,
        DeviceCategory::Other,
    ];
}

/// Device counts per category. Its sum is not reconciled with `Site::devices`.
pub type DeviceBreakdown = BTreeMap<DeviceCategory, u32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkVendor {
    #[default]
    Cisco,
    Aruba,
    Juniper,
    Extreme,
    Meraki,
    Fortinet,
    Ubiquiti,
    Other,
}

impl NetworkVendor {
    pub const ALL: [NetworkVendor; 8] = [
        NetworkVendor::Cisco,
        NetworkVendor::Aruba,
        NetworkVendor::Juniper,
        NetworkVendor::Extreme,
        NetworkVendor::Meraki,
        NetworkVendor::Fortinet,
        NetworkVendor::Ubiquiti,
        NetworkVendor::Other,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirewallVendor {
    #[default]
    PaloAlto,
    Fortinet,
    CheckPoint,
    Cisco,
    SonicWall,
    Other,
}

impl FirewallVendor {
    pub const ALL: [FirewallVendor; 6] = [
        FirewallVendor::PaloAlto,
        FirewallVendor::Fortinet,
        FirewallVendor::CheckPoint,
        FirewallVendor::Cisco,
        FirewallVendor::SonicWall,
        FirewallVendor::Other,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityProvider {
    #[default]
    AzureAd,
    Okta,
    PingIdentity,
    ActiveDirectory,
    GoogleWorkspace,
    Other,
}

impl IdentityProvider {
    pub const ALL: [IdentityProvider; 6] = [
        IdentityProvider::AzureAd,
        IdentityProvider::Okta,
        IdentityProvider::PingIdentity,
        IdentityProvider::ActiveDirectory,
        IdentityProvider::GoogleWorkspace,
        IdentityProvider::Other,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MdmVendor {
    #[default]
    Intune,
    Jamf,
    WorkspaceOne,
    Kandji,
    MobileIron,
    None,
}

impl MdmVendor {
    pub const ALL: [MdmVendor; 6] = [
        MdmVendor::Intune,
        MdmVendor::Jamf,
        MdmVendor::WorkspaceOne,
        MdmVendor::Kandji,
        MdmVendor::MobileIron,
        MdmVendor::None,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadiusType {
    #[default]
    PortnoxCloud,
    CiscoIse,
    ArubaClearpass,
    FreeRadius,
    MicrosoftNps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceAdminMethod {
    #[default]
    Tacacs,
    Radius,
    Local,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WiredInfrastructure {
    pub vendor: NetworkVendor,
    pub model: String,
    pub switch_count: u32,
    pub dot1x: bool,
    pub mab: bool,
    pub poe: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WirelessInfrastructure {
    pub vendor: NetworkVendor,
    pub access_points: u32,
    pub wpa3_enterprise: bool,
    pub guest_portal: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FirewallInfrastructure {
    pub vendor: FirewallVendor,
    pub high_availability: bool,
    pub user_id_integration: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityProviderConfig {
    pub provider: IdentityProvider,
    pub mfa: bool,
    pub sso: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MdmConfig {
    pub vendor: MdmVendor,
    pub compliance_checks: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RadiusConfig {
    pub radius_type: RadiusType,
    pub redundant: bool,
    pub eap_tls: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceAdminConfig {
    pub method: DeviceAdminMethod,
    pub command_authorization: bool,
    pub accounting: bool,
}

/// Network access infrastructure present at a site.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Infrastructure {
    pub wired: WiredInfrastructure,
    pub wireless: WirelessInfrastructure,
    pub firewall: FirewallInfrastructure,
    pub identity_provider: IdentityProviderConfig,
    pub mdm: MdmConfig,
    pub radius: RadiusConfig,
    pub device_admin: DeviceAdminConfig,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub vlans: u32,
    /// IPv4 CIDR blocks, e.g. `10.20.0.0/16`.
    pub subnets: Vec<String>,
    pub dhcp_scopes: u32,
    pub dns_servers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SitePolicies {
    pub global: Vec<String>,
    pub site_specific: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Compliance {
    pub requirements: Vec<String>,
    pub standards: Vec<String>,
    pub data_classification: DataClassification,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecklistEntry {
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Milestone {
    pub name: String,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Risk {
    pub description: String,
    pub severity: Priority,
    pub mitigation: String,
}

/// A deployment unit: one physical or logical location being onboarded.
///
/// Every field has a default so that a partial JSON object can be used as a
/// template for bulk creation or as a patch target.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Site {
    pub id: String,
    pub name: String,
    pub region: Region,
    pub country: String,
    pub state: String,
    pub site_type: SiteType,
    pub status: SiteStatus,
    pub priority: Priority,
    pub phase: String,
    pub users: u32,
    pub devices: u32,
    pub device_breakdown: DeviceBreakdown,
    /// Role category (e.g. `project_manager`) to the people filling it.
    pub assigned_users: BTreeMap<String, Vec<String>>,
    pub infrastructure: Infrastructure,
    pub network: NetworkConfig,
    pub policies: SitePolicies,
    pub compliance: Compliance,
    pub notes: String,
    pub checklist: Vec<ChecklistEntry>,
    pub milestones: Vec<Milestone>,
    pub risks: Vec<Risk>,
    pub start_date: Option<NaiveDate>,
    pub target_date: Option<NaiveDate>,
    pub progress: u8,
}

/// Upper bound on `Site::users`.
pub const MAX_SITE_USERS: u32 = 1_000_000;
/// Upper bound on `Site::devices`.
pub const MAX_SITE_DEVICES: u32 = 10_000_000;

impl Site {
    /// Checks the field-level invariants that do not need the store.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Site name must not be empty".to_string());
        }
        if self.progress > 100 {
            return Err(format!(
                "Site progress must be between 0 and 100, got {}",
                self.progress
            ));
        }
        if self.users > MAX_SITE_USERS {
            return Err(format!(
                "Site users must not exceed {}, got {}",
                MAX_SITE_USERS, self.users
            ));
        }
        if self.devices > MAX_SITE_DEVICES {
            return Err(format!(
                "Site devices must not exceed {}, got {}",
                MAX_SITE_DEVICES, self.devices
            ));
        }
        if let (Some(start), Some(target)) = (self.start_date, self.target_date) {
            if target < start {
                return Err("Site target date must not be before its start date".to_string());
            }
        }
        Ok(())
    }

    pub fn device_breakdown_total(&self) -> u32 {
        self.device_breakdown.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let site: Site = serde_json::from_str(r#"{"name":"HQ","site_type":"headquarters"}"#)
            .expect("partial site should deserialize");
        assert_eq!(site.name, "HQ");
        assert_eq!(site.site_type, SiteType::Headquarters);
        assert_eq!(site.status, SiteStatus::Planning);
        assert!(site.device_breakdown.is_empty());
    }

    #[test]
    fn device_breakdown_uses_category_keys() {
        let site: Site = serde_json::from_str(
            r#"{"name":"A","device_breakdown":{"windows":10,"voip":3}}"#,
        )
        .expect("breakdown should deserialize");
        assert_eq!(site.device_breakdown.get(&DeviceCategory::Windows), Some(&10));
        assert_eq!(site.device_breakdown_total(), 13);

        let value = serde_json::to_value(&site).expect("serialize");
        assert_eq!(value["device_breakdown"]["voip"], 3);
    }

    #[test]
    fn validate_rejects_bad_progress_and_dates() {
        let mut site = Site {
            name: "Branch".to_string(),
            progress: 101,
            ..Default::default()
        };
        assert!(site.validate().is_err());

        site.progress = 40;
        site.start_date = NaiveDate::from_ymd_opt(2025, 6, 1);
        site.target_date = NaiveDate::from_ymd_opt(2025, 1, 1);
        assert!(site.validate().is_err());

        site.target_date = NaiveDate::from_ymd_opt(2025, 12, 1);
        assert!(site.validate().is_ok());
    }

    #[test]
    fn validate_caps_users_and_devices() {
        let mut site = Site {
            name: "Campus".to_string(),
            users: MAX_SITE_USERS,
            devices: MAX_SITE_DEVICES,
            ..Default::default()
        };
        assert!(site.validate().is_ok());
        site.users += 1;
        assert!(site.validate().is_err());
        site.users = 10;
        site.devices += 1;
        assert!(site.validate().is_err());
    }

    #[test]
    fn blank_name_is_rejected() {
        let site = Site {
            name: "   ".to_string(),
            ..Default::default()
        };
        assert!(site.validate().is_err());
    }
}
