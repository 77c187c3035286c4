use crate::model::library::LibraryCategory;
use crate::model::site::{DeviceCategory, Priority, SiteStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Roll-up figures behind the progress and analytics views.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_sites: u32,
    pub sites_by_status: BTreeMap<SiteStatus, u32>,
    pub sites_by_priority: BTreeMap<Priority, u32>,
    /// Mean of site progress, 0 when there are no sites.
    pub average_progress: f64,
    pub total_devices: u64,
    pub devices_by_category: BTreeMap<DeviceCategory, u64>,
    pub total_site_users: u64,
    pub total_accounts: u32,
    pub total_policies: u32,
    pub enabled_policies: u32,
    pub library: BTreeMap<LibraryCategory, LibraryCounts>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LibraryCounts {
    pub default: u32,
    pub custom: u32,
}
