use crate::model::demo::ScenarioId;
use crate::model::site::{Priority, Region, Site, SiteStatus};
use serde::Deserialize;

/// Which field groups bulk creation replaces with sampled values.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RandomizeOptions {
    pub location: bool,
    pub users: bool,
    pub devices: bool,
    pub vendors: bool,
    pub priority: bool,
    pub phase: bool,
}

/// Request payload for `POST /api/sites/bulk`.
#[derive(Deserialize, Debug, Clone)]
pub struct BulkCreateSitesRequest {
    /// Signed so out-of-range values reach validation instead of failing to parse.
    pub count: i64,
    /// Must contain the `{n}` placeholder.
    pub naming_convention: String,
    #[serde(default)]
    pub template: Site,
    #[serde(default)]
    pub randomize: RandomizeOptions,
}

/// Request payload for `POST /api/demo/load`.
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct LoadDemoRequest {
    pub scenario: ScenarioId,
}

/// Query filters shared by site listing and export.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct SiteFilter {
    pub status: Option<SiteStatus>,
    pub priority: Option<Priority>,
    pub region: Option<Region>,
    /// Case-insensitive match against name, country and state.
    pub search: Option<String>,
}

impl SiteFilter {
    pub fn matches(&self, site: &Site) -> bool {
        if self.status.is_some_and(|s| s != site.status) {
            return false;
        }
        if self.priority.is_some_and(|p| p != site.priority) {
            return false;
        }
        if self.region.is_some_and(|r| r != site.region) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                [&site.name, &site.country, &site.state]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&term))
            }
            _ => true,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

/// Query for `GET /api/sites/export`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
    pub status: Option<SiteStatus>,
    pub priority: Option<Priority>,
    pub region: Option<Region>,
    pub search: Option<String>,
}

impl ExportQuery {
    pub fn filter(&self) -> SiteFilter {
        SiteFilter {
            status: self.status,
            priority: self.priority,
            region: self.region,
            search: self.search.clone(),
        }
    }
}

/// Query for `DELETE /api/rbac/user-roles`.
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct UserRoleQuery {
    pub user_id: i64,
    pub role_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_request_accepts_partial_template() {
        let req: BulkCreateSitesRequest = serde_json::from_str(
            r#"{"count":3,"naming_convention":"Site-{n}","template":{"users":50}}"#,
        )
        .expect("deserialize");
        assert_eq!(req.count, 3);
        assert_eq!(req.template.users, 50);
        assert_eq!(req.randomize, RandomizeOptions::default());
    }

    #[test]
    fn filter_matches_search_case_insensitively() {
        let site = Site {
            name: "Berlin Campus".to_string(),
            country: "Germany".to_string(),
            ..Default::default()
        };
        let filter = SiteFilter {
            search: Some("berlin".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&site));

        let filter = SiteFilter {
            status: Some(SiteStatus::Completed),
            ..Default::default()
        };
        assert!(!filter.matches(&site));
    }
}
