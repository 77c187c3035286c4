//! Library collections: reusable catalogue rows (vendors, device types,
//! checklist items, use cases, test cases, requirements, test-matrix
//! entries) that planners pick from while designing a rollout.
//!
//! Rows are either seeded defaults (`is_custom = false`) or added by users
//! (`is_custom = true`). Each category has its own field schema, expressed as
//! one variant of [`LibraryItemData`].

use crate::model::site::{DeviceCategory, Priority};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of library collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LibraryCategory {
    NetworkVendors,
    SecurityVendors,
    DeviceTypes,
    ChecklistItems,
    UseCases,
    TestCases,
    Requirements,
    TestMatrix,
}

impl LibraryCategory {
    pub const ALL: [LibraryCategory; 8] = [
        LibraryCategory::NetworkVendors,
        LibraryCategory::SecurityVendors,
        LibraryCategory::DeviceTypes,
        LibraryCategory::ChecklistItems,
        LibraryCategory::UseCases,
        LibraryCategory::TestCases,
        LibraryCategory::Requirements,
        LibraryCategory::TestMatrix,
    ];

    /// Slug used in URLs and in the `kind` tag of serialized items.
    pub fn as_str(&self) -> &'static str {
        match self {
            LibraryCategory::NetworkVendors => "network_vendors",
            LibraryCategory::SecurityVendors => "security_vendors",
            LibraryCategory::DeviceTypes => "device_types",
            LibraryCategory::ChecklistItems => "checklist_items",
            LibraryCategory::UseCases => "use_cases",
            LibraryCategory::TestCases => "test_cases",
            LibraryCategory::Requirements => "requirements",
            LibraryCategory::TestMatrix => "test_matrix",
        }
    }
}

impl fmt::Display for LibraryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LibraryCategory {
    type Err = String;

    /// Accepts both `snake_case` and `kebab-case` slugs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        LibraryCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| format!("Unknown library category '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorType {
    Wired,
    Wireless,
    #[default]
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityVendorType {
    #[default]
    Firewall,
    Edr,
    Siem,
    Identity,
    Mdm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestResult {
    #[default]
    NotTested,
    Passed,
    Failed,
    Partial,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkVendorItem {
    pub name: String,
    pub vendor_type: VendorType,
    pub models: Vec<String>,
    pub nac_integration: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityVendorItem {
    pub name: String,
    pub vendor_type: SecurityVendorType,
    pub integrations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceTypeItem {
    pub name: String,
    pub device_category: DeviceCategory,
    pub operating_system: String,
    pub description: String,
}

impl Default for DeviceTypeItem {
    fn default() -> Self {
        DeviceTypeItem {
            name: String::new(),
            device_category: DeviceCategory::Other,
            operating_system: String::new(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecklistItem {
    pub title: String,
    pub phase: String,
    pub description: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UseCase {
    pub title: String,
    pub category: String,
    pub description: String,
    pub priority: Priority,
    pub applicable_industries: Vec<String>,
    pub applicable_goals: Vec<String>,
    pub is_baseline: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TestCase {
    pub name: String,
    pub use_case_id: Option<i64>,
    pub description: String,
    pub steps: Vec<String>,
    pub expected_outcome: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Requirement {
    pub title: String,
    pub description: String,
    pub justification: String,
    pub priority: Priority,
    pub use_case_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TestMatrixEntry {
    pub vendor: String,
    pub device_type: String,
    pub test_case_id: Option<i64>,
    pub result: TestResult,
    pub notes: String,
}

/// Category-specific payload of a library row, tagged (`kind`) by its
/// category slug. The tag is not `category` because use cases carry a
/// `category` field of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LibraryItemData {
    NetworkVendors(NetworkVendorItem),
    SecurityVendors(SecurityVendorItem),
    DeviceTypes(DeviceTypeItem),
    ChecklistItems(ChecklistItem),
    UseCases(UseCase),
    TestCases(TestCase),
    Requirements(Requirement),
    TestMatrix(TestMatrixEntry),
}

impl LibraryItemData {
    pub fn category(&self) -> LibraryCategory {
        match self {
            LibraryItemData::NetworkVendors(_) => LibraryCategory::NetworkVendors,
            LibraryItemData::SecurityVendors(_) => LibraryCategory::SecurityVendors,
            LibraryItemData::DeviceTypes(_) => LibraryCategory::DeviceTypes,
            LibraryItemData::ChecklistItems(_) => LibraryCategory::ChecklistItems,
            LibraryItemData::UseCases(_) => LibraryCategory::UseCases,
            LibraryItemData::TestCases(_) => LibraryCategory::TestCases,
            LibraryItemData::Requirements(_) => LibraryCategory::Requirements,
            LibraryItemData::TestMatrix(_) => LibraryCategory::TestMatrix,
        }
    }

    /// Human-readable label of the row, whichever field carries it.
    pub fn label(&self) -> &str {
        match self {
            LibraryItemData::NetworkVendors(v) => &v.name,
            LibraryItemData::SecurityVendors(v) => &v.name,
            LibraryItemData::DeviceTypes(d) => &d.name,
            LibraryItemData::ChecklistItems(c) => &c.title,
            LibraryItemData::UseCases(u) => &u.title,
            LibraryItemData::TestCases(t) => &t.name,
            LibraryItemData::Requirements(r) => &r.title,
            LibraryItemData::TestMatrix(m) => &m.vendor,
        }
    }

    /// Required-field check run before every insert or update.
    pub fn validate(&self) -> Result<(), String> {
        if self.label().trim().is_empty() {
            let field = match self {
                LibraryItemData::ChecklistItems(_)
                | LibraryItemData::UseCases(_)
                | LibraryItemData::Requirements(_) => "title",
                LibraryItemData::TestMatrix(_) => "vendor",
                _ => "name",
            };
            return Err(format!(
                "Field '{}' is required for {} items",
                field,
                self.category()
            ));
        }
        match self {
            LibraryItemData::TestCases(t) if t.expected_outcome.trim().is_empty() => {
                Err("Field 'expected_outcome' is required for test_cases items".to_string())
            }
            LibraryItemData::Requirements(r) if r.description.trim().is_empty() => {
                Err("Field 'description' is required for requirements items".to_string())
            }
            LibraryItemData::TestMatrix(m) if m.device_type.trim().is_empty() => {
                Err("Field 'device_type' is required for test_matrix items".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// A stored library row as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryItem {
    pub id: i64,
    pub is_custom: bool,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub data: LibraryItemData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_both_slug_styles() {
        assert_eq!(
            "network-vendors".parse::<LibraryCategory>(),
            Ok(LibraryCategory::NetworkVendors)
        );
        assert_eq!(
            "test_matrix".parse::<LibraryCategory>(),
            Ok(LibraryCategory::TestMatrix)
        );
        assert!("widgets".parse::<LibraryCategory>().is_err());
    }

    #[test]
    fn item_serializes_flat_with_kind_tag() {
        let item = LibraryItem {
            id: 7,
            is_custom: true,
            created_at: Utc::now(),
            data: LibraryItemData::TestCases(TestCase {
                name: "EAP-TLS auth".to_string(),
                expected_outcome: "Access granted".to_string(),
                ..Default::default()
            }),
        };
        let value = serde_json::to_value(&item).expect("serialize");
        assert_eq!(value["id"], 7);
        assert_eq!(value["is_custom"], true);
        assert_eq!(value["kind"], "test_cases");
        assert_eq!(value["name"], "EAP-TLS auth");
        assert_eq!(value["expected_outcome"], "Access granted");
    }

    #[test]
    fn data_ignores_unknown_fields_such_as_is_custom() {
        let data: LibraryItemData = serde_json::from_str(
            r#"{"kind":"use_cases","title":"Guest access","category":"Guest","is_custom":false,"id":99}"#,
        )
        .expect("deserialize");
        assert_eq!(data.category(), LibraryCategory::UseCases);
        assert_eq!(data.label(), "Guest access");
    }

    #[test]
    fn validate_requires_category_fields() {
        let missing_title = LibraryItemData::UseCases(UseCase::default());
        assert!(missing_title.validate().is_err());

        let missing_outcome = LibraryItemData::TestCases(TestCase {
            name: "MAB fallback".to_string(),
            ..Default::default()
        });
        let err = missing_outcome.validate().unwrap_err();
        assert!(err.contains("expected_outcome"));
    }
}
