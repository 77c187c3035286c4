use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyType {
    #[default]
    Access,
    Segmentation,
    Posture,
    Guest,
    Compliance,
}

impl PolicyType {
    pub const ALL: [PolicyType; 5] = [
        PolicyType::Access,
        PolicyType::Segmentation,
        PolicyType::Posture,
        PolicyType::Guest,
        PolicyType::Compliance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyType::Access => "access",
            PolicyType::Segmentation => "segmentation",
            PolicyType::Posture => "posture",
            PolicyType::Guest => "guest",
            PolicyType::Compliance => "compliance",
        }
    }
}

impl FromStr for PolicyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown policy type '{}'", s))
    }
}

/// A network access policy, global or scoped to one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub id: i64,
    pub name: String,
    pub policy_type: PolicyType,
    pub description: String,
    pub enabled: bool,
    pub site_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPolicy {
    pub name: String,
    #[serde(default)]
    pub policy_type: PolicyType,
    #[serde(default)]
    pub description: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub site_id: Option<String>,
}

fn enabled_by_default() -> bool {
    true
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyPatch {
    pub name: Option<String>,
    pub policy_type: Option<PolicyType>,
    pub description: Option<String>,
    pub enabled: Option<bool>,
    pub site_id: Option<String>,
}
