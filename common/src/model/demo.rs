//! Demo scenario presets.
//!
//! A scenario is never stored; it only tells the loader how much data to
//! seed and which industry flavour to give it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioId {
    Corporate,
    Healthcare,
    Financial,
    Education,
    Manufacturing,
    Technology,
    Retail,
}

impl ScenarioId {
    pub const ALL: [ScenarioId; 7] = [
        ScenarioId::Corporate,
        ScenarioId::Healthcare,
        ScenarioId::Financial,
        ScenarioId::Education,
        ScenarioId::Manufacturing,
        ScenarioId::Technology,
        ScenarioId::Retail,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioId::Corporate => "corporate",
            ScenarioId::Healthcare => "healthcare",
            ScenarioId::Financial => "financial",
            ScenarioId::Education => "education",
            ScenarioId::Manufacturing => "manufacturing",
            ScenarioId::Technology => "technology",
            ScenarioId::Retail => "retail",
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenarioId::ALL
            .into_iter()
            .find(|id| id.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown demo scenario '{}'", s))
    }
}

/// Target counts a scenario seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioStats {
    pub sites: u32,
    pub users: u32,
    pub devices: u32,
    pub policies: u32,
    pub events: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoScenario {
    pub id: ScenarioId,
    pub name: String,
    pub description: String,
    pub stats: ScenarioStats,
    pub features: Vec<String>,
}

impl DemoScenario {
    pub fn preset(id: ScenarioId) -> DemoScenario {
        let (name, description, stats, features): (&str, &str, ScenarioStats, &[&str]) = match id {
            ScenarioId::Corporate => (
                "Global Corporate Enterprise",
                "Headquarters plus regional branches rolling out 802.1X everywhere.",
                ScenarioStats { sites: 12, users: 240, devices: 1800, policies: 18, events: 500 },
                &[
                    "Multi-region HQ and branch rollout",
                    "Azure AD integration",
                    "802.1X on wired and wireless",
                    "Guest access portal",
                ],
            ),
            ScenarioId::Healthcare => (
                "Regional Healthcare Network",
                "Hospitals and clinics segmenting medical and IoT devices.",
                ScenarioStats { sites: 8, users: 180, devices: 2400, policies: 22, events: 800 },
                &[
                    "Medical device segmentation",
                    "HIPAA compliance reporting",
                    "IoT profiling",
                    "Clinical VLAN isolation",
                ],
            ),
            ScenarioId::Financial => (
                "Financial Services Group",
                "Branches and trading floors under PCI-DSS and SOX controls.",
                ScenarioStats { sites: 10, users: 200, devices: 1500, policies: 26, events: 900 },
                &[
                    "PCI-DSS scoping",
                    "Privileged access control",
                    "Branch posture checks",
                    "TACACS+ device administration",
                ],
            ),
            ScenarioId::Education => (
                "University Campus System",
                "Campuses onboarding student BYOD and staff devices.",
                ScenarioStats { sites: 6, users: 300, devices: 2200, policies: 12, events: 400 },
                &[
                    "BYOD self-onboarding",
                    "Student and staff segmentation",
                    "Chromebook fleet",
                    "Guest Wi-Fi",
                ],
            ),
            ScenarioId::Manufacturing => (
                "Industrial Manufacturing",
                "Plants separating OT networks from corporate IT.",
                ScenarioStats { sites: 5, users: 120, devices: 1600, policies: 14, events: 350 },
                &[
                    "OT and IT segmentation",
                    "Industrial IoT visibility",
                    "Kiosk lockdown",
                    "Shift-based access",
                ],
            ),
            ScenarioId::Technology => (
                "Technology Company",
                "Cloud-first offices adopting zero trust access.",
                ScenarioStats { sites: 7, users: 260, devices: 2000, policies: 16, events: 600 },
                &[
                    "Zero trust network access",
                    "Developer workstation posture",
                    "Okta SSO",
                    "Cloud RADIUS",
                ],
            ),
            ScenarioId::Retail => (
                "Retail Chain",
                "Stores isolating point-of-sale, cameras and VoIP.",
                ScenarioStats { sites: 15, users: 150, devices: 1200, policies: 10, events: 300 },
                &[
                    "POS isolation",
                    "Store-level templates",
                    "Camera and VoIP segmentation",
                    "PCI scoping",
                ],
            ),
        };

        DemoScenario {
            id,
            name: name.to_string(),
            description: description.to_string(),
            stats,
            features: features.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn presets() -> Vec<DemoScenario> {
        ScenarioId::ALL.into_iter().map(DemoScenario::preset).collect()
    }
}

/// The ordered stages a demo load walks through.
pub const DEMO_STAGES: [&str; 10] = [
    "Initializing...",
    "Creating user accounts...",
    "Setting up sites...",
    "Configuring network infrastructure...",
    "Applying security policies...",
    "Registering devices...",
    "Generating activity events...",
    "Building analytics...",
    "Writing demo data...",
    "Demo data loaded successfully!",
];

/// Index of the stage during which the store is written.
pub const DEMO_WRITE_STAGE: usize = DEMO_STAGES.len() - 2;

/// Linear progress for a stage: `index / (stages - 1) * 100`.
pub fn stage_progress(index: usize) -> u32 {
    let last = DEMO_STAGES.len() - 1;
    (index.min(last) * 100 / last) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_linear_from_zero_to_hundred() {
        assert_eq!(stage_progress(0), 0);
        assert_eq!(stage_progress(DEMO_STAGES.len() - 1), 100);
        let all: Vec<u32> = (0..DEMO_STAGES.len()).map(stage_progress).collect();
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn write_stage_is_penultimate() {
        assert_eq!(DEMO_WRITE_STAGE, 8);
        assert_eq!(DEMO_STAGES[DEMO_WRITE_STAGE], "Writing demo data...");
    }

    #[test]
    fn every_scenario_round_trips_through_its_slug() {
        for id in ScenarioId::ALL {
            assert_eq!(id.as_str().parse::<ScenarioId>(), Ok(id));
            let preset = DemoScenario::preset(id);
            assert!(preset.stats.sites > 0);
            assert!(!preset.features.is_empty());
        }
        assert_eq!(DemoScenario::presets().len(), 7);
    }
}
