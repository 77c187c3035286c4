use crate::model::site::Priority;
use serde::{Deserialize, Serialize};

/// A use case with every related collection resolved.
///
/// The four nested arrays are always present; a use case without related
/// rows serializes them as `[]`, never `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseCaseDetail {
    pub id: i64,
    pub is_custom: bool,
    pub title: String,
    pub category: String,
    pub description: String,
    pub priority: Priority,
    pub applicable_industries: Vec<String>,
    pub applicable_goals: Vec<String>,
    pub is_baseline: bool,
    pub test_cases: Vec<TestCaseSummary>,
    pub documentation_links: Vec<DocumentationLink>,
    pub success_criteria: Vec<SuccessCriterion>,
    pub requirements: Vec<RequirementSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCaseSummary {
    pub id: i64,
    pub name: String,
    pub expected_outcome: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementSummary {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub justification: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentationLink {
    pub id: i64,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessCriterion {
    pub id: i64,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewDocumentationLink {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSuccessCriterion {
    pub description: String,
}
