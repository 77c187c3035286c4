use crate::model::demo::ScenarioId;
use crate::model::library::LibraryCategory;
use serde::{Deserialize, Serialize};

/// Published whenever stored data changes so open views can refetch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DataEvent {
    SitesChanged,
    LibraryChanged { category: LibraryCategory },
    PoliciesChanged,
    RbacChanged,
    DemoLoaded { scenario: ScenarioId },
    DataCleared,
}
