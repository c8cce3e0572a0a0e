use chrono::{DateTime, Utc};
use serde::Serialize;

/// Per-section counts of a loaded export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub public_id: String,
    pub container_version_id: String,
    pub export_time: DateTime<Utc>,
    pub folders: usize,
    pub tags: usize,
    pub triggers: usize,
    pub variables: usize,
    pub built_in_variables: usize,
    pub custom_templates: usize,
    /// Tags, triggers and variables that are not filed in any folder.
    pub ungrouped: usize,
}
